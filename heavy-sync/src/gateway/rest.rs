//! REST implementation of the API gateway.

use std::fmt::Display;
use std::time::Duration;

use async_trait::async_trait;
use heavy_model::Entity;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiGateway, Item, Page};
use crate::command::ListQuery;
use crate::config::SyncConfig;
use crate::error::{ErrorBody, GatewayError, GatewayResult, SyncError, SyncResult};

/// HTTP client for the console's REST API. One instance serves every
/// resource; the path comes from [`Entity::RESOURCE`].
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl RestGateway {
    /// Creates a gateway from configuration.
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        config.validate()?;
        let mut builder = Client::builder();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| SyncError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn member_url(&self, resource: &str, id: &dyn Display) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and checks the status. Non-2xx responses become
    /// [`GatewayError::Status`] carrying whatever JSON body was sent.
    async fn execute(&self, request: RequestBuilder) -> GatewayResult<reqwest::Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
        debug!("Request failed with {}: {:?}", status, body.message);
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let response = self.execute(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl<E: Entity> ApiGateway<E> for RestGateway {
    async fn list(&self, query: &ListQuery) -> GatewayResult<Page<E>> {
        let request = self
            .client
            .get(self.collection_url(E::RESOURCE))
            .query(&query.to_pairs());
        self.fetch(request).await
    }

    async fn get(&self, id: &E::Id) -> GatewayResult<E> {
        let request = self.client.get(self.member_url(E::RESOURCE, id));
        let item: Item<E> = self.fetch(request).await?;
        Ok(item.data)
    }

    async fn create(&self, payload: &E::Create) -> GatewayResult<E> {
        let request = self
            .client
            .post(self.collection_url(E::RESOURCE))
            .json(payload);
        let item: Item<E> = self.fetch(request).await?;
        Ok(item.data)
    }

    async fn update(&self, id: &E::Id, payload: &E::Update) -> GatewayResult<E> {
        let request = self
            .client
            .put(self.member_url(E::RESOURCE, id))
            .json(payload);
        let item: Item<E> = self.fetch(request).await?;
        Ok(item.data)
    }

    async fn delete(&self, id: &E::Id) -> GatewayResult<()> {
        let request = self.client.delete(self.member_url(E::RESOURCE, id));
        self.execute(request).await?;
        Ok(())
    }
}
