//! API gateway abstraction.
//!
//! The engine talks to the backend only through [`ApiGateway`], so it can
//! run against the REST API ([`RestGateway`]) or a scripted double
//! ([`mock::MockGateway`]).

pub mod mock;
mod rest;

pub use rest::RestGateway;

use async_trait::async_trait;
use heavy_model::Entity;
use serde::{Deserialize, Serialize};

use crate::command::ListQuery;
use crate::error::GatewayResult;
use crate::store::Pagination;

/// `meta` block of a paginated list envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl From<PageMeta> for Pagination {
    fn from(meta: PageMeta) -> Self {
        Pagination {
            total: meta.total,
            current_page: meta.current_page,
            last_page: meta.last_page,
        }
    }
}

/// One page of records: `{ data: [...], meta: {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Entity"))]
pub struct Page<E> {
    pub data: Vec<E>,
    /// Absent on endpoints that do not paginate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<E> Page<E> {
    /// Pagination for this page; an unpaginated response counts as a
    /// single page holding every record.
    pub fn pagination(&self) -> Pagination {
        match self.meta {
            Some(meta) => meta.into(),
            None => Pagination {
                total: self.data.len() as u64,
                current_page: 1,
                last_page: 1,
            },
        }
    }
}

/// Single-record envelope: `{ data: {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Entity"))]
pub struct Item<E> {
    pub data: E,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// REST operations the engine needs for one resource.
#[async_trait]
pub trait ApiGateway<E: Entity>: Send + Sync {
    /// `GET /{resource}?page=&per_page=&search=&...`
    async fn list(&self, query: &ListQuery) -> GatewayResult<Page<E>>;

    /// `GET /{resource}/{id}`
    async fn get(&self, id: &E::Id) -> GatewayResult<E>;

    /// `POST /{resource}`
    async fn create(&self, payload: &E::Create) -> GatewayResult<E>;

    /// `PUT /{resource}/{id}`
    async fn update(&self, id: &E::Id, payload: &E::Update) -> GatewayResult<E>;

    /// `DELETE /{resource}/{id}`
    async fn delete(&self, id: &E::Id) -> GatewayResult<()>;
}
