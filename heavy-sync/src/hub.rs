//! Composition root.
//!
//! A [`SyncHub`] is built once per session and passed explicitly to whatever
//! needs data. Engines are created lazily, one per entity type, the first
//! time [`SyncHub::resource`] is called for that type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use heavy_model::Entity;
use tokio::sync::broadcast;
use tracing::debug;

use crate::command::{Command, Dispatcher, ListQuery, Ticket};
use crate::config::SyncConfig;
use crate::engine::SyncEngine;
use crate::error::SyncResult;
use crate::gateway::{ApiGateway, RestGateway};
use crate::notice::{Notice, Notices};
use crate::view::View;

/// Dispatch and read access to one resource.
pub struct Resource<E: Entity> {
    dispatcher: Dispatcher<E>,
    view: View<E>,
}

impl<E: Entity> Clone for Resource<E> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            view: self.view.clone(),
        }
    }
}

impl<E: Entity> fmt::Debug for Resource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("resource", &E::RESOURCE)
            .field("open", &self.dispatcher.is_open())
            .finish()
    }
}

impl<E: Entity> Resource<E> {
    pub(crate) fn new(dispatcher: Dispatcher<E>, view: View<E>) -> Self {
        Self { dispatcher, view }
    }

    pub fn dispatch(&self, command: Command<E>) -> Ticket<E> {
        self.dispatcher.dispatch(command)
    }

    pub fn dispatcher(&self) -> &Dispatcher<E> {
        &self.dispatcher
    }

    /// A fresh view; each view tracks its own `changed()` position.
    pub fn view(&self) -> View<E> {
        self.view.clone()
    }

    pub fn load_list(&self, query: ListQuery) -> Ticket<E> {
        self.dispatch(Command::LoadList(query))
    }

    pub fn load_one(&self, id: E::Id) -> Ticket<E> {
        self.dispatch(Command::LoadOne(id))
    }

    pub fn create(&self, payload: E::Create) -> Ticket<E> {
        self.dispatch(Command::Create(payload))
    }

    pub fn update(&self, id: E::Id, payload: E::Update) -> Ticket<E> {
        self.dispatch(Command::Update(id, payload))
    }

    pub fn delete(&self, id: E::Id) -> Ticket<E> {
        self.dispatch(Command::Delete(id))
    }

    pub fn reset(&self) -> Ticket<E> {
        self.dispatch(Command::Reset)
    }
}

/// Owns the gateway, the notice channel and one engine per entity type.
pub struct SyncHub<G = RestGateway> {
    gateway: Arc<G>,
    notices: Notices,
    default_per_page: u32,
    resources: Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl SyncHub<RestGateway> {
    /// Builds a hub that talks to the REST API described by `config`.
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        let gateway = RestGateway::new(config)?;
        Ok(Self::with_gateway(gateway, config))
    }
}

impl<G: Send + Sync + 'static> SyncHub<G> {
    /// Builds a hub around an existing gateway.
    pub fn with_gateway(gateway: G, config: &SyncConfig) -> Self {
        Self {
            gateway: Arc::new(gateway),
            notices: Notices::new(config.notice_capacity),
            default_per_page: config.default_per_page,
            resources: Mutex::new(HashMap::new()),
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Subscribes to notices from every resource.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Handle for `E`, spawning its engine on first use.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn resource<E>(&self) -> Resource<E>
    where
        E: Entity,
        G: ApiGateway<E>,
    {
        let mut resources = self.resources.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = resources
            .get(&TypeId::of::<E>())
            .and_then(|entry| entry.downcast_ref::<Resource<E>>())
        {
            return existing.clone();
        }

        debug!("Starting engine for {}", E::RESOURCE);
        let (engine, resource) = SyncEngine::new(
            Arc::clone(&self.gateway),
            self.notices.clone(),
            self.default_per_page,
        );
        tokio::spawn(engine.run());
        resources.insert(TypeId::of::<E>(), Box::new(resource.clone()));
        resource
    }
}

impl<G> fmt::Debug for SyncHub<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let started = self
            .resources
            .lock()
            .map(|resources| resources.len())
            .unwrap_or_default();
        f.debug_struct("SyncHub")
            .field("default_per_page", &self.default_per_page)
            .field("resources", &started)
            .finish()
    }
}
