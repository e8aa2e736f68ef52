//! Commands and the dispatcher.
//!
//! A [`Command`] is inert data. Handing one to a [`Dispatcher`] enqueues it
//! for the resource's engine and returns a [`Ticket`] that settles exactly
//! once, for that dispatch only.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use heavy_model::Entity;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::engine::Published;
use crate::error::{SyncError, SyncFailure, SyncResult};
use crate::store::Pagination;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Parameters of a list fetch. Unset or empty values are left out of the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortDirection>,
    /// Resource-specific filters, sent verbatim (`tercero_id=4`).
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Query for one page with the server's default page size.
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Asks the server to sort by `field`. The committed list keeps the
    /// server's order instead of the entity's own comparator.
    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(direction);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.insert(key.into(), value.to_string());
        self
    }

    /// Query-string pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sort_by".to_string(), sort_by.to_string()));
            if let Some(direction) = self.sort_order {
                pairs.push(("sort_order".to_string(), direction.as_str().to_string()));
            }
        }
        for (key, value) in &self.filters {
            if !value.is_empty() {
                pairs.push((key.clone(), value.clone()));
            }
        }
        pairs
    }
}

/// An intended state change for one resource.
pub enum Command<E: Entity> {
    LoadList(ListQuery),
    LoadOne(E::Id),
    Create(E::Create),
    Update(E::Id, E::Update),
    Delete(E::Id),
    /// Return the collection to its initial, empty state.
    Reset,
}

impl<E: Entity> Command<E> {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadList(_) => "load_list",
            Command::LoadOne(_) => "load_one",
            Command::Create(_) => "create",
            Command::Update(..) => "update",
            Command::Delete(_) => "delete",
            Command::Reset => "reset",
        }
    }
}

impl<E: Entity> fmt::Debug for Command<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::LoadList(query) => f.debug_tuple("LoadList").field(query).finish(),
            Command::LoadOne(id) => f.debug_tuple("LoadOne").field(id).finish(),
            Command::Create(payload) => f.debug_tuple("Create").field(payload).finish(),
            Command::Update(id, payload) => {
                f.debug_tuple("Update").field(id).field(payload).finish()
            }
            Command::Delete(id) => f.debug_tuple("Delete").field(id).finish(),
            Command::Reset => f.write_str("Reset"),
        }
    }
}

/// Terminal outcome of one dispatch.
#[derive(Debug, Clone)]
pub enum Settlement<E: Entity> {
    /// The list page was committed.
    Listed(Pagination),
    Fetched(Arc<E>),
    Created(Arc<E>),
    Updated(Arc<E>),
    Deleted(E::Id),
    Reset,
    /// A newer list fetch was dispatched first; this response was discarded.
    Superseded,
    Failed(SyncFailure),
}

impl<E: Entity> Settlement<E> {
    pub fn is_success(&self) -> bool {
        !matches!(self, Settlement::Failed(_) | Settlement::Superseded)
    }

    pub fn failure(&self) -> Option<&SyncFailure> {
        match self {
            Settlement::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// The record carried by a fetch, create or update settlement.
    pub fn record(&self) -> Option<&Arc<E>> {
        match self {
            Settlement::Fetched(record)
            | Settlement::Created(record)
            | Settlement::Updated(record) => Some(record),
            _ => None,
        }
    }
}

/// A command paired with the channel its settlement goes back on.
pub(crate) struct Envelope<E: Entity> {
    pub command: Command<E>,
    pub reply: oneshot::Sender<Settlement<E>>,
}

/// Completion handle for a single dispatch. Dropping it is fine; the
/// command still runs.
#[must_use = "dropping a ticket is allowed but discards the settlement"]
pub struct Ticket<E: Entity> {
    rx: oneshot::Receiver<Settlement<E>>,
}

impl<E: Entity> Ticket<E> {
    /// Waits for this dispatch to settle.
    pub async fn settled(self) -> SyncResult<Settlement<E>> {
        self.rx.await.map_err(|_| SyncError::ChannelClosed)
    }
}

impl<E: Entity> fmt::Debug for Ticket<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticket").field("resource", &E::RESOURCE).finish()
    }
}

/// Entry point for every state change of one resource.
pub struct Dispatcher<E: Entity> {
    tx: mpsc::UnboundedSender<Envelope<E>>,
    published: Arc<Published<E>>,
}

impl<E: Entity> Clone for Dispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            published: Arc::clone(&self.published),
        }
    }
}

impl<E: Entity> Dispatcher<E> {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Envelope<E>>, published: Arc<Published<E>>) -> Self {
        Self { tx, published }
    }

    /// Enqueues a command. Never blocks; if the engine has stopped the
    /// ticket settles with [`SyncError::ChannelClosed`].
    ///
    /// Every command except [`Command::Reset`] marks the collection loading
    /// and clears its error before this returns.
    pub fn dispatch(&self, command: Command<E>) -> Ticket<E> {
        let (reply, rx) = oneshot::channel();
        if self.tx.is_closed() {
            debug!("Engine for {} has stopped", E::RESOURCE);
            return Ticket { rx };
        }
        debug!("Dispatch {} {}", E::RESOURCE, command.name());
        let counted = !matches!(command, Command::Reset);
        if counted {
            self.published.enqueue();
        }
        if self.tx.send(Envelope { command, reply }).is_err() {
            debug!("Engine for {} has stopped", E::RESOURCE);
            if counted {
                self.published.dequeue();
            }
        }
        Ticket { rx }
    }

    /// Whether the engine is still accepting commands.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
