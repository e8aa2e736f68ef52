//! Read-only derived views over a resource's collection.
//!
//! Derivations are pure functions of the latest committed state. Record
//! lists are memoized per record snapshot, so two reads with no intervening
//! record change return the same `Arc` and callers can skip work with
//! `Arc::ptr_eq`.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use heavy_model::Entity;
use tokio::sync::watch;

use crate::error::{SyncError, SyncFailure, SyncResult};
use crate::store::{Collection, Pagination, Records, Status};

/// Live view of one resource. Cheap to clone.
pub struct View<E: Entity> {
    rx: watch::Receiver<Collection<E>>,
}

impl<E: Entity> Clone for View<E> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<E: Entity> fmt::Debug for View<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("resource", &E::RESOURCE)
            .field("status", &self.status())
            .finish()
    }
}

impl<E: Entity> View<E> {
    pub(crate) fn new(rx: watch::Receiver<Collection<E>>) -> Self {
        Self { rx }
    }

    /// The latest committed collection.
    pub fn snapshot(&self) -> Collection<E> {
        self.rx.borrow().clone()
    }

    fn records(&self) -> Arc<Records<E>> {
        Arc::clone(self.rx.borrow().records())
    }

    /// All records in list order.
    pub fn all(&self) -> Arc<[Arc<E>]> {
        self.records().all()
    }

    pub fn by_id(&self, id: &E::Id) -> Option<Arc<E>> {
        self.rx.borrow().records().get(id).cloned()
    }

    pub fn ids(&self) -> Vec<E::Id> {
        self.rx.borrow().records().ids().to_vec()
    }

    pub fn len(&self) -> usize {
        self.rx.borrow().records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn loading(&self) -> bool {
        self.rx.borrow().loading()
    }

    /// The stored failure. Always `None` while loading.
    pub fn error(&self) -> Option<SyncFailure> {
        self.rx.borrow().error().cloned()
    }

    pub fn status(&self) -> Status {
        self.rx.borrow().status().clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.rx.borrow().pagination()
    }

    /// Waits for the next committed state.
    pub async fn changed(&mut self) -> SyncResult<()> {
        self.rx.changed().await.map_err(|_| SyncError::ChannelClosed)
    }

    /// Waits until `predicate` holds for the committed state, checking the
    /// current state first.
    pub async fn wait_until<F>(&mut self, mut predicate: F) -> SyncResult<Collection<E>>
    where
        F: FnMut(&Collection<E>) -> bool,
    {
        let state = self
            .rx
            .wait_for(|state| predicate(state))
            .await
            .map_err(|_| SyncError::ChannelClosed)?;
        Ok(state.clone())
    }

    /// Wraps a projection of the record set so it is recomputed only when
    /// the records change.
    pub fn memoize<T, F>(&self, project: F) -> Memo<E, T, F>
    where
        F: Fn(&Records<E>) -> T,
    {
        Memo {
            view: self.clone(),
            project,
            cached: Mutex::new(None),
        }
    }
}

/// A caller-defined projection cached against the record snapshot.
pub struct Memo<E: Entity, T, F> {
    view: View<E>,
    project: F,
    cached: Mutex<Option<(Arc<Records<E>>, Arc<T>)>>,
}

impl<E, T, F> Memo<E, T, F>
where
    E: Entity,
    F: Fn(&Records<E>) -> T,
{
    /// Current projection; the same `Arc` until the records change.
    pub fn get(&self) -> Arc<T> {
        let records = self.view.records();
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((seen, value)) = cached.as_ref() {
            if Arc::ptr_eq(seen, &records) {
                return Arc::clone(value);
            }
        }
        let value = Arc::new((self.project)(records.as_ref()));
        *cached = Some((records, Arc::clone(&value)));
        value
    }
}
