//! Normalized per-resource collection state.
//!
//! A [`Collection`] is an immutable value: every operation returns a new
//! collection and leaves the old one untouched. Record data lives behind an
//! `Arc<Records>` that is only replaced when records actually change, so
//! metadata transitions (loading, error) keep the same record snapshot and
//! views derived from it stay reference-equal.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, OnceLock};

use heavy_model::Entity;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SyncFailure;

/// Pagination counters reported by the last committed list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub current_page: u32,
    pub last_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            current_page: 1,
            last_page: 1,
        }
    }
}

/// Synchronization status of a collection.
///
/// `Loading` and `Failed` are exclusive, so no error is visible while a
/// request is outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    /// Nothing dispatched yet.
    #[default]
    Idle,
    /// At least one request is outstanding.
    Loading,
    /// The last request settled successfully.
    Ready,
    /// The last settled request failed.
    Failed(SyncFailure),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }

    pub fn failure(&self) -> Option<&SyncFailure> {
        match self {
            Status::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Identifier → record map plus the identifier ordering used for lists.
///
/// The identifier set of `entities` always equals the set of `ids`, and
/// `ids` holds no duplicates.
pub struct Records<E: Entity> {
    entities: HashMap<E::Id, Arc<E>>,
    ids: Vec<E::Id>,
    /// Set when the last list fetch asked the server for an explicit sort.
    server_ordered: bool,
    all: OnceLock<Arc<[Arc<E>]>>,
}

impl<E: Entity> Records<E> {
    fn empty() -> Self {
        Self {
            entities: HashMap::new(),
            ids: Vec::new(),
            server_ordered: false,
            all: OnceLock::new(),
        }
    }

    /// Ordered identifiers.
    pub fn ids(&self) -> &[E::Id] {
        &self.ids
    }

    /// Looks up a record by identifier.
    pub fn get(&self, id: &E::Id) -> Option<&Arc<E>> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Records in list order. Computed once per snapshot.
    pub fn all(&self) -> Arc<[Arc<E>]> {
        self.all
            .get_or_init(|| {
                self.ids
                    .iter()
                    .filter_map(|id| self.entities.get(id).cloned())
                    .collect()
            })
            .clone()
    }

    /// Whether the ordering is the one the server returned for an explicitly
    /// sorted list rather than the entity's own.
    pub fn is_server_ordered(&self) -> bool {
        self.server_ordered
    }

    fn comparator(&self) -> Option<fn(&E, &E) -> std::cmp::Ordering> {
        if self.server_ordered {
            return None;
        }
        E::sort_order().comparator()
    }

    /// Position at which `record` belongs under the entity's comparator,
    /// after any equal elements. `None` when the collection keeps server order.
    fn sorted_position(&self, record: &E) -> Option<usize> {
        let cmp = self.comparator()?;
        Some(self.ids.partition_point(|id| {
            self.entities
                .get(id)
                .is_some_and(|existing| cmp(existing, record).is_le())
        }))
    }
}

impl<E: Entity> Clone for Records<E> {
    fn clone(&self) -> Self {
        Self {
            entities: self.entities.clone(),
            ids: self.ids.clone(),
            server_ordered: self.server_ordered,
            all: OnceLock::new(),
        }
    }
}

impl<E: Entity> std::fmt::Debug for Records<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Records")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

/// The normalized collection for one resource: records, status, pagination.
#[derive(Debug)]
pub struct Collection<E: Entity> {
    records: Arc<Records<E>>,
    status: Status,
    pagination: Pagination,
}

impl<E: Entity> Clone for Collection<E> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            status: self.status.clone(),
            pagination: self.pagination,
        }
    }
}

impl<E: Entity> Default for Collection<E> {
    fn default() -> Self {
        Self {
            records: Arc::new(Records::empty()),
            status: Status::Idle,
            pagination: Pagination::default(),
        }
    }
}

impl<E: Entity> Collection<E> {
    /// Creates an empty, idle collection.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ────────────────────────────────────────────────

    /// Shared record snapshot. Two collections with the same snapshot
    /// are `Arc::ptr_eq` here.
    pub fn records(&self) -> &Arc<Records<E>> {
        &self.records
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn error(&self) -> Option<&SyncFailure> {
        self.status.failure()
    }

    // ── Record operations ────────────────────────────────────────

    /// Replaces every record and the ordering, sets pagination, and marks
    /// the collection ready.
    ///
    /// Duplicate identifiers in `records` keep the first position and the
    /// last value.
    pub fn set_all(&self, records: Vec<E>, pagination: Pagination) -> Self {
        Self::listed(records, pagination, false)
    }

    /// Like [`Collection::set_all`] but keeps the order the server returned,
    /// for lists fetched with an explicit `sort_by`. Until the next
    /// `set_all`, new records are appended and updated ones stay in place.
    pub fn set_all_in_server_order(&self, records: Vec<E>, pagination: Pagination) -> Self {
        Self::listed(records, pagination, true)
    }

    fn listed(records: Vec<E>, pagination: Pagination, server_ordered: bool) -> Self {
        let mut next = Records::empty();
        next.server_ordered = server_ordered;
        for record in records {
            let id = record.id();
            match next.entities.entry(id) {
                Entry::Occupied(mut slot) => {
                    slot.insert(Arc::new(record));
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(record));
                    next.ids.push(id);
                }
            }
        }
        if let Some(cmp) = next.comparator() {
            let entities = &next.entities;
            next.ids.sort_by(|a, b| match (entities.get(a), entities.get(b)) {
                (Some(a), Some(b)) => cmp(a, b),
                _ => std::cmp::Ordering::Equal,
            });
        }
        Self {
            records: Arc::new(next),
            status: Status::Ready,
            pagination,
        }
    }

    /// Inserts a record, or replaces the existing one with the same id.
    ///
    /// An existing record keeps its position unless the collection is
    /// sorted; a new record is appended (or placed by the comparator).
    pub fn upsert_one(&self, record: impl Into<Arc<E>>) -> Self {
        let record = record.into();
        let id = record.id();
        let mut next = (*self.records).clone();
        let existed = next.entities.insert(id, Arc::clone(&record)).is_some();
        if existed {
            reposition(&mut next, id, &record);
        } else {
            match next.sorted_position(&record) {
                Some(at) => next.ids.insert(at, id),
                None => next.ids.push(id),
            }
        }
        self.with_records(next)
    }

    /// Replaces the record stored under `id` with the confirmed `changes`.
    ///
    /// Logs a consistency fault and returns an unchanged collection when
    /// `id` is absent or `changes` carries a different id.
    pub fn update_one(&self, id: E::Id, changes: impl Into<Arc<E>>) -> Self {
        if !self.records.contains(&id) {
            warn!(
                "Update for {} {} which is not in the collection; ignoring",
                E::SINGULAR,
                id
            );
            return self.clone();
        }
        let changes = changes.into();
        if changes.id() != id {
            warn!(
                "Update for {} {} returned record {}; ignoring",
                E::SINGULAR,
                id,
                changes.id()
            );
            return self.clone();
        }
        let mut next = (*self.records).clone();
        next.entities.insert(id, Arc::clone(&changes));
        reposition(&mut next, id, &changes);
        self.with_records(next)
    }

    /// Removes the record and its ordering entry. No-op when absent.
    pub fn remove_one(&self, id: &E::Id) -> Self {
        if !self.records.contains(id) {
            return self.clone();
        }
        let mut next = (*self.records).clone();
        next.entities.remove(id);
        next.ids.retain(|existing| existing != id);
        self.with_records(next)
    }

    // ── Metadata transitions ─────────────────────────────────────

    /// Marks a request as outstanding; clears any error.
    pub fn set_loading(&self) -> Self {
        self.with_status(Status::Loading)
    }

    /// Records a terminal failure; clears loading.
    pub fn set_error(&self, failure: SyncFailure) -> Self {
        self.with_status(Status::Failed(failure))
    }

    /// Marks the collection as settled with no error.
    pub fn set_ready(&self) -> Self {
        self.with_status(Status::Ready)
    }

    pub fn with_status(&self, status: Status) -> Self {
        Self {
            records: Arc::clone(&self.records),
            status,
            pagination: self.pagination,
        }
    }

    fn with_records(&self, records: Records<E>) -> Self {
        Self {
            records: Arc::new(records),
            status: self.status.clone(),
            pagination: self.pagination,
        }
    }
}

/// Moves `id` to its sorted position after its record changed. Server-ordered
/// collections keep the current position.
fn reposition<E: Entity>(records: &mut Records<E>, id: E::Id, record: &E) {
    if records.comparator().is_none() {
        return;
    }
    records.ids.retain(|existing| *existing != id);
    if let Some(at) = records.sorted_position(record) {
        records.ids.insert(at, id);
    } else {
        records.ids.push(id);
    }
}
