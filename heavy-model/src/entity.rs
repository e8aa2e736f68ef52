use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};

/// A record type that can be kept in a synchronized collection.
///
/// One implementation per REST resource. The sync layer is generic over this
/// trait, so adding a resource never means writing another store or engine.
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type; unique and stable within the resource.
    type Id: Copy
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Body sent with `POST /{RESOURCE}`.
    type Create: Serialize + fmt::Debug + Send + Sync + 'static;

    /// Partial body sent with `PUT /{RESOURCE}/{id}`.
    type Update: Serialize + fmt::Debug + Send + Sync + 'static;

    /// Path segment of the REST resource (e.g. `fabricantes`).
    const RESOURCE: &'static str;

    /// Human-readable singular label used in notices ("manufacturer").
    const SINGULAR: &'static str;

    /// Human-readable plural label used in notices ("manufacturers").
    const PLURAL: &'static str;

    /// Extracts the record's identifier.
    fn id(&self) -> Self::Id;

    /// Ordering used for list rendering. Defaults to the server's order.
    fn sort_order() -> SortOrder<Self> {
        SortOrder::Server
    }

    /// Decodes a bare record (not an API envelope).
    fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// How a collection orders its identifiers.
pub enum SortOrder<E> {
    /// Keep the order the server returned; new records are appended.
    Server,
    /// Keep the ordering sorted by this comparator.
    By(fn(&E, &E) -> Ordering),
}

impl<E> SortOrder<E> {
    /// Returns the comparator, if any.
    pub fn comparator(&self) -> Option<fn(&E, &E) -> Ordering> {
        match self {
            SortOrder::Server => None,
            SortOrder::By(cmp) => Some(*cmp),
        }
    }
}

impl<E> Clone for SortOrder<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for SortOrder<E> {}

impl<E> fmt::Debug for SortOrder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Server => f.write_str("Server"),
            SortOrder::By(_) => f.write_str("By(..)"),
        }
    }
}

/// Case-insensitive text comparison for name-like sort keys.
pub fn by_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Most recent first; records without a timestamp go last.
pub fn newest_first(a: Option<&DateTime<Utc>>, b: Option<&DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
