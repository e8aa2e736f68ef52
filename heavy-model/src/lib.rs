//! Entity model for the HeavyMarket console.
//!
//! Defines the contract every synchronized resource implements and the
//! concrete records the console manages:
//! - [`Entity`]: identifier extractor, payload types, REST resource name
//! - [`RecordId`]: the numeric identifier shared by all backend resources
//! - [`SortOrder`]: how a collection orders its records for list rendering
//! - [`records`]: categories, quotes, addresses, companies, manufacturers,
//!   machines, systems, carriers, exchange rates and articles
//!
//! Records mirror the backend's JSON field names on the wire; the Rust field
//! names are the English equivalents.

mod entity;
mod id;
pub mod records;

pub use entity::{Entity, SortOrder, by_text, newest_first};
pub use id::RecordId;
pub use records::{
    Address, Article, Carrier, Category, Company, ExchangeRate, Machine, Manufacturer, Quote,
    QuoteStatus, System,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when handling model values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid record id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
