//! Normalized entity store and REST synchronization for the HeavyMarket
//! console.
//!
//! # Architecture
//!
//! Every resource (manufacturers, quotes, exchange rates, ...) gets the same
//! machinery, generic over [`heavy_model::Entity`]:
//!
//! - **Store**: an immutable [`Collection`] holding records by identifier,
//!   their list ordering, sync status and pagination.
//! - **Commands**: the closed set of intents ([`Command`]) sent through a
//!   [`Dispatcher`]. Each dispatch returns a [`Ticket`] that settles exactly
//!   once.
//! - **Engine**: a single-writer task per resource ([`SyncEngine`]) that calls
//!   the [`ApiGateway`] and commits confirmed results. Nothing is applied
//!   optimistically, and only the latest list fetch may commit.
//! - **Views**: read-only derivations ([`View`]) pushed to observers after
//!   every commit.
//!
//! Failures are classified into a [`SyncFailure`], stored in the collection
//! and broadcast as a [`Notice`]; they are never returned as panics or
//! unhandled errors.
//!
//! # Example
//!
//! ```no_run
//! use heavy_model::Manufacturer;
//! use heavy_sync::{ListQuery, SyncConfig, SyncHub};
//!
//! # async fn demo() -> heavy_sync::SyncResult<()> {
//! let hub = SyncHub::new(&SyncConfig::default())?;
//! let manufacturers = hub.resource::<Manufacturer>();
//!
//! manufacturers.load_list(ListQuery::page(1)).settled().await?;
//! for manufacturer in manufacturers.view().all().iter() {
//!     println!("{}", manufacturer.name);
//! }
//! # Ok(())
//! # }
//! ```

mod command;
mod config;
mod engine;
mod error;
pub mod gateway;
mod hub;
mod notice;
mod store;
mod view;

pub use command::{Command, Dispatcher, ListQuery, Settlement, SortDirection, Ticket};
pub use config::SyncConfig;
pub use engine::SyncEngine;
pub use error::{
    ErrorBody, ErrorKind, GatewayError, GatewayResult, SyncError, SyncFailure, SyncResult,
};
pub use gateway::{ApiGateway, Page, PageMeta, RestGateway};
pub use hub::{Resource, SyncHub};
pub use notice::{Notice, Notices, Severity};
pub use store::{Collection, Pagination, Records, Status};
pub use view::{Memo, View};
