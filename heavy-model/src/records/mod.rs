//! Domain records managed by the console, one module per business area.
//!
//! Every record carries its server-assigned [`RecordId`](crate::RecordId)
//! and the backend's `created_at`/`updated_at` stamps. Relations the backend
//! may embed (`tercero`, `fabricante`, ...) are not modelled; only the
//! foreign keys are kept.

mod catalog;
mod parties;
mod sales;

pub use catalog::{
    Article, Category, CreateArticle, CreateCategory, CreateMachine, CreateManufacturer,
    CreateSystem, Machine, Manufacturer, System, UpdateArticle, UpdateCategory, UpdateMachine,
    UpdateManufacturer, UpdateSystem,
};
pub use parties::{
    Address, Carrier, Company, CreateAddress, CreateCarrier, CreateCompany, UpdateAddress,
    UpdateCarrier, UpdateCompany,
};
pub use sales::{
    CreateExchangeRate, CreateQuote, ExchangeRate, Quote, QuoteStatus, UpdateExchangeRate,
    UpdateQuote,
};
