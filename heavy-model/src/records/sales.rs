//! Commercial records: quotes and exchange rates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, SortOrder, newest_first};
use crate::id::RecordId;

/// Lifecycle state of a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    #[default]
    #[serde(rename = "borrador")]
    Draft,
    #[serde(rename = "enviada")]
    Sent,
    #[serde(rename = "aprobada")]
    Approved,
    #[serde(rename = "rechazada")]
    Rejected,
    #[serde(rename = "vencida")]
    Expired,
}

/// A price quote issued to a third party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: RecordId,
    pub user_id: RecordId,
    #[serde(rename = "tercero_id")]
    pub third_party_id: RecordId,
    /// Issue date as sent by the backend (`YYYY-MM-DD`).
    #[serde(rename = "fecha")]
    pub date: String,
    /// Expiry date, if the quote has one.
    #[serde(rename = "validez", default)]
    pub valid_until: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "estado")]
    pub status: QuoteStatus,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateQuote {
    #[serde(rename = "tercero_id")]
    pub third_party_id: RecordId,
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "validez", skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<QuoteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateQuote {
    #[serde(rename = "tercero_id", skip_serializing_if = "Option::is_none")]
    pub third_party_id: Option<RecordId>,
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "validez", skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<QuoteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl Entity for Quote {
    type Id = RecordId;
    type Create = CreateQuote;
    type Update = UpdateQuote;

    const RESOURCE: &'static str = "cotizaciones";
    const SINGULAR: &'static str = "quote";
    const PLURAL: &'static str = "quotes";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| newest_first(a.created_at.as_ref(), b.created_at.as_ref()))
    }
}

/// A USD→COP representative market rate (TRM) recorded for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: RecordId,
    #[serde(rename = "trm")]
    pub rate: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateExchangeRate {
    #[serde(rename = "trm")]
    pub rate: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateExchangeRate {
    #[serde(rename = "trm", skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl Entity for ExchangeRate {
    type Id = RecordId;
    type Create = CreateExchangeRate;
    type Update = UpdateExchangeRate;

    const RESOURCE: &'static str = "trms";
    const SINGULAR: &'static str = "exchange rate";
    const PLURAL: &'static str = "exchange rates";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| newest_first(a.created_at.as_ref(), b.created_at.as_ref()))
    }
}
