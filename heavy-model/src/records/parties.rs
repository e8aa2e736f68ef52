//! Parties the business deals with: companies, addresses, carriers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, SortOrder, by_text, newest_first};
use crate::id::RecordId;

/// One of the business's own companies (the issuer on quotes and orders).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "siglas", default)]
    pub acronym: Option<String>,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "celular")]
    pub mobile: String,
    pub email: String,
    /// Tax identification number.
    pub nit: String,
    #[serde(rename = "representante")]
    pub representative: String,
    #[serde(default)]
    pub country_id: Option<RecordId>,
    #[serde(default)]
    pub state_id: Option<RecordId>,
    #[serde(default)]
    pub city_id: Option<RecordId>,
    #[serde(rename = "estado")]
    pub active: bool,
    #[serde(rename = "flete", default)]
    pub freight: Option<f64>,
    #[serde(rename = "trm", default)]
    pub exchange_rate: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCompany {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "siglas", skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "celular")]
    pub mobile: String,
    pub email: String,
    pub nit: String,
    #[serde(rename = "representante")]
    pub representative: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<RecordId>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "flete", skip_serializing_if = "Option::is_none")]
    pub freight: Option<f64>,
    #[serde(rename = "trm", skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCompany {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "siglas", skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "celular", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
    #[serde(rename = "representante", skip_serializing_if = "Option::is_none")]
    pub representative: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "flete", skip_serializing_if = "Option::is_none")]
    pub freight: Option<f64>,
    #[serde(rename = "trm", skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
}

impl Entity for Company {
    type Id = RecordId;
    type Create = CreateCompany;
    type Update = UpdateCompany;

    const RESOURCE: &'static str = "empresas";
    const SINGULAR: &'static str = "company";
    const PLURAL: &'static str = "companies";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| newest_first(a.created_at.as_ref(), b.created_at.as_ref()))
    }
}

/// A delivery address belonging to a third party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: RecordId,
    #[serde(rename = "tercero_id")]
    pub third_party_id: RecordId,
    #[serde(rename = "direccion")]
    pub line: String,
    #[serde(default)]
    pub city_id: Option<RecordId>,
    #[serde(default)]
    pub state_id: Option<RecordId>,
    #[serde(default)]
    pub country_id: Option<RecordId>,
    /// Whether this is the third party's primary address.
    #[serde(default)]
    pub principal: bool,
    #[serde(rename = "destinatario", default)]
    pub recipient: Option<String>,
    #[serde(rename = "transportadora_id", default)]
    pub carrier_id: Option<RecordId>,
    #[serde(rename = "forma_pago", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAddress {
    #[serde(rename = "tercero_id")]
    pub third_party_id: RecordId,
    #[serde(rename = "direccion")]
    pub line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<bool>,
    #[serde(rename = "destinatario", skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(rename = "transportadora_id", skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<RecordId>,
    #[serde(rename = "forma_pago", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAddress {
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<bool>,
    #[serde(rename = "destinatario", skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(rename = "transportadora_id", skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<RecordId>,
    #[serde(rename = "forma_pago", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Entity for Address {
    type Id = RecordId;
    type Create = CreateAddress;
    type Update = UpdateAddress;

    const RESOURCE: &'static str = "direcciones";
    const SINGULAR: &'static str = "address";
    const PLURAL: &'static str = "addresses";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| by_text(&a.line, &b.line))
    }
}

/// A freight carrier used for shipping orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub nit: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "contacto", default)]
    pub contact: Option<String>,
    #[serde(rename = "celular", default)]
    pub mobile: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub city_id: Option<RecordId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCarrier {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "contacto", skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "celular", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCarrier {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "contacto", skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "celular", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Carrier {
    type Id = RecordId;
    type Create = CreateCarrier;
    type Update = UpdateCarrier;

    const RESOURCE: &'static str = "transportadoras";
    const SINGULAR: &'static str = "carrier";
    const PLURAL: &'static str = "carriers";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| by_text(&a.name, &b.name))
    }
}
