//! Catalog records: categories, manufacturers, machines, systems, articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, SortOrder, by_text};
use crate::id::RecordId;

/// A product category third parties and references are filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCategory {
    #[serde(rename = "nombre")]
    pub name: String,
    /// Third parties to attach to the new category.
    #[serde(rename = "terceros", skip_serializing_if = "Vec::is_empty")]
    pub third_parties: Vec<RecordId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCategory {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "terceros", skip_serializing_if = "Option::is_none")]
    pub third_parties: Option<Vec<RecordId>>,
}

impl Entity for Category {
    type Id = RecordId;
    type Create = CreateCategory;
    type Update = UpdateCategory;

    const RESOURCE: &'static str = "categorias";
    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| by_text(&a.name, &b.name))
    }
}

/// A heavy machinery manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateManufacturer {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateManufacturer {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Entity for Manufacturer {
    type Id = RecordId;
    type Create = CreateManufacturer;
    type Update = UpdateManufacturer;

    const RESOURCE: &'static str = "fabricantes";
    const SINGULAR: &'static str = "manufacturer";
    const PLURAL: &'static str = "manufacturers";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| by_text(&a.name, &b.name))
    }
}

/// A machine model offered by a manufacturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: RecordId,
    /// Machine type, an entry of the "machine type" lookup list.
    #[serde(rename = "tipo")]
    pub kind: RecordId,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "fabricante_id")]
    pub manufacturer_id: RecordId,
    #[serde(rename = "serie", default)]
    pub serial: Option<String>,
    #[serde(rename = "arreglo", default)]
    pub arrangement: Option<String>,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMachine {
    #[serde(rename = "tipo")]
    pub kind: RecordId,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "fabricante_id")]
    pub manufacturer_id: RecordId,
    #[serde(rename = "serie", skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(rename = "arreglo", skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<String>,
    #[serde(rename = "foto", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateMachine {
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordId>,
    #[serde(rename = "modelo", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "fabricante_id", skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<RecordId>,
    #[serde(rename = "serie", skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(rename = "arreglo", skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<String>,
    #[serde(rename = "foto", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Entity for Machine {
    type Id = RecordId;
    type Create = CreateMachine;
    type Update = UpdateMachine;

    const RESOURCE: &'static str = "maquinas";
    const SINGULAR: &'static str = "machine";
    const PLURAL: &'static str = "machines";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| by_text(&a.model, &b.model))
    }
}

/// A machine subsystem (engine, transmission, hydraulics, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSystem {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSystem {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Entity for System {
    type Id = RecordId;
    type Create = CreateSystem;
    type Update = UpdateSystem;

    const RESOURCE: &'static str = "sistemas";
    const SINGULAR: &'static str = "system";
    const PLURAL: &'static str = "systems";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| by_text(&a.name, &b.name))
    }
}

/// A standard part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: RecordId,
    /// Part definition, an entry of the "standard part" lookup list.
    #[serde(rename = "definicion")]
    pub definition: String,
    #[serde(rename = "descripcionEspecifica")]
    pub description: String,
    /// Weight in kilograms.
    #[serde(rename = "peso", default)]
    pub weight: Option<f64>,
    #[serde(rename = "comentarios", default)]
    pub comments: Option<String>,
    #[serde(rename = "fotoDescriptiva", default)]
    pub photo: Option<String>,
    #[serde(rename = "foto_medida", default)]
    pub measurement_photo: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateArticle {
    #[serde(rename = "definicion")]
    pub definition: String,
    #[serde(rename = "descripcionEspecifica")]
    pub description: String,
    #[serde(rename = "peso", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "comentarios", skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "fotoDescriptiva", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(rename = "foto_medida", skip_serializing_if = "Option::is_none")]
    pub measurement_photo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateArticle {
    #[serde(rename = "definicion", skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(rename = "descripcionEspecifica", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "peso", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "comentarios", skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "fotoDescriptiva", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(rename = "foto_medida", skip_serializing_if = "Option::is_none")]
    pub measurement_photo: Option<String>,
}

impl Entity for Article {
    type Id = RecordId;
    type Create = CreateArticle;
    type Update = UpdateArticle;

    const RESOURCE: &'static str = "articulos";
    const SINGULAR: &'static str = "article";
    const PLURAL: &'static str = "articles";

    fn id(&self) -> RecordId {
        self.id
    }

    fn sort_order() -> SortOrder<Self> {
        SortOrder::By(|a, b| by_text(&a.description, &b.description))
    }
}
