//! Shared test helpers for sync tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use heavy_model::{Entity, Manufacturer, RecordId};
use heavy_sync::gateway::mock::MockGateway;
use heavy_sync::{ErrorBody, GatewayError, Notice, Notices, Page, PageMeta, Resource, SyncEngine};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Minimal record kept in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewWidget {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WidgetChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Entity for Widget {
    type Id = RecordId;
    type Create = NewWidget;
    type Update = WidgetChanges;

    const RESOURCE: &'static str = "widgets";
    const SINGULAR: &'static str = "widget";
    const PLURAL: &'static str = "widgets";

    fn id(&self) -> RecordId {
        self.id
    }
}

pub fn widget(id: u64, name: &str) -> Widget {
    Widget {
        id: RecordId::new(id),
        name: name.to_string(),
    }
}

pub fn manufacturer(id: u64, name: &str) -> Manufacturer {
    Manufacturer {
        id: RecordId::new(id),
        name: name.to_string(),
        description: None,
        logo: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn page<E>(data: Vec<E>, total: u64, current_page: u32, last_page: u32) -> Page<E> {
    Page {
        data,
        meta: Some(PageMeta {
            total,
            current_page,
            last_page,
            per_page: None,
        }),
    }
}

pub fn status_error(status: u16, message: Option<&str>) -> GatewayError {
    GatewayError::Status {
        status,
        body: ErrorBody {
            message: message.map(str::to_string),
            errors: BTreeMap::new(),
        },
    }
}

pub fn validation_error(field: &str, message: &str) -> GatewayError {
    let mut errors = BTreeMap::new();
    errors.insert(field.to_string(), vec![message.to_string()]);
    GatewayError::Status {
        status: 422,
        body: ErrorBody {
            message: Some("The given data was invalid.".to_string()),
            errors,
        },
    }
}

/// Spawns an engine over `gateway` and subscribes to its notices.
pub fn start<E: Entity>(
    gateway: Arc<MockGateway<E>>,
) -> (Resource<E>, broadcast::Receiver<Notice>) {
    let notices = Notices::new(16);
    let rx = notices.subscribe();
    let (engine, resource) = SyncEngine::new(gateway, notices, 15);
    tokio::spawn(engine.run());
    (resource, rx)
}

pub fn ids<E: Entity<Id = RecordId>>(resource: &Resource<E>) -> Vec<u64> {
    resource.view().ids().into_iter().map(RecordId::get).collect()
}
