//! Scripted gateway for tests and offline runs.
//!
//! Responses are queued per call kind and handed out in order, each after
//! an optional delay so tests can reorder completions under paused time.
//! Every call is recorded.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use heavy_model::Entity;

use super::{ApiGateway, Page};
use crate::command::ListQuery;
use crate::error::{GatewayError, GatewayResult};

/// A call observed by [`MockGateway`]. Payloads are kept as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    Get(String),
    Create(serde_json::Value),
    Update(String, serde_json::Value),
    Delete(String),
}

type Scripted<T> = VecDeque<(Duration, GatewayResult<T>)>;

struct Script<E> {
    lists: Scripted<Page<E>>,
    items: Scripted<E>,
    deletes: Scripted<()>,
    calls: Vec<Call>,
}

/// In-memory [`ApiGateway`]. An empty queue answers with a transport error.
pub struct MockGateway<E: Entity> {
    script: Mutex<Script<E>>,
}

impl<E: Entity> Default for MockGateway<E> {
    fn default() -> Self {
        Self {
            script: Mutex::new(Script {
                lists: VecDeque::new(),
                items: VecDeque::new(),
                deletes: VecDeque::new(),
                calls: Vec::new(),
            }),
        }
    }
}

impl<E: Entity> MockGateway<E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script<E>> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues the response for the next `list` call.
    pub fn push_list(&self, delay: Duration, result: GatewayResult<Page<E>>) -> &Self {
        self.script().lists.push_back((delay, result));
        self
    }

    /// Queues an unpaginated page holding `records`, answered immediately.
    pub fn push_records(&self, records: Vec<E>) -> &Self {
        self.push_list(
            Duration::ZERO,
            Ok(Page {
                data: records,
                meta: None,
            }),
        )
    }

    /// Queues the response for the next `get`, `create` or `update` call.
    pub fn push_item(&self, delay: Duration, result: GatewayResult<E>) -> &Self {
        self.script().items.push_back((delay, result));
        self
    }

    /// Queues the response for the next `delete` call.
    pub fn push_delete(&self, delay: Duration, result: GatewayResult<()>) -> &Self {
        self.script().deletes.push_back((delay, result));
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    fn record(&self, call: Call) {
        self.script().calls.push(call);
    }

    async fn answer<T>(&self, next: Option<(Duration, GatewayResult<T>)>) -> GatewayResult<T> {
        match next {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(GatewayError::Transport(format!(
                "no scripted response for {}",
                E::RESOURCE
            ))),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

#[async_trait]
impl<E: Entity> ApiGateway<E> for MockGateway<E> {
    async fn list(&self, query: &ListQuery) -> GatewayResult<Page<E>> {
        self.record(Call::List(query.clone()));
        let next = self.script().lists.pop_front();
        self.answer(next).await
    }

    async fn get(&self, id: &E::Id) -> GatewayResult<E> {
        self.record(Call::Get(id.to_string()));
        let next = self.script().items.pop_front();
        self.answer(next).await
    }

    async fn create(&self, payload: &E::Create) -> GatewayResult<E> {
        self.record(Call::Create(to_json(payload)));
        let next = self.script().items.pop_front();
        self.answer(next).await
    }

    async fn update(&self, id: &E::Id, payload: &E::Update) -> GatewayResult<E> {
        self.record(Call::Update(id.to_string(), to_json(payload)));
        let next = self.script().items.pop_front();
        self.answer(next).await
    }

    async fn delete(&self, id: &E::Id) -> GatewayResult<()> {
        self.record(Call::Delete(id.to_string()));
        let next = self.script().deletes.pop_front();
        self.answer(next).await
    }
}
