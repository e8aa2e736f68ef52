//! Synchronization engine.
//!
//! One engine task per resource consumes commands, calls the gateway and
//! commits confirmed results to the collection. The task is the only writer
//! of records; views observe it through a `watch` channel.
//!
//! ## Ordering
//!
//! Gateway calls run concurrently and settle in completion order. For list
//! fetches only the most recently dispatched one may commit: each gets a
//! token and a response whose token is no longer pending settles as
//! [`Settlement::Superseded`] without touching the collection.
//!
//! ## Loading
//!
//! [`Dispatcher::dispatch`] marks the collection loading before the command
//! is queued. The engine keeps it loading while any command is queued or any
//! call is outstanding; both sides update the collection under the `watch`
//! lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use heavy_model::Entity;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::command::{Command, Dispatcher, Envelope, Settlement};
use crate::error::{GatewayError, GatewayResult, SyncFailure};
use crate::gateway::{ApiGateway, Page};
use crate::hub::Resource;
use crate::notice::Notices;
use crate::store::{Collection, Status};
use crate::view::View;

type InFlight<E> = BoxFuture<'static, Completion<E>>;

/// The committed collection and the number of requests dispatched but not
/// yet taken off the channel. Shared by an engine and its dispatchers.
pub(crate) struct Published<E: Entity> {
    state: watch::Sender<Collection<E>>,
    queued: AtomicUsize,
}

impl<E: Entity> Published<E> {
    fn new() -> (Arc<Self>, watch::Receiver<Collection<E>>) {
        let (state, rx) = watch::channel(Collection::default());
        let published = Self {
            state,
            queued: AtomicUsize::new(0),
        };
        (Arc::new(published), rx)
    }

    /// Counts a dispatched request and marks the collection loading, which
    /// also clears any error.
    pub(crate) fn enqueue(&self) {
        self.state.send_modify(|state| {
            self.queued.fetch_add(1, Ordering::SeqCst);
            *state = state.set_loading();
        });
    }

    /// Uncounts a request, either taken by the engine or never delivered.
    pub(crate) fn dequeue(&self) {
        let _ = self
            .queued
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    fn queued(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }
}

/// A finished gateway call, ready to be committed.
struct Completion<E: Entity> {
    reply: oneshot::Sender<Settlement<E>>,
    outcome: Outcome<E>,
}

enum Outcome<E: Entity> {
    Listed {
        token: u64,
        server_sorted: bool,
        result: GatewayResult<Page<E>>,
    },
    Fetched(GatewayResult<E>),
    Created(GatewayResult<E>),
    Updated(E::Id, GatewayResult<E>),
    Deleted(E::Id, GatewayResult<()>),
}

/// Single-writer loop for one resource.
pub struct SyncEngine<E: Entity> {
    gateway: Arc<dyn ApiGateway<E>>,
    commands: mpsc::UnboundedReceiver<Envelope<E>>,
    /// Engine-side copy of the records; its status is recomputed on commit.
    state: Collection<E>,
    published: Arc<Published<E>>,
    notices: Notices,
    default_per_page: u32,
    in_flight: FuturesUnordered<InFlight<E>>,
    /// Last issued list token.
    list_token: u64,
    /// Token of the list fetch allowed to commit, if one is outstanding.
    pending_list: Option<u64>,
    /// Outstanding get/create/update/delete calls.
    pending_other: usize,
    /// Failure waiting for the remaining requests to settle.
    deferred: Option<SyncFailure>,
}

impl<E: Entity> SyncEngine<E> {
    /// Creates an engine and the handle used to drive and observe it.
    /// Nothing happens until [`SyncEngine::run`] is polled.
    pub fn new<G>(gateway: Arc<G>, notices: Notices, default_per_page: u32) -> (Self, Resource<E>)
    where
        G: ApiGateway<E> + 'static,
    {
        let (tx, commands) = mpsc::unbounded_channel();
        let (published, state_rx) = Published::new();
        let engine = Self {
            gateway,
            commands,
            state: Collection::default(),
            published: Arc::clone(&published),
            notices,
            default_per_page,
            in_flight: FuturesUnordered::new(),
            list_token: 0,
            pending_list: None,
            pending_other: 0,
            deferred: None,
        };
        let resource = Resource::new(Dispatcher::new(tx, published), View::new(state_rx));
        (engine, resource)
    }

    /// Runs until every dispatcher is dropped, then drains outstanding calls.
    pub async fn run(mut self) {
        info!("Sync engine for {} started", E::RESOURCE);
        loop {
            tokio::select! {
                envelope = self.commands.recv() => match envelope {
                    Some(envelope) => self.begin(envelope),
                    None => break,
                },
                Some(completion) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.finish(completion);
                }
            }
        }
        while let Some(completion) = self.in_flight.next().await {
            self.finish(completion);
        }
        info!("Sync engine for {} stopped", E::RESOURCE);
    }

    // ── Dispatch ─────────────────────────────────────────────────

    fn begin(&mut self, envelope: Envelope<E>) {
        let Envelope { command, reply } = envelope;
        if !matches!(command, Command::Reset) {
            self.published.dequeue();
        }
        let gateway = Arc::clone(&self.gateway);

        let call: InFlight<E> = match command {
            Command::Reset => {
                self.reset();
                let _ = reply.send(Settlement::Reset);
                return;
            }
            Command::LoadList(mut query) => {
                if query.per_page.is_none() {
                    query.per_page = Some(self.default_per_page);
                }
                self.list_token += 1;
                let token = self.list_token;
                if let Some(previous) = self.pending_list.replace(token) {
                    debug!(
                        "List {} of {} supersedes pending list {}",
                        token,
                        E::RESOURCE,
                        previous
                    );
                }
                let server_sorted = query.sort_by.is_some();
                debug!("GET {} {:?}", E::RESOURCE, query.to_pairs());
                async move {
                    let result = gateway.list(&query).await;
                    Completion {
                        reply,
                        outcome: Outcome::Listed {
                            token,
                            server_sorted,
                            result,
                        },
                    }
                }
                .boxed()
            }
            Command::LoadOne(id) => {
                self.pending_other += 1;
                debug!("GET {}/{}", E::RESOURCE, id);
                async move {
                    let result = gateway.get(&id).await;
                    Completion {
                        reply,
                        outcome: Outcome::Fetched(result),
                    }
                }
                .boxed()
            }
            Command::Create(payload) => {
                self.pending_other += 1;
                debug!("POST {}", E::RESOURCE);
                async move {
                    let result = gateway.create(&payload).await;
                    Completion {
                        reply,
                        outcome: Outcome::Created(result),
                    }
                }
                .boxed()
            }
            Command::Update(id, payload) => {
                self.pending_other += 1;
                debug!("PUT {}/{}", E::RESOURCE, id);
                async move {
                    let result = gateway.update(&id, &payload).await;
                    Completion {
                        reply,
                        outcome: Outcome::Updated(id, result),
                    }
                }
                .boxed()
            }
            Command::Delete(id) => {
                self.pending_other += 1;
                debug!("DELETE {}/{}", E::RESOURCE, id);
                async move {
                    let result = gateway.delete(&id).await;
                    Completion {
                        reply,
                        outcome: Outcome::Deleted(id, result),
                    }
                }
                .boxed()
            }
        };

        self.in_flight.push(call);
        self.deferred = None;
    }

    fn reset(&mut self) {
        // Bumping the token orphans any outstanding list fetch.
        self.list_token += 1;
        self.pending_list = None;
        self.deferred = None;
        self.state = Collection::default();
        debug!("Reset {}", E::RESOURCE);
        self.commit(Status::Idle);
    }

    // ── Settlement ───────────────────────────────────────────────

    fn finish(&mut self, completion: Completion<E>) {
        let Completion { reply, outcome } = completion;

        let settlement = match outcome {
            Outcome::Listed {
                token,
                server_sorted,
                result,
            } => {
                if self.pending_list != Some(token) {
                    debug!("Discarding stale list {} of {}", token, E::RESOURCE);
                    let _ = reply.send(Settlement::Superseded);
                    return;
                }
                self.pending_list = None;
                match result {
                    Ok(page) => {
                        let pagination = page.pagination();
                        debug!(
                            "Loaded {} {} (page {} of {})",
                            page.data.len(),
                            E::PLURAL,
                            pagination.current_page,
                            pagination.last_page
                        );
                        self.state = if server_sorted {
                            self.state.set_all_in_server_order(page.data, pagination)
                        } else {
                            self.state.set_all(page.data, pagination)
                        };
                        Settlement::Listed(pagination)
                    }
                    Err(err) => self.fail(err, format!("failed to load {}", E::PLURAL)),
                }
            }
            Outcome::Fetched(result) => {
                self.pending_other = self.pending_other.saturating_sub(1);
                match result {
                    Ok(record) => {
                        let record = Arc::new(record);
                        self.state = self.state.upsert_one(Arc::clone(&record));
                        Settlement::Fetched(record)
                    }
                    Err(err) => self.fail(err, format!("failed to load {}", E::SINGULAR)),
                }
            }
            Outcome::Created(result) => {
                self.pending_other = self.pending_other.saturating_sub(1);
                match result {
                    Ok(record) => {
                        let record = Arc::new(record);
                        info!("Created {} {}", E::SINGULAR, record.id());
                        self.state = self.state.upsert_one(Arc::clone(&record));
                        self.notices
                            .success(E::RESOURCE, format!("{} created", E::SINGULAR));
                        Settlement::Created(record)
                    }
                    Err(err) => self.fail(err, format!("failed to create {}", E::SINGULAR)),
                }
            }
            Outcome::Updated(id, result) => {
                self.pending_other = self.pending_other.saturating_sub(1);
                match result {
                    Ok(record) => {
                        let record = Arc::new(record);
                        info!("Updated {} {}", E::SINGULAR, id);
                        self.state = self.state.update_one(id, Arc::clone(&record));
                        self.notices
                            .success(E::RESOURCE, format!("{} updated", E::SINGULAR));
                        Settlement::Updated(record)
                    }
                    Err(err) => self.fail(err, format!("failed to update {}", E::SINGULAR)),
                }
            }
            Outcome::Deleted(id, result) => {
                self.pending_other = self.pending_other.saturating_sub(1);
                match result {
                    Ok(()) | Err(GatewayError::Status { status: 404, .. }) => {
                        info!("Deleted {} {}", E::SINGULAR, id);
                        self.state = self.state.remove_one(&id);
                        self.notices
                            .success(E::RESOURCE, format!("{} deleted", E::SINGULAR));
                        Settlement::Deleted(id)
                    }
                    Err(err) => self.fail(err, format!("failed to delete {}", E::SINGULAR)),
                }
            }
        };

        self.commit(Status::Ready);
        let _ = reply.send(settlement);
    }

    /// Classifies a gateway error, reports it and holds it until the
    /// collection stops loading.
    fn fail(&mut self, err: GatewayError, fallback: String) -> Settlement<E> {
        let failure = SyncFailure::classify(err, &fallback);
        warn!("{} request failed: {}", E::RESOURCE, failure);
        self.notices.error(E::RESOURCE, failure.message.clone());
        self.deferred = Some(failure.clone());
        Settlement::Failed(failure)
    }

    /// Publishes the engine's records. The status is `Loading` while any
    /// request is queued or outstanding, then the held failure if there is
    /// one, else `settled`.
    fn commit(&mut self, settled: Status) {
        let outstanding = self.pending_list.is_some() || self.pending_other > 0;
        let Self {
            state,
            published,
            deferred,
            ..
        } = self;
        let published: &Published<E> = published;
        published.state.send_modify(|current| {
            let status = if outstanding || published.queued() > 0 {
                Status::Loading
            } else {
                deferred.take().map_or(settled, Status::Failed)
            };
            *state = state.with_status(status);
            *current = state.clone();
        });
    }
}
