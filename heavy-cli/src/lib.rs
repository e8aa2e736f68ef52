//! Command-line front end for the HeavyMarket sync layer.
//!
//! Builds a [`SyncHub`] from configuration, dispatches a single command for
//! one resource and renders the resulting view as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use heavy_model::{
    Address, Article, Carrier, Category, Company, Entity, ExchangeRate, Machine, Manufacturer,
    Quote, RecordId, System,
};
use heavy_sync::{ListQuery, Settlement, SortDirection, SyncConfig, SyncHub};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "heavy")]
#[command(about = "Query the HeavyMarket console backend")]
pub struct Args {
    /// Base URL of the REST API
    #[arg(long, env = "HEAVY_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "HEAVY_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// JSON config file, applied before flags and environment
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Request timeout in milliseconds (0 disables it)
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Action {
    /// Load one page of a resource
    List {
        resource: ResourceKind,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        /// Field to sort by on the server
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort descending (requires --sort-by)
        #[arg(long, requires = "sort_by")]
        desc: bool,
        /// Extra filter as key=value; may be repeated
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Load a single record
    Get { resource: ResourceKind, id: RecordId },
    /// Delete a record
    Delete { resource: ResourceKind, id: RecordId },
}

impl Action {
    pub fn resource(&self) -> ResourceKind {
        match self {
            Action::List { resource, .. }
            | Action::Get { resource, .. }
            | Action::Delete { resource, .. } => *resource,
        }
    }

    /// The list query for a `list` action.
    pub fn list_query(&self) -> Option<ListQuery> {
        let Action::List {
            page,
            per_page,
            search,
            sort_by,
            desc,
            filters,
            ..
        } = self
        else {
            return None;
        };
        let mut query = ListQuery::page(*page);
        query.per_page = *per_page;
        query.search = search.clone();
        if let Some(field) = sort_by {
            let direction = if *desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            query = query.sorted_by(field.clone(), direction);
        }
        for (key, value) in filters {
            query = query.with_filter(key.clone(), value);
        }
        Some(query)
    }
}

/// Resources the console manages.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    #[value(alias = "categorias")]
    Categories,
    #[value(alias = "cotizaciones")]
    Quotes,
    #[value(alias = "direcciones")]
    Addresses,
    #[value(alias = "empresas")]
    Companies,
    #[value(alias = "fabricantes")]
    Manufacturers,
    #[value(alias = "maquinas")]
    Machines,
    #[value(alias = "sistemas")]
    Systems,
    #[value(alias = "transportadoras")]
    Carriers,
    #[value(alias = "trms")]
    ExchangeRates,
    #[value(alias = "articulos")]
    Articles,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

/// Resolves configuration: defaults, then the config file, then flags and
/// environment.
pub fn load_config(args: &Args) -> Result<SyncConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SyncConfig::from_json(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => SyncConfig::default(),
    };
    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(token) = &args.token {
        config.bearer_token = Some(token.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Runs one action against the backend and returns the rendered output.
pub async fn run(args: &Args) -> Result<String> {
    let config = load_config(args)?;
    info!("Using API at {}", config.base_url());
    let hub = SyncHub::new(&config).context("failed to build sync hub")?;

    let action = &args.action;
    match action.resource() {
        ResourceKind::Categories => execute::<Category>(&hub, action).await,
        ResourceKind::Quotes => execute::<Quote>(&hub, action).await,
        ResourceKind::Addresses => execute::<Address>(&hub, action).await,
        ResourceKind::Companies => execute::<Company>(&hub, action).await,
        ResourceKind::Manufacturers => execute::<Manufacturer>(&hub, action).await,
        ResourceKind::Machines => execute::<Machine>(&hub, action).await,
        ResourceKind::Systems => execute::<System>(&hub, action).await,
        ResourceKind::Carriers => execute::<Carrier>(&hub, action).await,
        ResourceKind::ExchangeRates => execute::<ExchangeRate>(&hub, action).await,
        ResourceKind::Articles => execute::<Article>(&hub, action).await,
    }
}

async fn execute<E>(hub: &SyncHub, action: &Action) -> Result<String>
where
    E: Entity<Id = RecordId>,
{
    let resource = hub.resource::<E>();
    let ticket = match action {
        Action::List { .. } => {
            let query = action.list_query().unwrap_or_default();
            resource.load_list(query)
        }
        Action::Get { id, .. } => resource.load_one(*id),
        Action::Delete { id, .. } => resource.delete(*id),
    };
    let settlement = ticket.settled().await?;
    debug!("{} settled: {:?}", E::RESOURCE, settlement);

    let output = match settlement {
        Settlement::Listed(pagination) => {
            let view = resource.view();
            let all = view.all();
            let records: Vec<&E> = all.iter().map(|record| record.as_ref()).collect();
            render(&json!({ "data": records, "pagination": pagination }))?
        }
        Settlement::Fetched(record) => render(record.as_ref())?,
        Settlement::Deleted(id) => render(&json!({ "deleted": id }))?,
        Settlement::Failed(failure) => bail!("{failure}"),
        other => bail!("unexpected outcome for {}: {:?}", E::RESOURCE, other),
    };
    Ok(output)
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to render output")
}
