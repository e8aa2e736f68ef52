use std::io::Write;

use clap::Parser;
use heavy_cli::{load_config, run, Action, Args, ResourceKind};
use heavy_model::RecordId;
use heavy_sync::{ListQuery, SortDirection};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse(argv: &[&str]) -> Args {
    let mut full = vec!["heavy"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full).unwrap()
}

// ── Argument parsing ─────────────────────────────────────────────

#[test]
fn list_builds_query() {
    let args = parse(&[
        "list",
        "fabricantes",
        "--page",
        "3",
        "--search",
        "cat",
        "--sort-by",
        "nombre",
        "--desc",
        "--filter",
        "tercero_id=4",
    ]);

    assert_eq!(args.action.resource(), ResourceKind::Manufacturers);
    let expected = ListQuery::page(3)
        .with_search("cat")
        .sorted_by("nombre", SortDirection::Desc)
        .with_filter("tercero_id", 4);
    assert_eq!(args.action.list_query(), Some(expected));
}

#[test]
fn resources_accept_english_and_wire_names() {
    let english = parse(&["get", "exchange-rates", "5"]);
    let wire = parse(&["get", "trms", "5"]);

    assert_eq!(english.action, wire.action);
    assert_eq!(
        wire.action,
        Action::Get {
            resource: ResourceKind::ExchangeRates,
            id: RecordId::new(5),
        }
    );
    assert!(wire.action.list_query().is_none());
}

#[test]
fn malformed_filter_is_rejected() {
    let result = Args::try_parse_from(["heavy", "list", "quotes", "--filter", "novalue"]);
    assert!(result.is_err());
}

#[test]
fn desc_requires_sort_field() {
    let result = Args::try_parse_from(["heavy", "list", "quotes", "--desc"]);
    assert!(result.is_err());
}

#[test]
fn non_numeric_id_is_rejected() {
    let result = Args::try_parse_from(["heavy", "delete", "carriers", "abc"]);
    assert!(result.is_err());
}

// ── Configuration ────────────────────────────────────────────────

#[test]
fn flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"api_base_url": "https://staging.example.com/api/v1", "default_per_page": 30}}"#
    )
    .unwrap();

    let args = parse(&[
        "--config",
        file.path().to_str().unwrap(),
        "--api-url",
        "http://127.0.0.1:9000/api/v1",
        "--timeout-ms",
        "0",
        "list",
        "quotes",
    ]);
    let config = load_config(&args).unwrap();

    assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api/v1");
    assert_eq!(config.default_per_page, 30);
    assert_eq!(config.timeout_ms, 0);
}

#[test]
fn invalid_config_file_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"api_base_url": "ftp://files"}}"#).unwrap();

    let args = parse(&["--config", file.path().to_str().unwrap(), "list", "quotes"]);
    let err = load_config(&args).unwrap_err();
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn missing_config_file_is_an_error() {
    let args = parse(&["--config", "/nonexistent/heavy.json", "list", "quotes"]);
    let err = load_config(&args).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}

// ── Against a backend ────────────────────────────────────────────

#[tokio::test]
async fn list_renders_records_and_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sistemas"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 2, "nombre": "Motor"},
                {"id": 1, "nombre": "Hidráulico"}
            ],
            "meta": {"total": 2, "current_page": 1, "last_page": 1}
        })))
        .mount(&server)
        .await;

    let url = format!("{}/api/v1", server.uri());
    let args = parse(&["--api-url", &url, "list", "systems"]);
    let output: Value = serde_json::from_str(&run(&args).await.unwrap()).unwrap();

    assert_eq!(output["pagination"]["total"], 2);
    let names: Vec<_> = output["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["nombre"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Hidráulico", "Motor"]);
}

#[tokio::test]
async fn failure_becomes_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/fabricantes/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "No encontrado"})))
        .mount(&server)
        .await;

    let url = format!("{}/api/v1", server.uri());
    let args = parse(&["--api-url", &url, "get", "manufacturers", "9"]);
    let err = run(&args).await.unwrap_err();

    assert_eq!(err.to_string(), "not found: No encontrado");
}
