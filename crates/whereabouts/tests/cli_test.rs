#![allow(clippy::unwrap_used)]
// End-to-end tests for the `whereabouts` binary: wiremock serves the
// API, assert_cmd drives the process.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

fn record(city: &str, number: u32) -> serde_json::Value {
    json!({
        "gender": "female",
        "name": { "title": "Ms", "first": "Ana", "last": "Souza" },
        "location": {
            "street": { "number": number, "name": "Rua Um" },
            "city": city,
            "country": "Brazil"
        },
        "email": "ana.souza@example.com",
        "login": { "uuid": "550e8400-e29b-41d4-a716-446655440000", "username": "goldenlion127" },
        "dob": { "date": "1992-03-14T00:00:00.000Z", "age": 34 },
        "registered": { "date": "2018-09-01T00:00:00.000Z", "age": 8 }
    })
}

fn envelope(results: Vec<serde_json::Value>) -> serde_json::Value {
    let count = results.len();
    json!({
        "results": results,
        "info": { "seed": "cli-test", "results": count, "page": 1, "version": "1.4" }
    })
}

async fn mock_server(results: Vec<serde_json::Value>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(results)))
        .mount(&server)
        .await;
    server
}

fn whereabouts(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("whereabouts").unwrap();
    // Isolate from any real config file.
    cmd.env("HOME", home.path());
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd.env_remove("WHEREABOUTS_PROFILE");
    cmd.env_remove("WHEREABOUTS_ENDPOINT");
    cmd
}

async fn run_blocking(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert()).await.unwrap()
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn help_prints_usage() {
    let home = tempfile::tempdir().unwrap();
    whereabouts(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("columns"));
}

#[tokio::test]
async fn fetch_renders_plain_cities() {
    let server = mock_server(vec![record("Boston", 1), record("Austin", 2)]).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = whereabouts(&home);
    cmd.args(["fetch", "--endpoint", &server.uri(), "--output", "plain"]);

    run_blocking(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Boston"))
        .stdout(predicate::str::contains("Austin"));
}

#[tokio::test]
async fn fetch_sorts_and_filters() {
    let server =
        mock_server(vec![record("Boston", 1), record("Bordeaux", 2), record("Reno", 3)]).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = whereabouts(&home);
    cmd.args([
        "fetch",
        "--endpoint",
        &server.uri(),
        "--search",
        "bo",
        "--sort-by",
        "city:asc",
        "--output",
        "plain",
    ]);

    run_blocking(cmd)
        .await
        .success()
        .stdout(predicate::str::diff("Bordeaux\nBoston\n"));
}

#[tokio::test]
async fn fetch_forwards_results_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("results", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![record("Lyon", 1), record("Nice", 2)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = whereabouts(&home);
    cmd.args([
        "fetch",
        "--endpoint",
        &server.uri(),
        "--results",
        "2",
        "--output",
        "plain",
        "--quiet",
    ]);

    run_blocking(cmd).await.success();
}

#[tokio::test]
async fn unknown_sort_column_is_a_usage_error() {
    let server = mock_server(vec![record("Boston", 1)]).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = whereabouts(&home);
    cmd.args([
        "fetch",
        "--endpoint",
        &server.uri(),
        "--sort-by",
        "planet",
    ]);

    run_blocking(cmd)
        .await
        .failure()
        .code(2)
        .stderr(predicate::str::contains("planet"))
        .stderr(predicate::str::contains("city"));
}

#[tokio::test]
async fn server_error_maps_to_api_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "down" })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = whereabouts(&home);
    cmd.args(["fetch", "--endpoint", &server.uri()]);

    run_blocking(cmd).await.failure().code(5);
}

#[tokio::test]
async fn columns_lists_discovered_headers_in_order() {
    let server = mock_server(vec![record("Boston", 1)]).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = whereabouts(&home);
    cmd.args(["columns", "--endpoint", &server.uri()]);

    run_blocking(cmd)
        .await
        .success()
        .stdout(predicate::str::diff("number\nname\ncity\ncountry\n"));
}

#[tokio::test]
async fn zero_records_render_an_empty_table() {
    let server = mock_server(vec![]).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = whereabouts(&home);
    cmd.args([
        "fetch",
        "--endpoint",
        &server.uri(),
        "--output",
        "plain",
        "--quiet",
    ]);

    run_blocking(cmd).await.success().stdout(predicate::str::is_empty());
}

#[test]
fn config_path_prints_a_toml_path() {
    let home = tempfile::tempdir().unwrap();
    whereabouts(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
