use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Write a configuration pointing both environments at the mock server
fn write_config(dir: &TempDir, server: &MockServer) {
    let config = format!(
        r#"partner_id: partner
scope:
  - read-animal
  - read-appointmentstatus
production:
  url: {uri}/v1
  client_id: client
  client_secret: super-secret
sandbox:
  url: {uri}/trial/v1
  client_id: trial-client
  client_secret: trial-secret
timeout_secs: 5
"#,
        uri = server.uri()
    );
    fs::write(dir.path().join("config.yml"), config).unwrap();
}

fn ezyvet(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ezyvet").unwrap();
    cmd.env("EZYVET_CONFIG_DIR", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("EZYVET_FORMAT")
        .env_remove("EZYVET_SANDBOX")
        .env_remove("EZYVET_HEADERS");
    cmd
}

async fn mount_auth(server: &MockServer, prefix: &str) {
    Mock::given(method("POST"))
        .and(path(format!("{}/oauth/access_token", prefix)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "cli-token"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/address", prefix)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"items_page_total": 1},
            "items": []
        })))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, resource: &str, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/{}", resource)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"items_page_total": 1},
            "items": items
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_prints_json() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);
    mount_auth(&server, "/v1").await;

    Mock::given(method("GET"))
        .and(path("/v1/animal"))
        .and(query_param("id", "22"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"items_page_total": 1},
            "items": [{"animal": {"id": "22", "name": "Rex"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    ezyvet(&dir)
        .args(["fetch", "animal", r#"{"id":22}"#])
        .assert()
        .success()
        .stdout("[{\"animal\":{\"id\":\"22\",\"name\":\"Rex\"}}]\n");

    assert!(dir.path().join("token.json").exists());
}

#[tokio::test]
async fn test_fetch_csv_with_headers() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);
    mount_auth(&server, "/v1").await;
    mount_page(
        &server,
        "animal",
        json!([
            {"animal": {"id": "1", "name": "Rex"}},
            {"animal": {"id": "2", "name": "Tom", "sex_id": "3"}}
        ]),
    )
    .await;

    ezyvet(&dir)
        .args(["fetch", "animal", "-f", "csv", "--headers"])
        .assert()
        .success()
        .stdout("id,name,sex_id\n1,Rex,\n2,Tom,3\n");
}

#[tokio::test]
async fn test_empty_result_prints_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);
    mount_auth(&server, "/v1").await;
    mount_page(&server, "animal", json!([])).await;

    ezyvet(&dir)
        .args(["fetch", "animal", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[tokio::test]
async fn test_invalid_filter_makes_no_requests() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);

    ezyvet(&dir)
        .args(["fetch", "animal", "{not json"])
        .assert()
        .code(64)
        .stderr(predicate::str::starts_with("ERROR:"));

    ezyvet(&dir)
        .args(["fetch", "animal", "[1, 2]"])
        .assert()
        .code(64);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_failure_exit_code() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);
    mount_auth(&server, "/v1").await;
    Mock::given(method("GET"))
        .and(path("/v1/invoice"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    ezyvet(&dir)
        .args(["fetch", "invoice"])
        .assert()
        .code(102)
        .stdout(predicate::str::is_empty());
}

#[tokio::test]
async fn test_sandbox_uses_its_own_url_and_token_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);
    mount_auth(&server, "/trial/v1").await;

    ezyvet(&dir)
        .args(["auth", "test", "--sandbox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sandbox"));

    assert!(dir.path().join("token-sandbox.json").exists());
    assert!(!dir.path().join("token.json").exists());
}

#[tokio::test]
async fn test_rejected_credentials_exit_code() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);
    Mock::given(method("POST"))
        .and(path("/v1/oauth/access_token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"})),
        )
        .mount(&server)
        .await;

    ezyvet(&dir)
        .args(["auth", "login"])
        .assert()
        .code(100)
        .stderr(predicate::str::contains("Invalid client credentials"));

    assert!(dir.path().join("err.json").exists());
}

#[tokio::test]
async fn test_appointment_status_lookup() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);
    mount_auth(&server, "/v1").await;
    mount_page(
        &server,
        "appointmentstatus",
        json!([
            {"appointmentstatus": {"id": "1", "name": "Booked"}},
            {"appointmentstatus": {"id": "3", "name": "Arrived"}}
        ]),
    )
    .await;

    ezyvet(&dir)
        .args(["appointment-status", "lookup", "3"])
        .assert()
        .success()
        .stdout("Arrived\n");

    ezyvet(&dir)
        .args(["appointment-status", "lookup", "Booked"])
        .assert()
        .success()
        .stdout("1\n");

    ezyvet(&dir)
        .args(["appointment-status", "lookup", "Gone"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_token_commands() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.yml"), "partner_id: partner\n").unwrap();

    ezyvet(&dir).args(["auth", "token"]).assert().code(100);

    fs::write(
        dir.path().join("token.json"),
        r#"{"access_token":"abc","expires_in":3600}"#,
    )
    .unwrap();
    ezyvet(&dir)
        .args(["auth", "token"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""access_token":"abc""#));

    ezyvet(&dir)
        .args(["auth", "clear-token"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Removed"));
    assert!(!dir.path().join("token.json").exists());
}

#[test]
fn test_missing_configuration_exit_code() {
    let dir = TempDir::new().unwrap();
    ezyvet(&dir)
        .args(["fetch", "animal"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("ERROR:"));
}

#[test]
fn test_incomplete_configuration_exit_code() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.yml"), "partner_id: partner\nscope: [read-animal]\n")
        .unwrap();
    ezyvet(&dir)
        .args(["auth", "test"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("production.client_id"))
        .stderr(predicate::str::contains("API error").not());
}

#[test]
fn test_explicit_empty_scope_exit_code() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.yml"),
        "partner_id: partner\nscope: []\nproduction:\n  client_id: id\n  client_secret: secret\n",
    )
    .unwrap();
    ezyvet(&dir)
        .args(["fetch", "animal"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("scope"));
}

#[test]
fn test_unreachable_server_exit_code() {
    let dir = TempDir::new().unwrap();
    // nothing listens on the discard port
    fs::write(
        dir.path().join("config.yml"),
        "partner_id: partner\nproduction:\n  url: http://127.0.0.1:9/v1\n  client_id: id\n  client_secret: secret\ntimeout_secs: 5\n",
    )
    .unwrap();
    ezyvet(&dir)
        .args(["fetch", "animal"])
        .assert()
        .code(101)
        .stdout(predicate::str::is_empty());
}

#[tokio::test]
async fn test_default_scope_is_requested() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.yml"),
        format!(
            "partner_id: partner\nproduction:\n  url: {}/v1\n  client_id: id\n  client_secret: secret\n",
            server.uri()
        ),
    )
    .unwrap();
    Mock::given(method("POST"))
        .and(path("/v1/oauth/access_token"))
        .and(body_string_contains("scope=read-address%2Cread-animal%2C"))
        .and(body_string_contains("read-vaccination"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "cli-token"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"items_page_total": 1},
            "items": []
        })))
        .mount(&server)
        .await;

    ezyvet(&dir).args(["auth", "login"]).assert().success();
}

#[test]
fn test_environment_overrides_do_not_break_document_commands() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.yml"), "partner_id: partner\n").unwrap();

    ezyvet(&dir)
        .env("EZYVET_FORMAT", "csv")
        .env("EZYVET_HEADERS", "true")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"partner_id\":\"partner\""));

    ezyvet(&dir)
        .env("EZYVET_SANDBOX", "1")
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yml"));

    ezyvet(&dir)
        .env("EZYVET_SANDBOX", "yes")
        .args(["auth", "token"])
        .assert()
        .code(100)
        .stderr(predicate::str::contains("token-sandbox.json"));
}

#[tokio::test]
async fn test_format_from_environment() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    write_config(&dir, &server);
    mount_auth(&server, "/v1").await;
    mount_page(
        &server,
        "animal",
        json!([{"animal": {"id": "1", "name": "Rex"}}]),
    )
    .await;

    ezyvet(&dir)
        .env("EZYVET_FORMAT", "csv")
        .env("EZYVET_HEADERS", "1")
        .args(["fetch", "animal"])
        .assert()
        .success()
        .stdout("id,name\n1,Rex\n");
}

#[test]
fn test_config_commands() {
    let dir = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    let import = source.path().join("import.yml");
    fs::write(
        &import,
        "partner_id: imported\nscope: [read-animal]\nproduction:\n  url: https://api.ezyvet.com/v1\n  client_id: id\n  client_secret: hidden-value\n",
    )
    .unwrap();

    ezyvet(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yml"));

    ezyvet(&dir)
        .args(["config", "import", "--file"])
        .arg(&import)
        .assert()
        .success();
    assert!(dir.path().join("config.yml").exists());

    ezyvet(&dir)
        .args(["config", "show", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("imported"))
        .stdout(predicate::str::contains("hidden-value").not());

    let export = source.path().join("export.yml");
    ezyvet(&dir)
        .args(["config", "export", "--output"])
        .arg(&export)
        .assert()
        .success();
    let exported = fs::read_to_string(export).unwrap();
    assert!(exported.contains("hidden-value"));
}

#[test]
fn test_resources_listing() {
    let dir = TempDir::new().unwrap();
    ezyvet(&dir)
        .args(["resources", "-f", "csv", "--headers"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("description,filter,name,path\n"))
        .stdout(predicate::str::contains("/animalcolour"))
        .stdout(predicate::str::contains("appointment-status,/appointmentstatus"));
}
