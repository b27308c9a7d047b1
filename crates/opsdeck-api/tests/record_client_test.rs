// Integration tests for `RecordClient` / `Collection` using wiremock.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opsdeck_api::{Collection, Error, ListParams, RecordClient};

#[derive(Debug, Deserialize)]
struct TestRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    server: String,
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RecordClient) {
    let server = MockServer::start().await;
    let url = server.uri().parse().expect("mock server uri");
    let client = RecordClient::with_client(reqwest::Client::new(), url);
    (server, client)
}

fn servers(client: &RecordClient) -> Collection<TestRecord> {
    Collection::new(client.clone(), "ma_servers")
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_default_params() {
    let (server, client) = setup().await;

    let body = json!({
        "page": 1,
        "perPage": 50,
        "totalItems": 2,
        "totalPages": 1,
        "items": [
            { "id": "srv_1", "name": "alpha" },
            { "id": "srv_2", "name": "beta" },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/collections/ma_servers/records"))
        .and(query_param("page", "1"))
        .and(query_param("perPage", "50"))
        .and(query_param("sort", "-created"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = servers(&client).list(&ListParams::default()).await.unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 50);
    assert_eq!(page.total_items, 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "alpha");
}

#[tokio::test]
async fn test_get_by_server_injects_filter() {
    let (server, client) = setup().await;

    let body = json!({
        "page": 1,
        "perPage": 50,
        "totalItems": 2,
        "totalPages": 1,
        "items": [
            { "id": "app_1", "server": "srv_1" },
            { "id": "app_2", "server": "srv_1" },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/collections/ma_apps/records"))
        .and(query_param("filter", "server = \"srv_1\""))
        .and(query_param("sort", "-created"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let apps: Collection<TestRecord> = Collection::new(client, "ma_apps");
    let page = apps
        .get_by_server("srv_1", ListParams::default())
        .await
        .unwrap();

    assert_eq!(page.total_items, 2);
    assert!(page.items.iter().all(|a| a.server == "srv_1"));
}

#[tokio::test]
async fn test_create_echoes_caller_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/ma_servers/records"))
        .and(body_partial_json(json!({ "name": "gamma" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "srv_9",
            "name": "gamma",
            "created": "2026-01-01 00:00:00.000Z",
            "updated": "2026-01-01 00:00:00.000Z"
        })))
        .mount(&server)
        .await;

    let created = servers(&client)
        .create(&json!({ "name": "gamma" }))
        .await
        .unwrap();

    assert_eq!(created.id, "srv_9");
    assert_eq!(created.name, "gamma");
}

#[tokio::test]
async fn test_update_is_patch() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/collections/ma_servers/records/srv_1"))
        .and(body_partial_json(json!({ "status": "maintenance" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "srv_1",
            "name": "alpha"
        })))
        .mount(&server)
        .await;

    let updated = servers(&client)
        .update("srv_1", &json!({ "status": "maintenance" }))
        .await
        .unwrap();

    assert_eq!(updated.id, "srv_1");
}

#[tokio::test]
async fn test_delete_resolves_unit() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/collections/ma_servers/records/srv_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    servers(&client).delete("srv_1").await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_missing_record_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/ma_servers/records/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found." })),
        )
        .mount(&server)
        .await;

    let err = servers(&client).get("nope", None).await.unwrap_err();

    match &err {
        Error::NotFound { collection, id } => {
            assert_eq!(collection, "ma_servers");
            assert_eq!(id, "nope");
        }
        other => panic!("expected NotFound, got: {other:?}"),
    }
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_api_error_carries_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/ma_servers/records"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid filter expression"
        })))
        .mount(&server)
        .await;

    let result = servers(&client).list(&ListParams::default()).await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid filter expression");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Login tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_returns_profile() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/global-user/login"))
        .and(body_partial_json(json!({
            "username": "ops",
            "app": "ma"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "usr_1",
            "username": "ops",
            "name": "Ops Admin",
            "email": "ops@example.internal",
            "dept": "MIS",
            "token": "tok_abc"
        })))
        .mount(&server)
        .await;

    let profile = client
        .login("ops", &SecretString::from("pw".to_owned()), "ma")
        .await
        .unwrap();

    assert_eq!(profile.username, "ops");
    assert_eq!(profile.dept, "MIS");
    assert_eq!(profile.token.as_deref(), Some("tok_abc"));
}

#[tokio::test]
async fn test_login_sentinel_body_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/global-user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"wrong\""))
        .mount(&server)
        .await;

    let result = client
        .login("ops", &SecretString::from("bad".to_owned()), "ma")
        .await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication, got: {result:?}"
    );
}

#[tokio::test]
async fn test_login_non_2xx_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/global-user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "unauthorized"
        })))
        .mount(&server)
        .await;

    let result = client
        .login("ops", &SecretString::from("pw".to_owned()), "ma")
        .await;

    assert!(
        matches!(result, Err(Error::Api { status: 401, .. })),
        "expected Api 401, got: {result:?}"
    );
}
