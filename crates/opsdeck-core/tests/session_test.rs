// Session gate tests against a mocked login endpoint.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opsdeck_api::RecordClient;
use opsdeck_core::{
    CoreError, MemorySessionStore, SessionManager, SessionState, SessionStore, UserProfile,
};

fn client_for(uri: &str) -> RecordClient {
    let url = uri.parse().expect("base url");
    RecordClient::with_client(reqwest::Client::new(), url)
}

fn profile_body(dept: &str) -> serde_json::Value {
    json!({
        "id": "usr_1",
        "username": "ops",
        "name": "Ops Admin",
        "email": "ops@example.internal",
        "dept": dept,
        "token": "tok_abc"
    })
}

fn password() -> SecretString {
    SecretString::from("hunter2".to_owned())
}

#[tokio::test]
async fn successful_login_persists_and_authenticates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/global-user/login"))
        .and(body_partial_json(json!({ "username": "ops", "app": "ma" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("MIS")))
        .mount(&server)
        .await;

    let store = MemorySessionStore::new();
    let manager = SessionManager::new(client_for(&server.uri()), "ma", "MIS", Box::new(store));

    assert_eq!(manager.current(), SessionState::Unauthenticated);

    let profile = manager.login("ops", &password()).await.expect("login");
    assert_eq!(profile.dept, "MIS");
    assert!(manager.current().is_authenticated());
}

#[tokio::test]
async fn wrong_department_never_persists_a_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/global-user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("OTHER")))
        .mount(&server)
        .await;

    // Keep a handle on the store to inspect it afterwards.
    let store = std::sync::Arc::new(MemorySessionStore::new());
    struct Shared(std::sync::Arc<MemorySessionStore>);
    impl SessionStore for Shared {
        fn load(&self) -> Option<UserProfile> {
            self.0.load()
        }
        fn save(&self, profile: &UserProfile) {
            self.0.save(profile);
        }
        fn clear(&self) {
            self.0.clear();
        }
    }

    let manager = SessionManager::new(
        client_for(&server.uri()),
        "ma",
        "MIS",
        Box::new(Shared(std::sync::Arc::clone(&store))),
    );

    let err = manager.login("ops", &password()).await.unwrap_err();
    assert!(
        matches!(err, CoreError::PermissionDenied { ref dept } if dept == "OTHER"),
        "expected PermissionDenied, got: {err:?}"
    );

    // Credentials were valid, but nothing was persisted and the state
    // machine landed back in Unauthenticated.
    assert_eq!(manager.current(), SessionState::Unauthenticated);
    assert!(store.load().is_none());
}

#[tokio::test]
async fn sentinel_and_network_failures_share_one_message() {
    // Sentinel body
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/global-user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"wrong\""))
        .mount(&server)
        .await;

    let manager = SessionManager::new(
        client_for(&server.uri()),
        "ma",
        "MIS",
        Box::new(MemorySessionStore::new()),
    );
    let sentinel_err = manager.login("ops", &password()).await.unwrap_err();

    // Unreachable endpoint
    let manager = SessionManager::new(
        client_for("http://127.0.0.1:1"),
        "ma",
        "MIS",
        Box::new(MemorySessionStore::new()),
    );
    let network_err = manager.login("ops", &password()).await.unwrap_err();

    // Non-distinguishable by design.
    assert_eq!(sentinel_err.to_string(), network_err.to_string());
    assert_eq!(sentinel_err.to_string(), "Invalid username or password");
}

#[tokio::test]
async fn transitions_apply_with_no_subscribers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/global-user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("MIS")))
        .mount(&server)
        .await;

    // Nothing ever calls subscribe(): the state machine must still
    // advance through login and logout.
    let manager = SessionManager::new(
        client_for(&server.uri()),
        "ma",
        "MIS",
        Box::new(MemorySessionStore::new()),
    );

    manager.login("ops", &password()).await.expect("login");
    assert!(manager.current().is_authenticated());

    manager.logout();
    assert_eq!(manager.current(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn persisted_profile_starts_authenticated() {
    let store = MemorySessionStore::new();
    store.save(&UserProfile {
        id: "usr_1".into(),
        username: "ops".into(),
        name: "Ops Admin".into(),
        email: "ops@example.internal".into(),
        dept: "MIS".into(),
        syno_username: None,
        token: Some("tok_abc".into()),
    });

    let manager = SessionManager::new(
        client_for("http://127.0.0.1:1"),
        "ma",
        "MIS",
        Box::new(store),
    );

    // No server round-trip: the stored profile is trusted as-is.
    assert!(manager.current().is_authenticated());
}

#[tokio::test]
async fn logout_clears_synchronously() {
    let store = MemorySessionStore::new();
    store.save(&UserProfile {
        id: "usr_1".into(),
        username: "ops".into(),
        name: String::new(),
        email: String::new(),
        dept: "MIS".into(),
        syno_username: None,
        token: None,
    });

    let manager = SessionManager::new(
        client_for("http://127.0.0.1:1"),
        "ma",
        "MIS",
        Box::new(store),
    );
    assert!(manager.current().is_authenticated());

    manager.logout();
    assert_eq!(manager.current(), SessionState::Unauthenticated);
}
