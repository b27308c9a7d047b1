// Login endpoint
//
// `POST /global-user/login` with `{ username, password, app }`. A failed
// credential check returns the literal body `"wrong"` rather than an error
// status; that sentinel is mapped to `Error::Authentication` here so the
// session layer never sees it.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::RecordClient;
use crate::error::Error;

/// Literal body returned by the login endpoint on bad credentials.
pub const LOGIN_SENTINEL: &str = "wrong";

/// Profile document as returned by the login endpoint, before any
/// department gating. The session layer decides whether to keep it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dept: String,
    #[serde(default)]
    pub syno_username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl RecordClient {
    /// Check a credential pair against the login endpoint.
    ///
    /// `app` is the fixed application identifier attached to every login
    /// request. Returns the raw profile on success; the department
    /// allowlist check belongs to the caller.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
        app: &str,
    ) -> Result<RawProfile, Error> {
        let url = self.base_url().join("global-user/login")?;
        debug!(username, app, "logging in at {}", url);

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
            "app": app,
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        // Sentinel check first: the endpoint signals bad credentials with
        // a 2xx and the literal body "wrong" (bare or JSON-quoted).
        if text.trim().trim_matches('"') == LOGIN_SENTINEL {
            return Err(Error::Authentication {
                message: "credentials rejected".into(),
            });
        }

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let profile = serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: text,
        })?;

        debug!("login successful");
        Ok(profile)
    }
}
