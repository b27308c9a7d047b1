// Record store HTTP client
//
// Wraps `reqwest::Client` with record-store URL construction and response
// decoding. Collection-level operations live in `collection.rs`; the login
// flow lives in `auth.rs`. Methods here are the raw HTTP verbs against
// `/api/collections/{name}/records` paths.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::params::{ListPage, ListParams};
use crate::transport::TransportConfig;

/// Shared handle to the record store.
///
/// Cheaply cloneable: every `Collection` holds a clone. Concurrent calls
/// with identical parameters each execute independently against the
/// backend -- there is no client-side caching or in-flight deduplication.
#[derive(Clone)]
pub struct RecordClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RecordClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The record store base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/api/collections/{collection}/records`
    pub(crate) fn records_url(&self, collection: &str) -> Result<Url, Error> {
        self.base_url
            .join(&format!("api/collections/{collection}/records"))
            .map_err(Error::InvalidUrl)
    }

    /// `{base}/api/collections/{collection}/records/{id}`
    pub(crate) fn record_url(&self, collection: &str, id: &str) -> Result<Url, Error> {
        self.base_url
            .join(&format!("api/collections/{collection}/records/{id}"))
            .map_err(Error::InvalidUrl)
    }

    // ── Raw operations ───────────────────────────────────────────────

    pub(crate) async fn list_records<T: DeserializeOwned>(
        &self,
        collection: &str,
        params: &ListParams,
    ) -> Result<ListPage<T>, Error> {
        let url = self.records_url(collection)?;
        debug!(collection, page = params.page, "GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(&params.query_pairs())
            .send()
            .await
            .map_err(Error::Transport)?;

        decode_response(collection, None, resp).await
    }

    pub(crate) async fn get_record<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        expand: Option<&str>,
    ) -> Result<T, Error> {
        let url = self.record_url(collection, id)?;
        debug!(collection, id, "GET {}", url);

        let mut req = self.http.get(url);
        if let Some(expand) = expand {
            req = req.query(&[("expand", expand)]);
        }
        let resp = req.send().await.map_err(Error::Transport)?;

        decode_response(collection, Some(id), resp).await
    }

    pub(crate) async fn create_record<T: DeserializeOwned>(
        &self,
        collection: &str,
        data: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.records_url(collection)?;
        debug!(collection, "POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(data)
            .send()
            .await
            .map_err(Error::Transport)?;

        decode_response(collection, None, resp).await
    }

    pub(crate) async fn update_record<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        patch: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.record_url(collection, id)?;
        debug!(collection, id, "PATCH {}", url);

        let resp = self
            .http
            .patch(url)
            .json(patch)
            .send()
            .await
            .map_err(Error::Transport)?;

        decode_response(collection, Some(id), resp).await
    }

    pub(crate) async fn delete_record(&self, collection: &str, id: &str) -> Result<(), Error> {
        let url = self.record_url(collection, id)?;
        debug!(collection, id, "DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(error_from_response(collection, Some(id), resp).await)
    }
}

// ── Response decoding ────────────────────────────────────────────────

/// Decode a 2xx body as `T`, or map the failure status to an `Error`.
async fn decode_response<T: DeserializeOwned>(
    collection: &str,
    id: Option<&str>,
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        return Err(error_from_response(collection, id, resp).await);
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

/// Map a non-2xx response to the error taxonomy.
///
/// 404 becomes `NotFound`; anything else with a `{ message }` body (or
/// without one) becomes `Api`.
async fn error_from_response(
    collection: &str,
    id: Option<&str>,
    resp: reqwest::Response,
) -> Error {
    let status = resp.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Error::NotFound {
            collection: collection.to_owned(),
            id: id.unwrap_or_default().to_owned(),
        };
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or(body);

    Error::Api {
        status: status.as_u16(),
        message,
    }
}
