// Typed collection handle
//
// One `Collection<T>` per named collection (`ma_servers`, `ma_apps`, ...).
// Every operation is a single asynchronous network call: no caching, no
// retries, no deduplication. Failures are logged with the collection name
// and re-thrown unchanged to the caller.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::client::RecordClient;
use crate::error::Error;
use crate::params::{ListPage, ListParams};

/// Typed wrapper over the [`RecordClient`] for one named collection.
pub struct Collection<T> {
    client: RecordClient,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            name: self.name,
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Collection<T> {
    pub fn new(client: RecordClient, name: &'static str) -> Self {
        Self {
            client,
            name,
            _marker: PhantomData,
        }
    }

    /// The collection name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// List records with paging, sorting, filtering, and expansion.
    pub async fn list(&self, params: &ListParams) -> Result<ListPage<T>, Error> {
        self.client
            .list_records(self.name, params)
            .await
            .map_err(|e| self.log(e, "list"))
    }

    /// Fetch one record by id. A missing id surfaces as [`Error::NotFound`].
    pub async fn get(&self, id: &str, expand: Option<&str>) -> Result<T, Error> {
        self.client
            .get_record(self.name, id, expand)
            .await
            .map_err(|e| self.log(e, "get"))
    }

    /// List records that reference the given server.
    ///
    /// Injects `server = "<id>"` into the filter expression. The id is
    /// interpolated verbatim -- callers must pass a trusted record id,
    /// since no quote escaping is performed.
    pub async fn get_by_server(
        &self,
        server_id: &str,
        params: ListParams,
    ) -> Result<ListPage<T>, Error> {
        let filter = format!("server = \"{server_id}\"");
        self.get_by_filter(filter, params).await
    }

    /// List with an explicit filter expression.
    pub async fn get_by_filter(
        &self,
        filter: impl Into<String>,
        params: ListParams,
    ) -> Result<ListPage<T>, Error> {
        self.list(&params.filter(filter)).await
    }

    /// Create a record. Partial entity in, full entity (with server-assigned
    /// id and timestamps) out.
    pub async fn create(&self, data: &impl Serialize) -> Result<T, Error> {
        self.client
            .create_record(self.name, data)
            .await
            .map_err(|e| self.log(e, "create"))
    }

    /// Patch a record. Unspecified fields are left unchanged server-side.
    pub async fn update(&self, id: &str, patch: &impl Serialize) -> Result<T, Error> {
        self.client
            .update_record(self.name, id, patch)
            .await
            .map_err(|e| self.log(e, "update"))
    }

    /// Delete a record. Success is `Ok(())` -- there is no "false" outcome,
    /// any failure is a rejected future.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.client
            .delete_record(self.name, id)
            .await
            .map_err(|e| self.log(e, "delete"))
    }

    fn log(&self, e: Error, op: &str) -> Error {
        warn!(collection = self.name, error = %e, "{op} failed");
        e
    }
}
