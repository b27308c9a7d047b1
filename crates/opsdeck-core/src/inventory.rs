// ── Inventory data services ──
//
// Typed access to the four collections, decoding every record into its
// canonical form at the boundary. Nothing here caches: each call is an
// independent fetch, and after an update the caller decides when to
// re-fetch (update never refreshes held state implicitly).

use opsdeck_api::{Collection, ListPage, ListParams, RecordClient};

use crate::decode::{RawApp, RawPort, RawServer};
use crate::error::CoreError;
use crate::form::ServerPatch;
use crate::model::{App, Port, Server, Ticket, TicketStatus};

pub const SERVERS_COLLECTION: &str = "ma_servers";
pub const APPS_COLLECTION: &str = "ma_apps";
pub const PORTS_COLLECTION: &str = "ma_server_ports";
pub const TICKETS_COLLECTION: &str = "ma_tickets";

/// Handle bundle for the inventory collections. Cheaply cloneable.
#[derive(Clone)]
pub struct Inventory {
    servers: Collection<RawServer>,
    apps: Collection<RawApp>,
    ports: Collection<RawPort>,
    tickets: Collection<Ticket>,
}

impl Inventory {
    pub fn new(client: RecordClient) -> Self {
        Self {
            servers: Collection::new(client.clone(), SERVERS_COLLECTION),
            apps: Collection::new(client.clone(), APPS_COLLECTION),
            ports: Collection::new(client.clone(), PORTS_COLLECTION),
            tickets: Collection::new(client, TICKETS_COLLECTION),
        }
    }

    // ── Servers ──────────────────────────────────────────────────────

    /// List servers matching a search query (case-insensitive substring
    /// across name, IP, and environment). A blank query lists everything.
    pub async fn search_servers(&self, query: &str) -> Result<ListPage<Server>, CoreError> {
        let mut params = ListParams::default();
        if let Some(filter) = server_search_filter(query) {
            params = params.filter(filter);
        }
        let page = self.servers.list(&params).await?;
        Ok(page.map(Server::from))
    }

    /// One server by id, decoded.
    pub async fn server(&self, id: &str) -> Result<Server, CoreError> {
        let raw = self.servers.get(id, None).await?;
        Ok(Server::from(raw))
    }

    /// Create a server from form state. Blank names are rejected before
    /// any network call.
    pub async fn create_server(&self, patch: &ServerPatch) -> Result<Server, CoreError> {
        validate_name(&patch.name)?;
        let raw = self.servers.create(patch).await?;
        Ok(Server::from(raw))
    }

    /// Patch a server. Returns the updated record; any state the caller
    /// holds is theirs to refresh.
    pub async fn update_server(&self, id: &str, patch: &ServerPatch) -> Result<Server, CoreError> {
        validate_name(&patch.name)?;
        let raw = self.servers.update(id, patch).await?;
        Ok(Server::from(raw))
    }

    pub async fn delete_server(&self, id: &str) -> Result<(), CoreError> {
        self.servers.delete(id).await?;
        Ok(())
    }

    // ── Apps / ports ─────────────────────────────────────────────────

    /// Apps on one server, with denormalized metadata expanded.
    pub async fn server_apps(&self, server_id: &str) -> Result<ListPage<App>, CoreError> {
        let params = ListParams::default().expand("app");
        let page = self.apps.get_by_server(server_id, params).await?;
        Ok(page.map(App::from))
    }

    /// Ports on one server, with the referenced app expanded.
    pub async fn server_ports(&self, server_id: &str) -> Result<ListPage<Port>, CoreError> {
        let params = ListParams::default().expand("app");
        let page = self.ports.get_by_server(server_id, params).await?;
        Ok(page.map(Port::from))
    }

    // ── Tickets ──────────────────────────────────────────────────────

    /// List tickets, optionally restricted to one status.
    pub async fn tickets(
        &self,
        status: Option<TicketStatus>,
    ) -> Result<ListPage<Ticket>, CoreError> {
        let mut params = ListParams::default();
        if let Some(status) = status {
            params = params.filter(format!("status = \"{status}\""));
        }
        Ok(self.tickets.list(&params).await?)
    }

    // ── Counter probes (see counts.rs) ───────────────────────────────

    pub(crate) fn servers_collection(&self) -> &Collection<RawServer> {
        &self.servers
    }

    pub(crate) fn apps_collection(&self) -> &Collection<RawApp> {
        &self.apps
    }

    pub(crate) fn tickets_collection(&self) -> &Collection<Ticket> {
        &self.tickets
    }
}

/// Build the server search filter. The query is interpolated verbatim
/// into the expression (ids and queries are treated as trusted input;
/// no quote escaping is performed).
fn server_search_filter(query: &str) -> Option<String> {
    let q = query.trim();
    if q.is_empty() {
        return None;
    }
    Some(format!(
        "name ~ \"{q}\" || ip ~ \"{q}\" || environment ~ \"{q}\""
    ))
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation {
            message: "server name is required".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_means_no_filter() {
        assert!(server_search_filter("").is_none());
        assert!(server_search_filter("   ").is_none());
    }

    #[test]
    fn query_matches_name_ip_and_environment() {
        let filter = server_search_filter("10.0").expect("filter");
        assert_eq!(
            filter,
            "name ~ \"10.0\" || ip ~ \"10.0\" || environment ~ \"10.0\""
        );
    }

    #[test]
    fn blank_name_fails_validation() {
        assert!(matches!(
            validate_name("  "),
            Err(CoreError::Validation { .. })
        ));
        assert!(validate_name("alpha").is_ok());
    }
}
