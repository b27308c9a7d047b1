// ── Server edit/create form state ──
//
// `ServerDraft` is the canonical editable shape. A draft is re-derived
// from the source record each time a form opens; closing without saving
// simply drops it. The inverse mapping (`to_patch`) always writes the
// canonical string enums -- the legacy boolean encodings are read-only
// compatible and never written back.

use serde::Serialize;

use crate::model::{DockerMode, Environment, Server, ServerStatus};

/// Editable form state for a server, normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerDraft {
    pub name: String,
    pub host: String,
    pub ip: String,
    pub docker_mode: DockerMode,
    pub environment: Environment,
    pub os: String,
    pub status: ServerStatus,
    pub location: String,
    pub netdata_enabled: bool,
    pub notes: String,
}

impl ServerDraft {
    /// Snapshot a decoded server into editable form state. This is the
    /// form's initial state; keep a clone of it for the dirty check.
    pub fn from_server(server: &Server) -> Self {
        Self {
            name: server.name.clone(),
            host: server.host.clone().unwrap_or_default(),
            ip: server.ip.clone().unwrap_or_default(),
            docker_mode: server.docker_mode,
            environment: server.environment,
            os: server.os.clone().unwrap_or_default(),
            status: server.status,
            location: server.location.clone().unwrap_or_default(),
            netdata_enabled: server.netdata_enabled,
            notes: server.notes.clone().unwrap_or_default(),
        }
    }

    /// Structural-equality diff against the opened snapshot.
    pub fn is_dirty(&self, initial: &Self) -> bool {
        self != initial
    }

    /// The save gate: something changed AND the required name is
    /// non-blank after trimming.
    pub fn can_save(&self, initial: &Self) -> bool {
        self.is_dirty(initial) && !self.name.trim().is_empty()
    }

    /// Inverse mapping to the wire shape. Every editable field is
    /// written; enums as their canonical lowercase strings.
    pub fn to_patch(&self) -> ServerPatch {
        ServerPatch {
            name: self.name.trim().to_owned(),
            host: self.host.clone(),
            ip: self.ip.clone(),
            docker_mode: self.docker_mode.to_string(),
            environment: self.environment.to_string(),
            os: self.os.clone(),
            status: self.status.to_string(),
            location: self.location.clone(),
            is_netdata_enabled: self.netdata_enabled,
            notes: self.notes.clone(),
        }
    }
}

/// Wire-shaped partial update for a server record.
#[derive(Debug, Clone, Serialize)]
pub struct ServerPatch {
    pub name: String,
    pub host: String,
    pub ip: String,
    pub docker_mode: String,
    pub environment: String,
    pub os: String,
    pub status: String,
    pub location: String,
    pub is_netdata_enabled: bool,
    pub notes: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn server() -> Server {
        Server {
            id: "srv_1".into(),
            name: "alpha".into(),
            host: Some("alpha.internal".into()),
            ip: Some("10.0.0.5".into()),
            docker_mode: DockerMode::Cli,
            environment: Environment::Prd,
            os: Some("debian 12".into()),
            status: ServerStatus::Online,
            location: None,
            netdata_enabled: true,
            notes: None,
            created: None,
            updated: None,
        }
    }

    #[test]
    fn pristine_draft_is_not_dirty() {
        let initial = ServerDraft::from_server(&server());
        let current = initial.clone();
        assert!(!current.is_dirty(&initial));
        assert!(!current.can_save(&initial));
    }

    #[test]
    fn changed_field_enables_save() {
        let initial = ServerDraft::from_server(&server());
        let mut current = initial.clone();
        current.status = ServerStatus::Maintenance;
        assert!(current.is_dirty(&initial));
        assert!(current.can_save(&initial));
    }

    #[test]
    fn blank_name_blocks_save_even_when_dirty() {
        let initial = ServerDraft::from_server(&server());
        let mut current = initial.clone();
        current.name = "   ".into();
        assert!(current.is_dirty(&initial));
        assert!(!current.can_save(&initial));
    }

    #[test]
    fn patch_writes_canonical_enum_strings() {
        let mut draft = ServerDraft::from_server(&server());
        draft.docker_mode = DockerMode::Desktop;
        draft.environment = Environment::Dev;
        draft.status = ServerStatus::Offline;

        let patch = draft.to_patch();
        assert_eq!(patch.docker_mode, "desktop");
        assert_eq!(patch.environment, "dev");
        assert_eq!(patch.status, "offline");

        // Never a boolean on the way back out.
        let value = serde_json::to_value(&patch).unwrap();
        assert!(value.get("docker_mode").unwrap().is_string());
    }

    #[test]
    fn patch_trims_the_name() {
        let mut draft = ServerDraft::from_server(&server());
        draft.name = "  beta  ".into();
        assert_eq!(draft.to_patch().name, "beta");
    }

    #[test]
    fn blank_draft_is_all_defaults() {
        let draft = ServerDraft::default();
        assert_eq!(draft.docker_mode, DockerMode::None);
        assert_eq!(draft.environment, Environment::Prd);
        assert_eq!(draft.status, ServerStatus::Online);
        assert!(draft.name.is_empty());
    }
}
