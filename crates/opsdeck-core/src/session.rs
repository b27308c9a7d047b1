// ── Session gate ──
//
// One owned session-state object, constructed at startup from the
// persisted store, exposing read-only state plus login/logout
// transitions. There is no ambient global beyond the instance the
// consumer owns.

use std::path::PathBuf;
use std::sync::Mutex;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{info, warn};

use opsdeck_api::RecordClient;

use crate::error::CoreError;
use crate::model::UserProfile;

/// The single department code allowed to use the dashboard.
pub const DEFAULT_ALLOWED_DEPT: &str = "MIS";

/// Session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(UserProfile),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(p) => Some(p),
            _ => None,
        }
    }
}

// ── Persistence ─────────────────────────────────────────────────────

/// Where the session profile blob lives between runs.
///
/// Persistence is best-effort: a failed write degrades to an
/// in-memory-only session, it never fails a successful login.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<UserProfile>;
    fn save(&self, profile: &UserProfile);
    fn clear(&self);
}

/// JSON blob at a fixed path.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<UserProfile> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn save(&self, profile: &UserProfile) {
        let result = serde_json::to_string(profile)
            .map_err(std::io::Error::other)
            .and_then(|json| {
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&self.path, json)
            });
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "failed to persist session");
        }
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<UserProfile>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<UserProfile> {
        self.slot.lock().ok()?.clone()
    }

    fn save(&self, profile: &UserProfile) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(profile.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

// ── Manager ─────────────────────────────────────────────────────────

/// Owns the session state machine:
/// unauthenticated -> authenticating -> authenticated.
pub struct SessionManager {
    client: RecordClient,
    app_id: String,
    allowed_dept: String,
    store: Box<dyn SessionStore>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Construct from the persisted store. A stored profile starts the
    /// manager authenticated without re-validating credentials.
    pub fn new(
        client: RecordClient,
        app_id: impl Into<String>,
        allowed_dept: impl Into<String>,
        store: Box<dyn SessionStore>,
    ) -> Self {
        let initial = store
            .load()
            .map_or(SessionState::Unauthenticated, SessionState::Authenticated);
        // Transitions go through send_replace so they apply even while
        // no receiver is subscribed.
        let (state, _) = watch::channel(initial);

        Self {
            client,
            app_id: app_id.into(),
            allowed_dept: allowed_dept.into(),
            store,
            state,
        }
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The current state (cloned).
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Check credentials, gate on the department allowlist, persist.
    ///
    /// A sentinel login body, an unreachable endpoint, and a non-2xx
    /// response all collapse into [`CoreError::InvalidCredentials`] --
    /// the caller cannot tell them apart, by design. A valid credential
    /// pair with a disallowed department lands back in
    /// `Unauthenticated` and nothing is persisted.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<UserProfile, CoreError> {
        self.state.send_replace(SessionState::Authenticating);

        let raw = match self.client.login(username, password, &self.app_id).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(username, error = %e, "login failed");
                self.state.send_replace(SessionState::Unauthenticated);
                return Err(CoreError::InvalidCredentials);
            }
        };

        if raw.dept != self.allowed_dept {
            warn!(username, dept = %raw.dept, "department not on allowlist");
            self.state.send_replace(SessionState::Unauthenticated);
            return Err(CoreError::PermissionDenied { dept: raw.dept });
        }

        let profile = UserProfile::from(raw);
        self.store.save(&profile);
        self.state
            .send_replace(SessionState::Authenticated(profile.clone()));
        info!(username = %profile.username, "session established");
        Ok(profile)
    }

    /// Clear the persisted profile and return to unauthenticated.
    /// Synchronous: no server call is made.
    pub fn logout(&self) {
        self.store.clear();
        self.state.send_replace(SessionState::Unauthenticated);
        info!("session cleared");
    }
}
