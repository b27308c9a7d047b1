// ── Session profile ──

use serde::{Deserialize, Serialize};

use opsdeck_api::RawProfile;

/// The authenticated user's profile, as persisted in the session store.
///
/// Only constructed after the department allowlist check passes; a
/// profile that fails the check is discarded, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub dept: String,
    #[serde(default)]
    pub syno_username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl From<RawProfile> for UserProfile {
    fn from(raw: RawProfile) -> Self {
        Self {
            id: raw.id,
            username: raw.username,
            name: raw.name,
            email: raw.email,
            dept: raw.dept,
            syno_username: raw.syno_username,
            // Some deployments return `token`, others `session_token`.
            token: raw.token.or(raw.session_token),
        }
    }
}
