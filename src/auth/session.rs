use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Role, User};

/// Session file name in the storage directory
const SESSION_FILE: &str = "session.json";

/// The persisted `{user, token}` record. The pair is always written and
/// cleared together - neither disk nor memory ever holds a partial session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub user: User,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory authentication state, rehydrated from disk at process start.
///
/// Two states only: unauthenticated and authenticated. Transitions are
/// synchronous and atomic; no observer ever sees a user without a token or
/// vice versa.
pub struct Session {
    storage_dir: PathBuf,
    data: Option<SessionData>,
}

impl Session {
    pub fn new(storage_dir: PathBuf) -> Self {
        Self {
            storage_dir,
            data: None,
        }
    }

    /// Establish a session from a successful login response. The identity and
    /// token come from the backend and are not re-validated here - the trust
    /// boundary is the API. A persistence failure is logged but never rolls
    /// back the in-memory transition.
    pub fn login(&mut self, user: User, token: String) {
        debug!(user = %user.username, role = %user.role, "Session established");
        self.data = Some(SessionData {
            user,
            token,
            created_at: Utc::now(),
        });
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to persist session");
        }
    }

    /// Clear the session and remove the persisted record. Calling this while
    /// already logged out is a no-op.
    pub fn logout(&mut self) {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(error = %e, "Failed to remove session file");
            }
        }
    }

    /// Rehydrate from disk, invoked once at process start. Absent, unreadable
    /// or structurally malformed data degrades silently to logged-out: a
    /// corrupted local session must never prevent the application from
    /// loading.
    pub fn restore(&mut self) {
        let path = self.session_path();
        if !path.exists() {
            debug!("No persisted session");
            return;
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to read session file, treating as logged out");
                return;
            }
        };

        match serde_json::from_str::<SessionData>(&contents) {
            Ok(data) if !data.token.is_empty() => {
                debug!(user = %data.user.username, "Session restored");
                self.data = Some(data);
            }
            Ok(_) => {
                warn!("Persisted session has an empty token, discarding");
            }
            Err(e) => {
                warn!(error = %e, "Malformed session file, discarding");
            }
        }
    }

    /// True exactly when both a user and a non-empty token are held.
    pub fn is_authenticated(&self) -> bool {
        self.data
            .as_ref()
            .map(|d| !d.token.is_empty())
            .unwrap_or(false)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.data.as_ref().map(|d| &d.user)
    }

    /// Role of the logged-in user, or the `Guest` sentinel when there is no
    /// session.
    pub fn current_role(&self) -> Role {
        self.data.as_ref().map(|d| d.user.role).unwrap_or(Role::Guest)
    }

    /// The bearer token, for stamping onto the API client.
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create session storage directory")?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(&path, contents).context("Failed to write session file")?;
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.storage_dir.join(SESSION_FILE)
    }
}
