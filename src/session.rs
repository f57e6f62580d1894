//! Process-wide session state: the persisted bearer credential.
//!
//! The token is read once on startup and written back whenever it changes,
//! so a restart keeps the user logged in. Clearing is explicit and reports
//! whether anything was actually cleared, which is what makes the global
//! unauthorized handling fire exactly once.

use std::path::PathBuf;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Claims we care about inside the bearer token payload.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    id: String,
}

pub struct Session {
    token: Option<String>,
    store_path: PathBuf,
}

impl Session {
    /// Default location of the persisted credential.
    fn default_store_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meme_feed")
            .join("session.json")
    }

    /// Loads the session from the default store, or starts logged out.
    pub fn load() -> Self {
        Self::load_from(Self::default_store_path())
    }

    /// Loads the session from an explicit path (used by tests).
    pub fn load_from(store_path: PathBuf) -> Self {
        let token = match std::fs::read_to_string(&store_path) {
            Ok(content) => match serde_json::from_str::<StoredSession>(&content) {
                Ok(stored) => {
                    info!("Loaded persisted session token");
                    Some(stored.token)
                }
                Err(e) => {
                    warn!("Failed to parse session store, starting logged out: {e}");
                    None
                }
            },
            Err(_) => {
                debug!("No session store at {store_path:?}, starting logged out");
                None
            }
        };
        Self { token, store_path }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The logged-in user's id, decoded from the token payload.
    pub fn user_id(&self) -> Option<String> {
        self.token.as_deref().and_then(user_id_from_token)
    }

    /// Stores and persists a new token.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
        if let Err(e) = self.persist() {
            warn!("Failed to persist session: {e}");
        }
    }

    /// Clears the credential and removes the store file.
    ///
    /// Returns `true` only if a token was present, so concurrent
    /// unauthorized failures trigger the clear-and-redirect side effect
    /// once: the first caller clears, later callers see `false`.
    pub fn clear_token(&mut self) -> bool {
        if self.token.take().is_none() {
            return false;
        }
        info!("Clearing session token");
        if self.store_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.store_path) {
                warn!("Failed to remove session store: {e}");
            }
        }
        true
    }

    fn persist(&self) -> ApiResult<()> {
        let Some(token) = &self.token else {
            return Ok(());
        };
        if let Some(parent) = self.store_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&StoredSession {
            token: token.clone(),
        })?;
        std::fs::write(&self.store_path, content)?;
        debug!("Persisted session token");
        Ok(())
    }
}

/// Pulls the user id out of a JWT without verifying the signature.
/// Verification is the server's job; the client only needs the claim.
pub fn user_id_from_token(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;
    Some(claims.id)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
