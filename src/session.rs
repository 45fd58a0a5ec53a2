//! Durable session storage: access token + signed-in user.
//!
//! File backend, pretty JSON at `~/.careops/session.json`, written
//! atomically with owner-only permissions. The store is handed to the HTTP
//! client as an explicit capability rather than read from a hidden global,
//! and cleared on logout.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::User;

/// Persisted session payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
    #[serde(default)]
    pub saved_at: Option<String>,
}

/// In-memory handle over the session file. Reads are served from the
/// cached copy; every mutation writes through to disk.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Session>>,
}

/// Canonical session file path (`~/.careops/session.json`).
pub fn session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".careops")
        .join("session.json")
}

impl SessionStore {
    /// Open the store at the canonical path, loading any existing session.
    pub fn open_default() -> Self {
        Self::open_at(session_path())
    }

    /// Open the store at an explicit path (tests use a temp dir).
    pub fn open_at(path: PathBuf) -> Self {
        let current = read_session_file(&path);
        Self {
            path,
            current: RwLock::new(current),
        }
    }

    /// Bearer token for the current session, if signed in.
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.current.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Persist a new session (login/register success).
    pub fn save(&self, access_token: &str, user: &User) -> Result<(), ApiError> {
        let session = Session {
            access_token: access_token.to_string(),
            user: user.clone(),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        write_session_file(&self.path, &session)?;
        *self.current.write() = Some(session);
        Ok(())
    }

    /// Replace the cached user after a `/auth/me` refresh, keeping the token.
    pub fn update_user(&self, user: &User) -> Result<(), ApiError> {
        let updated = {
            let guard = self.current.read();
            match guard.as_ref() {
                Some(s) => Session {
                    access_token: s.access_token.clone(),
                    user: user.clone(),
                    saved_at: Some(chrono::Utc::now().to_rfc3339()),
                },
                None => return Ok(()),
            }
        };
        write_session_file(&self.path, &updated)?;
        *self.current.write() = Some(updated);
        Ok(())
    }

    /// Remove the session from memory and disk (logout).
    pub fn clear(&self) -> Result<(), ApiError> {
        *self.current.write() = None;
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

fn read_session_file(path: &Path) -> Option<Session> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to read session file {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(e) => {
            // Corrupt session file means "not signed in", never a crash.
            log::warn!("Ignoring corrupt session file {}: {}", path.display(), e);
            None
        }
    }
}

fn write_session_file(path: &Path, session: &Session) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(parent, fs::Permissions::from_mode(0o700))?;
            }
        }
    }

    let content = serde_json::to_string_pretty(session)?;

    // Write to a sibling temp file, then rename into place.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &content)?;
    fs::rename(&tmp, path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "u-1".to_string(),
            email: "owner@careops.test".to_string(),
            username: "owner".to_string(),
            phone_number: None,
            role: "admin".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_save_then_reopen_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open_at(path.clone());
        assert!(!store.is_authenticated());

        store.save("tok-123", &test_user()).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-123"));

        // A fresh store over the same path sees the persisted session.
        let reopened = SessionStore::open_at(path);
        assert_eq!(reopened.token().as_deref(), Some("tok-123"));
        assert_eq!(reopened.user().unwrap().email, "owner@careops.test");
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open_at(path.clone());
        store.save("tok", &test_user()).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_corrupt_file_reads_as_signed_out() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json {").unwrap();

        let store = SessionStore::open_at(path);
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_update_user_without_session_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path().join("session.json"));
        store.update_user(&test_user()).unwrap();
        assert!(!store.is_authenticated());
    }
}
