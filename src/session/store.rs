//! Session token storage
//!
//! A store holds at most one bearer token. Presence alone decides whether
//! the client is logged in; nothing here inspects or refreshes the token.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::SessionError;

/// Name of the cookie holding the bearer token
pub const TOKEN_COOKIE: &str = "token";

/// Persistent storage for the session token
pub trait SessionStore: Send + Sync {
    /// The stored token, if any
    fn get(&self) -> Option<String>;

    /// Store a token, replacing any previous one
    fn set(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token
    fn clear(&self) -> Result<(), SessionError>;
}

fn check_token(token: &str) -> Result<(), SessionError> {
    if token.is_empty() || token.contains(&['\n', '\r', ';'][..]) {
        return Err(SessionError::InvalidToken);
    }
    Ok(())
}

/// Process-local store, lost on exit
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        check_token(token)?;
        let mut slot = self
            .token
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self
            .token
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Store that keeps the token as a `token=<value>` cookie line in a file.
///
/// A missing file means no session.
#[derive(Debug, Clone)]
pub struct CookieFileStore {
    path: PathBuf,
}

impl CookieFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Find the token cookie in `name=value` lines or `;`-separated pairs
pub fn parse_cookie(content: &str) -> Option<String> {
    content
        .split(&['\n', ';'][..])
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == TOKEN_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl SessionStore for CookieFileStore {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_cookie(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read session cookie {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        check_token(token)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{}={}\n", TOKEN_COOKIE, token))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
