//! Session context shared by the shell and every view

use std::sync::Arc;
use tokio::sync::watch;

use super::{MemorySessionStore, SessionError, SessionStore};

/// Explicit session object handed to views.
///
/// Wraps the token store and an authenticated flag. The flag only changes
/// through [`SessionContext::sign_in`] and [`SessionContext::sign_out`];
/// observers follow it with [`SessionContext::subscribe`].
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    authenticated: Arc<watch::Sender<bool>>,
}

impl SessionContext {
    /// Create a context; the initial flag reflects whether a token is stored
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (tx, _rx) = watch::channel(store.get().is_some());
        Self {
            store,
            authenticated: Arc::new(tx),
        }
    }

    /// Context backed by an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Current bearer token, read fresh from the store
    pub fn token(&self) -> Option<String> {
        self.store.get()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    /// Receiver notified whenever the authenticated flag changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    /// Store a freshly issued token and mark the session authenticated
    pub fn sign_in(&self, token: &str) -> Result<(), SessionError> {
        self.store.set(token)?;
        self.set_authenticated(true);
        Ok(())
    }

    /// Drop the token and mark the session unauthenticated.
    ///
    /// The flag is cleared even if the store fails to forget the token.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        let result = self.store.clear();
        self.set_authenticated(false);
        result
    }

    fn set_authenticated(&self, value: bool) {
        let previous = self.authenticated.send_replace(value);
        if previous != value {
            tracing::info!(authenticated = value, "Session state changed");
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_follows_store() {
        let empty = SessionContext::in_memory();
        assert!(!empty.is_authenticated());
        assert_eq!(empty.token(), None);

        let existing = SessionContext::new(Arc::new(MemorySessionStore::with_token("t0k")));
        assert!(existing.is_authenticated());
        assert_eq!(existing.token().as_deref(), Some("t0k"));
    }

    #[test]
    fn test_sign_in_then_out() {
        let session = SessionContext::in_memory();

        session.sign_in("abc").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("abc"));

        session.sign_out().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_invalid_token_keeps_session_absent() {
        let session = SessionContext::in_memory();
        assert!(session.sign_in("").is_err());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let session = SessionContext::in_memory();
        let mut rx = session.subscribe();
        assert!(!*rx.borrow());

        let clone = session.clone();
        clone.sign_in("abc").unwrap();

        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());

        session.sign_out().unwrap();
        rx.changed().await.unwrap();
        assert!(!*rx.borrow());
    }
}
