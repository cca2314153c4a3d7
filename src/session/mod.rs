//! Session Handling
//!
//! The client keeps a single opaque bearer token. It is created by login or
//! signup, destroyed by logout or a password change, and attached to every
//! authorized request.
//!
//! - [`SessionStore`]: where the token lives (memory or a cookie file)
//! - [`SessionContext`]: the object views use to read and change the session

mod context;
mod store;

pub use context::SessionContext;
pub use store::{parse_cookie, CookieFileStore, MemorySessionStore, SessionStore, TOKEN_COOKIE};

use thiserror::Error;

/// Errors raised by session stores
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Empty token or one that would break the cookie format
    #[error("Invalid session token")]
    InvalidToken,

    #[error("Lock error: {0}")]
    Lock(String),
}
