//! # Staple
//!
//! Client for the Staple bookmark stack: push text notes onto a stack, read
//! the next one, archive or delete it, and manage the account, all through
//! the Staple REST backend.
//!
//! ## Modules
//!
//! - [`session`]: bearer token storage and the session context
//! - [`api`]: REST client, wire types and errors
//! - [`router`]: route table and guards
//! - [`views`]: one view model per screen
//! - [`scope`]: view lifetimes and loading flags
//! - [`shell`]: navigation bar and screen mounting
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use staple::{Config, Route, SessionContext, Shell, StapleClient, TerminalAlerter, ViewContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = StapleClient::new(&config.api, SessionContext::in_memory())?;
//!     let ctx = ViewContext::new(client, Arc::new(TerminalAlerter));
//!
//!     let mut shell = Shell::new(ctx);
//!     shell.navigate(Route::Home).await;
//!     println!("{}", shell.render());
//!
//!     Ok(())
//! }
//! ```

pub mod alert;
pub mod api;
pub mod config;
pub mod router;
pub mod scope;
pub mod session;
pub mod shell;
pub mod views;

#[cfg(test)]
mod testing;

pub use alert::{Alerter, TerminalAlerter};
pub use api::{ClientError, ClientResult, Staple, StapleClient, StapleId};
pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};
pub use router::{resolve, Guard, Resolution, Route};
pub use scope::{LoadingFlag, LoadingGuard, ViewScope};
pub use session::{CookieFileStore, MemorySessionStore, SessionContext, SessionError, SessionStore};
pub use shell::{NavItem, NavTarget, Shell};
pub use views::{Screen, Transition, View, ViewContext};
