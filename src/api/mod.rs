//! Staple REST API
//!
//! Client side of the Staple backend. The backend itself is an external
//! service; this module only knows the shapes it exchanges.
//!
//! # Endpoints
//!
//! ## Account
//! - `POST /get-token` - Exchange credentials for a bearer token
//! - `POST /rest/api/1/register` - Create an account
//! - `POST /reset` - Mail a password reset code
//! - `POST /verify` - Confirm a reset code
//!
//! ## Staples (bearer token required)
//! - `GET /rest/api/1/staple` - List the stack
//! - `GET /rest/api/1/staple/next` - Next staple on the stack
//! - `POST /rest/api/1/staple` - Push a staple
//! - `POST /rest/api/1/staple/:id/archive` - Archive a staple
//! - `DELETE /rest/api/1/staple/:id` - Delete a staple
//! - `GET /rest/api/1/staple/archive` - List archived staples
//! - `GET /rest/api/1/staple/:id` - Fetch one staple
//!
//! ## User settings (bearer token required)
//! - `GET|POST /rest/api/1/user/max-staples` - Stack size limit
//! - `POST /rest/api/1/user/change-password` - Change password

pub mod client;
pub mod dto;
pub mod error;

pub use client::{StapleClient, API_PREFIX};
pub use dto::{Staple, StapleId};
pub use error::{ClientError, ClientResult};
