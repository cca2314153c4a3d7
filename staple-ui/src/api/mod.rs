//! Staple REST API
//!
//! Calls made by the screens and the types they exchange.

pub mod client;
pub mod types;

pub use client::*;
pub use types::{ApiError, Staple};
