//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the Staple REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// Staples
// ============================================

/// Opaque staple identifier.
///
/// The backend sends ids as numbers or strings depending on the storage
/// driver, so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StapleId(String);

impl StapleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StapleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StapleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for StapleId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for StapleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => StapleId(n.to_string()),
            RawId::Text(s) => StapleId(s),
        })
    }
}

/// A stored note on the stack or in the archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staple {
    pub id: StapleId,
    pub name: String,
    /// Empty in list summaries
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "created_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

impl Staple {
    /// Creation time in the local timezone, for display
    pub fn created_display(&self) -> String {
        self.created_at
            .map(|ts| {
                ts.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// `{staples: [...]}` as returned by the stack and archive listings
#[derive(Debug, Deserialize)]
pub struct StapleList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub staples: Vec<Staple>,
}

/// `{staple: {...}}` as returned by `next` and fetch-by-id
#[derive(Debug, Deserialize)]
pub struct StapleEnvelope {
    #[serde(default)]
    pub staple: Option<Staple>,
}

#[derive(Debug, Serialize)]
pub struct NewStaple<'a> {
    pub name: &'a str,
    pub content: &'a str,
}

// ============================================
// Users
// ============================================

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ResetRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VerifyRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PasswordChange<'a> {
    pub password: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxStaples {
    pub max_staples: u32,
}

// ============================================
// Errors
// ============================================

/// Error body sent by the backend on non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The most descriptive non-empty message in the body
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or(self.error.filter(|e| !e.is_empty()))
    }
}

/// Go encodes nil slices as `null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
