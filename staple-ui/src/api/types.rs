//! Wire types of the Staple REST API

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Staple {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "created_timestamp")]
    pub created_at: Option<String>,
}

impl Staple {
    /// Creation time in the browser's time zone
    pub fn created_display(&self) -> String {
        self.created_at
            .as_deref()
            .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct StapleList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub staples: Vec<Staple>,
}

#[derive(Debug, Deserialize)]
pub struct StapleEnvelope {
    #[serde(default)]
    pub staple: Option<Staple>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MaxStaples {
    pub max_staples: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// First non-empty of `message` and `error`
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or(self.error.filter(|e| !e.is_empty()))
    }
}

/// Why a call failed
#[derive(Clone, Debug, PartialEq)]
pub enum ApiError {
    Network(String),
    Status {
        status: u16,
        status_text: String,
        message: Option<String>,
    },
    Parse(String),
    NotLoggedIn,
}

impl ApiError {
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Status {
                status,
                status_text,
                message: Some(message),
            } => write!(f, "{} {} ({})", status, status_text, message),
            ApiError::Status {
                status,
                status_text,
                message: None,
            } => write!(f, "{} {}", status, status_text),
            ApiError::Parse(e) => write!(f, "Parse error: {}", e),
            ApiError::NotLoggedIn => write!(f, "Not logged in"),
        }
    }
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
