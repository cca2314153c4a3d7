//! Staple REST API Client
//!
//! One method per screen action. Authorized calls read the token from the
//! session right before sending and attach it as a bearer header.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::dto::{
    Credentials, ErrorBody, MaxStaples, NewStaple, PasswordChange, ResetRequest, Staple,
    StapleEnvelope, StapleId, StapleList, TokenResponse, VerifyRequest,
};
use super::error::{ClientError, ClientResult};
use crate::config::ApiConfig;
use crate::session::SessionContext;

/// Prefix of the versioned REST endpoints
pub const API_PREFIX: &str = "/rest/api/1";

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the Staple backend
#[derive(Clone)]
pub struct StapleClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl StapleClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig, session: SessionContext) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    // ============ Account ============

    /// Exchange credentials for a bearer token
    pub async fn get_token(&self, email: &str, password: &str) -> ClientResult<String> {
        let request = self
            .request(Method::POST, "/get-token", None)
            .json(&Credentials { email, password });

        let response: TokenResponse = self.send_json(request).await?;
        Ok(response.token)
    }

    pub async fn register(&self, email: &str, password: &str) -> ClientResult<()> {
        let request = self
            .request(Method::POST, &format!("{}/register", API_PREFIX), None)
            .json(&Credentials { email, password });

        self.send(request).await.map(drop)
    }

    /// Ask the backend to mail a reset code
    pub async fn request_reset(&self, email: &str) -> ClientResult<()> {
        let request = self
            .request(Method::POST, "/reset", None)
            .json(&ResetRequest { email });

        self.send(request).await.map(drop)
    }

    /// Confirm a reset with the mailed code
    pub async fn verify_reset(&self, email: &str, code: &str) -> ClientResult<()> {
        let request = self
            .request(Method::POST, "/verify", None)
            .json(&VerifyRequest { email, code });

        self.send(request).await.map(drop)
    }

    pub async fn max_staples(&self) -> ClientResult<u32> {
        let request = self.authorized(Method::GET, "/user/max-staples")?;
        let response: MaxStaples = self.send_json(request).await?;
        Ok(response.max_staples)
    }

    pub async fn set_max_staples(&self, max_staples: u32) -> ClientResult<()> {
        let request = self
            .authorized(Method::POST, "/user/max-staples")?
            .json(&MaxStaples { max_staples });

        self.send(request).await.map(drop)
    }

    pub async fn change_password(&self, password: &str) -> ClientResult<()> {
        let request = self
            .authorized(Method::POST, "/user/change-password")?
            .json(&PasswordChange { password });

        self.send(request).await.map(drop)
    }

    // ============ Staples ============

    /// Staples currently on the stack
    pub async fn list_staples(&self) -> ClientResult<Vec<Staple>> {
        let request = self.authorized(Method::GET, "/staple")?;
        let list: StapleList = self.send_json(request).await?;
        Ok(list.staples)
    }

    /// The staple the backend hands out next, if the stack is not empty
    pub async fn next_staple(&self) -> ClientResult<Option<Staple>> {
        let request = self.authorized(Method::GET, "/staple/next")?;
        let envelope: StapleEnvelope = self.send_json(request).await?;
        Ok(envelope.staple)
    }

    pub async fn create_staple(&self, name: &str, content: &str) -> ClientResult<()> {
        let request = self
            .authorized(Method::POST, "/staple")?
            .json(&NewStaple { name, content });

        self.send(request).await.map(drop)
    }

    pub async fn archive_staple(&self, id: &StapleId) -> ClientResult<()> {
        let request = self.authorized(Method::POST, &format!("/staple/{}/archive", encode(id)))?;
        self.send(request).await.map(drop)
    }

    pub async fn delete_staple(&self, id: &StapleId) -> ClientResult<()> {
        let request = self.authorized(Method::DELETE, &format!("/staple/{}", encode(id)))?;
        self.send(request).await.map(drop)
    }

    pub async fn list_archive(&self) -> ClientResult<Vec<Staple>> {
        let request = self.authorized(Method::GET, "/staple/archive")?;
        let list: StapleList = self.send_json(request).await?;
        Ok(list.staples)
    }

    pub async fn get_staple(&self, id: &StapleId) -> ClientResult<Staple> {
        let request = self.authorized(Method::GET, &format!("/staple/{}", encode(id)))?;
        let envelope: StapleEnvelope = self.send_json(request).await?;
        envelope
            .staple
            .ok_or_else(|| ClientError::Decode(format!("staple {} missing from response", id)))
    }

    // ============ Plumbing ============

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(
            method = %method,
            path = %path,
            request_id = %request_id,
            authorized = token.is_some(),
            "Sending request"
        );

        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, request_id);

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    /// Request under the versioned prefix carrying the session token
    fn authorized(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let token = self.session.token().ok_or(ClientError::MissingToken)?;
        Ok(self.request(method, &format!("{}{}", API_PREFIX, path), Some(&token)))
    }

    /// Send and turn any non-2xx status into [`ClientError::Status`]
    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message);

        tracing::warn!(
            status = status.as_u16(),
            path = %url,
            message = message.as_deref().unwrap_or(""),
            "Request failed"
        );

        Err(ClientError::status(status, message))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn encode(id: &StapleId) -> String {
    urlencoding::encode(id.as_str()).into_owned()
}
