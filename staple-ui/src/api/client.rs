//! HTTP API Client
//!
//! One function per screen action. Authorized calls read the token from the
//! session cookie right before sending.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::json;

use super::types::{
    ApiError, ErrorBody, MaxStaples, Staple, StapleEnvelope, StapleList, TokenResponse,
};
use crate::alert::log_debug;
use crate::session;

/// Prefix of the versioned REST endpoints
pub const API_PREFIX: &str = "/rest/api/1";

/// Local storage key of a non-default backend URL
const API_URL_KEY: &str = "staple_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// API base URL from local storage; empty means same origin
pub fn get_api_base() -> String {
    local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_default()
        .trim_end_matches('/')
        .to_string()
}

/// Set the API base URL in local storage; an empty URL restores same origin
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let url = url.trim();
        let _ = if url.is_empty() {
            storage.remove_item(API_URL_KEY)
        } else {
            storage.set_item(API_URL_KEY, url)
        };
    }
}

// ============ Account ============

/// Exchange credentials for a bearer token
pub async fn get_token(email: &str, password: &str) -> Result<String, ApiError> {
    let request = builder(Verb::Post, "/get-token", None)
        .json(&json!({ "email": email, "password": password }))
        .map_err(build_error)?;

    let response: TokenResponse = parse(send(request).await?).await?;
    Ok(response.token)
}

pub async fn register(email: &str, password: &str) -> Result<(), ApiError> {
    let request = builder(Verb::Post, &format!("{}/register", API_PREFIX), None)
        .json(&json!({ "email": email, "password": password }))
        .map_err(build_error)?;

    send(request).await.map(drop)
}

pub async fn request_reset(email: &str) -> Result<(), ApiError> {
    let request = builder(Verb::Post, "/reset", None)
        .json(&json!({ "email": email }))
        .map_err(build_error)?;

    send(request).await.map(drop)
}

pub async fn verify_reset(email: &str, code: &str) -> Result<(), ApiError> {
    let request = builder(Verb::Post, "/verify", None)
        .json(&json!({ "email": email, "code": code }))
        .map_err(build_error)?;

    send(request).await.map(drop)
}

pub async fn fetch_max_staples() -> Result<u32, ApiError> {
    let request = authorized(Verb::Get, "/user/max-staples")?
        .build()
        .map_err(build_error)?;

    let response: MaxStaples = parse(send(request).await?).await?;
    Ok(response.max_staples)
}

pub async fn set_max_staples(max_staples: u32) -> Result<(), ApiError> {
    let request = authorized(Verb::Post, "/user/max-staples")?
        .json(&MaxStaples { max_staples })
        .map_err(build_error)?;

    send(request).await.map(drop)
}

pub async fn change_password(password: &str) -> Result<(), ApiError> {
    let request = authorized(Verb::Post, "/user/change-password")?
        .json(&json!({ "password": password }))
        .map_err(build_error)?;

    send(request).await.map(drop)
}

// ============ Staples ============

pub async fn fetch_staples() -> Result<Vec<Staple>, ApiError> {
    get_list("/staple").await
}

pub async fn fetch_next() -> Result<Option<Staple>, ApiError> {
    let request = authorized(Verb::Get, "/staple/next")?
        .build()
        .map_err(build_error)?;

    let envelope: StapleEnvelope = parse(send(request).await?).await?;
    Ok(envelope.staple)
}

pub async fn create_staple(name: &str, content: &str) -> Result<(), ApiError> {
    let request = authorized(Verb::Post, "/staple")?
        .json(&json!({ "name": name, "content": content }))
        .map_err(build_error)?;

    send(request).await.map(drop)
}

pub async fn archive_staple(id: &str) -> Result<(), ApiError> {
    let path = format!("/staple/{}/archive", encode(id));
    let request = authorized(Verb::Post, &path)?
        .build()
        .map_err(build_error)?;

    send(request).await.map(drop)
}

pub async fn delete_staple(id: &str) -> Result<(), ApiError> {
    let path = format!("/staple/{}", encode(id));
    let request = authorized(Verb::Delete, &path)?
        .build()
        .map_err(build_error)?;

    send(request).await.map(drop)
}

pub async fn fetch_archive() -> Result<Vec<Staple>, ApiError> {
    get_list("/staple/archive").await
}

pub async fn fetch_staple(id: &str) -> Result<Staple, ApiError> {
    let path = format!("/staple/{}", encode(id));
    let request = authorized(Verb::Get, &path)?
        .build()
        .map_err(build_error)?;

    let envelope: StapleEnvelope = parse(send(request).await?).await?;
    envelope
        .staple
        .ok_or_else(|| ApiError::Parse(format!("staple {} missing from response", id)))
}

// ============ Plumbing ============

async fn get_list(path: &str) -> Result<Vec<Staple>, ApiError> {
    let request = authorized(Verb::Get, path)?
        .build()
        .map_err(build_error)?;

    let list: StapleList = parse(send(request).await?).await?;
    Ok(list.staples)
}

#[derive(Clone, Copy)]
enum Verb {
    Get,
    Post,
    Delete,
}

fn builder(verb: Verb, path: &str, token: Option<&str>) -> RequestBuilder {
    let url = format!("{}{}", get_api_base(), path);
    let (name, builder) = match verb {
        Verb::Get => ("GET", Request::get(&url)),
        Verb::Post => ("POST", Request::post(&url)),
        Verb::Delete => ("DELETE", Request::delete(&url)),
    };
    log_debug(&format!("{} {}", name, path));

    let builder = builder.header("Content-Type", "application/json");
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn authorized(verb: Verb, path: &str) -> Result<RequestBuilder, ApiError> {
    let token = session::token().ok_or(ApiError::NotLoggedIn)?;
    Ok(builder(verb, &format!("{}{}", API_PREFIX, path), Some(&token)))
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&body).unwrap_or_default();

    Err(ApiError::Status {
        status,
        status_text,
        message: body.into_message(),
    })
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

fn build_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(format!("Request build error: {}", e))
}

fn encode(id: &str) -> String {
    String::from(js_sys::encode_uri_component(id))
}
