//! Session
//!
//! The bearer token is kept in a `token` cookie. [`Session`] is the only
//! writer: it updates the cookie and the reactive `authenticated` flag
//! together, so the nav bar and the route guards follow every change.

use leptos::*;
use std::fmt;
use wasm_bindgen::JsCast;

use crate::alert::log_info;

/// Name of the cookie holding the bearer token
pub const TOKEN_COOKIE: &str = "token";

/// The backend handed out a token the cookie cannot hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidToken;

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid session token")
    }
}

fn check_token(token: &str) -> Result<(), InvalidToken> {
    if token.trim().is_empty() {
        return Err(InvalidToken);
    }
    Ok(())
}

/// Reactive session handle provided to the whole tree
#[derive(Clone, Copy)]
pub struct Session {
    authenticated: RwSignal<bool>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    /// Store a fresh token and mark the session authenticated.
    ///
    /// An empty token leaves the session untouched.
    pub fn sign_in(&self, token: &str) -> Result<(), InvalidToken> {
        check_token(token)?;
        let value = js_sys::encode_uri_component(token);
        write_cookie(&set_cookie_string(&String::from(value)));
        self.set_authenticated(true);
        Ok(())
    }

    /// Drop the token and mark the session anonymous
    pub fn sign_out(&self) {
        write_cookie(&clear_cookie_string());
        self.set_authenticated(false);
    }

    fn set_authenticated(&self, authenticated: bool) {
        if self.authenticated.get_untracked() != authenticated {
            log_info(if authenticated {
                "Session started"
            } else {
                "Session ended"
            });
        }
        self.authenticated.set(authenticated);
    }
}

/// Provide the session to the component tree, seeded from the cookie
pub fn provide_session() {
    let session = Session {
        authenticated: create_rw_signal(token().is_some()),
    };
    provide_context(session);
}

pub fn use_session() -> Session {
    use_context::<Session>().expect("Session not provided")
}

/// Current token, if any
pub fn token() -> Option<String> {
    let raw = parse_cookie(&read_cookies(), TOKEN_COOKIE)?;
    js_sys::decode_uri_component(&raw)
        .ok()
        .map(String::from)
        .or(Some(raw))
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

fn read_cookies() -> String {
    html_document()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}

fn write_cookie(cookie: &str) {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(cookie);
    }
}

/// Find `name` in a `document.cookie` string
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

fn set_cookie_string(value: &str) -> String {
    format!("{}={}; path=/", TOKEN_COOKIE, value)
}

fn clear_cookie_string() -> String {
    format!(
        "{}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT",
        TOKEN_COOKIE
    )
}
