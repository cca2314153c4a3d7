//! Route table and guard rules

/// Access rule attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Public,
    /// Logged-in users only; others go to `/login`
    Authenticated,
    /// Logged-out users only; others go to `/`
    Unauthenticated,
}

impl Guard {
    /// Path to send the user to instead, if any
    pub fn redirect(self, authenticated: bool) -> Option<&'static str> {
        match (self, authenticated) {
            (Guard::Authenticated, false) => Some(paths::LOGIN),
            (Guard::Unauthenticated, true) => Some(paths::HOME),
            _ => None,
        }
    }
}

pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const RESET: &str = "/reset";
    pub const SETTINGS: &str = "/settings";
    pub const NEW_STAPLE: &str = "/staples/new";
    pub const ARCHIVE: &str = "/archive";
}

/// Guard for a known path; unknown paths are public
pub fn guard_for(path: &str) -> Guard {
    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    };

    match path {
        paths::LOGIN | paths::SIGNUP | paths::RESET => Guard::Unauthenticated,
        paths::SETTINGS | paths::NEW_STAPLE | paths::ARCHIVE => Guard::Authenticated,
        _ => Guard::Public,
    }
}
