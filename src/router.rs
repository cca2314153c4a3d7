//! Route table and guards
//!
//! Maps paths to screens and decides, from the session alone, whether a
//! screen may be shown or the user must be sent elsewhere. Guards are pure
//! and re-evaluated on every navigation.

use std::fmt;

/// Every screen the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    Reset,
    Settings,
    NewStaple,
    Archive,
    NotFound,
}

/// Access rule attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Always rendered
    Public,
    /// Requires a session, otherwise redirects to `/login`
    Authenticated,
    /// Requires no session, otherwise redirects to `/`
    Unauthenticated,
}

/// Outcome of running a route through its guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect { from: Route, to: Route },
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Home,
        Route::Login,
        Route::Signup,
        Route::Reset,
        Route::Settings,
        Route::NewStaple,
        Route::Archive,
        Route::NotFound,
    ];

    /// Match a browser path exactly; anything unknown is `NotFound`
    pub fn parse(path: &str) -> Route {
        let path = path.split(&['?', '#'][..]).next().unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };

        match path {
            "/" | "" => Route::Home,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/reset" => Route::Reset,
            "/settings" => Route::Settings,
            "/staples/new" => Route::NewStaple,
            "/archive" => Route::Archive,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Reset => "/reset",
            Route::Settings => "/settings",
            Route::NewStaple => "/staples/new",
            Route::Archive => "/archive",
            Route::NotFound => "/404",
        }
    }

    pub fn guard(self) -> Guard {
        match self {
            Route::Home | Route::NotFound => Guard::Public,
            Route::Login | Route::Signup | Route::Reset => Guard::Unauthenticated,
            Route::Settings | Route::NewStaple | Route::Archive => Guard::Authenticated,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Guard {
    /// Where to send the user instead, if anywhere
    pub fn redirect(self, authenticated: bool) -> Option<Route> {
        match (self, authenticated) {
            (Guard::Authenticated, false) => Some(Route::Login),
            (Guard::Unauthenticated, true) => Some(Route::Home),
            _ => None,
        }
    }
}

impl Resolution {
    /// The route that ends up on screen
    pub fn target(self) -> Route {
        match self {
            Resolution::Render(route) => route,
            Resolution::Redirect { to, .. } => to,
        }
    }
}

/// Run a route through its guard
pub fn resolve(route: Route, authenticated: bool) -> Resolution {
    match route.guard().redirect(authenticated) {
        Some(to) => Resolution::Redirect { from: route, to },
        None => Resolution::Render(route),
    }
}
