//! Top-level shell
//!
//! Owns the mounted screen and the navigation bar. Every navigation goes
//! through the route guards against the current session; the previous
//! screen's scope is cancelled before the next one mounts, so nothing it
//! still had in flight can touch state afterwards.

use std::fmt::Write;

use crate::router::{resolve, Resolution, Route};
use crate::views::{Screen, Transition, View, ViewContext};

/// Where a navigation entry leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Route(Route),
    Logout,
}

/// One entry of the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub target: NavTarget,
}

impl NavItem {
    const fn route(label: &'static str, route: Route) -> Self {
        Self {
            label,
            target: NavTarget::Route(route),
        }
    }
}

static SIGNED_IN_NAV: [NavItem; 3] = [
    NavItem::route("Settings", Route::Settings),
    NavItem::route("Archives", Route::Archive),
    NavItem {
        label: "Logout",
        target: NavTarget::Logout,
    },
];

static SIGNED_OUT_NAV: [NavItem; 3] = [
    NavItem::route("Signup", Route::Signup),
    NavItem::route("Login", Route::Login),
    NavItem::route("Reset Password", Route::Reset),
];

pub struct Shell {
    ctx: ViewContext,
    screen: Screen,
}

impl Shell {
    /// Shell showing an unmounted home screen; call [`Shell::open`] to start
    pub fn new(ctx: ViewContext) -> Self {
        let screen = Screen::for_route(Route::Home, ctx.session.is_authenticated());
        Self { ctx, screen }
    }

    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Navigate to a browser path
    pub async fn open(&mut self, path: &str) -> Resolution {
        self.navigate(Route::parse(path)).await
    }

    /// Guard `route`, unmount the current screen and mount the result
    pub async fn navigate(&mut self, route: Route) -> Resolution {
        let authenticated = self.ctx.session.is_authenticated();
        let resolution = resolve(route, authenticated);

        match resolution {
            Resolution::Redirect { from, to } => {
                tracing::info!(from = %from, to = %to, "Redirected by route guard")
            }
            Resolution::Render(route) => tracing::info!(route = %route, "Navigating"),
        }

        self.screen.view().scope().cancel();
        self.screen = Screen::for_route(resolution.target(), authenticated);
        self.screen.view_mut().mount(&self.ctx).await;

        resolution
    }

    /// Follow the outcome of a view action
    pub async fn apply(&mut self, transition: Transition) -> Option<Resolution> {
        match transition {
            Transition::Stay => None,
            Transition::Navigate(route) => Some(self.navigate(route).await),
        }
    }

    /// Drop the session and go to `/login`
    pub async fn logout(&mut self) -> Resolution {
        if let Err(e) = self.ctx.session.sign_out() {
            tracing::warn!(error = %e, "Failed to clear session");
        }
        self.navigate(Route::Login).await
    }

    /// Navigation entries for the current session
    pub fn nav_items(&self) -> &'static [NavItem] {
        if self.ctx.session.is_authenticated() {
            &SIGNED_IN_NAV
        } else {
            &SIGNED_OUT_NAV
        }
    }

    /// Follow a navigation entry
    pub async fn select(&mut self, item: NavItem) -> Resolution {
        match item.target {
            NavTarget::Route(route) => self.navigate(route).await,
            NavTarget::Logout => self.logout().await,
        }
    }

    /// Navigation bar followed by the mounted screen
    pub fn render(&self) -> String {
        let mut out = String::from("Staple");
        for item in self.nav_items() {
            let _ = write!(out, " | {}", item.label);
        }
        out.push_str("\n\n");
        out.push_str(&self.screen.view().render());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StapleId;
    use crate::testing::{signed_in_context, signed_out_context, MockBackend};
    use crate::views::LoginForm;
    use axum::http::Method;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_guarded_route_redirects_to_login() {
        let backend = MockBackend::start().await;
        let (ctx, _alerts) = signed_out_context(&backend);
        let mut shell = Shell::new(ctx);

        let resolution = shell.open("/archive").await;

        assert_eq!(
            resolution,
            Resolution::Redirect {
                from: Route::Archive,
                to: Route::Login
            }
        );
        assert_eq!(shell.route(), Route::Login);
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_page_redirects_home_when_signed_in() {
        let backend = MockBackend::start().await;
        backend.respond(Method::GET, "/rest/api/1/staple", 200, json!({"staples": []}));
        backend.respond(Method::GET, "/rest/api/1/staple/next", 200, json!({"staple": null}));
        let (ctx, _alerts) = signed_in_context(&backend);
        let mut shell = Shell::new(ctx);

        let resolution = shell.open("/login").await;

        assert_eq!(resolution.target(), Route::Home);
        assert!(shell.render().contains("Your Staples"));
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let backend = MockBackend::start().await;
        let (ctx, _alerts) = signed_out_context(&backend);
        let mut shell = Shell::new(ctx);

        assert_eq!(shell.open("/nope").await, Resolution::Render(Route::NotFound));
        assert!(shell.render().ends_with("Sorry, page not found!"));
    }

    #[tokio::test]
    async fn test_nav_follows_session() {
        let backend = MockBackend::start().await;
        backend.respond(Method::POST, "/get-token", 200, json!({"token": "jwt"}));
        backend.respond(Method::GET, "/rest/api/1/staple", 200, json!({"staples": []}));
        backend.respond(Method::GET, "/rest/api/1/staple/next", 200, json!({"staple": null}));
        let (ctx, _alerts) = signed_out_context(&backend);
        let mut shell = Shell::new(ctx.clone());

        let labels: Vec<_> = shell.nav_items().iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Signup", "Login", "Reset Password"]);

        shell.open("/login").await;
        let transition = match shell.screen_mut() {
            Screen::Login(view) => {
                view.form = LoginForm {
                    email: "a@b.c".to_string(),
                    password: "pw".to_string(),
                };
                view.submit(&ctx).await
            }
            _ => panic!("expected login screen"),
        };
        shell.apply(transition).await;

        assert_eq!(shell.route(), Route::Home);
        let labels: Vec<_> = shell.nav_items().iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Settings", "Archives", "Logout"]);

        let logout = shell.nav_items()[2];
        let resolution = shell.select(logout).await;
        assert_eq!(resolution, Resolution::Render(Route::Login));
        assert!(!shell.context().session.is_authenticated());
        assert_eq!(shell.context().session.token(), None);
    }

    #[tokio::test]
    async fn test_navigation_cancels_previous_screen() {
        let backend = MockBackend::start().await;
        backend.respond(Method::GET, "/rest/api/1/staple/archive", 200, json!({"staples": []}));
        let (ctx, _alerts) = signed_in_context(&backend);
        let mut shell = Shell::new(ctx);

        shell.navigate(Route::Archive).await;
        let scope = shell.screen().view().scope().clone();
        assert!(!scope.is_cancelled());

        shell.navigate(Route::NotFound).await;
        assert!(scope.is_cancelled());
    }

    #[tokio::test]
    async fn test_late_completion_after_navigation_is_dropped() {
        let backend = MockBackend::start().await;
        backend.respond(Method::GET, "/rest/api/1/staple/archive", 200, json!({"staples": []}));
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/7",
            200,
            json!({"staple": {"id": 7, "name": "late", "content": "late body"}}),
        );
        backend.delay("/rest/api/1/staple/7", Duration::from_millis(300));
        let (ctx, alerts) = signed_in_context(&backend);
        let mut shell = Shell::new(ctx.clone());
        shell.navigate(Route::Archive).await;

        let Screen::Archive(mut view) =
            std::mem::replace(shell.screen_mut(), Screen::for_route(Route::Archive, true))
        else {
            panic!("expected archive screen");
        };
        let scope = view.scope().clone();
        let id = StapleId::from("7");

        tokio::join!(view.select(&ctx, &id), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            scope.cancel();
        });

        assert!(view.selected().is_none());
        assert!(alerts.messages().is_empty());
    }
}
