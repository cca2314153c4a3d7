//! Screens
//!
//! One view model per screen. A view owns its form fields, its loading
//! flags and whatever it fetched; it talks to the backend through the
//! [`ViewContext`] and reports failures as alerts. Mutating actions return
//! a [`Transition`] telling the shell whether to navigate.
//!
//! Views never reload anything implicitly: after a successful mutation they
//! re-fetch exactly the lists that depend on it.

mod archive;
mod auth;
mod home;
mod new_staple;
mod reset;
mod settings;

pub use archive::ArchiveView;
pub use auth::{LoginForm, LoginView, SignupForm, SignupView};
pub use home::HomeView;
pub use new_staple::{NewStapleForm, NewStapleView};
pub use reset::{ResetStage, ResetView};
pub use settings::{PasswordForm, SettingsView};

use async_trait::async_trait;
use std::sync::Arc;

use crate::alert::Alerter;
use crate::api::StapleClient;
use crate::router::Route;
use crate::scope::ViewScope;
use crate::session::SessionContext;

/// Everything a view needs to act
#[derive(Clone)]
pub struct ViewContext {
    pub session: SessionContext,
    pub client: Arc<StapleClient>,
    pub alerter: Arc<dyn Alerter>,
}

impl ViewContext {
    pub fn new(client: StapleClient, alerter: Arc<dyn Alerter>) -> Self {
        Self {
            session: client.session().clone(),
            client: Arc::new(client),
            alerter,
        }
    }

    pub fn alert(&self, message: impl AsRef<str>) {
        self.alerter.alert(message.as_ref());
    }
}

/// What the shell should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Navigate(Route),
}

/// Behaviour shared by every screen
#[async_trait]
pub trait View: Send {
    /// Route this view is mounted at
    fn route(&self) -> Route;

    /// Scope of calls made on behalf of this view
    fn scope(&self) -> &ViewScope;

    /// Fetch whatever the screen shows on mount
    async fn mount(&mut self, _ctx: &ViewContext) {}

    /// Plain-text rendering of the screen
    fn render(&self) -> String;
}

/// Shown for unknown paths
#[derive(Debug, Default)]
pub struct NotFoundView {
    scope: ViewScope,
}

#[async_trait]
impl View for NotFoundView {
    fn route(&self) -> Route {
        Route::NotFound
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn render(&self) -> String {
        "Sorry, page not found!".to_string()
    }
}

/// The mounted screen
pub enum Screen {
    Home(HomeView),
    Login(LoginView),
    Signup(SignupView),
    Reset(ResetView),
    Settings(SettingsView),
    NewStaple(NewStapleView),
    Archive(ArchiveView),
    NotFound(NotFoundView),
}

impl Screen {
    /// Fresh, unmounted view for a route
    pub fn for_route(route: Route, authenticated: bool) -> Self {
        match route {
            Route::Home => Screen::Home(HomeView::new(authenticated)),
            Route::Login => Screen::Login(LoginView::default()),
            Route::Signup => Screen::Signup(SignupView::default()),
            Route::Reset => Screen::Reset(ResetView::default()),
            Route::Settings => Screen::Settings(SettingsView::default()),
            Route::NewStaple => Screen::NewStaple(NewStapleView::default()),
            Route::Archive => Screen::Archive(ArchiveView::default()),
            Route::NotFound => Screen::NotFound(NotFoundView::default()),
        }
    }

    pub fn view(&self) -> &dyn View {
        match self {
            Screen::Home(v) => v,
            Screen::Login(v) => v,
            Screen::Signup(v) => v,
            Screen::Reset(v) => v,
            Screen::Settings(v) => v,
            Screen::NewStaple(v) => v,
            Screen::Archive(v) => v,
            Screen::NotFound(v) => v,
        }
    }

    pub fn view_mut(&mut self) -> &mut dyn View {
        match self {
            Screen::Home(v) => v,
            Screen::Login(v) => v,
            Screen::Signup(v) => v,
            Screen::Reset(v) => v,
            Screen::Settings(v) => v,
            Screen::NewStaple(v) => v,
            Screen::Archive(v) => v,
            Screen::NotFound(v) => v,
        }
    }

    pub fn route(&self) -> Route {
        self.view().route()
    }
}
