//! Login and signup screens

use async_trait::async_trait;

use super::{Transition, View, ViewContext};
use crate::router::Route;
use crate::scope::{LoadingFlag, ViewScope};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn is_valid(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

/// `/login`
#[derive(Debug, Default)]
pub struct LoginView {
    pub form: LoginForm,
    loading: LoadingFlag,
    scope: ViewScope,
}

impl LoginView {
    pub fn can_submit(&self) -> bool {
        self.form.is_valid() && !self.loading.is_set()
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Exchange the credentials for a token and start a session
    pub async fn submit(&mut self, ctx: &ViewContext) -> Transition {
        if !self.can_submit() {
            return Transition::Stay;
        }

        let _loading = self.loading.acquire();
        let form = &self.form;
        let token = self
            .scope
            .run(ctx.client.get_token(&form.email, &form.password))
            .await;

        match token {
            Some(Ok(token)) => start_session(ctx, &token),
            Some(Err(e)) => {
                ctx.alert(format!("Login failed. {}", e.describe()));
                Transition::Stay
            }
            None => Transition::Stay,
        }
    }
}

#[async_trait]
impl View for LoginView {
    fn route(&self) -> Route {
        Route::Login
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn render(&self) -> String {
        format!(
            "Login\n\nEmail: {}\nPassword: {}\n\n[Login]{}",
            self.form.email,
            mask(&self.form.password),
            submit_state(self.can_submit(), &self.loading)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn is_valid(&self) -> bool {
        !self.email.is_empty()
            && !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.password == self.confirm_password
    }
}

/// `/signup`
#[derive(Debug, Default)]
pub struct SignupView {
    pub form: SignupForm,
    loading: LoadingFlag,
    scope: ViewScope,
}

impl SignupView {
    pub fn can_submit(&self) -> bool {
        self.form.is_valid() && !self.loading.is_set()
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Register, then log in with the same credentials.
    ///
    /// A registration that succeeds but cannot be followed by a token leaves
    /// the account in place; the user is sent to `/login` to retry.
    pub async fn submit(&mut self, ctx: &ViewContext) -> Transition {
        if !self.can_submit() {
            return Transition::Stay;
        }

        let _loading = self.loading.acquire();
        let form = &self.form;
        let client = &ctx.client;

        let registered = self
            .scope
            .run(client.register(&form.email, &form.password))
            .await;
        match registered {
            Some(Ok(())) => tracing::info!(email = %form.email, "Registered"),
            Some(Err(e)) => {
                ctx.alert(format!("Response was: {}", e.describe()));
                return Transition::Stay;
            }
            None => return Transition::Stay,
        }

        match self
            .scope
            .run(client.get_token(&form.email, &form.password))
            .await
        {
            Some(Ok(token)) => start_session(ctx, &token),
            Some(Err(e)) => {
                ctx.alert(format!("Login failed. {}", e.describe()));
                Transition::Navigate(Route::Login)
            }
            None => Transition::Stay,
        }
    }
}

#[async_trait]
impl View for SignupView {
    fn route(&self) -> Route {
        Route::Signup
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn render(&self) -> String {
        format!(
            "Signup\n\nEmail: {}\nPassword: {}\nConfirm Password: {}\n\n[Signup]{}",
            self.form.email,
            mask(&self.form.password),
            mask(&self.form.confirm_password),
            submit_state(self.can_submit(), &self.loading)
        )
    }
}

fn start_session(ctx: &ViewContext, token: &str) -> Transition {
    match ctx.session.sign_in(token) {
        Ok(()) => Transition::Navigate(Route::Home),
        Err(e) => {
            ctx.alert(format!("Login failed. {}", e));
            Transition::Stay
        }
    }
}

pub(super) fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

pub(super) fn submit_state(enabled: bool, loading: &LoadingFlag) -> &'static str {
    if loading.is_set() {
        " (loading)"
    } else if enabled {
        ""
    } else {
        " (disabled)"
    }
}
