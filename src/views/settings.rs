use async_trait::async_trait;

use super::auth::{mask, submit_state};
use super::{Transition, View, ViewContext};
use crate::router::Route;
use crate::scope::{LoadingFlag, ViewScope};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn is_valid(&self) -> bool {
        !self.password.is_empty() && self.password == self.confirm_password
    }
}

/// `/settings`: stack size limit and password change
#[derive(Debug, Default)]
pub struct SettingsView {
    max_staples: Option<u32>,
    /// Raw text of the max-staples field
    pub max_input: String,
    pub password: PasswordForm,
    loading: LoadingFlag,
    saving: LoadingFlag,
    changing: LoadingFlag,
    scope: ViewScope,
}

impl SettingsView {
    /// Limit as last loaded from the backend; the form is hidden until then
    pub fn max_staples(&self) -> Option<u32> {
        self.max_staples
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub fn saving(&self) -> &LoadingFlag {
        &self.saving
    }

    pub fn changing(&self) -> &LoadingFlag {
        &self.changing
    }

    fn parsed_max(&self) -> Option<u32> {
        self.max_input.trim().parse().ok()
    }

    pub fn can_save(&self) -> bool {
        self.max_staples.is_some() && self.parsed_max().is_some() && !self.saving.is_set()
    }

    pub fn can_change_password(&self) -> bool {
        self.password.is_valid() && !self.changing.is_set()
    }

    pub async fn refresh(&mut self, ctx: &ViewContext) {
        let _loading = self.loading.acquire();
        match self.scope.run(ctx.client.max_staples()).await {
            Some(Ok(max)) => {
                self.max_staples = Some(max);
                self.max_input = max.to_string();
            }
            Some(Err(e)) => ctx.alert(e.describe()),
            None => {}
        }
    }

    /// Store the new limit, then re-fetch it
    pub async fn save_max_staples(&mut self, ctx: &ViewContext) -> Transition {
        if !self.can_save() {
            return Transition::Stay;
        }
        let Some(max) = self.parsed_max() else {
            return Transition::Stay;
        };

        let saved = {
            let _saving = self.saving.acquire();
            self.scope.run(ctx.client.set_max_staples(max)).await
        };

        match saved {
            Some(Ok(())) => {
                ctx.alert(format!("New staple count of {} successfully set.", max));
                self.refresh(ctx).await;
            }
            Some(Err(e)) => ctx.alert(format!("Response was: {}", e.describe())),
            None => {}
        }
        Transition::Stay
    }

    /// Change the password and end the session
    pub async fn change_password(&mut self, ctx: &ViewContext) -> Transition {
        if !self.can_change_password() {
            return Transition::Stay;
        }

        let _changing = self.changing.acquire();
        let changed = self
            .scope
            .run(ctx.client.change_password(&self.password.password))
            .await;

        match changed {
            Some(Ok(())) => {
                ctx.alert("Please log in with your new password.");
                if let Err(e) = ctx.session.sign_out() {
                    tracing::warn!(error = %e, "Failed to clear session");
                }
                Transition::Navigate(Route::Login)
            }
            Some(Err(e)) => {
                ctx.alert(format!("Response was: {}", e.describe()));
                Transition::Stay
            }
            None => Transition::Stay,
        }
    }
}

#[async_trait]
impl View for SettingsView {
    fn route(&self) -> Route {
        Route::Settings
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }

    async fn mount(&mut self, ctx: &ViewContext) {
        self.refresh(ctx).await;
    }

    fn render(&self) -> String {
        let mut out = String::from("Settings\n");
        if self.max_staples.is_some() {
            out.push_str(&format!(
                "\nMaximum Staples: {}\n[Save]{}\n",
                self.max_input,
                submit_state(self.can_save(), &self.saving)
            ));
        }
        out.push_str(&format!(
            "\nNew password: {}\nConfirm Password: {}\n[Change Password]{}",
            mask(&self.password.password),
            mask(&self.password.confirm_password),
            submit_state(self.can_change_password(), &self.changing)
        ));
        out
    }
}
