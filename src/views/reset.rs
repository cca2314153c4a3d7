use async_trait::async_trait;

use super::auth::submit_state;
use super::{Transition, View, ViewContext};
use crate::api::ClientError;
use crate::router::Route;
use crate::scope::{LoadingFlag, ViewScope};

/// Which form of the reset flow is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetStage {
    /// Ask for the email the code is mailed to
    #[default]
    Request,
    /// Ask for the mailed code
    Verify,
}

/// `/reset`: request a code, then confirm it
#[derive(Debug, Default)]
pub struct ResetView {
    pub email: String,
    pub code: String,
    stage: ResetStage,
    loading: LoadingFlag,
    scope: ViewScope,
}

impl ResetView {
    pub fn stage(&self) -> ResetStage {
        self.stage
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Jump to the verify stage with a code already in hand
    pub fn enter_code(&mut self, code: impl Into<String>) {
        self.stage = ResetStage::Verify;
        self.code = code.into();
    }

    pub fn can_submit(&self) -> bool {
        let filled = match self.stage {
            ResetStage::Request => !self.email.is_empty(),
            ResetStage::Verify => !self.code.is_empty(),
        };
        filled && !self.loading.is_set()
    }

    /// Submit whichever stage is showing
    pub async fn submit(&mut self, ctx: &ViewContext) -> Transition {
        if !self.can_submit() {
            return Transition::Stay;
        }

        match self.stage {
            ResetStage::Request => self.request(ctx).await,
            ResetStage::Verify => self.verify(ctx).await,
        }
    }

    async fn request(&mut self, ctx: &ViewContext) -> Transition {
        let sent = {
            let _loading = self.loading.acquire();
            self.scope.run(ctx.client.request_reset(&self.email)).await
        };

        match sent {
            Some(Ok(())) => self.stage = ResetStage::Verify,
            Some(Err(e)) => ctx.alert(format!("Response was: {}", e.describe())),
            None => {}
        }
        Transition::Stay
    }

    async fn verify(&mut self, ctx: &ViewContext) -> Transition {
        let _loading = self.loading.acquire();
        let verified = self
            .scope
            .run(ctx.client.verify_reset(&self.email, &self.code))
            .await;

        match verified {
            Some(Ok(())) => {
                ctx.alert("Please log in with your new password.");
                Transition::Navigate(Route::Home)
            }
            Some(Err(ClientError::Status { .. })) => {
                ctx.alert("Confirmation code did not match.");
                Transition::Stay
            }
            Some(Err(e)) => {
                ctx.alert(e.describe());
                Transition::Stay
            }
            None => Transition::Stay,
        }
    }
}

#[async_trait]
impl View for ResetView {
    fn route(&self) -> Route {
        Route::Reset
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn render(&self) -> String {
        let state = submit_state(self.can_submit(), &self.loading);
        match self.stage {
            ResetStage::Request => {
                format!("Reset Password\n\nEmail: {}\n\n[Send Code]{}", self.email, state)
            }
            ResetStage::Verify => format!(
                "Reset Password\n\nConfirmation Code: {}\nPlease check your email for the code.\n\n[Verify]{}",
                self.code, state
            ),
        }
    }
}
