use async_trait::async_trait;

use super::auth::submit_state;
use super::{Transition, View, ViewContext};
use crate::router::Route;
use crate::scope::{LoadingFlag, ViewScope};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStapleForm {
    pub name: String,
    pub content: String,
}

impl NewStapleForm {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.content.is_empty()
    }
}

/// `/staples/new`
#[derive(Debug, Default)]
pub struct NewStapleView {
    pub form: NewStapleForm,
    loading: LoadingFlag,
    scope: ViewScope,
}

impl NewStapleView {
    pub fn can_submit(&self) -> bool {
        self.form.is_valid() && !self.loading.is_set()
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Push the staple onto the stack and go back home
    pub async fn submit(&mut self, ctx: &ViewContext) -> Transition {
        if !self.can_submit() {
            return Transition::Stay;
        }

        let _loading = self.loading.acquire();
        let form = &self.form;
        let created = self
            .scope
            .run(ctx.client.create_staple(&form.name, &form.content))
            .await;

        match created {
            Some(Ok(())) => {
                tracing::info!(name = %form.name, "Created staple");
                Transition::Navigate(Route::Home)
            }
            Some(Err(e)) => {
                ctx.alert(format!("Not allowed to create more staples: {}", e.describe()));
                Transition::Stay
            }
            None => Transition::Stay,
        }
    }
}

#[async_trait]
impl View for NewStapleView {
    fn route(&self) -> Route {
        Route::NewStaple
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn render(&self) -> String {
        format!(
            "New Staple\n\nTitle: {}\n{}\n\n[Create]{}",
            self.form.name,
            self.form.content,
            submit_state(self.can_submit(), &self.loading)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in_context, MockBackend};
    use axum::http::Method;
    use serde_json::json;
    use std::time::Duration;

    fn filled() -> NewStapleView {
        NewStapleView {
            form: NewStapleForm {
                name: "Rust book".to_string(),
                content: "https://doc.rust-lang.org/book/".to_string(),
            },
            ..NewStapleView::default()
        }
    }

    #[test]
    fn test_validation() {
        let mut view = NewStapleView::default();
        assert!(!view.can_submit());
        assert!(view.render().contains("(disabled)"));

        view.form.name = "title".to_string();
        assert!(!view.can_submit());
        view.form.content = "body".to_string();
        assert!(view.can_submit());
    }

    #[tokio::test]
    async fn test_create_navigates_home() {
        let backend = MockBackend::start().await;
        backend.respond_empty(Method::POST, "/rest/api/1/staple", 201);
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = filled();
        assert_eq!(view.submit(&ctx).await, Transition::Navigate(Route::Home));
        assert!(alerts.messages().is_empty());

        let requests = backend.requests();
        assert_eq!(
            requests[0].body,
            Some(json!({"name": "Rust book", "content": "https://doc.rust-lang.org/book/"}))
        );
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer secret"));
    }

    #[tokio::test]
    async fn test_limit_reached() {
        let backend = MockBackend::start().await;
        backend.respond(
            Method::POST,
            "/rest/api/1/staple",
            500,
            json!({"message": "Unable to create staple for user."}),
        );
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = filled();
        assert_eq!(view.submit(&ctx).await, Transition::Stay);
        assert_eq!(
            alerts.last().as_deref(),
            Some("Not allowed to create more staples: 500 Internal Server Error (Unable to create staple for user.)")
        );
        assert_eq!(view.form.name, "Rust book");
    }

    #[tokio::test]
    async fn test_loading_while_submitting() {
        let backend = MockBackend::start().await;
        backend.respond_empty(Method::POST, "/rest/api/1/staple", 200);
        backend.delay("/rest/api/1/staple", Duration::from_millis(200));
        let (ctx, _alerts) = signed_in_context(&backend);

        let mut view = filled();
        let flag = view.loading().clone();

        let (transition, during) = tokio::join!(view.submit(&ctx), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.is_set()
        });

        assert!(during);
        assert_eq!(transition, Transition::Navigate(Route::Home));
        assert!(!view.loading().is_set());
        assert!(view.can_submit());
    }
}
