//! Landing page and stack view

use async_trait::async_trait;
use std::fmt::Write;

use super::{Transition, View, ViewContext};
use crate::api::{Staple, StapleId};
use crate::router::Route;
use crate::scope::{LoadingFlag, ViewScope};

/// `/`: the lander when logged out, the stack when logged in
#[derive(Debug, Default)]
pub struct HomeView {
    authenticated: bool,
    staples: Vec<Staple>,
    next: Option<Staple>,
    loaded: bool,
    loading: LoadingFlag,
    archiving: LoadingFlag,
    deleting: LoadingFlag,
    scope: ViewScope,
}

impl HomeView {
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            ..Self::default()
        }
    }

    pub fn staples(&self) -> &[Staple] {
        &self.staples
    }

    /// The staple on top of the stack
    pub fn next(&self) -> Option<&Staple> {
        self.next.as_ref()
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub fn archiving(&self) -> &LoadingFlag {
        &self.archiving
    }

    pub fn deleting(&self) -> &LoadingFlag {
        &self.deleting
    }

    /// Fetch the stack listing and the next staple concurrently
    pub async fn refresh(&mut self, ctx: &ViewContext) {
        if !self.authenticated {
            return;
        }

        let _loading = self.loading.acquire();
        let client = &ctx.client;
        let fetched = self
            .scope
            .run(async { tokio::join!(client.list_staples(), client.next_staple()) })
            .await;

        let Some((staples, next)) = fetched else {
            return;
        };

        match staples {
            Ok(staples) => self.staples = staples,
            Err(e) => ctx.alert(e.describe()),
        }
        match next {
            Ok(next) => self.next = next,
            Err(e) => ctx.alert(e.describe()),
        }
        self.loaded = true;
    }

    /// Archive the next staple, then re-fetch the stack
    pub async fn archive_next(&mut self, ctx: &ViewContext) -> Transition {
        let Some(id) = self.next_id(ctx) else {
            return Transition::Stay;
        };

        let archived = {
            let _archiving = self.archiving.acquire();
            self.scope.run(ctx.client.archive_staple(&id)).await
        };

        match archived {
            Some(Ok(())) => {
                tracing::info!(staple = %id, "Archived staple");
                self.refresh(ctx).await;
            }
            Some(Err(e)) => ctx.alert(format!("Failed to archive staple: {}", e.describe())),
            None => {}
        }
        Transition::Stay
    }

    /// Delete the next staple, then re-fetch the stack
    pub async fn delete_next(&mut self, ctx: &ViewContext) -> Transition {
        let Some(id) = self.next_id(ctx) else {
            return Transition::Stay;
        };

        let deleted = {
            let _deleting = self.deleting.acquire();
            self.scope.run(ctx.client.delete_staple(&id)).await
        };

        match deleted {
            Some(Ok(())) => {
                tracing::info!(staple = %id, "Deleted staple");
                self.refresh(ctx).await;
            }
            Some(Err(e)) => ctx.alert(format!("Failed to delete staple: {}", e.describe())),
            None => {}
        }
        Transition::Stay
    }

    fn next_id(&self, ctx: &ViewContext) -> Option<StapleId> {
        let id = self.next.as_ref().map(|s| s.id.clone());
        if id.is_none() {
            ctx.alert("Your stack is empty.");
        }
        id
    }
}

#[async_trait]
impl View for HomeView {
    fn route(&self) -> Route {
        Route::Home
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }

    async fn mount(&mut self, ctx: &ViewContext) {
        self.refresh(ctx).await;
    }

    fn render(&self) -> String {
        if !self.authenticated {
            return "Staple\nA stack based bookmark.".to_string();
        }

        let mut out = String::from("Your Staples\n");
        if !self.loaded {
            return out;
        }

        match &self.next {
            Some(next) => {
                let _ = writeln!(out, "\n== {} ==", next.name);
                let _ = writeln!(out, "{}", next.content);
            }
            None => out.push_str("\nYour stack is empty.\n"),
        }

        if !self.staples.is_empty() {
            out.push('\n');
            for staple in &self.staples {
                let _ = writeln!(
                    out,
                    "[{}] Name: {}  Created: {}",
                    staple.id,
                    staple.name,
                    staple.created_display()
                );
            }
        }

        out.push_str("\n+ Create a new staple (/staples/new)");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in_context, MockBackend};
    use axum::http::Method;
    use serde_json::json;
    use std::time::Duration;

    fn stack_backend(backend: &MockBackend) {
        backend.respond(
            Method::GET,
            "/rest/api/1/staple",
            200,
            json!({"staples": [
                {"id": 1, "name": "first", "created_at": "2020-01-01T00:00:00Z"},
                {"id": 2, "name": "second", "created_at": "2020-01-02T00:00:00Z"}
            ]}),
        );
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/next",
            200,
            json!({"staple": {"id": 1, "name": "first", "content": "read me"}}),
        );
    }

    #[tokio::test]
    async fn test_lander_when_logged_out() {
        let backend = MockBackend::start().await;
        let (ctx, _alerts) = signed_in_context(&backend);

        let mut view = HomeView::new(false);
        view.mount(&ctx).await;

        assert!(backend.requests().is_empty());
        assert_eq!(view.render(), "Staple\nA stack based bookmark.");
    }

    #[tokio::test]
    async fn test_mount_loads_stack_and_next() {
        let backend = MockBackend::start().await;
        stack_backend(&backend);
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = HomeView::new(true);
        view.mount(&ctx).await;

        assert_eq!(view.staples().len(), 2);
        assert_eq!(view.next().map(|s| s.content.as_str()), Some("read me"));
        assert!(!view.loading().is_set());
        assert!(alerts.messages().is_empty());

        let rendered = view.render();
        assert!(rendered.contains("read me"));
        assert!(rendered.contains("Name: second"));
    }

    #[tokio::test]
    async fn test_archive_refetches() {
        let backend = MockBackend::start().await;
        stack_backend(&backend);
        backend.respond_empty(Method::POST, "/rest/api/1/staple/1/archive", 200);
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = HomeView::new(true);
        view.mount(&ctx).await;
        let transition = view.archive_next(&ctx).await;

        assert_eq!(transition, Transition::Stay);
        assert!(alerts.messages().is_empty());
        assert!(!view.archiving().is_set());

        // archive call followed by a fresh listing
        let paths = backend.paths();
        assert_eq!(paths.iter().filter(|p| *p == "/rest/api/1/staple/1/archive").count(), 1);
        assert_eq!(paths.iter().filter(|p| *p == "/rest/api/1/staple").count(), 2);
        assert_eq!(paths.iter().filter(|p| *p == "/rest/api/1/staple/next").count(), 2);
    }

    #[tokio::test]
    async fn test_delete_failure_alerts() {
        let backend = MockBackend::start().await;
        stack_backend(&backend);
        backend.respond(
            Method::DELETE,
            "/rest/api/1/staple/1",
            500,
            json!({"message": "Unable to delete staple."}),
        );
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = HomeView::new(true);
        view.mount(&ctx).await;
        view.delete_next(&ctx).await;

        assert_eq!(
            alerts.last().as_deref(),
            Some("Failed to delete staple: 500 Internal Server Error (Unable to delete staple.)")
        );
        assert!(!view.deleting().is_set());
        // no re-fetch after a failed delete
        assert_eq!(backend.paths().iter().filter(|p| *p == "/rest/api/1/staple").count(), 1);
    }

    #[tokio::test]
    async fn test_empty_stack() {
        let backend = MockBackend::start().await;
        backend.respond(Method::GET, "/rest/api/1/staple", 200, json!({"staples": []}));
        backend.respond(Method::GET, "/rest/api/1/staple/next", 200, json!({"staple": null}));
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = HomeView::new(true);
        view.mount(&ctx).await;
        assert!(view.render().contains("Your stack is empty."));

        view.archive_next(&ctx).await;
        assert_eq!(alerts.last().as_deref(), Some("Your stack is empty."));
        assert_eq!(backend.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_unmount_ignores_late_response() {
        let backend = MockBackend::start().await;
        stack_backend(&backend);
        backend.delay("/rest/api/1/staple", Duration::from_millis(300));
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = HomeView::new(true);
        let scope = view.scope().clone();

        tokio::join!(view.refresh(&ctx), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            scope.cancel();
        });

        assert!(view.staples().is_empty());
        assert!(view.next().is_none());
        assert!(!view.loading().is_set());
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_loading_only_while_in_flight() {
        let backend = MockBackend::start().await;
        stack_backend(&backend);
        backend.delay("/rest/api/1/staple/next", Duration::from_millis(200));
        let (ctx, _alerts) = signed_in_context(&backend);

        let mut view = HomeView::new(true);
        let flag = view.loading().clone();
        assert!(!flag.is_set());

        let ((), during) = tokio::join!(view.refresh(&ctx), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.is_set()
        });

        assert!(during);
        assert!(!view.loading().is_set());
    }
}
