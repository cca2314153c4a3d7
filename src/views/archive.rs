use async_trait::async_trait;
use std::fmt::Write;

use super::{Transition, View, ViewContext};
use crate::api::{Staple, StapleId};
use crate::router::Route;
use crate::scope::{LoadingFlag, ViewScope};

const EMPTY_DETAIL: &str = "No archived staples.";

/// `/archive`: archived staples on one side, the selected one on the other
#[derive(Debug, Default)]
pub struct ArchiveView {
    entries: Vec<Staple>,
    selected: Option<Staple>,
    loaded: bool,
    loading: LoadingFlag,
    deleting: LoadingFlag,
    scope: ViewScope,
}

impl ArchiveView {
    pub fn entries(&self) -> &[Staple] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&Staple> {
        self.selected.as_ref()
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub fn deleting(&self) -> &LoadingFlag {
        &self.deleting
    }

    pub async fn refresh(&mut self, ctx: &ViewContext) {
        let _loading = self.loading.acquire();
        match self.scope.run(ctx.client.list_archive()).await {
            Some(Ok(entries)) => {
                self.entries = entries;
                self.loaded = true;
            }
            Some(Err(e)) => ctx.alert(e.describe()),
            None => {}
        }
    }

    /// Fetch one archived staple into the detail pane
    pub async fn select(&mut self, ctx: &ViewContext, id: &StapleId) {
        let _loading = self.loading.acquire();
        match self.scope.run(ctx.client.get_staple(id)).await {
            Some(Ok(staple)) => self.selected = Some(staple),
            Some(Err(e)) => ctx.alert(e.describe()),
            None => {}
        }
    }

    /// Delete the selected staple, then re-fetch the archive
    pub async fn delete_selected(&mut self, ctx: &ViewContext) -> Transition {
        let Some(id) = self.selected.as_ref().map(|s| s.id.clone()) else {
            return Transition::Stay;
        };

        let deleted = {
            let _deleting = self.deleting.acquire();
            self.scope.run(ctx.client.delete_staple(&id)).await
        };

        match deleted {
            Some(Ok(())) => {
                tracing::info!(staple = %id, "Deleted archived staple");
                self.selected = None;
                self.refresh(ctx).await;
            }
            Some(Err(e)) => ctx.alert(e.describe()),
            None => {}
        }
        Transition::Stay
    }

    /// Content of the detail pane
    pub fn detail(&self) -> &str {
        match &self.selected {
            Some(staple) => &staple.content,
            None => EMPTY_DETAIL,
        }
    }
}

#[async_trait]
impl View for ArchiveView {
    fn route(&self) -> Route {
        Route::Archive
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }

    async fn mount(&mut self, ctx: &ViewContext) {
        self.refresh(ctx).await;
    }

    fn render(&self) -> String {
        let mut out = String::from("Your Archived Staples\n");
        if !self.loaded {
            return out;
        }

        out.push('\n');
        out.push_str(self.detail());
        out.push('\n');
        if self.selected.is_some() {
            out.push_str("[Delete]\n");
        }

        if !self.entries.is_empty() {
            out.push('\n');
        }
        for staple in &self.entries {
            let _ = writeln!(out, "[{}] {}", staple.id, staple.name);
            let _ = writeln!(out, "    Created: {}", staple.created_display());
        }
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

    #[tokio::test]
    async fn test_empty_archive() {
        let backend = MockBackend::start().await;
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/archive",
            200,
            json!({"staples": []}),
        );
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = ArchiveView::default();
        view.mount(&ctx).await;

        assert!(view.entries().is_empty());
        assert_eq!(view.detail(), "No archived staples.");
        assert!(view.render().contains("No archived staples."));
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_select_fetches_by_id() {
        let backend = MockBackend::start().await;
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/archive",
            200,
            json!({"staples": [{"id": 1, "name": "old", "created_at": "2020-01-01T00:00:00Z"}]}),
        );
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/1",
            200,
            json!({"staple": {"id": 1, "name": "old", "content": "archived body", "archived": true}}),
        );
        let (ctx, _alerts) = signed_in_context(&backend);

        let mut view = ArchiveView::default();
        view.mount(&ctx).await;
        assert_eq!(view.entries().len(), 1);
        assert_eq!(view.render().matches("Created:").count(), 1);

        let id = view.entries()[0].id.clone();
        view.select(&ctx, &id).await;

        assert_eq!(backend.paths().last().map(String::as_str), Some("/rest/api/1/staple/1"));
        assert_eq!(view.detail(), "archived body");
        assert!(view.render().contains("[Delete]"));
    }

    #[tokio::test]
    async fn test_delete_clears_selection_and_refetches() {
        let backend = MockBackend::start().await;
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/archive",
            200,
            json!({"staples": [{"id": 1, "name": "old"}]}),
        );
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/1",
            200,
            json!({"staple": {"id": 1, "name": "old", "content": "body"}}),
        );
        backend.respond_empty(Method::DELETE, "/rest/api/1/staple/1", 200);
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = ArchiveView::default();
        view.mount(&ctx).await;
        view.select(&ctx, &StapleId::from(1)).await;
        view.delete_selected(&ctx).await;

        assert!(view.selected().is_none());
        assert_eq!(view.detail(), "No archived staples.");
        assert!(!view.deleting().is_set());
        assert!(alerts.messages().is_empty());
        assert_eq!(
            backend.paths(),
            vec![
                "/rest/api/1/staple/archive",
                "/rest/api/1/staple/1",
                "/rest/api/1/staple/1",
                "/rest/api/1/staple/archive",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_failure_alerts() {
        let backend = MockBackend::start().await;
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/archive",
            401,
            json!({"error": "token is expired"}),
        );
        let (ctx, alerts) = signed_in_context(&backend);

        let mut view = ArchiveView::default();
        view.mount(&ctx).await;

        assert_eq!(
            alerts.last().as_deref(),
            Some("401 Unauthorized (token is expired)")
        );
        assert!(!view.loading().is_set());
    }

    #[tokio::test]
    async fn test_delete_loading_while_in_flight() {
        let backend = MockBackend::start().await;
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/archive",
            200,
            json!({"staples": [{"id": 1, "name": "old"}]}),
        );
        backend.respond(
            Method::GET,
            "/rest/api/1/staple/1",
            200,
            json!({"staple": {"id": 1, "name": "old", "content": "body"}}),
        );
        backend.respond_empty(Method::DELETE, "/rest/api/1/staple/1", 200);
        let (ctx, _alerts) = signed_in_context(&backend);

        let mut view = ArchiveView::default();
        view.mount(&ctx).await;
        view.select(&ctx, &StapleId::from(1)).await;
        backend.delay("/rest/api/1/staple/1", Duration::from_millis(200));

        let flag = view.deleting().clone();
        let (transition, during) = tokio::join!(view.delete_selected(&ctx), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.is_set()
        });

        assert!(during);
        assert_eq!(transition, Transition::Stay);
        assert!(!view.deleting().is_set());
        assert!(view.selected().is_none());
    }
}
