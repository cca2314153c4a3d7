//! Route Guard Component
//!
//! Renders its children only when the session satisfies the guard,
//! otherwise redirects. Re-evaluated whenever the session changes.

use leptos::*;
use leptos_router::*;

use crate::routes::Guard;
use crate::session::use_session;

#[component]
pub fn Guarded(guard: Guard, children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || match guard.redirect(session.is_authenticated()) {
        Some(path) => view! { <Redirect path=path /> }.into_view(),
        None => children().into_view(),
    }
}
