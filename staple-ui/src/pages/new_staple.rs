//! New Staple Page

use leptos::*;
use leptos_router::*;

use crate::alert::alert;
use crate::api;
use crate::components::LoaderButton;
use crate::forms::new_staple_valid;
use crate::scope::ViewScope;

#[component]
pub fn NewStaple() -> impl IntoView {
    let scope = ViewScope::new();
    let navigate = use_navigate();

    let name = create_rw_signal(String::new());
    let content = create_rw_signal(String::new());
    let loading = create_rw_signal(false);

    let invalid = Signal::derive(move || !new_staple_valid(&name.get(), &content.get()));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if invalid.get_untracked() || loading.get_untracked() {
            return;
        }

        let (name, content) = (name.get_untracked(), content.get_untracked());
        let navigate = navigate.clone();
        scope.run(
            loading,
            async move { api::create_staple(&name, &content).await },
            move |result| match result {
                Ok(()) => navigate("/", Default::default()),
                Err(e) => alert(&format!("Not allowed to create more staples: {}", e)),
            },
        );
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"New Staple"</h1>
            <form on:submit=on_submit class="space-y-4">
                <input
                    type="text"
                    placeholder="Name"
                    autofocus=true
                    class="w-full px-4 py-3 bg-gray-800 rounded-lg"
                    prop:value=name
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <textarea
                    rows="10"
                    placeholder="Content"
                    class="w-full px-4 py-3 bg-gray-800 rounded-lg font-mono"
                    prop:value=content
                    on:input=move |ev| content.set(event_target_value(&ev))
                />
                <LoaderButton loading=loading disabled=invalid>"Create"</LoaderButton>
            </form>
        </div>
    }
}
