//! Login Page

use leptos::*;
use leptos_router::*;

use crate::alert::alert;
use crate::api;
use crate::components::LoaderButton;
use crate::forms::login_valid;
use crate::scope::ViewScope;
use crate::session::use_session;

#[component]
pub fn Login() -> impl IntoView {
    let scope = ViewScope::new();
    let session = use_session();
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let loading = create_rw_signal(false);

    let invalid = Signal::derive(move || !login_valid(&email.get(), &password.get()));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if invalid.get_untracked() || loading.get_untracked() {
            return;
        }

        let (email, password) = (email.get_untracked(), password.get_untracked());
        let navigate = navigate.clone();
        scope.run(
            loading,
            async move { api::get_token(&email, &password).await },
            move |result| match result {
                Ok(token) => match session.sign_in(&token) {
                    Ok(()) => navigate("/", Default::default()),
                    Err(e) => alert(&format!("Login failed. {}", e)),
                },
                Err(e) => alert(&format!("Login failed. {}", e)),
            },
        );
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Login"</h1>
            <form on:submit=on_submit class="space-y-4">
                <input
                    type="email"
                    placeholder="Email"
                    autofocus=true
                    class="w-full px-4 py-3 bg-gray-800 rounded-lg"
                    prop:value=email
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    class="w-full px-4 py-3 bg-gray-800 rounded-lg"
                    prop:value=password
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <LoaderButton loading=loading disabled=invalid>"Login"</LoaderButton>
            </form>
        </div>
    }
}
