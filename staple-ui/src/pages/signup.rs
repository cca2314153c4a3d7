//! Signup Page
//!
//! Registers the account, then logs straight in with the same credentials.

use leptos::*;
use leptos_router::*;

use crate::alert::alert;
use crate::api::{self, ApiError};
use crate::components::LoaderButton;
use crate::forms::signup_valid;
use crate::routes::paths;
use crate::scope::ViewScope;
use crate::session::use_session;

/// Where a signup attempt stopped
enum Outcome {
    Registered(String),
    RegisterFailed(ApiError),
    TokenFailed(ApiError),
}

async fn register_and_login(email: String, password: String) -> Outcome {
    if let Err(e) = api::register(&email, &password).await {
        return Outcome::RegisterFailed(e);
    }
    match api::get_token(&email, &password).await {
        Ok(token) => Outcome::Registered(token),
        Err(e) => Outcome::TokenFailed(e),
    }
}

#[component]
pub fn Signup() -> impl IntoView {
    let scope = ViewScope::new();
    let session = use_session();
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());
    let loading = create_rw_signal(false);

    let invalid = Signal::derive(move || {
        !signup_valid(&email.get(), &password.get(), &confirm.get())
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if invalid.get_untracked() || loading.get_untracked() {
            return;
        }

        let navigate = navigate.clone();
        scope.run(
            loading,
            register_and_login(email.get_untracked(), password.get_untracked()),
            move |outcome| match outcome {
                Outcome::Registered(token) => match session.sign_in(&token) {
                    Ok(()) => navigate("/", Default::default()),
                    Err(e) => alert(&format!("Login failed. {}", e)),
                },
                Outcome::RegisterFailed(e) => alert(&format!("Response was: {}", e)),
                Outcome::TokenFailed(e) => {
                    alert(&format!("Login failed. {}", e));
                    navigate(paths::LOGIN, Default::default());
                }
            },
        );
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Signup"</h1>
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
                <input
                    type="password"
                    placeholder="Confirm Password"
                    class="w-full px-4 py-3 bg-gray-800 rounded-lg"
                    prop:value=confirm
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <LoaderButton loading=loading disabled=invalid>"Signup"</LoaderButton>
            </form>
        </div>
    }
}
