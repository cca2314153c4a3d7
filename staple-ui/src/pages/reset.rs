//! Reset Password Page
//!
//! First asks for the account email, then for the confirmation code that was
//! mailed to it.

use leptos::*;
use leptos_router::*;

use crate::alert::alert;
use crate::api;
use crate::components::LoaderButton;
use crate::forms::{reset_code_valid, reset_request_valid};
use crate::scope::ViewScope;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Request,
    Verify,
}

#[component]
pub fn Reset() -> impl IntoView {
    let scope = ViewScope::new();
    let navigate = use_navigate();

    let stage = create_rw_signal(Stage::Request);
    let email = create_rw_signal(String::new());
    let code = create_rw_signal(String::new());
    let loading = create_rw_signal(false);

    let invalid = Signal::derive(move || match stage.get() {
        Stage::Request => !reset_request_valid(&email.get()),
        Stage::Verify => !reset_code_valid(&code.get()),
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if invalid.get_untracked() || loading.get_untracked() {
            return;
        }

        let address = email.get_untracked();
        match stage.get_untracked() {
            Stage::Request => scope.run(
                loading,
                async move { api::request_reset(&address).await },
                move |result| match result {
                    Ok(()) => stage.set(Stage::Verify),
                    Err(e) => alert(&format!("Response was: {}", e)),
                },
            ),
            Stage::Verify => {
                let code = code.get_untracked();
                let navigate = navigate.clone();
                scope.run(
                    loading,
                    async move { api::verify_reset(&address, &code).await },
                    move |result| match result {
                        Ok(()) => {
                            alert("Please log in with your new password.");
                            navigate("/", Default::default());
                        }
                        Err(e) if e.is_status() => alert("Confirmation code did not match."),
                        Err(e) => alert(&e.to_string()),
                    },
                )
            }
        }
    };

    view! {
        <div class="max-w-md mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Reset Password"</h1>
            <form on:submit=on_submit class="space-y-4">
                <Show
                    when=move || stage.get() == Stage::Verify
                    fallback=move || view! {
                        <input
                            type="email"
                            placeholder="Email"
                            autofocus=true
                            class="w-full px-4 py-3 bg-gray-800 rounded-lg"
                            prop:value=email
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    }
                >
                    <p class="text-gray-400">
                        "Please check your email for the confirmation code."
                    </p>
                    <input
                        type="text"
                        placeholder="Confirmation Code"
                        autofocus=true
                        class="w-full px-4 py-3 bg-gray-800 rounded-lg"
                        prop:value=code
                        on:input=move |ev| code.set(event_target_value(&ev))
                    />
                </Show>
                <LoaderButton loading=loading disabled=invalid>
                    {move || match stage.get() {
                        Stage::Request => "Send Confirmation",
                        Stage::Verify => "Confirm",
                    }}
                </LoaderButton>
            </form>
        </div>
    }
}
