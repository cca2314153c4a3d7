//! Settings Page
//!
//! Stack limit, password change and the backend the client talks to.

use leptos::*;
use leptos_router::*;

use crate::alert::{alert, log_info};
use crate::api;
use crate::components::{LoaderButton, Loading};
use crate::forms::{parse_max_staples, password_change_valid};
use crate::routes::paths;
use crate::scope::ViewScope;
use crate::session::use_session;

#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="max-w-2xl mx-auto space-y-8">
            <h1 class="text-3xl font-bold">"Settings"</h1>
            <MaxStaplesSection />
            <PasswordSection />
            <ApiSection />
        </div>
    }
}

#[component]
fn MaxStaplesSection() -> impl IntoView {
    let scope = ViewScope::new();

    let max_input = create_rw_signal(String::new());
    let loaded = create_rw_signal(false);
    let loading = create_rw_signal(false);
    let saving = create_rw_signal(false);

    let refresh = {
        let scope = scope.clone();
        move || {
            scope.run(loading, api::fetch_max_staples(), move |result| match result {
                Ok(max) => {
                    max_input.set(max.to_string());
                    loaded.set(true);
                }
                Err(e) => alert(&e.to_string()),
            })
        }
    };
    refresh();

    let invalid = Signal::derive(move || parse_max_staples(&max_input.get()).is_none());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(max) = parse_max_staples(&max_input.get_untracked()) else {
            return;
        };
        if saving.get_untracked() {
            return;
        }

        let refresh = refresh.clone();
        scope.run(saving, api::set_max_staples(max), move |result| match result {
            Ok(()) => {
                alert(&format!("New staple count of {} successfully set.", max));
                refresh();
            }
            Err(e) => alert(&format!("Response was: {}", e)),
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Max Staples"</h2>
            <Show when=move || loaded.get() fallback=Loading>
                <form on:submit=on_submit.clone() class="space-y-4">
                    <input
                        type="number"
                        min="0"
                        class="w-full px-4 py-3 bg-gray-700 rounded-lg"
                        prop:value=max_input
                        on:input=move |ev| max_input.set(event_target_value(&ev))
                    />
                    <LoaderButton loading=saving disabled=invalid>"Save"</LoaderButton>
                </form>
            </Show>
        </section>
    }
}

#[component]
fn PasswordSection() -> impl IntoView {
    let scope = ViewScope::new();
    let session = use_session();
    let navigate = use_navigate();

    let password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());
    let changing = create_rw_signal(false);

    let invalid = Signal::derive(move || !password_change_valid(&password.get(), &confirm.get()));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if invalid.get_untracked() || changing.get_untracked() {
            return;
        }

        let new_password = password.get_untracked();
        let navigate = navigate.clone();
        scope.run(
            changing,
            async move { api::change_password(&new_password).await },
            move |result| match result {
                Ok(()) => {
                    alert("Please log in with your new password.");
                    session.sign_out();
                    navigate(paths::LOGIN, Default::default());
                }
                Err(e) => alert(&format!("Response was: {}", e)),
            },
        );
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Change Password"</h2>
            <form on:submit=on_submit class="space-y-4">
                <input
                    type="password"
                    placeholder="New Password"
                    class="w-full px-4 py-3 bg-gray-700 rounded-lg"
                    prop:value=password
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Confirm Password"
                    class="w-full px-4 py-3 bg-gray-700 rounded-lg"
                    prop:value=confirm
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <LoaderButton loading=changing disabled=invalid danger=true>
                    "Change Password"
                </LoaderButton>
            </form>
        </section>
    }
}

#[component]
fn ApiSection() -> impl IntoView {
    let api_url = create_rw_signal(api::get_api_base());

    let on_save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        api::set_api_base(&api_url.get_untracked());
        log_info(&format!("API base set to '{}'", api::get_api_base()));
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"API Server"</h2>
            <p class="text-sm text-gray-400">"Leave empty to use this site's origin."</p>
            <form on:submit=on_save class="flex gap-4">
                <input
                    type="url"
                    placeholder="https://staple.example.com"
                    class="flex-1 px-4 py-3 bg-gray-700 rounded-lg"
                    prop:value=api_url
                    on:input=move |ev| api_url.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                >
                    "Save"
                </button>
            </form>
        </section>
    }
}
