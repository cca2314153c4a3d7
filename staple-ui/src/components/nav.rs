//! Navigation Component
//!
//! Header bar whose links follow the session.

use leptos::*;
use leptos_router::*;

use crate::routes::paths;
use crate::session::use_session;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let logout = move |_| {
        session.sign_out();
        navigate(paths::LOGIN, Default::default());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href=paths::HOME class="text-xl font-bold text-white">"Staple"</A>

                    <div class="flex items-center space-x-1">
                        <Show
                            when=move || session.is_authenticated()
                            fallback=|| view! {
                                <NavLink href=paths::SIGNUP label="Signup" />
                                <NavLink href=paths::LOGIN label="Login" />
                                <NavLink href=paths::RESET label="Reset Password" />
                            }
                        >
                            <NavLink href=paths::SETTINGS label="Settings" />
                            <NavLink href=paths::ARCHIVE label="Archives" />
                            <button
                                on:click=logout.clone()
                                class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                            >
                                "Logout"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
