//! App Root Component
//!
//! Session provider, navigation header and the guarded route table.

use leptos::*;
use leptos_router::*;

use crate::components::{Guarded, Nav};
use crate::pages::{Archive, Home, Login, NewStaple, Reset, Settings, Signup};
use crate::routes::{guard_for, paths};
use crate::session::provide_session;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_session();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path=paths::HOME view=Home />
                        <Route
                            path=paths::LOGIN
                            view=|| view! { <Guarded guard=guard_for(paths::LOGIN)><Login /></Guarded> }
                        />
                        <Route
                            path=paths::SIGNUP
                            view=|| view! { <Guarded guard=guard_for(paths::SIGNUP)><Signup /></Guarded> }
                        />
                        <Route
                            path=paths::RESET
                            view=|| view! { <Guarded guard=guard_for(paths::RESET)><Reset /></Guarded> }
                        />
                        <Route
                            path=paths::SETTINGS
                            view=|| view! { <Guarded guard=guard_for(paths::SETTINGS)><Settings /></Guarded> }
                        />
                        <Route
                            path=paths::NEW_STAPLE
                            view=|| view! { <Guarded guard=guard_for(paths::NEW_STAPLE)><NewStaple /></Guarded> }
                        />
                        <Route
                            path=paths::ARCHIVE
                            view=|| view! { <Guarded guard=guard_for(paths::ARCHIVE)><Archive /></Guarded> }
                        />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Sorry, page not found!"</h1>
            <A
                href=paths::HOME
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Back to your stack"
            </A>
        </div>
    }
}
