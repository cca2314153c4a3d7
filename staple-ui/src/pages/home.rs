//! Home Page
//!
//! The lander for visitors, the stack for logged-in users.

use futures_util::future::join;
use leptos::*;
use leptos_router::*;

use crate::alert::alert;
use crate::api::{self, Staple};
use crate::components::{LoaderButton, Loading};
use crate::routes::paths;
use crate::scope::ViewScope;
use crate::session::use_session;

#[component]
pub fn Home() -> impl IntoView {
    let session = use_session();

    view! {
        <Show when=move || session.is_authenticated() fallback=Lander>
            <Stack />
        </Show>
    }
}

#[component]
fn Lander() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-5xl font-bold mb-2">"Staple"</h1>
            <p class="text-gray-400">"A stack based bookmark."</p>
        </div>
    }
}

#[component]
fn Stack() -> impl IntoView {
    let scope = ViewScope::new();

    let staples = create_rw_signal(Vec::<Staple>::new());
    let next = create_rw_signal(None::<Staple>);
    let loading = create_rw_signal(false);
    let archiving = create_rw_signal(false);
    let deleting = create_rw_signal(false);

    let refresh = {
        let scope = scope.clone();
        move || {
            scope.run(
                loading,
                join(api::fetch_staples(), api::fetch_next()),
                move |(list, top)| {
                    match list {
                        Ok(list) => staples.set(list),
                        Err(e) => alert(&e.to_string()),
                    }
                    match top {
                        Ok(top) => next.set(top),
                        Err(e) => alert(&e.to_string()),
                    }
                },
            )
        }
    };
    refresh();

    let on_archive = {
        let scope = scope.clone();
        let refresh = refresh.clone();
        Callback::new(move |_: ev::MouseEvent| {
            let Some(id) = next.get_untracked().map(|s| s.id) else {
                return;
            };
            let refresh = refresh.clone();
            scope.run(archiving, async move { api::archive_staple(&id).await }, move |result| {
                match result {
                    Ok(()) => refresh(),
                    Err(e) => alert(&format!("Failed to archive staple: {}", e)),
                }
            });
        })
    };

    let on_delete = {
        let scope = scope.clone();
        let refresh = refresh.clone();
        Callback::new(move |_: ev::MouseEvent| {
            let Some(id) = next.get_untracked().map(|s| s.id) else {
                return;
            };
            let refresh = refresh.clone();
            scope.run(deleting, async move { api::delete_staple(&id).await }, move |result| {
                match result {
                    Ok(()) => refresh(),
                    Err(e) => alert(&format!("Failed to delete staple: {}", e)),
                }
            });
        })
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Your Staples"</h1>

            {move || if loading.get() {
                view! { <Loading /> }.into_view()
            } else {
                view! {
                    {move || match next.get() {
                        Some(top) => view! {
                            <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                                <h2 class="text-xl font-semibold">{top.name}</h2>
                                <pre class="whitespace-pre-wrap">{top.content}</pre>
                                <div class="grid grid-cols-2 gap-4">
                                    <LoaderButton loading=archiving on_click=on_archive>
                                        "Archive"
                                    </LoaderButton>
                                    <LoaderButton loading=deleting danger=true on_click=on_delete>
                                        "Delete"
                                    </LoaderButton>
                                </div>
                            </section>
                        }.into_view(),
                        None => view! {
                            <p class="text-gray-400">"Your stack is empty."</p>
                        }.into_view(),
                    }}

                    <ul class="space-y-2">
                        <For
                            each=move || staples.get()
                            key=|staple| staple.id.clone()
                            children=|staple| view! {
                                <li class="bg-gray-800 rounded-lg px-4 py-3">
                                    <div>{format!("Name: {}", staple.name)}</div>
                                    <div class="text-sm text-gray-400">
                                        {format!("Created: {}", staple.created_display())}
                                    </div>
                                </li>
                            }
                        />
                    </ul>
                }.into_view()
            }}

            <A href=paths::NEW_STAPLE class="block text-primary-400 hover:text-primary-300">
                "+ Create a new staple"
            </A>
        </div>
    }
}
