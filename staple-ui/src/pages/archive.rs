//! Archive Page
//!
//! Archived staples on the side, the selected one in the detail pane.

use leptos::*;

use crate::alert::alert;
use crate::api::{self, Staple};
use crate::components::{LoaderButton, Loading};
use crate::scope::ViewScope;

#[component]
pub fn Archive() -> impl IntoView {
    let scope = ViewScope::new();

    let entries = create_rw_signal(Vec::<Staple>::new());
    let selected = create_rw_signal(None::<Staple>);
    let loading = create_rw_signal(false);
    let fetching = create_rw_signal(false);
    let deleting = create_rw_signal(false);

    let refresh = {
        let scope = scope.clone();
        move || {
            scope.run(loading, api::fetch_archive(), move |result| match result {
                Ok(list) => entries.set(list),
                Err(e) => alert(&e.to_string()),
            })
        }
    };
    refresh();

    let select = {
        let scope = scope.clone();
        move |id: String| {
            scope.run(
                fetching,
                async move { api::fetch_staple(&id).await },
                move |result| match result {
                    Ok(staple) => selected.set(Some(staple)),
                    Err(e) => alert(&e.to_string()),
                },
            )
        }
    };

    let on_delete = {
        let scope = scope.clone();
        Callback::new(move |_: ev::MouseEvent| {
            let Some(id) = selected.get_untracked().map(|s| s.id) else {
                return;
            };
            let refresh = refresh.clone();
            scope.run(deleting, async move { api::delete_staple(&id).await }, move |result| {
                match result {
                    Ok(()) => {
                        selected.set(None);
                        refresh();
                    }
                    Err(e) => alert(&e.to_string()),
                }
            });
        })
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Your Archived Staples"</h1>

            <Show when=move || !loading.get() fallback=Loading>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <section class="md:col-span-2 bg-gray-800 rounded-xl p-6 space-y-4">
                        {move || match selected.get() {
                            _ if fetching.get() => view! { <Loading /> }.into_view(),
                            Some(staple) => view! {
                                <pre class="whitespace-pre-wrap">{staple.content}</pre>
                                <LoaderButton loading=deleting danger=true on_click=on_delete>
                                    "Delete"
                                </LoaderButton>
                            }.into_view(),
                            None => view! {
                                <pre>"No archived staples."</pre>
                            }.into_view(),
                        }}
                    </section>

                    <ul class="space-y-2">
                        <For
                            each=move || entries.get()
                            key=|staple| staple.id.clone()
                            children={
                                let select = select.clone();
                                move |staple: Staple| {
                                    let select = select.clone();
                                    let id = staple.id.clone();
                                    view! {
                                        <li class="bg-gray-800 rounded-lg px-4 py-3">
                                            <a
                                                href="#"
                                                class="text-primary-400 hover:text-primary-300"
                                                on:click=move |ev| {
                                                    ev.prevent_default();
                                                    select(id.clone());
                                                }
                                            >
                                                {staple.name.clone()}
                                            </a>
                                            <div class="text-sm text-gray-400">
                                                {format!("Created: {}", staple.created_display())}
                                            </div>
                                        </li>
                                    }
                                }
                            }
                        />
                    </ul>
                </div>
            </Show>
        </div>
    }
}
