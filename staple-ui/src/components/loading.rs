//! Loading Components
//!
//! Spinners and the button that shows one while its request is in flight.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Submit button that disables itself and spins while `loading`
#[component]
pub fn LoaderButton(
    #[prop(into)]
    loading: Signal<bool>,
    #[prop(into, default = Signal::derive(|| false))]
    disabled: Signal<bool>,
    #[prop(optional)]
    danger: bool,
    #[prop(optional, into)]
    on_click: Option<Callback<ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let color = if danger {
        "bg-red-600 hover:bg-red-700"
    } else {
        "bg-primary-600 hover:bg-primary-700"
    };

    view! {
        <button
            type=if on_click.is_some() { "button" } else { "submit" }
            disabled=move || loading.get() || disabled.get()
            on:click=move |ev| {
                if let Some(on_click) = on_click {
                    on_click.call(ev);
                }
            }
            class=format!(
                "w-full py-3 {} disabled:bg-gray-600 rounded-lg font-medium transition-colors",
                color
            )
        >
            {move || loading.get().then(|| view! {
                <span class="inline-block loading-spinner w-4 h-4 mr-2" />
            })}
            {children()}
        </button>
    }
}
