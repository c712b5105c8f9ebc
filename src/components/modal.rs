//! Modal Component

use leptos::prelude::*;

/// Overlay dialog; clicking the backdrop or × closes it
#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    open: RwSignal<bool>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| open.set(false)>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <header class="modal-header">
                        <h2>{move || title.get()}</h2>
                        <button type="button" class="modal-close" on:click=move |_| open.set(false)>
                            "×"
                        </button>
                    </header>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
