//! Delete Confirm Button
//!
//! Two-step destructive action: the first click arms the button, the second
//! runs `on_confirm`. Used for cycles, activities and collaborators.

use leptos::prelude::*;

/// Inline two-step delete.
///
/// * `button_class` - class of the unarmed button
/// * `label` - unarmed text, defaults to "×"
/// * `prompt` - text shown while armed, defaults to "Delete?"
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] prompt: Option<String>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let label = StoredValue::new(label.unwrap_or_else(|| "×".to_string()));
    let prompt = StoredValue::new(prompt.unwrap_or_else(|| "Delete?".to_string()));
    let button_class = StoredValue::new(button_class);

    let set_armed = move |ev: leptos::ev::MouseEvent, value: bool| {
        ev.stop_propagation();
        armed.set(value);
    };

    move || {
        if armed.get() {
            view! {
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{prompt.get_value()}</span>
                    <button
                        type="button"
                        class="confirm-btn"
                        title="Confirm"
                        on:click=move |ev| {
                            set_armed(ev, false);
                            on_confirm.run(());
                        }
                    >
                        "✓"
                    </button>
                    <button type="button" class="cancel-btn" title="Keep" on:click=move |ev| set_armed(ev, false)>
                        "✗"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button type="button" class=button_class.get_value() on:click=move |ev| set_armed(ev, true)>
                    {label.get_value()}
                </button>
            }
            .into_any()
        }
    }
}
