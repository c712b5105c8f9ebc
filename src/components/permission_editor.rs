//! Permission Editor Component
//!
//! Five checkboxes edited locally; Save sends the full set, Cancel reverts
//! to what was last loaded or saved.

use farm_core::domain::{Collaborator, PermissionFlag};
use farm_core::permissions::PermissionEditor as EditorState;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_toast;
use crate::store::{store_update_collaborator, use_app_store};

#[component]
pub fn PermissionEditor(#[prop(into)] farm_id: String, collaborator: Collaborator) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();
    let farm_id = StoredValue::new(farm_id);
    let collaborator = StoredValue::new(collaborator);
    let editor = RwSignal::new(EditorState::load(collaborator.with_value(|c| c.permissions)));
    let saving = RwSignal::new(false);
    let role = collaborator.with_value(|c| c.role);

    // The list endpoint may carry stale flags
    Effect::new(move |_| {
        let farm = farm_id.get_value();
        let id = collaborator.with_value(|c| c.id.clone());
        spawn_local(async move {
            match commands::get_permissions(&farm, &id).await {
                Ok(permissions) => editor.set(EditorState::load(permissions)),
                Err(e) => tracing::warn!(error = %e, collaborator = %id, "using listed permissions"),
            }
        });
    });

    let save = move |_| {
        let body = editor.get_untracked().save_body();
        let farm = farm_id.get_value();
        let id = collaborator.with_value(|c| c.id.clone());
        saving.set(true);
        spawn_local(async move {
            match commands::update_permissions(&farm, &id, &body).await {
                Ok(saved) => {
                    editor.update(|state| state.mark_saved(saved));
                    let mut updated = collaborator.get_value();
                    updated.permissions = saved;
                    collaborator.set_value(updated.clone());
                    store_update_collaborator(&store, updated);
                    toast.success("Permissions saved");
                }
                Err(e) => toast.error(e),
            }
            saving.set(false);
        });
    };

    view! {
        <div class="permission-editor">
            <ul class="permission-list">
                {PermissionFlag::ALL
                    .into_iter()
                    .map(|flag| view! {
                        <li>
                            <label class="form-check">
                                <input
                                    type="checkbox"
                                    prop:checked=move || editor.with(|state| state.is_granted(flag))
                                    on:change=move |_| editor.update(|state| state.toggle(flag))
                                />
                                {flag.label()}
                            </label>
                        </li>
                    })
                    .collect_view()}
            </ul>
            <div class="permission-actions">
                <button
                    type="button"
                    class="btn btn-primary"
                    disabled=move || saving.get() || !editor.with(EditorState::has_changes)
                    on:click=save
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <button
                    type="button"
                    class="btn btn-secondary"
                    disabled=move || !editor.with(EditorState::has_changes)
                    on:click=move |_| editor.update(EditorState::cancel)
                >
                    "Cancel"
                </button>
                <button
                    type="button"
                    class="btn btn-link"
                    title="Replace the checkboxes with the suggested set for this role"
                    on:click=move |_| editor.update(|state| state.apply_role(role))
                >
                    {format!("Use {} defaults", role.label())}
                </button>
            </div>
        </div>
    }
}
