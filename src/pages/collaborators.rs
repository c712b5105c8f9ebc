//! Collaborators Page
//!
//! Invite people to the farm, tune their permissions and remove them.
//! Removal drops the row immediately and puts it back if the call fails.

use farm_core::api::InviteCollaborator;
use farm_core::domain::{Collaborator, CollaboratorRole, PermissionFlag};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{DeleteConfirmButton, PermissionEditor};
use crate::context::{use_auth, use_toast};
use crate::forms::optional_text;
use crate::store::AppStateStoreFields;
use crate::store::{store_add_collaborator, store_remove_collaborator, use_app_store};

#[component]
fn InviteForm(farm_id: String) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();
    let farm_id = StoredValue::new(farm_id);

    let identifier = RwSignal::new(String::new());
    let role = RwSignal::new(CollaboratorRole::Worker);
    let error = RwSignal::new(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(who) = optional_text(&identifier.get()) else {
            error.set(Some("Enter an email address or phone number".to_string()));
            return;
        };
        error.set(None);
        let invite = InviteCollaborator::with_role(who, role.get());
        let farm = farm_id.get_value();
        spawn_local(async move {
            match commands::invite_collaborator(&farm, &invite).await {
                Ok(collaborator) => {
                    store_add_collaborator(&store, collaborator);
                    identifier.set(String::new());
                    toast.success("Invitation sent");
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let suggested = move || {
        let permissions = role.get().default_permissions();
        let granted: Vec<&str> = PermissionFlag::ALL
            .into_iter()
            .filter(|flag| permissions.get(*flag))
            .map(|flag| flag.label())
            .collect();
        if granted.is_empty() {
            "Read-only access".to_string()
        } else {
            format!("Can: {}", granted.join(", "))
        }
    };

    view! {
        <form class="form invite-form" on:submit=submit>
            <div class="form-row">
                <label class="form-label">
                    "Email or phone"
                    <input type="text" class="form-input"
                        prop:value=move || identifier.get()
                        on:input=move |ev| identifier.set(event_target_value(&ev)) />
                </label>
                <label class="form-label">
                    "Role"
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            if let Some(selected) = CollaboratorRole::from_str(&event_target_value(&ev)) {
                                role.set(selected);
                            }
                        }
                    >
                        {CollaboratorRole::ALL
                            .into_iter()
                            .map(|r| view! {
                                <option value=r.as_str() selected=move || role.get() == r>{r.label()}</option>
                            })
                            .collect_view()}
                    </select>
                </label>
            </div>
            <p class="muted">{suggested}</p>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn btn-primary">"Send invitation"</button>
        </form>
    }
}

/// Rows are keyed by id only so a permission save keeps the editor open
fn row_key(collaborator: &Collaborator) -> String {
    collaborator.id.clone()
}

/// "N of 5 permissions" for the collaborator with `id`, as currently stored
fn permission_summary(collaborators: &[Collaborator], id: &str) -> String {
    let granted = collaborators
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.permissions.granted_count())
        .unwrap_or_default();
    format!("{} of {} permissions", granted, PermissionFlag::ALL.len())
}

#[component]
fn CollaboratorRow(farm_id: StoredValue<String>, collaborator: Collaborator) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();
    let expanded = RwSignal::new(false);
    let stored = StoredValue::new(collaborator.clone());
    let summary = move || {
        let id = stored.with_value(|c| c.id.clone());
        store.collaborators().with(|list| permission_summary(list, &id))
    };

    let remove = move |_| {
        let removed = stored.get_value();
        let farm = farm_id.get_value();
        store_remove_collaborator(&store, &removed.id);
        spawn_local(async move {
            match commands::remove_collaborator(&farm, &removed.id).await {
                Ok(()) => toast.success(format!("{} removed", removed.user.display_name())),
                Err(e) => {
                    store_add_collaborator(&store, removed);
                    toast.error(e);
                }
            }
        });
    };

    view! {
        <li class="card collaborator-row">
            <div class="collaborator-main">
                <div>
                    <strong>{collaborator.user.display_name()}</strong>
                    <span class="badge">{collaborator.role.label()}</span>
                </div>
                <span class="muted">{summary}</span>
                <div class="row-actions">
                    <button type="button" class="btn btn-link" on:click=move |_| expanded.update(|e| *e = !*e)>
                        {move || if expanded.get() { "Close" } else { "Permissions" }}
                    </button>
                    <DeleteConfirmButton button_class="btn btn-link danger" label="Remove" prompt="Remove access?" on_confirm=remove />
                </div>
            </div>
            <Show when=move || expanded.get()>
                <PermissionEditor farm_id=farm_id.get_value() collaborator=stored.get_value() />
            </Show>
        </li>
    }
}

#[component]
pub fn CollaboratorsPage() -> impl IntoView {
    let auth = use_auth();
    let store = use_app_store();
    let toast = use_toast();
    let loading = RwSignal::new(true);

    Effect::new(move |_| {
        let Some(farm_id) = auth.farm_id() else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            match commands::list_collaborators(&farm_id).await {
                Ok(list) => store.collaborators().set(list),
                Err(e) => toast.error(e),
            }
            loading.set(false);
        });
    });

    view! {
        <section class="page-header">
            <h1>"Team"</h1>
            <p class="muted">"People who help run your farm and what they are allowed to do."</p>
        </section>
        {move || match auth.farm_id() {
            None => view! { <p class="muted">"Create your farm on the dashboard first."</p> }.into_any(),
            Some(farm_id) => {
                let farm = StoredValue::new(farm_id.clone());
                view! {
                    <section class="card">
                        <h2>"Invite someone"</h2>
                        <InviteForm farm_id=farm_id />
                    </section>
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! { <p class="muted">"Loading team..."</p> }
                    >
                        <Show
                            when=move || store.collaborators().with(|c| !c.is_empty())
                            fallback=|| view! { <p class="empty">"No collaborators yet."</p> }
                        >
                            <ul class="collaborator-list">
                                <For
                                    each=move || store.collaborators().get()
                                    key=row_key
                                    children=move |collaborator| view! {
                                        <CollaboratorRow farm_id=farm collaborator=collaborator />
                                    }
                                />
                            </ul>
                        </Show>
                    </Show>
                }
                .into_any()
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collaborator(id: &str) -> Collaborator {
        Collaborator {
            id: id.to_string(),
            ..Collaborator::default()
        }
    }

    #[test]
    fn test_row_key_ignores_permission_changes() {
        let before = collaborator("c1");
        let mut after = before.clone();
        after.permissions.set(PermissionFlag::ViewFinancials, true);
        after.role = CollaboratorRole::Manager;
        assert_eq!(row_key(&before), row_key(&after));
        assert_ne!(row_key(&before), row_key(&collaborator("c2")));
    }

    #[test]
    fn test_permission_summary_reads_stored_flags() {
        let mut saved = collaborator("c1");
        saved.permissions = CollaboratorRole::FamilyMember.default_permissions();
        let list = vec![collaborator("c0"), saved];
        assert_eq!(permission_summary(&list, "c1"), "3 of 5 permissions");
        assert_eq!(permission_summary(&list, "c0"), "0 of 5 permissions");
        assert_eq!(permission_summary(&list, "gone"), "0 of 5 permissions");
    }
}
