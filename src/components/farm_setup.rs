//! Farm Form
//!
//! First-run farm creation on the dashboard, and the edit form for the
//! existing farm when `existing` is given.

use farm_core::domain::{Farm, NewFarm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_auth, use_toast};
use crate::forms::{optional_text, parse_optional_number};

#[component]
pub fn FarmSetup(
    #[prop(optional)] existing: Option<Farm>,
    #[prop(optional, into)] on_saved: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let editing_id = existing.as_ref().map(|f| f.id.clone());
    let is_edit = editing_id.is_some();
    let name = RwSignal::new(existing.as_ref().map(|f| f.name.clone()).unwrap_or_default());
    let location = RwSignal::new(existing.as_ref().and_then(|f| f.location.clone()).unwrap_or_default());
    let size = RwSignal::new(existing.as_ref().and_then(|f| f.size).map(|s| s.to_string()).unwrap_or_default());
    let error = RwSignal::new(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(farm_name) = optional_text(&name.get()) else {
            error.set(Some("Give your farm a name".to_string()));
            return;
        };
        let acres = match parse_optional_number(&size.get()) {
            Ok(acres) => acres,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        let farm = NewFarm {
            name: farm_name,
            location: optional_text(&location.get()),
            size: acres,
        };
        let editing_id = editing_id.clone();
        spawn_local(async move {
            let saved = match editing_id {
                Some(id) => commands::update_farm(&id, &farm).await,
                None => commands::create_farm(&farm).await,
            };
            match saved {
                Ok(saved) if is_edit => {
                    auth.set_farm(saved);
                    toast.success("Farm updated");
                }
                Ok(created) => {
                    auth.set_farm(created);
                    // Pick up whatever the backend linked to the account
                    if let Err(e) = auth.refresh_farm().await {
                        tracing::warn!(error = %e, "farm refresh after creation failed");
                    }
                    toast.success("Farm created");
                }
                Err(e) => {
                    error.set(Some(e));
                    return;
                }
            }
            if let Some(on_saved) = on_saved {
                on_saved.run(());
            }
        });
    };

    view! {
        <section class="card farm-setup">
            {(!is_edit).then(|| view! {
                <h2>"Set up your farm"</h2>
                <p class="muted">"Tell us a little about your farm to start tracking production cycles."</p>
            })}
            <form class="form" on:submit=submit>
                <label class="form-label">
                    "Farm name"
                    <input type="text" class="form-input" required
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev)) />
                </label>
                <div class="form-row">
                    <label class="form-label">
                        "Location"
                        <input type="text" class="form-input"
                            prop:value=move || location.get()
                            on:input=move |ev| location.set(event_target_value(&ev)) />
                    </label>
                    <label class="form-label">
                        "Size (acres)"
                        <input type="number" min="0" class="form-input"
                            prop:value=move || size.get()
                            on:input=move |ev| size.set(event_target_value(&ev)) />
                    </label>
                </div>
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <button type="submit" class="btn btn-primary">{if is_edit { "Save farm" } else { "Create farm" }}</button>
            </form>
        </section>
    }
}
