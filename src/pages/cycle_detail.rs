//! Cycle Detail Page
//!
//! Edit, harvest, archive or delete one cycle and manage its activities.
//! A direct link loads the cycle from the backend when the list is cold.

use farm_core::calculator::{format_kes, format_number};
use farm_core::domain::{CycleStatus, CycleUpdate, ProductionCycle};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::commands;
use crate::components::{ActivityForm, ActivityList, AppLink, DeleteConfirmButton, Modal};
use crate::context::{use_toast, ToastContext};
use crate::forms::{date_input_value, optional_text, parse_input_date, parse_optional_number, today};
use crate::router::use_router;
use crate::store::AppStateStoreFields;
use crate::store::{store_remove_cycle, store_upsert_cycle, use_app_store, AppStore};

/// Send `update` and swap the server's copy into the store
fn save_update(store: AppStore, toast: ToastContext, cycle_id: String, update: CycleUpdate, success: &'static str) {
    if update.is_empty() {
        toast.info("Nothing to save");
        return;
    }
    spawn_local(async move {
        match commands::update_cycle(&cycle_id, &update).await {
            Ok(cycle) => {
                store_upsert_cycle(&store, cycle);
                toast.success(success);
            }
            Err(e) => toast.error(e),
        }
    });
}

async fn read_file(input: &web_sys::HtmlInputElement) -> Option<(String, String, Vec<u8>)> {
    let file = input.files()?.get(0)?;
    let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Some((file.name(), file.type_(), bytes))
}

#[component]
fn EditCycleForm(cycle: ProductionCycle, open: RwSignal<bool>) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();
    let cycle_id = StoredValue::new(cycle.id.clone());
    let land = RwSignal::new(cycle.land_size.to_string());
    let location = RwSignal::new(cycle.location.clone().unwrap_or_default());
    let harvest = RwSignal::new(cycle.expected_harvest_date.map(date_input_value).unwrap_or_default());
    let expected_yield = RwSignal::new(cycle.expected_yield.map(|y| y.to_string()).unwrap_or_default());
    let price = RwSignal::new(cycle.expected_price_per_bag.map(|p| p.to_string()).unwrap_or_default());
    let notes = RwSignal::new(cycle.notes.clone().unwrap_or_default());
    let original = StoredValue::new(cycle);
    let error = RwSignal::new(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let parsed = (
            parse_optional_number(&land.get()),
            parse_optional_number(&expected_yield.get()),
            parse_optional_number(&price.get()),
        );
        let (land_size, yield_bags, price_per_bag) = match parsed {
            (Ok(l), Ok(y), Ok(p)) => (l, y, p),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                error.set(Some(e));
                return;
            }
        };
        if land_size.is_some_and(|l| l <= 0.0) {
            error.set(Some("Land size must be greater than zero".to_string()));
            return;
        }

        // Only fields that changed go over the wire
        let update = original.with_value(|c| CycleUpdate {
            land_size: land_size.filter(|l| *l != c.land_size),
            location: optional_text(&location.get()).filter(|l| c.location.as_ref() != Some(l)),
            expected_harvest_date: parse_input_date(&harvest.get()).filter(|d| c.expected_harvest_date != Some(*d)),
            expected_yield: yield_bags.filter(|y| c.expected_yield != Some(*y)),
            expected_price_per_bag: price_per_bag.filter(|p| c.expected_price_per_bag != Some(*p)),
            notes: optional_text(&notes.get()).filter(|n| c.notes.as_ref() != Some(n)),
            ..CycleUpdate::default()
        });
        error.set(None);
        open.set(false);
        save_update(store, toast, cycle_id.get_value(), update, "Cycle updated");
    };

    let text_input = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="form-label">
                {label}
                <input type=kind class="form-input"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev)) />
            </label>
        }
    };

    view! {
        <form class="form" on:submit=submit>
            <div class="form-row">
                {text_input("Land size (acres)", "number", land)}
                {text_input("Location", "text", location)}
            </div>
            <div class="form-row">
                {text_input("Expected harvest", "date", harvest)}
                {text_input("Expected yield (bags)", "number", expected_yield)}
                {text_input("Price per bag (KES)", "number", price)}
            </div>
            {text_input("Notes", "text", notes)}
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn btn-primary">"Save changes"</button>
        </form>
    }
}

#[component]
fn HarvestForm(cycle_id: String, open: RwSignal<bool>) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();
    let cycle_id = StoredValue::new(cycle_id);
    let date = RwSignal::new(date_input_value(today()));
    let actual_yield = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (yield_bags, price_per_bag) =
            match (parse_optional_number(&actual_yield.get()), parse_optional_number(&price.get())) {
                (Ok(Some(y)), Ok(p)) => (y, p),
                (Ok(None), _) => {
                    error.set(Some("Enter the harvested bags".to_string()));
                    return;
                }
                (Err(e), _) | (_, Err(e)) => {
                    error.set(Some(e));
                    return;
                }
            };
        let update = CycleUpdate {
            status: Some(CycleStatus::Harvested),
            actual_harvest_date: parse_input_date(&date.get()).or(Some(today())),
            actual_yield: Some(yield_bags),
            actual_price_per_bag: price_per_bag,
            ..CycleUpdate::default()
        };
        open.set(false);
        save_update(store, toast, cycle_id.get_value(), update, "Harvest recorded");
    };

    view! {
        <form class="form" on:submit=submit>
            <label class="form-label">
                "Harvest date"
                <input type="date" class="form-input"
                    prop:value=move || date.get()
                    on:input=move |ev| date.set(event_target_value(&ev)) />
            </label>
            <div class="form-row">
                <label class="form-label">
                    "Bags harvested"
                    <input type="number" min="0" class="form-input"
                        prop:value=move || actual_yield.get()
                        on:input=move |ev| actual_yield.set(event_target_value(&ev)) />
                </label>
                <label class="form-label">
                    "Selling price per bag (KES)"
                    <input type="number" min="0" class="form-input"
                        prop:value=move || price.get()
                        on:input=move |ev| price.set(event_target_value(&ev)) />
                </label>
            </div>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn btn-primary">"Record harvest"</button>
        </form>
    }
}

#[component]
pub fn CycleDetailPage(#[prop(into)] id: String) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();
    let router = use_router();
    let id = StoredValue::new(id);

    let cycle = Memo::new(move |_| {
        let wanted = id.get_value();
        store.cycles().with(|cycles| cycles.iter().find(|c| c.id == wanted).cloned())
    });
    let load_error = RwSignal::new(None::<String>);
    let edit_open = RwSignal::new(false);
    let harvest_open = RwSignal::new(false);
    let uploading = RwSignal::new(false);

    Effect::new(move |_| {
        if cycle.with_untracked(Option::is_some) {
            return;
        }
        let wanted = id.get_value();
        spawn_local(async move {
            match commands::get_cycle(&wanted).await {
                Ok(found) => store_upsert_cycle(&store, found),
                Err(e) => load_error.set(Some(e)),
            }
        });
    });

    let activities = Signal::derive(move || cycle.with(|c| c.as_ref().map(|c| c.activities.clone()).unwrap_or_default()));

    let archive = move |_| {
        let update = CycleUpdate {
            status: Some(CycleStatus::Archived),
            ..CycleUpdate::default()
        };
        save_update(store, toast, id.get_value(), update, "Cycle archived");
    };

    let reactivate = move |_| {
        let update = CycleUpdate {
            status: Some(CycleStatus::Active),
            ..CycleUpdate::default()
        };
        save_update(store, toast, id.get_value(), update, "Cycle reactivated");
    };

    let delete = move |_| {
        let cycle_id = id.get_value();
        spawn_local(async move {
            match commands::delete_cycle(&cycle_id).await {
                Ok(()) => {
                    store_remove_cycle(&store, &cycle_id);
                    toast.success("Cycle deleted");
                    router.navigate("/dashboard");
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let upload = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let cycle_id = id.get_value();
        let existing_notes = cycle.with_untracked(|c| c.as_ref().and_then(|c| c.notes.clone()));
        uploading.set(true);
        spawn_local(async move {
            let Some((name, mime, bytes)) = read_file(&input).await else {
                uploading.set(false);
                toast.error("Could not read the selected file");
                return;
            };
            match commands::upload_media(&name, &mime, bytes).await {
                Ok(media) => {
                    let line = format!("Photo: {}", media.url);
                    let notes = match existing_notes {
                        Some(notes) if !notes.is_empty() => format!("{}\n{}", notes, line),
                        _ => line,
                    };
                    let update = CycleUpdate {
                        notes: Some(notes),
                        ..CycleUpdate::default()
                    };
                    save_update(store, toast, cycle_id, update, "Photo attached");
                }
                Err(e) => toast.error(e),
            }
            input.set_value("");
            uploading.set(false);
        });
    };

    view! {
        <AppLink href="/dashboard" class="back-link">"← Back to dashboard"</AppLink>
        {move || match (cycle.get(), load_error.get()) {
            (Some(current), _) => {
                let status = current.status;
                let badge = format!("badge badge-{}", status.as_str());
                let harvest = current
                    .expected_harvest_date
                    .map(|d| d.format("%d %b %Y").to_string())
                    .unwrap_or_else(|| "Not set".to_string());
                let money = |value: Option<f64>| value.map(format_kes).unwrap_or_else(|| "-".to_string());
                let edit_copy = current.clone();
                let cycle_id = current.id.clone();
                let harvest_cycle_id = edit_copy.id.clone();
                view! {
                    <section class="page-header">
                        <div>
                            <h1>{current.variety_name().to_string()}</h1>
                            <span class=badge>{status.label()}</span>
                        </div>
                        <div class="page-actions">
                            <button type="button" class="btn btn-secondary" on:click=move |_| edit_open.set(true)>
                                "Edit"
                            </button>
                            {(status == CycleStatus::Active).then(|| view! {
                                <button type="button" class="btn btn-primary" on:click=move |_| harvest_open.set(true)>
                                    "Record harvest"
                                </button>
                                <button type="button" class="btn btn-secondary" on:click=archive>"Archive"</button>
                            })}
                            {(status == CycleStatus::Archived).then(|| view! {
                                <button type="button" class="btn btn-secondary" on:click=reactivate>"Reactivate"</button>
                            })}
                            <DeleteConfirmButton button_class="btn btn-danger" label="Delete cycle" prompt="Delete this cycle and its activities?" on_confirm=delete />
                        </div>
                    </section>

                    <section class="card cycle-facts">
                        <dl>
                            <dt>"Land"</dt>
                            <dd>{format!("{} acres", format_number(current.land_size, 2))}</dd>
                            <dt>"Location"</dt>
                            <dd>{current.location.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Planted"</dt>
                            <dd>{current.planting_date.format("%d %b %Y").to_string()}</dd>
                            <dt>"Expected harvest"</dt>
                            <dd>{harvest}</dd>
                            <dt>"Recorded costs"</dt>
                            <dd>{format_kes(current.total_cost())}</dd>
                            <dt>"Expected revenue"</dt>
                            <dd>{money(current.expected_revenue())}</dd>
                            <dt>"Actual revenue"</dt>
                            <dd>{money(current.actual_revenue())}</dd>
                            <dt>"Profit"</dt>
                            <dd>{money(current.profit())}</dd>
                        </dl>
                        {current.notes.clone().map(|notes| view! { <p class="notes">{notes}</p> })}
                        <label class="btn btn-link file-upload">
                            {move || if uploading.get() { "Uploading..." } else { "📷 Attach photo" }}
                            <input type="file" accept="image/*" hidden on:change=upload />
                        </label>
                    </section>

                    <section class="card">
                        <h2>"Activities"</h2>
                        <ActivityForm
                            cycle_id=cycle_id.clone()
                            on_saved=move |updated: ProductionCycle| store_upsert_cycle(&store, updated)
                        />
                        <ActivityList cycle_id=cycle_id activities=activities />
                    </section>

                    <Modal title="Edit cycle" open=edit_open>
                        <EditCycleForm cycle=edit_copy.clone() open=edit_open />
                    </Modal>
                    <Modal title="Record harvest" open=harvest_open>
                        <HarvestForm cycle_id=harvest_cycle_id.clone() open=harvest_open />
                    </Modal>
                }
                .into_any()
            }
            (None, Some(error)) => view! { <p class="form-error">{error}</p> }.into_any(),
            (None, None) => view! { <p class="muted">"Loading cycle..."</p> }.into_any(),
        }}
    }
}
