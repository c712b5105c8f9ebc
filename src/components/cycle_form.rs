//! New Cycle Form Component
//!
//! The expected harvest date is pre-filled from the variety's growth period
//! until the user types their own.

use chrono::Days;
use farm_core::calculator::{forecast_harvest, PotatoVariety};
use farm_core::domain::{CropVariety, NewCycle, ProductionCycle};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser::app_config;
use crate::commands;
use crate::context::use_toast;
use crate::forms::{date_input_value, optional_text, parse_input_date, parse_number, parse_optional_number, today};
use crate::store::AppStateStoreFields;
use crate::store::{store_upsert_cycle, use_app_store};

fn suggested_harvest(variety: Option<&CropVariety>, variety_key: &str, planting: &str) -> Option<String> {
    let planting = parse_input_date(planting)?;
    if let Some(days) = variety.and_then(|v| v.maturity_days) {
        return planting.checked_add_days(Days::new(u64::from(days))).map(date_input_value);
    }
    let name = variety.map(|v| v.name.as_str()).unwrap_or(variety_key);
    let potato = PotatoVariety::from_str(name)?;
    forecast_harvest(planting, potato, &app_config().rate_table())
        .ok()
        .map(|forecast| date_input_value(forecast.harvest_date))
}

#[component]
pub fn CycleForm(#[prop(into)] on_created: Callback<ProductionCycle>) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();

    let variety = RwSignal::new(String::new());
    let land = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let planting = RwSignal::new(date_input_value(today()));
    let harvest = RwSignal::new(String::new());
    let harvest_touched = RwSignal::new(false);
    let expected_yield = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    // Backend varieties when available, otherwise the built-in list
    let options = Memo::new(move |_| {
        let backend = store.crop_varieties().get();
        if backend.is_empty() {
            PotatoVariety::ALL
                .iter()
                .map(|v| (v.as_str().to_string(), v.label().to_string()))
                .collect::<Vec<_>>()
        } else {
            backend.into_iter().map(|v| (v.id, v.name)).collect()
        }
    });

    Effect::new(move |_| {
        if variety.with(String::is_empty) {
            if let Some((first, _)) = options.with(|o| o.first().cloned()) {
                variety.set(first);
            }
        }
    });

    Effect::new(move |_| {
        let key = variety.get();
        let planted = planting.get();
        if harvest_touched.get_untracked() {
            return;
        }
        let backend = store.crop_varieties().get_untracked();
        let selected = backend.iter().find(|v| v.id == key);
        if let Some(date) = suggested_harvest(selected, &key, &planted) {
            harvest.set(date);
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let Some(land_size) = parse_number(&land.get()).filter(|l| *l > 0.0) else {
            error.set(Some("Land size must be greater than zero".to_string()));
            return;
        };
        let Some(planting_date) = parse_input_date(&planting.get()) else {
            error.set(Some("Planting date is required".to_string()));
            return;
        };
        let (yield_bags, price_per_bag) =
            match (parse_optional_number(&expected_yield.get()), parse_optional_number(&price.get())) {
                (Ok(y), Ok(p)) => (y, p),
                (Err(e), _) | (_, Err(e)) => {
                    error.set(Some(e));
                    return;
                }
            };

        let cycle = NewCycle {
            crop_variety: variety.get(),
            land_size,
            location: optional_text(&location.get()),
            planting_date,
            expected_harvest_date: parse_input_date(&harvest.get()),
            expected_yield: yield_bags,
            expected_price_per_bag: price_per_bag,
            notes: optional_text(&notes.get()),
        };

        saving.set(true);
        spawn_local(async move {
            match commands::create_cycle(&cycle).await {
                Ok(created) => {
                    tracing::info!(cycle = %created.id, "cycle created");
                    store_upsert_cycle(&store, created.clone());
                    toast.success("Production cycle created");
                    land.set(String::new());
                    notes.set(String::new());
                    on_created.run(created);
                }
                Err(e) => error.set(Some(e)),
            }
            saving.set(false);
        });
    };

    view! {
        <form class="form cycle-form" on:submit=submit>
            <label class="form-label">
                "Variety"
                <select class="form-select" on:change=move |ev| variety.set(event_target_value(&ev))>
                    {move || options
                        .get()
                        .into_iter()
                        .map(|(value, label)| {
                            let selected = variety.get_untracked() == value;
                            view! { <option value=value selected=selected>{label}</option> }
                        })
                        .collect_view()}
                </select>
            </label>
            <div class="form-row">
                <label class="form-label">
                    "Land size (acres)"
                    <input type="number" min="0" step="0.25" class="form-input" required
                        prop:value=move || land.get()
                        on:input=move |ev| land.set(event_target_value(&ev)) />
                </label>
                <label class="form-label">
                    "Location"
                    <input type="text" class="form-input" placeholder="e.g. Ol Kalou"
                        prop:value=move || location.get()
                        on:input=move |ev| location.set(event_target_value(&ev)) />
                </label>
            </div>
            <div class="form-row">
                <label class="form-label">
                    "Planting date"
                    <input type="date" class="form-input" required
                        prop:value=move || planting.get()
                        on:input=move |ev| planting.set(event_target_value(&ev)) />
                </label>
                <label class="form-label">
                    "Expected harvest"
                    <input type="date" class="form-input"
                        prop:value=move || harvest.get()
                        on:input=move |ev| {
                            harvest_touched.set(true);
                            harvest.set(event_target_value(&ev));
                        } />
                </label>
            </div>
            <div class="form-row">
                <label class="form-label">
                    "Expected yield (bags)"
                    <input type="number" min="0" class="form-input"
                        prop:value=move || expected_yield.get()
                        on:input=move |ev| expected_yield.set(event_target_value(&ev)) />
                </label>
                <label class="form-label">
                    "Expected price per bag (KES)"
                    <input type="number" min="0" class="form-input"
                        prop:value=move || price.get()
                        on:input=move |ev| price.set(event_target_value(&ev)) />
                </label>
            </div>
            <label class="form-label">
                "Notes"
                <textarea class="form-input" rows="2"
                    prop:value=move || notes.get()
                    on:input=move |ev| notes.set(event_target_value(&ev))></textarea>
            </label>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Create cycle" }}
            </button>
        </form>
    }
}
