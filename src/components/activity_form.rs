//! Activity Form Component
//!
//! Adds a farm activity to a cycle. The server answers with the whole
//! updated cycle, which replaces the local copy.

use farm_core::domain::{Activity, ActivityStatus, ActivityType, LaborType, ProductionCycle};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_toast;
use crate::forms::{date_input_value, optional_text, parse_input_date, parse_optional_number, today};

const LABOR_TYPES: &[(LaborType, &str)] = &[
    (LaborType::Family, "Family"),
    (LaborType::Hired, "Hired"),
    (LaborType::Contract, "Contract"),
];

#[component]
pub fn ActivityForm(
    #[prop(into)] cycle_id: String,
    #[prop(into)] on_saved: Callback<ProductionCycle>,
) -> impl IntoView {
    let toast = use_toast();
    let cycle_id = StoredValue::new(cycle_id);

    let activity_type = RwSignal::new(ActivityType::LandPreparation);
    let description = RwSignal::new(String::new());
    let date = RwSignal::new(date_input_value(today()));
    let cost = RwSignal::new(String::new());
    let labor_hours = RwSignal::new(String::new());
    let labor_type = RwSignal::new(LaborType::Family);
    let completed = RwSignal::new(false);
    let notes = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let Some(text) = optional_text(&description.get()) else {
            error.set(Some("Describe the activity".to_string()));
            return;
        };
        let (cost_value, hours) = match (parse_optional_number(&cost.get()), parse_optional_number(&labor_hours.get())) {
            (Ok(c), Ok(h)) => (c.unwrap_or(0.0), h),
            (Err(e), _) | (_, Err(e)) => {
                error.set(Some(e));
                return;
            }
        };
        if cost_value < 0.0 {
            error.set(Some("Cost cannot be negative".to_string()));
            return;
        }

        let activity = Activity {
            date: parse_input_date(&date.get()),
            labor_hours: hours,
            labor_type: Some(labor_type.get()),
            status: if completed.get() { ActivityStatus::Completed } else { ActivityStatus::InProgress },
            notes: optional_text(&notes.get()),
            ..Activity::new(activity_type.get(), text, cost_value)
        };

        saving.set(true);
        let cycle_id = cycle_id.get_value();
        spawn_local(async move {
            match commands::add_activity(&cycle_id, &activity).await {
                Ok(cycle) => {
                    toast.success("Activity recorded");
                    description.set(String::new());
                    cost.set(String::new());
                    labor_hours.set(String::new());
                    notes.set(String::new());
                    on_saved.run(cycle);
                }
                Err(e) => error.set(Some(e)),
            }
            saving.set(false);
        });
    };

    view! {
        <form class="form activity-form" on:submit=submit>
            <div class="form-row">
                <label class="form-label">
                    "Activity"
                    <select
                        class="form-select"
                        on:change=move |ev| activity_type.set(ActivityType::from_str(&event_target_value(&ev)))
                    >
                        {ActivityType::ALL
                            .into_iter()
                            .map(|kind| view! {
                                <option value=kind.as_str() selected=move || activity_type.get() == kind>
                                    {kind.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </label>
                <label class="form-label">
                    "Date"
                    <input type="date" class="form-input"
                        prop:value=move || date.get()
                        on:input=move |ev| date.set(event_target_value(&ev)) />
                </label>
            </div>
            <label class="form-label">
                "Description"
                <input type="text" class="form-input" placeholder="e.g. Applied DAP at planting"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev)) />
            </label>
            <div class="form-row">
                <label class="form-label">
                    "Cost (KES)"
                    <input type="number" min="0" class="form-input"
                        prop:value=move || cost.get()
                        on:input=move |ev| cost.set(event_target_value(&ev)) />
                </label>
                <label class="form-label">
                    "Labour hours"
                    <input type="number" min="0" class="form-input"
                        prop:value=move || labor_hours.get()
                        on:input=move |ev| labor_hours.set(event_target_value(&ev)) />
                </label>
                <label class="form-label">
                    "Labour"
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if let Some((kind, _)) = LABOR_TYPES.iter().find(|(_, label)| label.eq_ignore_ascii_case(&value)) {
                                labor_type.set(*kind);
                            }
                        }
                    >
                        {LABOR_TYPES
                            .iter()
                            .map(|&(kind, label)| {
                                view! {
                                    <option value=label selected=move || labor_type.get() == kind>{label}</option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
            </div>
            <label class="form-check">
                <input type="checkbox"
                    prop:checked=move || completed.get()
                    on:change=move |ev| completed.set(event_target_checked(&ev)) />
                "Already completed"
            </label>
            <label class="form-label">
                "Notes"
                <input type="text" class="form-input"
                    prop:value=move || notes.get()
                    on:input=move |ev| notes.set(event_target_value(&ev)) />
            </label>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Add activity" }}
            </button>
        </form>
    }
}
