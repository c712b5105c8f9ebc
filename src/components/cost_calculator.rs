//! Cost Calculator Component
//!
//! Local estimate from the rate table; on the dashboard the user can also
//! ask the backend for its estimate of the same plot.

use farm_core::api::CostEstimateRequest;
use farm_core::calculator::{estimate_cost, format_kes, format_number, PotatoVariety, SeedSize};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::VarietySelect;
use crate::browser::app_config;
use crate::commands;
use crate::context::use_toast;
use crate::forms::parse_number;
use crate::store::AppStateStoreFields;
use crate::store::use_app_store;

#[component]
pub fn CostCalculator(#[prop(optional)] with_server_estimate: bool) -> impl IntoView {
    let toast = use_toast();
    let store = use_app_store();

    let land = RwSignal::new("1".to_string());
    let variety = RwSignal::new(PotatoVariety::Shangi);
    let seed_size = RwSignal::new(SeedSize::One);
    let server_total = RwSignal::new(None::<f64>);

    let estimate = Memo::new(move |_| {
        let land_size = parse_number(&land.get()).unwrap_or(-1.0);
        estimate_cost(land_size, variety.get(), seed_size.get(), &app_config().rate_table())
    });

    // A stale server figure is worse than none
    Effect::new(move |_| {
        let _ = (land.get(), variety.get(), seed_size.get());
        server_total.set(None);
    });

    let ask_server = move |_| {
        let Ok(local) = estimate.get_untracked() else {
            toast.error("Enter a valid land size first");
            return;
        };
        let name = variety.get_untracked().label().to_lowercase();
        let backend_variety = store
            .crop_varieties()
            .get_untracked()
            .into_iter()
            .find(|v| v.name.to_lowercase() == name);
        let Some(backend_variety) = backend_variety else {
            toast.info("The server has no estimate for this variety yet");
            return;
        };
        let request = CostEstimateRequest {
            crop_variety_id: backend_variety.id,
            land_size: local.land_size,
            seed_size: seed_size.get_untracked(),
        };
        spawn_local(async move {
            match commands::estimate_cost(&request).await {
                Ok(remote) => server_total.set(Some(remote.total_cost)),
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <div class="calculator cost-calculator">
            <label class="form-label">
                "Land size (acres)"
                <input
                    type="number"
                    min="0"
                    step="0.25"
                    class="form-input"
                    prop:value=move || land.get()
                    on:input=move |ev| land.set(event_target_value(&ev))
                />
            </label>
            <label class="form-label">"Variety" <VarietySelect value=variety /></label>
            <label class="form-label">
                "Seed size"
                <select
                    class="form-select"
                    on:change=move |ev| {
                        let grade = event_target_value(&ev).parse::<u8>().unwrap_or(1);
                        seed_size.set(SeedSize::from_grade(grade).unwrap_or_default());
                    }
                >
                    <option value="1" selected=move || seed_size.get() == SeedSize::One>"Size 1"</option>
                    <option value="2" selected=move || seed_size.get() == SeedSize::Two>"Size 2"</option>
                </select>
            </label>

            {move || match estimate.get() {
                Ok(result) => view! {
                    <dl class="calculator-result">
                        <dt>"Total production cost"</dt>
                        <dd class="result-main">{format_kes(result.total_cost)}</dd>
                        <dt>"Cost per acre"</dt>
                        <dd>{format_kes(result.cost_per_acre)}</dd>
                        <dt>"Seed bags needed"</dt>
                        <dd>{format_number(result.seed_bags, 1)}</dd>
                        <dt>"Seed cost"</dt>
                        <dd>{format_kes(result.seed_cost)}</dd>
                    </dl>
                }
                .into_any(),
                Err(e) => view! { <p class="form-error">{e.to_string()}</p> }.into_any(),
            }}

            {with_server_estimate.then(|| view! {
                <button type="button" class="btn btn-secondary" on:click=ask_server>
                    "Compare with server estimate"
                </button>
                {move || server_total.get().map(|total| view! {
                    <p class="server-estimate">"Server estimate: " {format_kes(total)}</p>
                })}
            })}
        </div>
    }
}
