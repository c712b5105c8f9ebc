//! Harvest Date Calculator Component

use farm_core::calculator::{forecast_harvest, PotatoVariety};
use leptos::prelude::*;

use super::VarietySelect;
use crate::browser::app_config;
use crate::forms::{date_input_value, parse_input_date, today};

#[component]
pub fn HarvestCalculator() -> impl IntoView {
    let planting = RwSignal::new(date_input_value(today()));
    let variety = RwSignal::new(PotatoVariety::Shangi);

    let forecast = Memo::new(move |_| {
        let date = parse_input_date(&planting.get())?;
        forecast_harvest(date, variety.get(), &app_config().rate_table()).ok()
    });

    view! {
        <div class="calculator harvest-calculator">
            <label class="form-label">
                "Planting date"
                <input
                    type="date"
                    class="form-input"
                    prop:value=move || planting.get()
                    on:input=move |ev| planting.set(event_target_value(&ev))
                />
            </label>
            <label class="form-label">"Variety" <VarietySelect value=variety /></label>

            {move || match forecast.get() {
                Some(result) => {
                    let remaining = result.days_remaining(today());
                    view! {
                        <dl class="calculator-result">
                            <dt>"Expected harvest"</dt>
                            <dd class="result-main">{result.harvest_date.format("%d %b %Y").to_string()}</dd>
                            <dt>"Growth period"</dt>
                            <dd>{format!("{} days", result.growth_days)}</dd>
                            <dt>"Days remaining"</dt>
                            <dd>
                                {if remaining >= 0 {
                                    format!("{} days", remaining)
                                } else {
                                    "Ready for harvest".to_string()
                                }}
                            </dd>
                        </dl>
                    }
                    .into_any()
                }
                None => view! { <p class="form-error">"Pick a planting date"</p> }.into_any(),
            }}
        </div>
    }
}
