//! Investment / ROI Calculator Component

use farm_core::calculator::{analyze_investment, format_kes, format_number, PotatoVariety};
use leptos::prelude::*;

use super::VarietySelect;
use crate::browser::app_config;
use crate::forms::parse_number;

#[component]
pub fn InvestmentCalculator() -> impl IntoView {
    let investment = RwSignal::new("100000".to_string());
    let variety = RwSignal::new(PotatoVariety::Shangi);
    let price = RwSignal::new(String::new());

    // Empty price field means "market price"
    let analysis = Memo::new(move |_| {
        let table = app_config().rate_table();
        let variety = variety.get();
        let price = parse_number(&price.get()).unwrap_or_else(|| table.rates(variety).market_price_per_bag);
        let amount = parse_number(&investment.get()).unwrap_or(0.0);
        analyze_investment(amount, variety, price, &table)
    });

    view! {
        <div class="calculator investment-calculator">
            <label class="form-label">
                "Capital to invest (KES)"
                <input
                    type="number"
                    min="0"
                    step="1000"
                    class="form-input"
                    prop:value=move || investment.get()
                    on:input=move |ev| investment.set(event_target_value(&ev))
                />
            </label>
            <label class="form-label">"Variety" <VarietySelect value=variety /></label>
            <label class="form-label">
                "Expected price per bag (KES)"
                <input
                    type="number"
                    min="0"
                    class="form-input"
                    placeholder=move || {
                        let rates = app_config().rate_table().rates(variety.get());
                        format!("Market: {}", format_number(rates.market_price_per_bag, 0))
                    }
                    prop:value=move || price.get()
                    on:input=move |ev| price.set(event_target_value(&ev))
                />
            </label>

            {move || match analysis.get() {
                Ok(result) => {
                    let profit_class = if result.profit < 0.0 { "loss" } else { "profit" };
                    view! {
                        <dl class="calculator-result">
                            <dt>"Acreage covered"</dt>
                            <dd>{format!("{} acres", format_number(result.max_acreage, 2))}</dd>
                            <dt>"Expected yield"</dt>
                            <dd>{format!("{} bags", format_number(result.expected_yield, 0))}</dd>
                            <dt>"Revenue"</dt>
                            <dd>{format_kes(result.revenue)}</dd>
                            <dt>"Profit"</dt>
                            <dd class=profit_class>{format_kes(result.profit)}</dd>
                            <dt>"ROI"</dt>
                            <dd class="result-main">{format!("{}%", format_number(result.roi, 1))}</dd>
                        </dl>
                        <ul class="recommendations">
                            {result
                                .recommendations
                                .iter()
                                .map(|rec| view! { <li>{rec.message()}</li> })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
                Err(e) => view! { <p class="form-error">{e.to_string()}</p> }.into_any(),
            }}
        </div>
    }
}
