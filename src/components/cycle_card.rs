//! Cycle Card Component

use farm_core::calculator::{format_kes, format_number};
use farm_core::domain::ProductionCycle;
use leptos::prelude::*;

use super::AppLink;

#[component]
pub fn CycleCard(cycle: ProductionCycle) -> impl IntoView {
    let href = format!("/dashboard/cycles/{}", cycle.id);
    let status_class = format!("badge badge-{}", cycle.status.as_str());
    let harvest = cycle
        .expected_harvest_date
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "Not set".to_string());
    let progress = format!("{}/{} activities done", cycle.completed_activities(), cycle.activities.len());

    let variety_name = cycle.variety_name().to_string();
    let location = cycle.location.clone();

    view! {
        <article class="card cycle-card">
            <header>
                <h3><AppLink href=href>{variety_name}</AppLink></h3>
                <span class=status_class>{cycle.status.label()}</span>
            </header>
            <dl>
                <dt>"Land"</dt>
                <dd>{format!("{} acres", format_number(cycle.land_size, 2))}</dd>
                <dt>"Planted"</dt>
                <dd>{cycle.planting_date.format("%d %b %Y").to_string()}</dd>
                <dt>"Harvest"</dt>
                <dd>{harvest}</dd>
                <dt>"Costs"</dt>
                <dd>{format_kes(cycle.total_cost())}</dd>
            </dl>
            {location.map(|location| view! { <p class="muted">"📍 " {location}</p> })}
            <footer class="muted">{progress}</footer>
        </article>
    }
}
