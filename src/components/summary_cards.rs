//! Dashboard summary cards and upcoming harvests

use farm_core::calculator::{format_kes, format_number};
use farm_core::dashboard::DashboardSummary;
use leptos::prelude::*;

use super::AppLink;

#[component]
pub fn SummaryCards(#[prop(into)] summary: Signal<DashboardSummary>) -> impl IntoView {
    view! {
        <section class="summary-cards">
            <div class="card stat">
                <span class="stat-label">"Active cycles"</span>
                <span class="stat-value">{move || summary.with(|s| s.active)}</span>
                <span class="stat-sub">
                    {move || summary.with(|s| format!("{} harvested, {} archived", s.harvested, s.archived))}
                </span>
            </div>
            <div class="card stat">
                <span class="stat-label">"Acres under crop"</span>
                <span class="stat-value">{move || summary.with(|s| format_number(s.active_acres, 2))}</span>
            </div>
            <div class="card stat">
                <span class="stat-label">"Recorded costs"</span>
                <span class="stat-value">{move || summary.with(|s| format_kes(s.total_cost))}</span>
            </div>
            <div class="card stat">
                <span class="stat-label">"Expected revenue"</span>
                <span class="stat-value">{move || summary.with(|s| format_kes(s.expected_revenue))}</span>
            </div>
        </section>

        <section class="card upcoming">
            <h3>"Upcoming harvests"</h3>
            <Show
                when=move || summary.with(|s| !s.upcoming_harvests.is_empty())
                fallback=|| view! { <p class="muted">"Nothing due in the next 30 days."</p> }
            >
                <ul>
                    {move || {
                        summary
                            .with(|s| s.upcoming_harvests.clone())
                            .into_iter()
                            .map(|harvest| {
                                let href = format!("/dashboard/cycles/{}", harvest.cycle_id);
                                let label = format!(
                                    "{} · {} ({} days)",
                                    harvest.variety,
                                    harvest.date.format("%d %b"),
                                    harvest.days_remaining,
                                );
                                view! { <li><AppLink href=href>{label}</AppLink></li> }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </section>
    }
}
