//! Admin Page
//!
//! Overview for admin accounts. Other users get a polite refusal; the
//! backend enforces the real check.

use farm_core::calculator::format_number;
use leptos::prelude::*;

use crate::components::AppLink;
use crate::context::use_auth;
use crate::store::AppStateStoreFields;
use crate::store::use_app_store;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    let store = use_app_store();
    let log_lines = RwSignal::new(rolling_logger::recent_lines());

    view! {
        <Show
            when=move || auth.is_admin()
            fallback=|| view! {
                <section class="card">
                    <h1>"Admins only"</h1>
                    <p class="muted">"Your account does not have access to this page."</p>
                    <AppLink href="/dashboard">"Back to dashboard"</AppLink>
                </section>
            }
        >
            <section class="page-header">
                <h1>"Administration"</h1>
                <p class="muted">
                    {move || auth.user.get().map(|u| format!("Signed in as {}", u.display_name())).unwrap_or_default()}
                </p>
            </section>
            <div class="summary-cards">
                <div class="card stat">
                    <span class="stat-label">"Crop varieties"</span>
                    <span class="stat-value">{move || store.crop_varieties().with(Vec::len)}</span>
                </div>
                <div class="card stat">
                    <span class="stat-label">"Cycles on your farm"</span>
                    <span class="stat-value">{move || store.cycles().with(Vec::len)}</span>
                </div>
                <div class="card stat">
                    <span class="stat-label">"Acres tracked"</span>
                    <span class="stat-value">
                        {move || format_number(store.cycles().with(|c| c.iter().map(|c| c.land_size).sum::<f64>()), 2)}
                    </span>
                </div>
            </div>
            <section class="card">
                <h2>"Crop varieties"</h2>
                <table class="table">
                    <thead>
                        <tr><th>"Name"</th><th>"Maturity"</th><th>"Cost / acre"</th><th>"Yield / acre"</th></tr>
                    </thead>
                    <tbody>
                        {move || store.crop_varieties().get().into_iter().map(|v| {
                            let maturity = v.maturity_days.map(|d| format!("{} days", d)).unwrap_or_else(|| "-".to_string());
                            view! {
                                <tr>
                                    <td>{v.name.clone()}</td>
                                    <td>{maturity}</td>
                                    <td>{format_number(v.total_cost_per_acre(), 0)}</td>
                                    <td>{format_number(v.expected_yield_per_acre, 0)}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </section>
            <section class="card">
                <div class="page-header">
                    <h2>"Recent log"</h2>
                    <button class="btn btn-secondary" on:click=move |_| log_lines.set(rolling_logger::recent_lines())>
                        "Refresh"
                    </button>
                </div>
                <pre class="log-lines">{move || log_lines.get().join("\n")}</pre>
            </section>
        </Show>
    }
}
