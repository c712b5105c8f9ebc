//! Landing Page

use leptos::prelude::*;

use crate::components::{AppLink, CostCalculator};
use crate::context::use_auth;

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <section class="hero">
            <h1>"Grow potatoes with numbers you can trust"</h1>
            <p class="lead">
                "Plan every season, track every shilling and share the work with your family and farm hands."
            </p>
            <div class="hero-actions">
                <Show
                    when=move || auth.is_authenticated()
                    fallback=|| view! {
                        <AppLink href="/auth/register" class="btn btn-primary">"Start for free"</AppLink>
                        <AppLink href="/auth/login" class="btn btn-secondary">"Log in"</AppLink>
                    }
                >
                    <AppLink href="/dashboard" class="btn btn-primary">"Go to dashboard"</AppLink>
                </Show>
            </div>
        </section>

        <section class="features">
            <div class="card feature">
                <h3>"Production cycles"</h3>
                <p>"Record planting, inputs, labour and harvest for every plot."</p>
            </div>
            <div class="card feature">
                <h3>"Calculators"</h3>
                <p>"Estimate costs, harvest dates and the return on your capital before you plant."</p>
            </div>
            <div class="card feature">
                <h3>"Team access"</h3>
                <p>"Invite managers, workers and family with exactly the permissions they need."</p>
            </div>
        </section>

        <section class="card try-it">
            <h2>"What will your next season cost?"</h2>
            <CostCalculator />
            <p class="muted">
                "More tools on the " <AppLink href="/calculators">"calculators page"</AppLink> "."
            </p>
        </section>
    }
}
