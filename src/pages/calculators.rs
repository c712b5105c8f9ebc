//! Calculator Pages
//!
//! Public page renders the calculators inline; the dashboard page opens
//! them in a modal.

use leptos::prelude::*;

use crate::components::{CalculatorKind, CalculatorModal, CostCalculator, HarvestCalculator, InvestmentCalculator};

#[component]
pub fn PublicCalculatorsPage() -> impl IntoView {
    view! {
        <section class="page-header">
            <h1>"Farm calculators"</h1>
            <p class="muted">"Figures use typical rates for Kenyan highland potato farming."</p>
        </section>
        <div class="calculator-grid">
            <section class="card">
                <h2>{CalculatorKind::Cost.title()}</h2>
                <CostCalculator />
            </section>
            <section class="card">
                <h2>{CalculatorKind::Harvest.title()}</h2>
                <HarvestCalculator />
            </section>
            <section class="card">
                <h2>{CalculatorKind::Investment.title()}</h2>
                <InvestmentCalculator />
            </section>
        </div>
    }
}

#[component]
pub fn DashboardCalculatorsPage() -> impl IntoView {
    let open = RwSignal::new(false);
    let kind = RwSignal::new(CalculatorKind::Cost);

    view! {
        <section class="page-header">
            <h1>"Calculators"</h1>
        </section>
        <div class="calculator-grid">
            {CalculatorKind::ALL
                .into_iter()
                .map(|calculator| view! {
                    <button
                        type="button"
                        class="card calculator-tile"
                        on:click=move |_| {
                            kind.set(calculator);
                            open.set(true);
                        }
                    >
                        <h3>{calculator.title()}</h3>
                        <p class="muted">{calculator.blurb()}</p>
                    </button>
                })
                .collect_view()}
        </div>
        <CalculatorModal open=open kind=kind />
    }
}
