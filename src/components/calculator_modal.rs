//! Calculator Modal Component
//!
//! Dashboard variant of the calculators: one modal, three tabs.

use leptos::prelude::*;

use super::{CostCalculator, HarvestCalculator, InvestmentCalculator, Modal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorKind {
    Cost,
    Harvest,
    Investment,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 3] = [CalculatorKind::Cost, CalculatorKind::Harvest, CalculatorKind::Investment];

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Cost => "Production cost",
            CalculatorKind::Harvest => "Harvest date",
            CalculatorKind::Investment => "Investment return",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            CalculatorKind::Cost => "What will it cost to plant this plot?",
            CalculatorKind::Harvest => "When will this crop be ready?",
            CalculatorKind::Investment => "How far does my capital go, and what does it return?",
        }
    }
}

#[component]
pub fn CalculatorModal(open: RwSignal<bool>, kind: RwSignal<CalculatorKind>) -> impl IntoView {
    let title = Signal::derive(move || kind.get().title().to_string());

    view! {
        <Modal title=title open=open>
            <div class="tab-bar">
                {CalculatorKind::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <button
                            type="button"
                            class=move || if kind.get() == tab { "tab active" } else { "tab" }
                            on:click=move |_| kind.set(tab)
                        >
                            {tab.title()}
                        </button>
                    })
                    .collect_view()}
            </div>
            {move || match kind.get() {
                CalculatorKind::Cost => view! { <CostCalculator with_server_estimate=true /> }.into_any(),
                CalculatorKind::Harvest => view! { <HarvestCalculator /> }.into_any(),
                CalculatorKind::Investment => view! { <InvestmentCalculator /> }.into_any(),
            }}
        </Modal>
    }
}
