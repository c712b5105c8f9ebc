//! Dashboard Page
//!
//! Summary cards, a filterable cycle list and quick access to the
//! calculators. Without a farm the first-run setup is shown instead.

use farm_core::dashboard::{CycleQuery, CycleSort, DashboardSummary};
use farm_core::domain::CycleStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{CalculatorKind, CalculatorModal, CycleCard, CycleForm, FarmSetup, Modal, SummaryCards};
use crate::context::{use_auth, use_toast};
use crate::forms::today;
use crate::router::use_router;
use crate::store::AppStateStoreFields;
use crate::store::{store_set_cycles, use_app_store};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let store = use_app_store();
    let toast = use_toast();
    let router = use_router();

    let query = RwSignal::new(CycleQuery::default());
    let new_cycle_open = RwSignal::new(false);
    let edit_farm_open = RwSignal::new(false);
    let calculator_open = RwSignal::new(false);
    let calculator_kind = RwSignal::new(CalculatorKind::Cost);

    // Refetch whenever the farm changes
    Effect::new(move |_| {
        let Some(farm_id) = auth.farm_id() else {
            return;
        };
        spawn_local(async move {
            match commands::list_cycles().await {
                Ok(cycles) => {
                    tracing::debug!(farm = %farm_id, count = cycles.len(), "loaded cycles");
                    store_set_cycles(&store, cycles);
                }
                Err(e) => toast.error(e),
            }
        });
    });

    let summary = Memo::new(move |_| store.cycles().with(|cycles| DashboardSummary::from_cycles(cycles, today())));
    let visible = move || store.cycles().with(|cycles| query.with(|q| q.apply(cycles)));

    let on_created = Callback::new(move |cycle: farm_core::domain::ProductionCycle| {
        new_cycle_open.set(false);
        router.navigate(&format!("/dashboard/cycles/{}", cycle.id));
    });

    let open_calculator = move |kind: CalculatorKind| {
        calculator_kind.set(kind);
        calculator_open.set(true);
    };

    view! {
        <Show when=move || auth.farm.with(Option::is_some) fallback=|| view! { <FarmSetup /> }>
            <section class="page-header">
                <div>
                    <h1>{move || auth.farm.get().map(|f| f.name).unwrap_or_default()}</h1>
                    <p class="muted">
                        {move || auth.user.get().map(|u| format!("{} plan", u.subscription.label())).unwrap_or_default()}
                    </p>
                </div>
                <div class="page-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| edit_farm_open.set(true)>
                        "Edit farm"
                    </button>
                    <button type="button" class="btn btn-primary" on:click=move |_| new_cycle_open.set(true)>
                        "+ New cycle"
                    </button>
                </div>
            </section>

            <SummaryCards summary=summary />

            <section class="quick-calculators">
                {CalculatorKind::ALL
                    .into_iter()
                    .map(|kind| view! {
                        <button type="button" class="btn btn-secondary" on:click=move |_| open_calculator(kind)>
                            {kind.title()}
                        </button>
                    })
                    .collect_view()}
            </section>

            <section class="cycle-filters">
                <input
                    type="search"
                    class="form-input"
                    placeholder="Search variety, location or notes"
                    prop:value=move || query.with(|q| q.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.search = value);
                    }
                />
                <select
                    class="form-select"
                    on:change=move |ev| {
                        let status = CycleStatus::from_str(&event_target_value(&ev));
                        query.update(|q| q.status = status);
                    }
                >
                    <option value="">"All statuses"</option>
                    {CycleStatus::ALL
                        .into_iter()
                        .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                        .collect_view()}
                </select>
                <select
                    class="form-select"
                    on:change=move |ev| {
                        if let Some(sort) = CycleSort::from_str(&event_target_value(&ev)) {
                            query.update(|q| q.sort = sort);
                        }
                    }
                >
                    {CycleSort::ALL
                        .into_iter()
                        .map(|sort| view! { <option value=sort.as_str()>{sort.label()}</option> })
                        .collect_view()}
                </select>
                <button
                    type="button"
                    class="btn btn-link"
                    on:click=move |_| query.update(|q| q.descending = !q.descending)
                >
                    {move || if query.with(|q| q.descending) { "↓ Descending" } else { "↑ Ascending" }}
                </button>
            </section>

            <Show
                when=move || store.cycles_loaded().get()
                fallback=|| view! { <p class="muted">"Loading cycles..."</p> }
            >
                <Show
                    when=move || store.cycles().with(|c| !c.is_empty())
                    fallback=|| view! { <p class="empty">"No production cycles yet. Start your first one!"</p> }
                >
                    <div class="cycle-grid">
                        <For
                            each=visible
                            key=|cycle| format!("{}:{:?}:{}", cycle.id, cycle.status, cycle.activities.len())
                            children=|cycle| view! { <CycleCard cycle=cycle /> }
                        />
                    </div>
                </Show>
            </Show>

            <Modal title="New production cycle" open=new_cycle_open>
                <CycleForm on_created=on_created />
            </Modal>
            <Modal title="Edit farm" open=edit_farm_open>
                <FarmSetup
                    existing=auth.farm.get_untracked().unwrap_or_default()
                    on_saved=move |_| edit_farm_open.set(false)
                />
            </Modal>
            <CalculatorModal open=calculator_open kind=calculator_kind />
        </Show>
    }
}
