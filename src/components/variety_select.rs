//! Potato variety dropdown shared by the calculators

use farm_core::calculator::PotatoVariety;
use leptos::prelude::*;

#[component]
pub fn VarietySelect(value: RwSignal<PotatoVariety>) -> impl IntoView {
    view! {
        <select
            class="form-select"
            on:change=move |ev| {
                if let Some(variety) = PotatoVariety::from_str(&event_target_value(&ev)) {
                    value.set(variety);
                }
            }
        >
            {PotatoVariety::ALL
                .into_iter()
                .map(|variety| {
                    view! {
                        <option
                            value=variety.as_str()
                            selected=move || value.get() == variety
                        >
                            {variety.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
