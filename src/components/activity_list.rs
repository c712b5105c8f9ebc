//! Activity List Component

use farm_core::calculator::format_kes;
use farm_core::domain::{Activity, ActivityStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::DeleteConfirmButton;
use crate::commands;
use crate::context::use_toast;
use crate::store::{store_remove_activity, store_upsert_activity, store_upsert_cycle, use_app_store};

#[component]
fn ActivityRow(cycle_id: StoredValue<String>, activity: Activity) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();
    let activity_id = activity.id.clone();
    let completed = activity.status == ActivityStatus::Completed;
    let when = activity
        .date
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_default();

    let toggle_done = {
        let activity = activity.clone();
        move |_| {
            let original = activity.clone();
            let mut updated = activity.clone();
            updated.status = if completed { ActivityStatus::InProgress } else { ActivityStatus::Completed };
            let cycle_id = cycle_id.get_value();
            store_upsert_activity(&store, &cycle_id, updated.clone());
            spawn_local(async move {
                match commands::update_activity(&cycle_id, &updated).await {
                    Ok(cycle) => store_upsert_cycle(&store, cycle),
                    Err(e) => {
                        store_upsert_activity(&store, &cycle_id, original);
                        toast.error(e);
                    }
                }
            });
        }
    };

    let delete = move |_| {
        let cycle_id = cycle_id.get_value();
        let activity_id = activity_id.clone();
        spawn_local(async move {
            match commands::delete_activity(&cycle_id, &activity_id).await {
                Ok(()) => {
                    store_remove_activity(&store, &cycle_id, &activity_id);
                    toast.success("Activity deleted");
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let row_class = if completed { "activity done" } else { "activity" };

    view! {
        <li class=row_class>
            <input type="checkbox" prop:checked=completed on:change=toggle_done />
            <div class="activity-main">
                <span class="activity-type">{activity.activity_type.label()}</span>
                <span class="activity-desc">{activity.description.clone()}</span>
                <span class="muted">{when}</span>
            </div>
            <span class="activity-cost">{format_kes(activity.cost)}</span>
            <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
        </li>
    }
}

#[component]
pub fn ActivityList(
    #[prop(into)] cycle_id: String,
    #[prop(into)] activities: Signal<Vec<Activity>>,
) -> impl IntoView {
    let cycle_id = StoredValue::new(cycle_id);

    // Newest first, undated last
    let sorted = move || {
        let mut list = activities.get();
        list.sort_by_key(|a| std::cmp::Reverse(a.date));
        list
    };

    view! {
        <Show
            when=move || activities.with(|list| !list.is_empty())
            fallback=|| view! { <p class="muted">"No activities recorded yet."</p> }
        >
            <ul class="activity-list">
                <For
                    each=sorted
                    key=|a| (a.id.clone(), a.status == ActivityStatus::Completed, a.cost.to_bits())
                    children=move |activity| view! { <ActivityRow cycle_id=cycle_id activity=activity /> }
                />
            </ul>
        </Show>
    }
}
