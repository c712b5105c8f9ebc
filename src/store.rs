//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Lists are
//! fetched wholesale and patched in place after each successful write.

use farm_core::dashboard::{remove_activity, remove_entity, replace_entity, upsert_activity, upsert_entity};
use farm_core::domain::{Activity, Collaborator, CropVariety, ProductionCycle};
use leptos::prelude::*;
use reactive_stores::Store;

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Production cycles of the current farm
    pub cycles: Vec<ProductionCycle>,
    pub collaborators: Vec<Collaborator>,
    /// Reference data for the cycle form
    pub crop_varieties: Vec<CropVariety>,
    /// True once the first cycle fetch completed
    pub cycles_loaded: bool,
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_cycles(store: &AppStore, cycles: Vec<ProductionCycle>) {
    store.cycles().set(cycles);
    store.cycles_loaded().set(true);
}

/// Insert or replace a cycle with the server's copy
pub fn store_upsert_cycle(store: &AppStore, cycle: ProductionCycle) {
    upsert_entity(&mut *store.cycles().write(), cycle);
}

pub fn store_remove_cycle(store: &AppStore, cycle_id: &str) {
    if let Err(e) = remove_entity(&mut *store.cycles().write(), cycle_id) {
        tracing::debug!(error = %e, "cycle already gone from store");
    }
}

/// Patch one activity in place ahead of the server's answer
pub fn store_upsert_activity(store: &AppStore, cycle_id: &str, activity: Activity) {
    if let Err(e) = upsert_activity(&mut *store.cycles().write(), cycle_id, activity) {
        tracing::debug!(error = %e, "cycle missing from store");
    }
}

pub fn store_remove_activity(store: &AppStore, cycle_id: &str, activity_id: &str) {
    if let Err(e) = remove_activity(&mut *store.cycles().write(), cycle_id, activity_id) {
        tracing::debug!(error = %e, "activity already gone from store");
    }
}

pub fn store_add_collaborator(store: &AppStore, collaborator: Collaborator) {
    upsert_entity(&mut *store.collaborators().write(), collaborator);
}

pub fn store_update_collaborator(store: &AppStore, collaborator: Collaborator) {
    if let Err(e) = replace_entity(&mut *store.collaborators().write(), collaborator) {
        tracing::debug!(error = %e, "collaborator missing from store");
    }
}

pub fn store_remove_collaborator(store: &AppStore, collaborator_id: &str) {
    if let Err(e) = remove_entity(&mut *store.collaborators().write(), collaborator_id) {
        tracing::debug!(error = %e, "collaborator already gone from store");
    }
}

/// Forget farm data on logout
pub fn store_reset(store: &AppStore) {
    store.cycles().set(Vec::new());
    store.collaborators().set(Vec::new());
    store.cycles_loaded().set(false);
}
