//! Backend Command Wrappers
//!
//! Each call builds a client carrying the stored token and flattens the
//! error into the message shown to the user.

use farm_core::api::{
    ApiClient, CostEstimateRequest, InviteCollaborator, RemoteCostEstimate, UploadedMedia,
};
use farm_core::domain::{
    Activity, Collaborator, CropVariety, CycleUpdate, Farm, NewCycle, NewFarm, Permissions, ProductionCycle,
};
use farm_core::session::TokenStore;
use farm_core::ApiError;

use crate::browser::{app_config, BrowserTokenStore};

fn client() -> ApiClient {
    let config = app_config();
    let client = ApiClient::from_config(config);
    match BrowserTokenStore::from_config(config).load() {
        Some(token) => client.with_token(token),
        None => client,
    }
}

/// Unauthenticated client for the session manager
pub fn auth_client() -> ApiClient {
    ApiClient::from_config(app_config())
}

fn message(e: ApiError) -> String {
    tracing::warn!(error = %e, "api call failed");
    e.to_string()
}

// ========================
// Farms
// ========================

pub async fn create_farm(farm: &NewFarm) -> Result<Farm, String> {
    client().create_farm(farm).await.map_err(message)
}

pub async fn update_farm(farm_id: &str, farm: &NewFarm) -> Result<Farm, String> {
    client().update_farm(farm_id, farm).await.map_err(message)
}

// ========================
// Cycles & Activities
// ========================

pub async fn list_cycles() -> Result<Vec<ProductionCycle>, String> {
    client().list_cycles().await.map_err(message)
}

pub async fn get_cycle(cycle_id: &str) -> Result<ProductionCycle, String> {
    client().get_cycle(cycle_id).await.map_err(message)
}

pub async fn create_cycle(cycle: &NewCycle) -> Result<ProductionCycle, String> {
    client().create_cycle(cycle).await.map_err(message)
}

pub async fn update_cycle(cycle_id: &str, update: &CycleUpdate) -> Result<ProductionCycle, String> {
    client().update_cycle(cycle_id, update).await.map_err(message)
}

pub async fn delete_cycle(cycle_id: &str) -> Result<(), String> {
    client().delete_cycle(cycle_id).await.map_err(message)
}

pub async fn add_activity(cycle_id: &str, activity: &Activity) -> Result<ProductionCycle, String> {
    client().add_activity(cycle_id, activity).await.map_err(message)
}

pub async fn update_activity(cycle_id: &str, activity: &Activity) -> Result<ProductionCycle, String> {
    client().update_activity(cycle_id, activity).await.map_err(message)
}

pub async fn delete_activity(cycle_id: &str, activity_id: &str) -> Result<(), String> {
    client().delete_activity(cycle_id, activity_id).await.map_err(message)
}

pub async fn list_crop_varieties() -> Result<Vec<CropVariety>, String> {
    client().list_crop_varieties().await.map_err(message)
}

// ========================
// Collaborators
// ========================

pub async fn list_collaborators(farm_id: &str) -> Result<Vec<Collaborator>, String> {
    client().list_collaborators(farm_id).await.map_err(message)
}

pub async fn invite_collaborator(farm_id: &str, invite: &InviteCollaborator) -> Result<Collaborator, String> {
    client().invite_collaborator(farm_id, invite).await.map_err(message)
}

pub async fn remove_collaborator(farm_id: &str, collaborator_id: &str) -> Result<(), String> {
    client().remove_collaborator(farm_id, collaborator_id).await.map_err(message)
}

pub async fn get_permissions(farm_id: &str, collaborator_id: &str) -> Result<Permissions, String> {
    client().get_permissions(farm_id, collaborator_id).await.map_err(message)
}

pub async fn update_permissions(
    farm_id: &str,
    collaborator_id: &str,
    permissions: &Permissions,
) -> Result<Permissions, String> {
    client()
        .update_permissions(farm_id, collaborator_id, permissions)
        .await
        .map_err(message)
}

// ========================
// Misc
// ========================

pub async fn forgot_password(email: &str) -> Result<(), String> {
    auth_client().forgot_password(email).await.map_err(message)
}

pub async fn estimate_cost(request: &CostEstimateRequest) -> Result<RemoteCostEstimate, String> {
    client().estimate_cost(request).await.map_err(message)
}

pub async fn upload_media(file_name: &str, mime: &str, bytes: Vec<u8>) -> Result<UploadedMedia, String> {
    client().upload_media(file_name, mime, bytes).await.map_err(message)
}
