//! Collaborator Endpoints

use serde::Serialize;
use serde_json::Value;

use super::client::{segment, ApiClient};
use super::error::{ApiError, ApiResult};
use crate::domain::{Collaborator, CollaboratorRole, Permissions};

/// Payload for inviting a collaborator by email or phone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteCollaborator {
    pub identifier: String,
    pub role: CollaboratorRole,
    pub permissions: Permissions,
}

impl InviteCollaborator {
    /// Invite with the role's suggested permissions
    pub fn with_role(identifier: impl Into<String>, role: CollaboratorRole) -> Self {
        Self {
            identifier: identifier.into(),
            role,
            permissions: role.default_permissions(),
        }
    }
}

impl ApiClient {
    pub async fn list_collaborators(&self, farm_id: &str) -> ApiResult<Vec<Collaborator>> {
        self.get(&format!("/farms/{}/collaborators", segment(farm_id))).await
    }

    pub async fn invite_collaborator(&self, farm_id: &str, invite: &InviteCollaborator) -> ApiResult<Collaborator> {
        self.post(&format!("/farms/{}/collaborators", segment(farm_id)), invite).await
    }

    pub async fn remove_collaborator(&self, farm_id: &str, collaborator_id: &str) -> ApiResult<()> {
        self.delete(&format!("/farms/{}/collaborators/{}", segment(farm_id), segment(collaborator_id))).await
    }

    pub async fn get_permissions(&self, farm_id: &str, collaborator_id: &str) -> ApiResult<Permissions> {
        let value: Value = self
            .get(&format!("/farms/{}/collaborators/{}/permissions", segment(farm_id), segment(collaborator_id)))
            .await?;
        extract_permissions(value)
    }

    /// Sends all five flags; the backend keeps whatever arrives last
    pub async fn update_permissions(
        &self,
        farm_id: &str,
        collaborator_id: &str,
        permissions: &Permissions,
    ) -> ApiResult<Permissions> {
        let value: Value = self
            .patch(
                &format!("/farms/{}/collaborators/{}/permissions", segment(farm_id), segment(collaborator_id)),
                permissions,
            )
            .await?;
        extract_permissions(value)
    }
}

/// Accepts the flags bare or nested under `permissions`
fn extract_permissions(value: Value) -> ApiResult<Permissions> {
    let value = match value {
        Value::Object(mut map) if map.contains_key("permissions") => map.remove("permissions").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_permissions_sends_full_object() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/farms/f1/collaborators/c1/permissions")
                .json_body(json!({
                    "canCreateCycles": false,
                    "canEditCycles": true,
                    "canDeleteCycles": false,
                    "canAssignTasks": false,
                    "canViewFinancials": false
                }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"message":"Permissions updated","permissions":{"canEditCycles":true}}"#);
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let perms = CollaboratorRole::Worker.default_permissions();
        let saved = client.update_permissions("f1", "c1", &perms).await.unwrap();

        assert_eq!(saved, perms);
        mock.assert();
    }

    #[tokio::test]
    async fn test_invite_uses_role_suggestions() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/farms/f1/collaborators")
                .body_includes(r#""role":"viewer""#)
                .body_includes(r#""canViewFinancials":false"#);
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"_id":"c2","user":{"_id":"u2","email":"v@farm.co"},"role":"viewer"}"#);
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let invite = InviteCollaborator::with_role("v@farm.co", CollaboratorRole::Viewer);
        let collaborator = client.invite_collaborator("f1", &invite).await.unwrap();

        assert_eq!(collaborator.id, "c2");
        assert_eq!(collaborator.user.display_name(), "v@farm.co");
        mock.assert();
    }

    #[test]
    fn test_extract_bare_permissions() {
        let perms = extract_permissions(json!({"canAssignTasks": true})).unwrap();
        assert!(perms.can_assign_tasks);
        assert!(!perms.can_create_cycles);
    }
}
