//! Collaborator Entity
//!
//! A secondary user with scoped access to a farm. The role is descriptive
//! only; the five permission flags are what the backend enforces.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorRole {
    Manager,
    Worker,
    FamilyMember,
    #[default]
    Viewer,
}

impl CollaboratorRole {
    pub const ALL: [CollaboratorRole; 4] = [
        CollaboratorRole::Manager,
        CollaboratorRole::Worker,
        CollaboratorRole::FamilyMember,
        CollaboratorRole::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollaboratorRole::Manager => "manager",
            CollaboratorRole::Worker => "worker",
            CollaboratorRole::FamilyMember => "family_member",
            CollaboratorRole::Viewer => "viewer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollaboratorRole::Manager => "Manager",
            CollaboratorRole::Worker => "Worker",
            CollaboratorRole::FamilyMember => "Family member",
            CollaboratorRole::Viewer => "Viewer",
        }
    }

    /// Suggested flags when inviting someone with this role
    pub fn default_permissions(&self) -> Permissions {
        match self {
            CollaboratorRole::Manager => Permissions::all(),
            CollaboratorRole::Worker => Permissions {
                can_edit_cycles: true,
                ..Permissions::none()
            },
            CollaboratorRole::FamilyMember => Permissions {
                can_create_cycles: true,
                can_edit_cycles: true,
                can_view_financials: true,
                ..Permissions::none()
            },
            CollaboratorRole::Viewer => Permissions::none(),
        }
    }
}

/// Five independent permission flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    #[serde(default)]
    pub can_create_cycles: bool,
    #[serde(default)]
    pub can_edit_cycles: bool,
    #[serde(default)]
    pub can_delete_cycles: bool,
    #[serde(default)]
    pub can_assign_tasks: bool,
    #[serde(default)]
    pub can_view_financials: bool,
}

impl Permissions {
    pub fn all() -> Self {
        Self {
            can_create_cycles: true,
            can_edit_cycles: true,
            can_delete_cycles: true,
            can_assign_tasks: true,
            can_view_financials: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn get(&self, flag: PermissionFlag) -> bool {
        match flag {
            PermissionFlag::CreateCycles => self.can_create_cycles,
            PermissionFlag::EditCycles => self.can_edit_cycles,
            PermissionFlag::DeleteCycles => self.can_delete_cycles,
            PermissionFlag::AssignTasks => self.can_assign_tasks,
            PermissionFlag::ViewFinancials => self.can_view_financials,
        }
    }

    pub fn set(&mut self, flag: PermissionFlag, value: bool) {
        let slot = match flag {
            PermissionFlag::CreateCycles => &mut self.can_create_cycles,
            PermissionFlag::EditCycles => &mut self.can_edit_cycles,
            PermissionFlag::DeleteCycles => &mut self.can_delete_cycles,
            PermissionFlag::AssignTasks => &mut self.can_assign_tasks,
            PermissionFlag::ViewFinancials => &mut self.can_view_financials,
        };
        *slot = value;
    }

    pub fn granted_count(&self) -> usize {
        PermissionFlag::ALL.iter().filter(|flag| self.get(**flag)).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionFlag {
    CreateCycles,
    EditCycles,
    DeleteCycles,
    AssignTasks,
    ViewFinancials,
}

impl PermissionFlag {
    pub const ALL: [PermissionFlag; 5] = [
        PermissionFlag::CreateCycles,
        PermissionFlag::EditCycles,
        PermissionFlag::DeleteCycles,
        PermissionFlag::AssignTasks,
        PermissionFlag::ViewFinancials,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PermissionFlag::CreateCycles => "Create production cycles",
            PermissionFlag::EditCycles => "Edit production cycles",
            PermissionFlag::DeleteCycles => "Delete production cycles",
            PermissionFlag::AssignTasks => "Assign tasks",
            PermissionFlag::ViewFinancials => "View financials",
        }
    }
}

/// Embedded user summary on a collaborator record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorUser {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CollaboratorUser {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone().or_else(|| self.phone.clone()).unwrap_or_default()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub user: CollaboratorUser,
    #[serde(default)]
    pub role: CollaboratorRole,
    #[serde(default)]
    pub permissions: Permissions,
}

impl Entity for Collaborator {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_permissions_wire_names() {
        let value = serde_json::to_value(CollaboratorRole::Manager.default_permissions()).unwrap();
        assert_eq!(
            value,
            json!({
                "canCreateCycles": true,
                "canEditCycles": true,
                "canDeleteCycles": true,
                "canAssignTasks": true,
                "canViewFinancials": true
            })
        );
    }

    #[test]
    fn test_set_and_get_each_flag() {
        let mut perms = Permissions::none();
        for flag in PermissionFlag::ALL {
            assert!(!perms.get(flag));
            perms.set(flag, true);
            assert!(perms.get(flag));
        }
        assert_eq!(perms, Permissions::all());
        assert_eq!(perms.granted_count(), 5);
    }

    #[test]
    fn test_role_suggestions_are_independent_of_hierarchy() {
        let worker = CollaboratorRole::Worker.default_permissions();
        let family = CollaboratorRole::FamilyMember.default_permissions();
        assert!(worker.can_edit_cycles && !worker.can_view_financials);
        assert!(family.can_view_financials && !family.can_delete_cycles);
        assert_eq!(CollaboratorRole::Viewer.default_permissions().granted_count(), 0);
    }

    #[test]
    fn test_collaborator_from_backend() {
        let collaborator: Collaborator = serde_json::from_value(json!({
            "_id": "c1",
            "user": {"_id": "u9", "firstName": "Achieng", "lastName": "", "phone": "0700"},
            "role": "family_member",
            "permissions": {"canViewFinancials": true}
        }))
        .unwrap();

        assert_eq!(collaborator.role, CollaboratorRole::FamilyMember);
        assert_eq!(collaborator.user.display_name(), "Achieng");
        assert!(collaborator.permissions.can_view_financials);
        assert!(!collaborator.permissions.can_edit_cycles);
    }
}
