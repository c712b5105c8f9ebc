//! Permission Editor
//!
//! Local edit buffer for one collaborator's five permission flags. The
//! backend always receives the complete object; last write wins.

use crate::domain::{CollaboratorRole, PermissionFlag, Permissions};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PermissionEditor {
    snapshot: Permissions,
    current: Permissions,
}

impl PermissionEditor {
    pub fn load(permissions: Permissions) -> Self {
        Self {
            snapshot: permissions,
            current: permissions,
        }
    }

    pub fn toggle(&mut self, flag: PermissionFlag) {
        let value = self.current.get(flag);
        self.current.set(flag, !value);
    }

    /// Overwrite the working copy with a role's suggestion
    pub fn apply_role(&mut self, role: CollaboratorRole) {
        self.current = role.default_permissions();
    }

    pub fn cancel(&mut self) {
        self.current = self.snapshot;
    }

    pub fn has_changes(&self) -> bool {
        self.current != self.snapshot
    }

    pub fn current(&self) -> &Permissions {
        &self.current
    }

    pub fn snapshot(&self) -> &Permissions {
        &self.snapshot
    }

    pub fn is_granted(&self, flag: PermissionFlag) -> bool {
        self.current.get(flag)
    }

    /// Full flag set for the PATCH body
    pub fn save_body(&self) -> Permissions {
        self.current
    }

    /// Accept what the server stored as the new baseline
    pub fn mark_saved(&mut self, saved: Permissions) {
        self.snapshot = saved;
        self.current = saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_marks_dirty_and_twice_is_clean() {
        let mut editor = PermissionEditor::load(Permissions::none());
        assert!(!editor.has_changes());

        for flag in PermissionFlag::ALL {
            editor.toggle(flag);
            assert!(editor.has_changes());
            editor.toggle(flag);
            assert!(!editor.has_changes());
        }
    }

    #[test]
    fn test_cancel_restores_snapshot() {
        let mut editor = PermissionEditor::load(Permissions::all());
        editor.toggle(PermissionFlag::DeleteCycles);
        editor.toggle(PermissionFlag::ViewFinancials);
        assert_eq!(editor.current().granted_count(), 3);

        editor.cancel();
        assert_eq!(editor.current(), &Permissions::all());
        assert!(!editor.has_changes());
    }

    #[test]
    fn test_save_body_is_full_object() {
        let mut editor = PermissionEditor::load(Permissions::none());
        editor.toggle(PermissionFlag::EditCycles);

        let body = serde_json::to_value(editor.save_body()).unwrap();
        assert_eq!(body.as_object().unwrap().len(), 5);
        assert_eq!(body["canEditCycles"], true);
        assert_eq!(body["canCreateCycles"], false);
    }

    #[test]
    fn test_mark_saved_moves_baseline() {
        let mut editor = PermissionEditor::load(Permissions::none());
        editor.toggle(PermissionFlag::AssignTasks);
        let saved = editor.save_body();
        editor.mark_saved(saved);
        assert!(!editor.has_changes());
        assert!(editor.is_granted(PermissionFlag::AssignTasks));
    }

    #[test]
    fn test_apply_role_suggestion() {
        let mut editor = PermissionEditor::load(CollaboratorRole::Viewer.default_permissions());
        assert_eq!(editor.current().granted_count(), 0);
        editor.apply_role(CollaboratorRole::Manager);
        assert_eq!(editor.current().granted_count(), 5);
        assert!(editor.has_changes());
    }
}
