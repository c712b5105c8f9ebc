//! User Entity
//!
//! Read-only copy of the signed-in account.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

/// Subscription tier; unknown tiers fall back to `Free`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Basic,
    Premium,
    #[default]
    #[serde(other)]
    Free,
}

impl SubscriptionTier {
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Basic => "Basic",
            SubscriptionTier::Premium => "Premium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    pub phone: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default, alias = "subcounty")]
    pub sub_county: Option<String>,
    #[serde(default, alias = "subscriptionTier")]
    pub subscription: SubscriptionTier,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// "First Last", falling back to email or phone
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.email
            .clone()
            .or_else(|| self.phone.clone())
            .unwrap_or_else(|| "Farmer".to_string())
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_from_backend_document() {
        let user: User = serde_json::from_value(json!({
            "_id": "64f0",
            "firstName": "Wanjiku",
            "lastName": "Kamau",
            "phone": "0712345678",
            "county": "Nyandarua",
            "subCounty": "Ol Kalou",
            "subscription": "premium",
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(user.id(), "64f0");
        assert!(user.is_admin());
        assert_eq!(user.subscription, SubscriptionTier::Premium);
        assert_eq!(user.sub_county.as_deref(), Some("Ol Kalou"));
        assert_eq!(user.display_name(), "Wanjiku Kamau");
    }

    #[test]
    fn test_unknown_tier_and_role_fall_back() {
        let user: User = serde_json::from_value(json!({
            "id": "1",
            "subscription": "enterprise",
            "role": "superuser",
            "email": "a@b.co"
        }))
        .unwrap();

        assert_eq!(user.subscription, SubscriptionTier::Free);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.display_name(), "a@b.co");
    }
}
