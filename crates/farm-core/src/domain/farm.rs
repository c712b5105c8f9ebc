//! Farm Entity
//!
//! The UI assumes one farm per user and always works with the first one.

use serde::{Deserialize, Serialize};
use super::collaborator::Collaborator;
use super::entity::Entity;
use super::serde_helpers::id_ref;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Size in acres
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default, with = "id_ref")]
    pub owner: Option<String>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
}

impl Entity for Farm {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating or updating a farm
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewFarm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}
