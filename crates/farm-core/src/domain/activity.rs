//! Activity Entity
//!
//! A typed farm operation recorded against a production cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::serde_helpers::optional_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    LandPreparation,
    Planting,
    Fertilization,
    Irrigation,
    Weeding,
    PestControl,
    DiseaseControl,
    Harvesting,
    Storage,
    Marketing,
    #[default]
    #[serde(other)]
    Other,
}

impl ActivityType {
    pub const ALL: [ActivityType; 11] = [
        ActivityType::LandPreparation,
        ActivityType::Planting,
        ActivityType::Fertilization,
        ActivityType::Irrigation,
        ActivityType::Weeding,
        ActivityType::PestControl,
        ActivityType::DiseaseControl,
        ActivityType::Harvesting,
        ActivityType::Storage,
        ActivityType::Marketing,
        ActivityType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::LandPreparation => "land_preparation",
            ActivityType::Planting => "planting",
            ActivityType::Fertilization => "fertilization",
            ActivityType::Irrigation => "irrigation",
            ActivityType::Weeding => "weeding",
            ActivityType::PestControl => "pest_control",
            ActivityType::DiseaseControl => "disease_control",
            ActivityType::Harvesting => "harvesting",
            ActivityType::Storage => "storage",
            ActivityType::Marketing => "marketing",
            ActivityType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .unwrap_or(ActivityType::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::LandPreparation => "Land preparation",
            ActivityType::Planting => "Planting",
            ActivityType::Fertilization => "Fertilization",
            ActivityType::Irrigation => "Irrigation",
            ActivityType::Weeding => "Weeding",
            ActivityType::PestControl => "Pest control",
            ActivityType::DiseaseControl => "Disease control",
            ActivityType::Harvesting => "Harvesting",
            ActivityType::Storage => "Storage",
            ActivityType::Marketing => "Marketing",
            ActivityType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LaborType {
    #[default]
    Family,
    Hired,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    InProgress,
    Completed,
}

/// Free-form input used by an activity (fertilizer, chemicals, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, alias = "type")]
    pub activity_type: ActivityType,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub labor_hours: Option<f64>,
    #[serde(default)]
    pub labor_type: Option<LaborType>,
    #[serde(default)]
    pub inputs: Vec<ActivityInput>,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Activity {
    pub fn new(activity_type: ActivityType, description: impl Into<String>, cost: f64) -> Self {
        Self {
            activity_type,
            description: description.into(),
            cost,
            ..Default::default()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ActivityStatus::Completed
    }

    /// Sum of costs listed on individual inputs
    pub fn inputs_cost(&self) -> f64 {
        self.inputs.iter().filter_map(|input| input.cost).sum()
    }
}

impl Entity for Activity {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_activity_omits_empty_id() {
        let activity = Activity::new(ActivityType::Weeding, "First weeding", 3_000.0);
        let value = serde_json::to_value(&activity).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["activityType"], json!("weeding"));
        assert_eq!(value["status"], json!("in_progress"));
    }

    #[test]
    fn test_activity_from_backend() {
        let activity: Activity = serde_json::from_value(json!({
            "_id": "a1",
            "type": "pest_control",
            "date": "2024-02-10T00:00:00.000Z",
            "cost": 4200,
            "laborType": "hired",
            "inputs": [{"name": "Ridomil", "quantity": 2, "unit": "kg", "cost": 3000}],
            "status": "completed"
        }))
        .unwrap();

        assert_eq!(activity.activity_type, ActivityType::PestControl);
        assert_eq!(activity.date, NaiveDate::from_ymd_opt(2024, 2, 10));
        assert_eq!(activity.labor_type, Some(LaborType::Hired));
        assert!(activity.is_completed());
        assert_eq!(activity.inputs_cost(), 3_000.0);
    }

    #[test]
    fn test_unknown_activity_type_is_other() {
        assert_eq!(ActivityType::from_str("spraying"), ActivityType::Other);
        assert_eq!(ActivityType::from_str("irrigation"), ActivityType::Irrigation);
    }
}
