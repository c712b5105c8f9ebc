//! Production Cycle Entity
//!
//! One planting-to-harvest record for a crop on a given land area.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::activity::Activity;
use super::crop::CropVariety;
use super::entity::Entity;
use super::serde_helpers::{date, optional_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CycleStatus {
    #[default]
    Active,
    Harvested,
    Archived,
}

impl CycleStatus {
    pub const ALL: [CycleStatus; 3] = [CycleStatus::Active, CycleStatus::Harvested, CycleStatus::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Active => "active",
            CycleStatus::Harvested => "harvested",
            CycleStatus::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CycleStatus::Active => "Active",
            CycleStatus::Harvested => "Harvested",
            CycleStatus::Archived => "Archived",
        }
    }
}

/// The backend sends either the variety id or the populated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CropVarietyRef {
    Id(String),
    Embedded(CropVariety),
}

impl Default for CropVarietyRef {
    fn default() -> Self {
        CropVarietyRef::Id(String::new())
    }
}

impl CropVarietyRef {
    pub fn id(&self) -> &str {
        match self {
            CropVarietyRef::Id(id) => id,
            CropVarietyRef::Embedded(variety) => &variety.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CropVarietyRef::Id(_) => None,
            CropVarietyRef::Embedded(variety) => Some(&variety.name),
        }
    }

    pub fn variety(&self) -> Option<&CropVariety> {
        match self {
            CropVarietyRef::Id(_) => None,
            CropVarietyRef::Embedded(variety) => Some(variety),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionCycle {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub crop_variety: CropVarietyRef,
    /// Acres
    #[serde(default)]
    pub land_size: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(with = "date")]
    pub planting_date: NaiveDate,
    #[serde(default, with = "optional_date")]
    pub expected_harvest_date: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub actual_harvest_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: CycleStatus,
    /// Bags
    #[serde(default)]
    pub expected_yield: Option<f64>,
    #[serde(default)]
    pub actual_yield: Option<f64>,
    #[serde(default)]
    pub expected_price_per_bag: Option<f64>,
    #[serde(default)]
    pub actual_price_per_bag: Option<f64>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "optional_date")]
    pub created_at: Option<NaiveDate>,
}

impl ProductionCycle {
    pub fn new(id: impl Into<String>, crop_variety: CropVarietyRef, land_size: f64, planting_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            crop_variety,
            land_size,
            location: None,
            planting_date,
            expected_harvest_date: None,
            actual_harvest_date: None,
            status: CycleStatus::Active,
            expected_yield: None,
            actual_yield: None,
            expected_price_per_bag: None,
            actual_price_per_bag: None,
            activities: Vec::new(),
            notes: None,
            created_at: None,
        }
    }

    pub fn variety_name(&self) -> &str {
        self.crop_variety.name().unwrap_or("Unknown variety")
    }

    /// Sum of all recorded activity costs
    pub fn total_cost(&self) -> f64 {
        self.activities.iter().map(|activity| activity.cost).sum()
    }

    pub fn expected_revenue(&self) -> Option<f64> {
        Some(self.expected_yield? * self.expected_price_per_bag?)
    }

    pub fn actual_revenue(&self) -> Option<f64> {
        Some(self.actual_yield? * self.actual_price_per_bag?)
    }

    /// Actual revenue minus recorded costs, only once harvested
    pub fn profit(&self) -> Option<f64> {
        if self.status != CycleStatus::Harvested {
            return None;
        }
        Some(self.actual_revenue()? - self.total_cost())
    }

    pub fn completed_activities(&self) -> usize {
        self.activities.iter().filter(|activity| activity.is_completed()).count()
    }
}

impl Entity for ProductionCycle {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating a cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCycle {
    pub crop_variety: String,
    pub land_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(with = "date")]
    pub planting_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", with = "optional_date")]
    pub expected_harvest_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_price_per_bag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update; only set fields are sent
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CycleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CycleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "optional_date")]
    pub expected_harvest_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", with = "optional_date")]
    pub actual_harvest_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_price_per_bag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_price_per_bag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CycleUpdate {
    pub fn is_empty(&self) -> bool {
        *self == CycleUpdate::default()
    }

    /// Optimistically apply the update to a local copy
    pub fn apply_to(&self, cycle: &mut ProductionCycle) {
        if let Some(status) = self.status {
            cycle.status = status;
        }
        if let Some(land_size) = self.land_size {
            cycle.land_size = land_size;
        }
        if let Some(location) = &self.location {
            cycle.location = Some(location.clone());
        }
        if self.expected_harvest_date.is_some() {
            cycle.expected_harvest_date = self.expected_harvest_date;
        }
        if self.actual_harvest_date.is_some() {
            cycle.actual_harvest_date = self.actual_harvest_date;
        }
        if self.expected_yield.is_some() {
            cycle.expected_yield = self.expected_yield;
        }
        if self.actual_yield.is_some() {
            cycle.actual_yield = self.actual_yield;
        }
        if self.expected_price_per_bag.is_some() {
            cycle.expected_price_per_bag = self.expected_price_per_bag;
        }
        if self.actual_price_per_bag.is_some() {
            cycle.actual_price_per_bag = self.actual_price_per_bag;
        }
        if let Some(notes) = &self.notes {
            cycle.notes = Some(notes.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityStatus, ActivityType};
    use serde_json::json;

    fn planted() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_cycle_from_populated_document() {
        let cycle: ProductionCycle = serde_json::from_value(json!({
            "_id": "pc1",
            "cropVariety": {"_id": "v1", "name": "Shangi", "maturityDays": 85},
            "landSize": 2,
            "plantingDate": "2024-01-01T00:00:00.000Z",
            "status": "harvested",
            "activities": []
        }))
        .unwrap();

        assert_eq!(cycle.variety_name(), "Shangi");
        assert_eq!(cycle.crop_variety.id(), "v1");
        assert_eq!(cycle.planting_date, planted());
        assert_eq!(cycle.status, CycleStatus::Harvested);
    }

    #[test]
    fn test_cycle_with_variety_id_only() {
        let cycle: ProductionCycle = serde_json::from_value(json!({
            "id": "pc2",
            "cropVariety": "v7",
            "plantingDate": "2024-03-15"
        }))
        .unwrap();

        assert_eq!(cycle.crop_variety.id(), "v7");
        assert_eq!(cycle.variety_name(), "Unknown variety");
        assert_eq!(cycle.status, CycleStatus::Active);
    }

    #[test]
    fn test_financials() {
        let mut cycle = ProductionCycle::new("pc3", CropVarietyRef::Id("v1".into()), 1.0, planted());
        cycle.activities.push(Activity::new(ActivityType::Planting, "Plant", 40_000.0));
        let mut weeding = Activity::new(ActivityType::Weeding, "Weed", 10_000.0);
        weeding.status = ActivityStatus::Completed;
        cycle.activities.push(weeding);
        cycle.expected_yield = Some(100.0);
        cycle.expected_price_per_bag = Some(2_500.0);
        cycle.actual_yield = Some(80.0);
        cycle.actual_price_per_bag = Some(3_000.0);

        assert_eq!(cycle.total_cost(), 50_000.0);
        assert_eq!(cycle.expected_revenue(), Some(250_000.0));
        assert_eq!(cycle.profit(), None);
        assert_eq!(cycle.completed_activities(), 1);

        cycle.status = CycleStatus::Harvested;
        assert_eq!(cycle.profit(), Some(190_000.0));
    }

    #[test]
    fn test_update_serializes_only_set_fields_and_applies() {
        let update = CycleUpdate {
            status: Some(CycleStatus::Harvested),
            actual_yield: Some(120.0),
            actual_harvest_date: NaiveDate::from_ymd_opt(2024, 3, 30),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"status": "harvested", "actualYield": 120.0, "actualHarvestDate": "2024-03-30"})
        );

        let mut cycle = ProductionCycle::new("pc4", CropVarietyRef::default(), 3.0, planted());
        update.apply_to(&mut cycle);
        assert_eq!(cycle.status, CycleStatus::Harvested);
        assert_eq!(cycle.actual_yield, Some(120.0));
        assert_eq!(cycle.land_size, 3.0);
        assert!(CycleUpdate::default().is_empty());
    }
}
