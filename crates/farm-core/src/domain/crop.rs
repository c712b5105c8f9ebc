//! Crop Variety Reference Data
//!
//! Fetched from the backend and never mutated by the app.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CropVariety {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub maturity_days: Option<u32>,
    #[serde(default)]
    pub seed_cost_per_acre: f64,
    #[serde(default)]
    pub fertilizer_cost_per_acre: f64,
    #[serde(default)]
    pub labor_cost_per_acre: f64,
    #[serde(default)]
    pub other_costs_per_acre: f64,
    /// Bags per acre
    #[serde(default)]
    pub expected_yield_per_acre: f64,
    #[serde(default)]
    pub market_price_per_bag: f64,
}

impl CropVariety {
    pub fn total_cost_per_acre(&self) -> f64 {
        self.seed_cost_per_acre
            + self.fertilizer_cost_per_acre
            + self.labor_cost_per_acre
            + self.other_costs_per_acre
    }
}

impl Entity for CropVariety {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_cost_per_acre() {
        let variety = CropVariety {
            id: "v1".to_string(),
            name: "Shangi".to_string(),
            seed_cost_per_acre: 72_000.0,
            fertilizer_cost_per_acre: 15_000.0,
            labor_cost_per_acre: 10_000.0,
            other_costs_per_acre: 3_000.0,
            ..Default::default()
        };
        assert_eq!(variety.total_cost_per_acre(), 100_000.0);
    }
}
