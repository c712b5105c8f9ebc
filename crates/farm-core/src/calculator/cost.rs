//! Cost Calculator
//!
//! `total = land × cost_per_acre[variety]`, `bags = land × bags_per_acre[seed]`.

use serde::Serialize;

use super::rates::{PotatoVariety, RateTable, SeedSize};
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub variety: PotatoVariety,
    pub land_size: f64,
    pub cost_per_acre: f64,
    pub total_cost: f64,
    pub seed_bags: f64,
    pub seed_cost: f64,
}

pub fn estimate_cost(
    land_size: f64,
    variety: PotatoVariety,
    seed_size: SeedSize,
    table: &RateTable,
) -> DomainResult<CostEstimate> {
    if !land_size.is_finite() || land_size < 0.0 {
        return Err(DomainError::InvalidInput("land size must be zero or more acres".to_string()));
    }
    let cost_per_acre = table.rates(variety).cost_per_acre;
    let seed_bags = land_size * seed_size.bags_per_acre();
    Ok(CostEstimate {
        variety,
        land_size,
        cost_per_acre,
        total_cost: land_size * cost_per_acre,
        seed_bags,
        seed_cost: seed_bags * table.seed_bag_price(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_is_linear_in_land_size() {
        let table = RateTable::new();
        for variety in PotatoVariety::ALL {
            let per_acre = table.rates(variety).cost_per_acre;
            for land in [0.0, 0.25, 1.0, 2.5, 10.0, 137.0] {
                let estimate = estimate_cost(land, variety, SeedSize::One, &table).unwrap();
                assert_eq!(estimate.total_cost, land * per_acre);
            }
        }
    }

    #[test]
    fn test_bags_follow_seed_size() {
        let table = RateTable::new();
        let small = estimate_cost(2.0, PotatoVariety::Shangi, SeedSize::One, &table).unwrap();
        let large = estimate_cost(2.0, PotatoVariety::Shangi, SeedSize::Two, &table).unwrap();
        assert_eq!(small.seed_bags, 32.0);
        assert_eq!(large.seed_bags, 40.0);
        assert_eq!(small.seed_cost, 32.0 * 4_500.0);
        assert_eq!(small.total_cost, 170_000.0);
    }

    #[test]
    fn test_rejects_negative_and_nan_land() {
        let table = RateTable::new();
        assert!(estimate_cost(-1.0, PotatoVariety::Unica, SeedSize::One, &table).is_err());
        assert!(estimate_cost(f64::NAN, PotatoVariety::Unica, SeedSize::One, &table).is_err());
    }

    #[test]
    fn test_uses_overridden_rate() {
        let table = RateTable::new().with_override(
            PotatoVariety::Markies,
            crate::calculator::CropRates::new(50_000.0, 100.0, 120, 3_000.0),
        );
        let estimate = estimate_cost(3.0, PotatoVariety::Markies, SeedSize::Two, &table).unwrap();
        assert_eq!(estimate.total_cost, 150_000.0);
    }
}
