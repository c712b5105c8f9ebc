//! Rate Tables
//!
//! Per-variety constants for cost, yield and growth period.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Price of one bag of certified seed, KES
pub const SEED_BAG_PRICE: f64 = 4_500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotatoVariety {
    Shangi,
    DutchRobijn,
    Markies,
    Unica,
}

impl PotatoVariety {
    pub const ALL: [PotatoVariety; 4] = [
        PotatoVariety::Shangi,
        PotatoVariety::DutchRobijn,
        PotatoVariety::Markies,
        PotatoVariety::Unica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PotatoVariety::Shangi => "shangi",
            PotatoVariety::DutchRobijn => "dutch_robijn",
            PotatoVariety::Markies => "markies",
            PotatoVariety::Unica => "unica",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|variety| variety.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PotatoVariety::Shangi => "Shangi",
            PotatoVariety::DutchRobijn => "Dutch Robijn",
            PotatoVariety::Markies => "Markies",
            PotatoVariety::Unica => "Unica",
        }
    }
}

/// Supplier seed grading; size 2 tubers are larger so more bags cover an acre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeedSize {
    #[default]
    One,
    Two,
}

impl SeedSize {
    pub fn bags_per_acre(&self) -> f64 {
        match self {
            SeedSize::One => 16.0,
            SeedSize::Two => 20.0,
        }
    }

    pub fn grade(&self) -> u8 {
        match self {
            SeedSize::One => 1,
            SeedSize::Two => 2,
        }
    }

    pub fn from_grade(grade: u8) -> Option<Self> {
        match grade {
            1 => Some(SeedSize::One),
            2 => Some(SeedSize::Two),
            _ => None,
        }
    }
}

impl Serialize for SeedSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.grade())
    }
}

impl<'de> Deserialize<'de> for SeedSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grade = u8::deserialize(deserializer)?;
        SeedSize::from_grade(grade)
            .ok_or_else(|| serde::de::Error::custom(format!("seed size must be 1 or 2, got {}", grade)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRates {
    /// Total production cost per acre, KES
    pub cost_per_acre: f64,
    /// Bags (110 kg) per acre
    pub yield_per_acre: f64,
    /// Days from planting to harvest
    pub growth_days: u32,
    /// Reference farm-gate price per bag, KES
    pub market_price_per_bag: f64,
}

impl CropRates {
    pub const fn new(cost_per_acre: f64, yield_per_acre: f64, growth_days: u32, market_price_per_bag: f64) -> Self {
        Self {
            cost_per_acre,
            yield_per_acre,
            growth_days,
            market_price_per_bag,
        }
    }

    pub fn default_for(variety: PotatoVariety) -> Self {
        match variety {
            PotatoVariety::Shangi => CropRates::new(85_000.0, 100.0, 85, 2_500.0),
            PotatoVariety::DutchRobijn => CropRates::new(95_000.0, 120.0, 90, 2_800.0),
            PotatoVariety::Markies => CropRates::new(110_000.0, 140.0, 120, 3_000.0),
            PotatoVariety::Unica => CropRates::new(80_000.0, 90.0, 75, 2_400.0),
        }
    }
}

/// Defaults plus per-variety overrides
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    overrides: HashMap<PotatoVariety, CropRates>,
    seed_bag_price: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            seed_bag_price: SEED_BAG_PRICE,
        }
    }
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, variety: PotatoVariety, rates: CropRates) -> Self {
        self.overrides.insert(variety, rates);
        self
    }

    pub fn with_overrides(mut self, overrides: &HashMap<PotatoVariety, CropRates>) -> Self {
        self.overrides.extend(overrides.iter().map(|(k, v)| (*k, *v)));
        self
    }

    pub fn with_seed_bag_price(mut self, price: f64) -> Self {
        self.seed_bag_price = price;
        self
    }

    pub fn rates(&self, variety: PotatoVariety) -> CropRates {
        self.overrides
            .get(&variety)
            .copied()
            .unwrap_or_else(|| CropRates::default_for(variety))
    }

    pub fn seed_bag_price(&self) -> f64 {
        self.seed_bag_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_days_per_variety() {
        let table = RateTable::new();
        let days: Vec<u32> = PotatoVariety::ALL.iter().map(|v| table.rates(*v).growth_days).collect();
        assert_eq!(days, vec![85, 90, 120, 75]);
    }

    #[test]
    fn test_override_replaces_single_variety() {
        let custom = CropRates::new(100_000.0, 110.0, 88, 2_600.0);
        let table = RateTable::new().with_override(PotatoVariety::Shangi, custom);
        assert_eq!(table.rates(PotatoVariety::Shangi), custom);
        assert_eq!(table.rates(PotatoVariety::Unica), CropRates::default_for(PotatoVariety::Unica));
    }

    #[test]
    fn test_variety_parsing_is_lenient() {
        assert_eq!(PotatoVariety::from_str("Dutch Robijn"), Some(PotatoVariety::DutchRobijn));
        assert_eq!(PotatoVariety::from_str("SHANGI"), Some(PotatoVariety::Shangi));
        assert_eq!(PotatoVariety::from_str("kenya mpya"), None);
    }

    #[test]
    fn test_seed_size_wire_format() {
        assert_eq!(serde_json::to_string(&SeedSize::Two).unwrap(), "2");
        assert_eq!(serde_json::from_str::<SeedSize>("1").unwrap(), SeedSize::One);
        assert!(serde_json::from_str::<SeedSize>("3").is_err());
    }
}
