//! Calculators
//!
//! Pure formulas shared by the public calculator page and the dashboard
//! modals. Constants live in an override-able [`RateTable`].

mod cost;
mod format;
mod harvest;
mod investment;
mod rates;

pub use cost::{estimate_cost, CostEstimate};
pub use format::{format_kes, format_number};
pub use harvest::{forecast_harvest, HarvestForecast};
pub use investment::{analyze_investment, InvestmentAnalysis, Recommendation};
pub use rates::{CropRates, PotatoVariety, RateTable, SeedSize, SEED_BAG_PRICE};
