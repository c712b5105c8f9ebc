//! Harvest-Date Forecast
//!
//! `harvest = planting + growth_days[variety]`, plain calendar arithmetic.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::rates::{PotatoVariety, RateTable};
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestForecast {
    pub variety: PotatoVariety,
    pub planting_date: NaiveDate,
    pub growth_days: u32,
    pub harvest_date: NaiveDate,
}

impl HarvestForecast {
    /// Days left until harvest from `today` (negative once passed)
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.harvest_date - today).num_days()
    }
}

pub fn forecast_harvest(
    planting_date: NaiveDate,
    variety: PotatoVariety,
    table: &RateTable,
) -> DomainResult<HarvestForecast> {
    let growth_days = table.rates(variety).growth_days;
    let harvest_date = planting_date
        .checked_add_days(Days::new(u64::from(growth_days)))
        .ok_or_else(|| DomainError::InvalidInput("planting date out of range".to_string()))?;
    Ok(HarvestForecast {
        variety,
        planting_date,
        growth_days,
        harvest_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shangi_new_year_planting() {
        let forecast = forecast_harvest(ymd(2024, 1, 1), PotatoVariety::Shangi, &RateTable::new()).unwrap();
        assert_eq!(forecast.harvest_date, ymd(2024, 3, 26));
        assert_eq!(forecast.growth_days, 85);
    }

    #[test]
    fn test_every_variety_adds_its_days() {
        let table = RateTable::new();
        let planted = ymd(2023, 11, 15);
        for variety in PotatoVariety::ALL {
            let forecast = forecast_harvest(planted, variety, &table).unwrap();
            let days = i64::from(table.rates(variety).growth_days);
            assert_eq!((forecast.harvest_date - planted).num_days(), days);
        }
    }

    #[test]
    fn test_days_remaining() {
        let forecast = forecast_harvest(ymd(2024, 1, 1), PotatoVariety::Unica, &RateTable::new()).unwrap();
        assert_eq!(forecast.harvest_date, ymd(2024, 3, 16));
        assert_eq!(forecast.days_remaining(ymd(2024, 3, 6)), 10);
        assert_eq!(forecast.days_remaining(ymd(2024, 3, 20)), -4);
    }

    #[test]
    fn test_out_of_range_date() {
        assert!(forecast_harvest(NaiveDate::MAX, PotatoVariety::Markies, &RateTable::new()).is_err());
    }
}
