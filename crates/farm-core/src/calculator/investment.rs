//! Investment / ROI Analysis
//!
//! Given capital and an expected price per bag, how many acres the money
//! covers and what it returns.

use serde::Serialize;

use super::rates::{PotatoVariety, RateTable};
use crate::domain::{DomainError, DomainResult};

const LOW_ROI_PERCENT: f64 = 20.0;
const HIGH_ROI_PERCENT: f64 = 100.0;
const MIN_ACREAGE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    LowReturn,
    VerifyAssumptions,
    IncreaseCapital,
    BelowMarketPrice,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::LowReturn => {
                "Expected return is below 20%. Consider a higher-yielding variety or reducing input costs."
            }
            Recommendation::VerifyAssumptions => {
                "Projected return is above 100%. Double-check your price and yield assumptions."
            }
            Recommendation::IncreaseCapital => {
                "This investment covers less than one acre. Pooling capital or leasing more land improves efficiency."
            }
            Recommendation::BelowMarketPrice => {
                "Your selling price is below the usual market price for this variety. Look for better buyers or storage options."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAnalysis {
    pub variety: PotatoVariety,
    pub investment: f64,
    pub price_per_bag: f64,
    pub max_acreage: f64,
    /// Bags
    pub expected_yield: f64,
    pub revenue: f64,
    pub profit: f64,
    /// Percent
    pub roi: f64,
    pub recommendations: Vec<Recommendation>,
}

pub fn analyze_investment(
    investment: f64,
    variety: PotatoVariety,
    price_per_bag: f64,
    table: &RateTable,
) -> DomainResult<InvestmentAnalysis> {
    if !investment.is_finite() || investment <= 0.0 {
        return Err(DomainError::InvalidInput("investment must be greater than zero".to_string()));
    }
    if !price_per_bag.is_finite() || price_per_bag < 0.0 {
        return Err(DomainError::InvalidInput("price per bag must be zero or more".to_string()));
    }

    let rates = table.rates(variety);
    let max_acreage = investment / rates.cost_per_acre;
    let expected_yield = max_acreage * rates.yield_per_acre;
    let revenue = expected_yield * price_per_bag;
    let profit = revenue - investment;
    let roi = profit / investment * 100.0;

    let mut recommendations = Vec::new();
    if roi < LOW_ROI_PERCENT {
        recommendations.push(Recommendation::LowReturn);
    }
    if roi > HIGH_ROI_PERCENT {
        recommendations.push(Recommendation::VerifyAssumptions);
    }
    if max_acreage < MIN_ACREAGE {
        recommendations.push(Recommendation::IncreaseCapital);
    }
    if price_per_bag < rates.market_price_per_bag {
        recommendations.push(Recommendation::BelowMarketPrice);
    }

    Ok(InvestmentAnalysis {
        variety,
        investment,
        price_per_bag,
        max_acreage,
        expected_yield,
        revenue,
        profit,
        roi,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi_formula() {
        let table = RateTable::new();
        for (investment, price) in [(170_000.0, 2_500.0), (50_000.0, 900.0), (1_000_000.0, 4_000.0)] {
            let analysis = analyze_investment(investment, PotatoVariety::Shangi, price, &table).unwrap();
            let expected = (analysis.revenue - investment) / investment * 100.0;
            assert!((analysis.roi - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shangi_two_acres() {
        let analysis = analyze_investment(170_000.0, PotatoVariety::Shangi, 2_500.0, &RateTable::new()).unwrap();
        assert_eq!(analysis.max_acreage, 2.0);
        assert_eq!(analysis.expected_yield, 200.0);
        assert_eq!(analysis.revenue, 500_000.0);
        assert_eq!(analysis.profit, 330_000.0);
        // ~194% return trips only the high-return note
        assert_eq!(analysis.recommendations, vec![Recommendation::VerifyAssumptions]);
    }

    #[test]
    fn test_no_recommendations_inside_thresholds() {
        // Markies: 110 000/acre, 140 bags; 1 000/bag → revenue 140 000/acre, ROI ≈ 27%
        let table = RateTable::new().with_override(
            PotatoVariety::Markies,
            crate::calculator::CropRates::new(110_000.0, 140.0, 120, 1_000.0),
        );
        let analysis = analyze_investment(220_000.0, PotatoVariety::Markies, 1_000.0, &table).unwrap();
        assert!(analysis.roi > 20.0 && analysis.roi < 100.0);
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_recommendations_nonempty_iff_threshold_holds() {
        let table = RateTable::new();
        for investment in [10_000.0, 85_000.0, 300_000.0] {
            for price in [0.0, 500.0, 1_000.0, 2_500.0, 6_000.0] {
                let a = analyze_investment(investment, PotatoVariety::Shangi, price, &table).unwrap();
                let holds = a.roi < 20.0
                    || a.roi > 100.0
                    || a.max_acreage < 1.0
                    || price < table.rates(PotatoVariety::Shangi).market_price_per_bag;
                assert_eq!(!a.recommendations.is_empty(), holds);
            }
        }
    }

    #[test]
    fn test_small_investment_low_price() {
        let analysis = analyze_investment(40_000.0, PotatoVariety::Unica, 500.0, &RateTable::new()).unwrap();
        assert!(analysis.recommendations.contains(&Recommendation::LowReturn));
        assert!(analysis.recommendations.contains(&Recommendation::IncreaseCapital));
        assert!(analysis.recommendations.contains(&Recommendation::BelowMarketPrice));
    }

    #[test]
    fn test_rejects_zero_investment() {
        assert!(analyze_investment(0.0, PotatoVariety::Shangi, 2_500.0, &RateTable::new()).is_err());
        assert!(analyze_investment(1_000.0, PotatoVariety::Shangi, -1.0, &RateTable::new()).is_err());
    }
}
