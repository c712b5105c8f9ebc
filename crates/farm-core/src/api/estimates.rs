//! Estimation Endpoints
//!
//! Server-side cost and harvest estimates. The calculators fall back to the
//! local rate tables when these are unavailable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiResult;
use crate::calculator::SeedSize;
use crate::domain::serde_helpers::{date, optional_date};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimateRequest {
    pub crop_variety_id: String,
    pub land_size: f64,
    pub seed_size: SeedSize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCostEstimate {
    pub total_cost: f64,
    #[serde(default)]
    pub cost_per_acre: Option<f64>,
    #[serde(default)]
    pub bags_required: Option<f64>,
    #[serde(default)]
    pub breakdown: Vec<CostLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestEstimateRequest {
    pub crop_variety_id: String,
    #[serde(with = "date")]
    pub planting_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteHarvestEstimate {
    #[serde(with = "date")]
    pub harvest_date: NaiveDate,
    #[serde(default)]
    pub growth_days: Option<u32>,
    #[serde(default, with = "optional_date")]
    pub earliest_date: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub latest_date: Option<NaiveDate>,
}

impl ApiClient {
    pub async fn estimate_cost(&self, request: &CostEstimateRequest) -> ApiResult<RemoteCostEstimate> {
        self.post("/estimates/cost", request).await
    }

    pub async fn estimate_harvest(&self, request: &HarvestEstimateRequest) -> ApiResult<RemoteHarvestEstimate> {
        self.post("/estimates/harvest", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_estimate_cost_payload() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/estimates/cost")
                .json_body(json!({"cropVarietyId": "v1", "landSize": 2.0, "seedSize": 1}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"data":{"totalCost":170000,"costPerAcre":85000,"bagsRequired":32,"breakdown":[{"label":"Seed","amount":144000}]}}"#);
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let estimate = client
            .estimate_cost(&CostEstimateRequest {
                crop_variety_id: "v1".to_string(),
                land_size: 2.0,
                seed_size: SeedSize::One,
            })
            .await
            .unwrap();

        assert_eq!(estimate.total_cost, 170_000.0);
        assert_eq!(estimate.breakdown.len(), 1);
        mock.assert();
    }

    #[tokio::test]
    async fn test_estimate_harvest_dates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/estimates/harvest");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"harvestDate":"2024-03-26T00:00:00.000Z","growthDays":85}"#);
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let estimate = client
            .estimate_harvest(&HarvestEstimateRequest {
                crop_variety_id: "v1".to_string(),
                planting_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(estimate.harvest_date, NaiveDate::from_ymd_opt(2024, 3, 26).unwrap());
        assert_eq!(estimate.growth_days, Some(85));
        assert_eq!(estimate.earliest_date, None);
    }
}
