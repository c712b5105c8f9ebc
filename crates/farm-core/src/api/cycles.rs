//! Production Cycle and Activity Endpoints

use super::client::{segment, ApiClient};
use super::error::ApiResult;
use crate::domain::{Activity, CycleUpdate, NewCycle, ProductionCycle};

impl ApiClient {
    /// All cycles visible to the user, fetched wholesale
    pub async fn list_cycles(&self) -> ApiResult<Vec<ProductionCycle>> {
        self.get("/production-cycles").await
    }

    pub async fn get_cycle(&self, cycle_id: &str) -> ApiResult<ProductionCycle> {
        self.get(&format!("/production-cycles/{}", segment(cycle_id))).await
    }

    pub async fn create_cycle(&self, cycle: &NewCycle) -> ApiResult<ProductionCycle> {
        self.post("/production-cycles", cycle).await
    }

    pub async fn update_cycle(&self, cycle_id: &str, update: &CycleUpdate) -> ApiResult<ProductionCycle> {
        self.patch(&format!("/production-cycles/{}", segment(cycle_id)), update).await
    }

    pub async fn delete_cycle(&self, cycle_id: &str) -> ApiResult<()> {
        self.delete(&format!("/production-cycles/{}", segment(cycle_id))).await
    }

    /// Returns the updated cycle including the new activity
    pub async fn add_activity(&self, cycle_id: &str, activity: &Activity) -> ApiResult<ProductionCycle> {
        self.post(&format!("/production-cycles/{}/activities", segment(cycle_id)), activity).await
    }

    pub async fn update_activity(&self, cycle_id: &str, activity: &Activity) -> ApiResult<ProductionCycle> {
        self.patch(
            &format!("/production-cycles/{}/activities/{}", segment(cycle_id), segment(&activity.id)),
            activity,
        )
        .await
    }

    pub async fn delete_activity(&self, cycle_id: &str, activity_id: &str) -> ApiResult<()> {
        self.delete(&format!("/production-cycles/{}/activities/{}", segment(cycle_id), segment(activity_id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityType, CycleStatus};
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_cycles_enveloped() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/production-cycles");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    json!({
                        "success": true,
                        "data": [
                            {"_id": "c1", "cropVariety": {"_id": "v1", "name": "Shangi"}, "landSize": 1.5, "plantingDate": "2024-01-01"},
                            {"_id": "c2", "cropVariety": "v2", "landSize": 2, "plantingDate": "2024-02-01", "status": "archived"}
                        ]
                    })
                    .to_string(),
                );
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let cycles = client.list_cycles().await.unwrap();

        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].variety_name(), "Shangi");
        assert_eq!(cycles[1].status, CycleStatus::Archived);
    }

    #[tokio::test]
    async fn test_create_cycle_payload() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/production-cycles").json_body(json!({
                "cropVariety": "v1",
                "landSize": 2.0,
                "plantingDate": "2024-01-01",
                "expectedHarvestDate": "2024-03-26"
            }));
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"_id":"c9","cropVariety":"v1","landSize":2,"plantingDate":"2024-01-01","expectedHarvestDate":"2024-03-26"}"#);
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let created = client
            .create_cycle(&NewCycle {
                crop_variety: "v1".to_string(),
                land_size: 2.0,
                location: None,
                planting_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                expected_harvest_date: NaiveDate::from_ymd_opt(2024, 3, 26),
                expected_yield: None,
                expected_price_per_bag: None,
                notes: None,
            })
            .await
            .unwrap();

        assert_eq!(created.id, "c9");
        mock.assert();
    }

    #[tokio::test]
    async fn test_add_and_delete_activity_paths() {
        let server = MockServer::start();
        let add = server.mock(|when, then| {
            when.method(POST)
                .path("/production-cycles/c1/activities")
                .body_includes(r#""activityType":"fertilization""#);
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"_id":"c1","cropVariety":"v1","plantingDate":"2024-01-01","activities":[{"_id":"a1","activityType":"fertilization","cost":5000}]}"#);
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/production-cycles/c1/activities/a1");
            then.status(200).body(r#"{"message":"Activity deleted"}"#);
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let activity = Activity::new(ActivityType::Fertilization, "Top dressing", 5_000.0);
        let updated = client.add_activity("c1", &activity).await.unwrap();
        assert_eq!(updated.total_cost(), 5_000.0);

        client.delete_activity("c1", "a1").await.unwrap();
        add.assert();
        delete.assert();
    }
}
