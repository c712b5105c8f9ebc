//! Farm Endpoints

use super::client::{segment, ApiClient};
use super::error::ApiResult;
use crate::domain::{Farm, NewFarm};

impl ApiClient {
    pub async fn list_farms(&self) -> ApiResult<Vec<Farm>> {
        self.get("/farms").await
    }

    pub async fn create_farm(&self, farm: &NewFarm) -> ApiResult<Farm> {
        self.post("/farms", farm).await
    }

    pub async fn update_farm(&self, farm_id: &str, farm: &NewFarm) -> ApiResult<Farm> {
        self.patch(&format!("/farms/{}", segment(farm_id)), farm).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_farm() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/farms")
                .json_body(json!({"name": "Molo Farm", "size": 3.0}));
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"_id":"f1","name":"Molo Farm","size":3}"#);
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let farm = client
            .create_farm(&NewFarm {
                name: "Molo Farm".to_string(),
                location: None,
                size: Some(3.0),
            })
            .await
            .unwrap();

        assert_eq!(farm.id, "f1");
        assert_eq!(farm.size, Some(3.0));
        mock.assert();
    }
}
