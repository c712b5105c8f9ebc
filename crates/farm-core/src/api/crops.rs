//! Crop Variety Endpoints

use super::client::ApiClient;
use super::error::ApiResult;
use crate::domain::CropVariety;

impl ApiClient {
    pub async fn list_crop_varieties(&self) -> ApiResult<Vec<CropVariety>> {
        self.get("/crop-varieties").await
    }
}
