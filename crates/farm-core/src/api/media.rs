//! Media Upload Endpoint

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

use super::client::{decode_body, ApiClient};
use super::error::{ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
}

impl ApiClient {
    /// Upload one file as the `file` multipart field
    pub async fn upload_media(&self, file_name: &str, mime: &str, bytes: Vec<u8>) -> ApiResult<UploadedMedia> {
        if bytes.is_empty() {
            return Err(ApiError::InvalidRequest("file is empty".to_string()));
        }
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("file", part);

        let path = "/media/upload";
        let builder = self.request(Method::POST, path).multipart(form);
        let body = self.execute(Method::POST, path, builder).await?;
        decode_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_upload_sends_multipart_file() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/media/upload")
                .header_exists("authorization")
                .body_includes("filename=\"leaf.jpg\"");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"url":"https://cdn.example/leaf.jpg"}"#);
        });

        let client = ApiClient::new(server.base_url()).with_token("t");
        let uploaded = client
            .upload_media("leaf.jpg", "image/jpeg", b"fake-jpeg-bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(uploaded.url, "https://cdn.example/leaf.jpg");
        mock.assert();
    }

    #[tokio::test]
    async fn test_empty_file_rejected_locally() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.upload_media("x.png", "image/png", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
