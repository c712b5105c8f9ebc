//! HTTP Client Core
//!
//! Shared request plumbing for every endpoint module.

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, CONTROLS};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use crate::config::AppConfig;

/// Characters that cannot appear raw inside one path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escape an id for interpolation into a request path
pub(crate) fn segment(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, PATH_SEGMENT)
}

/// Bearer-token client for the Farm Mall REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.execute(Method::GET, path, self.request(Method::GET, path)).await?;
        decode_body(&body)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(payload);
        let body = self.execute(Method::POST, path, builder).await?;
        decode_body(&body)
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PATCH, path).json(payload);
        let body = self.execute(Method::PATCH, path, builder).await?;
        decode_body(&body)
    }

    /// DELETE ignores the response body
    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(Method::DELETE, path, self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Send and return the body of a 2xx response
    pub(crate) async fn execute(&self, method: Method, path: &str, builder: RequestBuilder) -> ApiResult<String> {
        debug!(%method, path, authenticated = self.token.is_some(), "api request");
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "api request failed");
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        Ok(body)
    }
}

/// Decode a bare payload or one wrapped in `{"data": ...}`
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if let Some(inner) = value.get("data") {
        if let Ok(decoded) = T::deserialize(inner) {
            return Ok(decoded);
        }
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
