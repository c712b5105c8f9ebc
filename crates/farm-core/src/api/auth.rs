//! Auth Endpoints

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiResult;
use crate::domain::{Farm, User};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    /// Email or phone number
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_county: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// The calls the session manager needs
#[async_trait(?Send)]
pub trait AuthApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;
    async fn profile(&self, token: &str) -> ApiResult<User>;
    async fn farms(&self, token: &str) -> ApiResult<Vec<Farm>>;
}

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.post("/auth/register", request).await
    }

    pub async fn fetch_profile(&self) -> ApiResult<User> {
        self.get("/auth/profile").await
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        #[derive(Serialize)]
        struct Args<'a> {
            email: &'a str,
        }
        let _: serde_json::Value = self.post("/auth/forgot-password", &Args { email }).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        ApiClient::login(self, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        ApiClient::register(self, request).await
    }

    async fn profile(&self, token: &str) -> ApiResult<User> {
        self.clone().with_token(token).fetch_profile().await
    }

    async fn farms(&self, token: &str) -> ApiResult<Vec<Farm>> {
        self.clone().with_token(token).list_farms().await
    }
}
