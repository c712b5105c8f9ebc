//! REST Client
//!
//! Thin bearer-token HTTP wrapper over the Farm Mall backend, organized by
//! domain. No retry, no caching: a non-2xx response becomes an [`ApiError`]
//! carrying the server's message.

mod auth;
mod client;
mod collaborators;
mod crops;
mod cycles;
mod error;
mod estimates;
mod farms;
mod media;

pub use auth::{AuthApi, AuthResponse, LoginRequest, RegisterRequest};
pub use client::ApiClient;
pub use collaborators::InviteCollaborator;
pub use error::{ApiError, ApiResult};
pub use estimates::{CostEstimateRequest, CostLine, HarvestEstimateRequest, RemoteCostEstimate, RemoteHarvestEstimate};
pub use media::UploadedMedia;
