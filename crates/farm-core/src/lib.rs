//! Farm Mall Core
//!
//! Everything the browser app needs that does not touch the DOM:
//! - domain: records mirrored from the REST backend
//! - api: thin bearer-token HTTP client
//! - session: login/register/logout and token persistence
//! - gate: cookie-presence route gate
//! - calculator: cost, harvest-date and investment formulas
//! - permissions: collaborator permission editor state
//! - dashboard: production-cycle list filtering, sorting and summaries

pub mod api;
pub mod calculator;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod gate;
pub mod permissions;
pub mod session;

pub use api::{ApiClient, ApiError, ApiResult};
pub use config::{AppConfig, ConfigError};
pub use domain::{DomainError, DomainResult};
pub use session::{AuthSession, Redirect, RestoreOutcome, SessionError, SessionResult};
