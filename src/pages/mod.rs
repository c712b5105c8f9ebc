//! Pages
//!
//! One component per route.

mod admin;
mod calculators;
mod collaborators;
mod cycle_detail;
mod dashboard;
mod forgot_password;
mod landing;
mod login;
mod not_found;
mod register;

pub use admin::AdminPage;
pub use calculators::{DashboardCalculatorsPage, PublicCalculatorsPage};
pub use collaborators::CollaboratorsPage;
pub use cycle_detail::CycleDetailPage;
pub use dashboard::DashboardPage;
pub use forgot_password::ForgotPasswordPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
