//! Domain Layer - Core Entity Trait
//!
//! All backend records carry a string identifier.

use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// Common result type for local domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors raised before anything reaches the network
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
