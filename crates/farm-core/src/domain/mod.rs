//! Domain Layer
//!
//! Records mirrored from the REST backend. The backend owns them; the app
//! only keeps transient copies that are replaced on refetch.

mod activity;
mod collaborator;
mod crop;
mod cycle;
mod entity;
mod farm;
pub mod serde_helpers;
mod user;

pub use activity::{Activity, ActivityInput, ActivityStatus, ActivityType, LaborType};
pub use collaborator::{Collaborator, CollaboratorRole, CollaboratorUser, PermissionFlag, Permissions};
pub use crop::CropVariety;
pub use cycle::{CropVarietyRef, CycleStatus, CycleUpdate, NewCycle, ProductionCycle};
pub use entity::{DomainError, DomainResult, Entity};
pub use farm::{Farm, NewFarm};
pub use user::{Role, SubscriptionTier, User};
