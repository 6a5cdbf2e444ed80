//! Domain foundation: error model, identifiers, document identity.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AssetId, ConnectionId, EventId, ReportId, ScheduleId};
