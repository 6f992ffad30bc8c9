//! # Frontdesk Domain
//!
//! Business domain types and models for Frontdesk.
//!
//! This crate contains:
//! - Entity types (Appointment, Call, ClientRecord, UserProfile)
//! - Status enumerations and the fixed display mapping
//! - Statistics types and the change-event envelope
//! - Validation rules for staff-entered drafts
//! - Domain error types and Result definitions
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other Frontdesk crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use validation::{FieldError, ValidationErrors};
