//! # tidepool-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the Tidepool water-pool simulation.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other Tidepool crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{TidepoolError, TidepoolResult};
pub use ids::{LightId, ParticleId, SpringId};
pub use scalar::Scalar;
