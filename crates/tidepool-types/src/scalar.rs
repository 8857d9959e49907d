//! Scalar type alias for the simulation.
//!
//! Heights and particle state are `f32` so the buffers can be handed to a
//! GPU renderer without conversion.

/// The floating-point type used throughout the simulation.
pub type Scalar = f32;
