//! # tidepool-math
//!
//! Math primitives for the Tidepool simulation.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat4`, etc.)
//! - Shader-style scalar helpers (`smoothstep`)
//! - Rays with sphere and horizontal-plane intersection

pub mod ray;
pub mod scalar;

pub use ray::Ray;
pub use scalar::{smoothstep, squared_distance_2d};

// Re-export glam types as the canonical math types for Tidepool.
pub use glam::{Mat4, Vec2, Vec3, Vec4};
