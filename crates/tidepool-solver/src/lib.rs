//! # tidepool-solver
//!
//! Mass-spring deformable body with explicit Euler integration.
//!
//! ## Key Types
//!
//! - [`MassSpringBody`]: The ball: placed mesh, particles, springs, hold.
//! - [`ParticleState`]: SoA buffers for positions, velocities, forces.
//! - [`SpringNetwork`]: Springs built from the unique mesh edges.
//! - [`BodyConfig`]: Gravity, mass, stiffness, damping, restitution.
//! - [`CollisionSurface`] / [`ImpactSink`]: Seams to the collision plane
//!   and to whatever consumes impacts.

pub mod body;
pub mod config;
pub mod hold;
pub mod springs;
pub mod state;
pub mod surface;

pub use body::{MassSpringBody, RenderView, StepReport};
pub use config::BodyConfig;
pub use hold::{BodyPhase, HoldConstraint};
pub use springs::{Spring, SpringNetwork};
pub use state::ParticleState;
pub use surface::{CollisionSurface, FlatPlane, ImpactLog, ImpactSink, NullImpactSink};
