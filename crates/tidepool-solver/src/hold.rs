//! Hold (drag) constraint on a single particle.

use tidepool_math::Vec3;
use tidepool_types::ParticleId;

/// Whether a particle is currently pinned by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPhase {
    /// All particles move freely.
    Resting,
    /// One particle follows a hold target.
    Held(ParticleId),
}

/// A particle pinned to a target position.
///
/// Each step the particle's velocity is zeroed before integration and its
/// position overwritten with `target` afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldConstraint {
    pub particle: ParticleId,
    pub target: Vec3,
}
