//! Seams between the body and its environment.
//!
//! The body collides against a [`CollisionSurface`] and reports each
//! downward impact to an [`ImpactSink`]. Both are trait objects so the
//! scene can swap a fixed plane for a live water surface, and route
//! impacts into the wave field.

use tidepool_math::Vec3;
use tidepool_types::constants::WATER_LEVEL;

/// A height function over the XZ plane. Particles below it are pushed up.
pub trait CollisionSurface {
    /// Surface height at world `(x, z)`.
    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// Horizontal plane at a fixed height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatPlane {
    pub height: f32,
}

impl FlatPlane {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Default for FlatPlane {
    fn default() -> Self {
        Self::new(WATER_LEVEL)
    }
}

impl CollisionSurface for FlatPlane {
    #[inline]
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}

/// Receives impacts: a particle clamped to the surface while moving down.
///
/// `position` is the clamped position; `velocity` is the velocity before
/// restitution is applied.
pub trait ImpactSink {
    fn on_impact(&mut self, position: Vec3, velocity: Vec3);
}

/// Discards every impact.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullImpactSink;

impl ImpactSink for NullImpactSink {
    fn on_impact(&mut self, _position: Vec3, _velocity: Vec3) {}
}

/// Records every impact in order.
#[derive(Debug, Clone, Default)]
pub struct ImpactLog {
    pub impacts: Vec<(Vec3, Vec3)>,
}

impl ImpactSink for ImpactLog {
    fn on_impact(&mut self, position: Vec3, velocity: Vec3) {
        self.impacts.push((position, velocity));
    }
}
