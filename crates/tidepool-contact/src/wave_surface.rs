//! Collision against the live water surface.

use tidepool_solver::CollisionSurface;
use tidepool_water::HeightfieldSim;

/// Samples the displaced heightfield as the ball's collision surface.
///
/// Outside the pool the surface is the flat rest level.
#[derive(Clone, Copy)]
pub struct WaveSurface<'a> {
    sim: &'a HeightfieldSim,
}

impl<'a> WaveSurface<'a> {
    pub fn new(sim: &'a HeightfieldSim) -> Self {
        Self { sim }
    }
}

impl CollisionSurface for WaveSurface<'_> {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.sim.surface_height_at(x, z)
    }
}
