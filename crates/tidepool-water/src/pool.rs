//! Mapping between world space and the heightfield's texture space.

use serde::{Deserialize, Serialize};
use tidepool_math::{Vec2, Vec3};
use tidepool_types::constants::POOL_DIMENSION;

/// Square pool footprint centered on the world origin in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolGeometry {
    /// Side length in world units.
    pub dimension: f32,
}

impl Default for PoolGeometry {
    fn default() -> Self {
        Self {
            dimension: POOL_DIMENSION,
        }
    }
}

impl PoolGeometry {
    pub fn new(dimension: f32) -> Self {
        Self { dimension }
    }

    /// `(x / dim + 0.5, z / dim + 0.5)`. The `y` component is ignored.
    #[inline]
    pub fn world_to_uv(&self, p: Vec3) -> Vec2 {
        Vec2::new(p.x / self.dimension + 0.5, p.z / self.dimension + 0.5)
    }

    /// Inverse of [`world_to_uv`](Self::world_to_uv) at height `y`.
    #[inline]
    pub fn uv_to_world(&self, uv: Vec2, y: f32) -> Vec3 {
        Vec3::new((uv.x - 0.5) * self.dimension, y, (uv.y - 0.5) * self.dimension)
    }

    /// True if `uv` lies in the closed unit square.
    #[inline]
    pub fn contains_uv(&self, uv: Vec2) -> bool {
        (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)
    }

    /// Half the side length.
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.dimension * 0.5
    }
}
