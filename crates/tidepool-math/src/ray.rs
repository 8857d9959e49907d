//! Rays for picking against lights and the water plane.

use glam::{Mat4, Vec2, Vec3};

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing the direction.
    ///
    /// Returns `None` if the direction has zero length.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Builds the camera ray through a point in normalized device coordinates.
    ///
    /// Unprojects the near (`z = -1`) and far (`z = 1`) clip planes with the
    /// inverse view-projection matrix and points the ray from near to far.
    pub fn from_ndc(inv_view_proj: Mat4, ndc: Vec2) -> Option<Self> {
        let near = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        Self::new(near, far - near)
    }

    /// Point along the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest non-negative hit parameter against a sphere.
    ///
    /// Hits from inside the sphere (entry point behind the origin) are
    /// reported as misses.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        (t >= 0.0).then_some(t)
    }

    /// Hit parameter against the horizontal plane `y = height`.
    pub fn intersect_horizontal_plane(&self, height: f32) -> Option<f32> {
        if self.direction.y.abs() < f32::EPSILON {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then_some(t)
    }
}
