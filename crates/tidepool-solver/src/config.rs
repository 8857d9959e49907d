//! Body configuration.
//!
//! Physical parameters of the ball plus how a loaded mesh is placed in the
//! pool before springs are built.

use serde::{Deserialize, Serialize};
use tidepool_math::Vec3;
use tidepool_types::constants::{
    DEFAULT_PARTICLE_MASS, DEFAULT_RESTITUTION, DEFAULT_SPRING_DAMPING, DEFAULT_STIFFNESS, GRAVITY,
};
use tidepool_types::{TidepoolError, TidepoolResult};

/// Configuration for a [`MassSpringBody`](crate::MassSpringBody).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Gravity vector [gx, gy, gz] in m/s².
    pub gravity: [f32; 3],

    /// Mass shared by every particle.
    pub mass: f32,

    /// Spring stiffness (Hooke's constant).
    pub stiffness: f32,

    /// Spring damping along the spring axis.
    pub damping: f32,

    /// Fraction of downward speed returned on impact, in [0, 1].
    pub restitution: f32,

    /// Uniform scale applied on load. `None` scales by the mesh's largest extent.
    pub scale: Option<f32>,

    /// Height added to every vertex after centering and scaling.
    pub drop_height: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -GRAVITY, 0.0],
            mass: DEFAULT_PARTICLE_MASS,
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_SPRING_DAMPING,
            restitution: DEFAULT_RESTITUTION,
            scale: None,
            drop_height: 0.0,
        }
    }
}

impl BodyConfig {
    /// A ball that falls freely: no springs, no damping.
    pub fn free_fall() -> Self {
        Self {
            stiffness: 0.0,
            damping: 0.0,
            ..Default::default()
        }
    }

    /// Gravity as a vector.
    #[inline]
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    /// Checks every field range.
    pub fn validate(&self) -> TidepoolResult<()> {
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(TidepoolError::config("gravity must be finite"));
        }
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(TidepoolError::config(format!("mass must be positive, got {}", self.mass)));
        }
        if !(self.stiffness >= 0.0 && self.stiffness.is_finite()) {
            return Err(TidepoolError::config(format!(
                "stiffness must be non-negative, got {}",
                self.stiffness
            )));
        }
        if !(self.damping >= 0.0 && self.damping.is_finite()) {
            return Err(TidepoolError::config(format!(
                "spring damping must be non-negative, got {}",
                self.damping
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(TidepoolError::config(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if let Some(scale) = self.scale {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(TidepoolError::config(format!("scale must be positive, got {scale}")));
            }
        }
        if !self.drop_height.is_finite() {
            return Err(TidepoolError::config("drop height must be finite"));
        }
        Ok(())
    }
}
