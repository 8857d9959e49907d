//! Impact → forcing conversion.
//!
//! ```text
//! magnitude = min(|v.y| * gain, cap)
//! magnitude < threshold      → dropped
//! uv = world_to_uv(position)
//! uv outside [0, 1]²         → dropped
//! otherwise                  → ForcingEvent { uv, magnitude }
//! ```

use serde::{Deserialize, Serialize};
use tidepool_math::{Vec2, Vec3};
use tidepool_types::constants::{IMPACT_CAP, IMPACT_GAIN, IMPACT_THRESHOLD};
use tidepool_types::{TidepoolError, TidepoolResult};
use tidepool_water::{ForcingEvent, PoolGeometry};

/// Parameters of the impact → wave mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    /// Vertical speed to magnitude factor.
    pub gain: f32,
    /// Largest magnitude a single impact may produce.
    pub cap: f32,
    /// Magnitudes below this are ignored.
    pub threshold: f32,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            gain: IMPACT_GAIN,
            cap: IMPACT_CAP,
            threshold: IMPACT_THRESHOLD,
        }
    }
}

impl ImpactConfig {
    pub fn validate(&self) -> TidepoolResult<()> {
        for (name, value) in [("gain", self.gain), ("cap", self.cap), ("threshold", self.threshold)] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(TidepoolError::config(format!(
                    "impact {name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// What became of one impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactOutcome {
    /// Accepted; should be forwarded to the heightfield.
    Forwarded(ForcingEvent),
    /// Too weak (or not finite).
    BelowThreshold { magnitude: f32 },
    /// Landed outside the pool footprint.
    OffPool { uv: Vec2 },
}

/// Maps particle impacts to heightfield forcing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionFeedback {
    pub config: ImpactConfig,
    pub pool: PoolGeometry,
}

impl CollisionFeedback {
    pub fn new(config: ImpactConfig, pool: PoolGeometry) -> Self {
        Self { config, pool }
    }

    /// Classifies an impact at `position` with pre-bounce `velocity`.
    pub fn classify(&self, position: Vec3, velocity: Vec3) -> ImpactOutcome {
        if !velocity.y.is_finite() {
            return ImpactOutcome::BelowThreshold { magnitude: 0.0 };
        }
        let magnitude = (velocity.y.abs() * self.config.gain).min(self.config.cap);
        if magnitude < self.config.threshold {
            return ImpactOutcome::BelowThreshold { magnitude };
        }
        let uv = self.pool.world_to_uv(position);
        if !self.pool.contains_uv(uv) {
            return ImpactOutcome::OffPool { uv };
        }
        ImpactOutcome::Forwarded(ForcingEvent::new(uv, magnitude))
    }

    /// The forcing event for an impact, if it passes both filters.
    pub fn on_collision(&self, position: Vec3, velocity: Vec3) -> Option<ForcingEvent> {
        match self.classify(position, velocity) {
            ImpactOutcome::Forwarded(event) => Some(event),
            _ => None,
        }
    }
}
