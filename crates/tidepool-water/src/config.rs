//! Wave simulation configuration.

use serde::{Deserialize, Serialize};
use tidepool_types::constants::{
    DEFAULT_WAVE_DAMPING, FORCING_RADIUS, PROPAGATION_FACTOR, SIM_RESOLUTION, SURFACE_DISPLAY_SCALE,
};
use tidepool_types::{TidepoolError, TidepoolResult};

/// How neighbour lookups behave at the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Out-of-range neighbours read the nearest edge cell.
    #[default]
    Clamp,
    /// The grid is a torus.
    Wrap,
}

/// Configuration for the heightfield simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Grid cells per side.
    pub resolution: usize,

    /// Per-step damping multiplier, in (0, 1).
    pub damping: f32,

    /// Weight of the neighbour-average term.
    pub propagation: f32,

    /// Forcing footprint radius in texture space.
    pub forcing_radius: f32,

    /// Edge behavior for neighbour sampling.
    pub boundary: Boundary,

    /// Height multiplier applied when sampling the surface in world space.
    pub display_scale: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            resolution: SIM_RESOLUTION,
            damping: DEFAULT_WAVE_DAMPING,
            propagation: PROPAGATION_FACTOR,
            forcing_radius: FORCING_RADIUS,
            boundary: Boundary::Clamp,
            display_scale: SURFACE_DISPLAY_SCALE,
        }
    }
}

impl WaveConfig {
    /// A small grid for tests and quick runs.
    pub fn preview() -> Self {
        Self {
            resolution: 64,
            ..Default::default()
        }
    }

    /// Checks every field range.
    pub fn validate(&self) -> TidepoolResult<()> {
        if self.resolution == 0 {
            return Err(TidepoolError::config("wave resolution must be at least 1"));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(TidepoolError::config(format!(
                "wave damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if !(self.propagation > 0.0 && self.propagation < 2.0) {
            return Err(TidepoolError::config(format!(
                "wave propagation must be in (0, 2), got {}",
                self.propagation
            )));
        }
        if !(self.forcing_radius > 0.0 && self.forcing_radius.is_finite()) {
            return Err(TidepoolError::config(format!(
                "forcing radius must be positive, got {}",
                self.forcing_radius
            )));
        }
        if !self.display_scale.is_finite() {
            return Err(TidepoolError::config("display scale must be finite"));
        }
        Ok(())
    }
}
