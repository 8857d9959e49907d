//! Interactive tunables.
//!
//! The slider surface of the pool. Setters clamp into range instead of
//! failing, log a warning when they do, and remember the clamp so the
//! world can report it. Values reach the simulators only at frame start.

use std::ops::RangeInclusive;

use tidepool_io::SceneConfig;
use tidepool_solver::BodyConfig;
use tidepool_types::constants::MAX_WAVE_DAMPING;

/// Signed vertical gravity, m/s².
pub const GRAVITY_RANGE: RangeInclusive<f32> = -30.0..=30.0;
pub const MASS_RANGE: RangeInclusive<f32> = 0.01..=10.0;
pub const STIFFNESS_RANGE: RangeInclusive<f32> = 0.0..=1000.0;
pub const BALL_DAMPING_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const RESTITUTION_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const WAVE_DAMPING_RANGE: RangeInclusive<f32> = 0.5..=MAX_WAVE_DAMPING;
pub const CLICK_FORCE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// A setter that had to change the requested value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterClamp {
    pub name: &'static str,
    pub requested: f32,
    pub applied: f32,
}

/// Scalar tunables shared by the ball and the water.
#[derive(Debug, Clone, PartialEq)]
pub struct TunableParams {
    gravity_y: f32,
    mass: f32,
    stiffness: f32,
    ball_damping: f32,
    restitution: f32,
    wave_damping: f32,
    click_force: f32,
    clamps: Vec<ParameterClamp>,
}

impl Default for TunableParams {
    fn default() -> Self {
        Self::from_scene(&SceneConfig::default())
    }
}

impl TunableParams {
    /// Starting values taken from a scene as written.
    ///
    /// The scene has already passed validation, so values outside the
    /// slider ranges (a stiff ball, a heavily damped pool) are kept. Only
    /// the interactive setters clamp.
    pub fn from_scene(config: &SceneConfig) -> Self {
        let body = &config.body;
        Self {
            gravity_y: body.gravity[1],
            mass: body.mass,
            stiffness: body.stiffness,
            ball_damping: body.damping,
            restitution: body.restitution,
            wave_damping: config.wave.damping,
            click_force: config.click_force,
            clamps: Vec::new(),
        }
    }

    // ─── Setters ──────────────────────────────────────────────

    /// Vertical gravity component. Negative pulls down.
    pub fn set_gravity(&mut self, value: f32) -> f32 {
        self.gravity_y = self.clamp("gravity", value, GRAVITY_RANGE, self.gravity_y);
        self.gravity_y
    }

    pub fn set_mass(&mut self, value: f32) -> f32 {
        self.mass = self.clamp("mass", value, MASS_RANGE, self.mass);
        self.mass
    }

    pub fn set_stiffness(&mut self, value: f32) -> f32 {
        self.stiffness = self.clamp("stiffness", value, STIFFNESS_RANGE, self.stiffness);
        self.stiffness
    }

    pub fn set_ball_damping(&mut self, value: f32) -> f32 {
        self.ball_damping = self.clamp("ball_damping", value, BALL_DAMPING_RANGE, self.ball_damping);
        self.ball_damping
    }

    pub fn set_restitution(&mut self, value: f32) -> f32 {
        self.restitution = self.clamp("restitution", value, RESTITUTION_RANGE, self.restitution);
        self.restitution
    }

    pub fn set_wave_damping(&mut self, value: f32) -> f32 {
        self.wave_damping = self.clamp("wave_damping", value, WAVE_DAMPING_RANGE, self.wave_damping);
        self.wave_damping
    }

    /// Slider position in thousandths, as the water damping slider reports it.
    pub fn set_wave_damping_slider(&mut self, thousandths: f32) -> f32 {
        self.set_wave_damping(thousandths / 1000.0)
    }

    pub fn set_click_force(&mut self, value: f32) -> f32 {
        self.click_force = self.clamp("click_force", value, CLICK_FORCE_RANGE, self.click_force);
        self.click_force
    }

    /// Slider position in hundredths, as the force slider reports it.
    pub fn set_click_force_slider(&mut self, hundredths: f32) -> f32 {
        self.set_click_force(hundredths / 100.0)
    }

    // ─── Getters ──────────────────────────────────────────────

    pub fn gravity(&self) -> f32 {
        self.gravity_y
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn ball_damping(&self) -> f32 {
        self.ball_damping
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn wave_damping(&self) -> f32 {
        self.wave_damping
    }

    pub fn click_force(&self) -> f32 {
        self.click_force
    }

    /// `base` with the ball tunables written over it. Horizontal gravity and
    /// placement fields are kept.
    pub fn body_config(&self, base: &BodyConfig) -> BodyConfig {
        BodyConfig {
            gravity: [base.gravity[0], self.gravity_y, base.gravity[2]],
            mass: self.mass,
            stiffness: self.stiffness,
            damping: self.ball_damping,
            restitution: self.restitution,
            ..base.clone()
        }
    }

    /// Clamps recorded since the last drain, oldest first.
    pub fn take_clamps(&mut self) -> Vec<ParameterClamp> {
        std::mem::take(&mut self.clamps)
    }

    fn clamp(&mut self, name: &'static str, value: f32, range: RangeInclusive<f32>, current: f32) -> f32 {
        let applied = if value.is_nan() {
            current
        } else {
            value.clamp(*range.start(), *range.end())
        };
        if applied != value {
            tracing::warn!(name, requested = value, applied, "parameter clamped");
            self.clamps.push(ParameterClamp {
                name,
                requested: value,
                applied,
            });
        }
        applied
    }
}
