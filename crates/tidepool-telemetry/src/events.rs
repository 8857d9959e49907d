//! Simulation event types.
//!
//! Lightweight value types emitted by the pool world during a frame,
//! carrying just enough data for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// An event tagged with the frame that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulated time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the whole frame (seconds).
        wall_time: f64,
    },

    /// The ball advanced one step.
    BodyStep {
        collisions: u32,
        impacts: u32,
        kinetic: f64,
        elastic: f64,
    },

    /// An impact was forwarded to the water.
    Impact {
        /// Texture-space center.
        u: f32,
        v: f32,
        magnitude: f32,
    },

    /// The heightfield advanced one step.
    WaveStep {
        /// Largest |h| after the step.
        max_height: f32,
        /// Discrete wave energy after the step.
        energy: f64,
        /// Whether a forcing event was applied.
        forced: bool,
    },

    /// A particle was grabbed (`Some`) or released (`None`).
    HoldChanged { particle: Option<u32> },

    /// A torch was switched.
    LightToggled { slot: u8, on: bool },

    /// A tunable parameter was clamped into range.
    ParameterClamped {
        name: String,
        requested: f32,
        applied: f32,
    },

    /// Custom event for extensibility.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl EventKind {
    /// Short stable name of the variant.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FrameBegin { .. } => "frame_begin",
            Self::FrameEnd { .. } => "frame_end",
            Self::BodyStep { .. } => "body_step",
            Self::Impact { .. } => "impact",
            Self::WaveStep { .. } => "wave_step",
            Self::HoldChanged { .. } => "hold_changed",
            Self::LightToggled { .. } => "light_toggled",
            Self::ParameterClamped { .. } => "parameter_clamped",
            Self::Custom { .. } => "custom",
        }
    }
}

impl SimulationEvent {
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}
