//! # tidepool-scene
//!
//! Frame orchestration for the pool.
//!
//! [`PoolWorld`] owns the heightfield, the ball, the torches, the tunable
//! parameters and the input latch, and advances them in a fixed order once
//! per frame.

pub mod input;
pub mod lights;
pub mod params;
pub mod world;

pub use input::{InputEvent, InputLatch};
pub use lights::{LightRig, LightUniforms, Torch, TORCH_HIT_RADIUS};
pub use params::{ParameterClamp, TunableParams};
pub use world::{default_ball_mesh, FrameAction, FrameReport, PoolWorld};
