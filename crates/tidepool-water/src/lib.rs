//! # tidepool-water
//!
//! Heightfield wave simulation for the pool surface.
//!
//! The field is an R×R grid of `(current, previous)` height pairs held in two
//! alternating buffers. Each [`HeightfieldSim::step`] reads the front buffer,
//! writes every cell of the back buffer in parallel, then swaps.
//!
//! ## Key Types
//!
//! - [`WaveConfig`]: Resolution, damping, propagation, forcing radius, boundary.
//! - [`HeightfieldSim`]: The double-buffered simulator.
//! - [`ForcingEvent`] / [`ForcingSlot`]: Single-slot impulse input.
//! - [`PoolGeometry`]: World ↔ texture-space mapping of the pool footprint.

pub mod buffer;
pub mod config;
pub mod forcing;
pub mod pool;
pub mod sim;

pub use buffer::HeightBuffer;
pub use config::{Boundary, WaveConfig};
pub use forcing::{ForcingEvent, ForcingSlot};
pub use pool::PoolGeometry;
pub use sim::HeightfieldSim;
