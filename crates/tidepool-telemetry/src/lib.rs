//! # tidepool-telemetry
//!
//! Event bus for simulation telemetry. The pool world emits structured
//! events (frame timing, body steps, impacts, wave state, user actions)
//! that pluggable sinks consume.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventLog, EventSink, TracingSink, VecSink};
