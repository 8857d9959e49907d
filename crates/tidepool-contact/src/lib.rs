//! # tidepool-contact
//!
//! Coupling between the ball and the water.
//!
//! - **Feedback**: Each downward impact of a ball particle becomes a
//!   candidate forcing event for the heightfield ([`CollisionFeedback`]).
//!   [`FeedbackSink`] plugs into the body step, keeps the latest accepted
//!   event, and tallies what was dropped.
//! - **Live surface**: [`WaveSurface`] lets the ball collide against the
//!   displaced water instead of the flat rest plane.

pub mod feedback;
pub mod sink;
pub mod wave_surface;

pub use feedback::{CollisionFeedback, ImpactConfig, ImpactOutcome};
pub use sink::{ContactResult, FeedbackSink, ImpactRecord};
pub use wave_surface::WaveSurface;
