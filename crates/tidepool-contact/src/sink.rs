//! Impact sink that feeds the heightfield.

use tidepool_math::Vec3;
use tidepool_solver::ImpactSink;
use tidepool_water::ForcingEvent;

use crate::feedback::{CollisionFeedback, ImpactOutcome};

/// Tally of impacts seen by a [`FeedbackSink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactResult {
    /// Every impact reported by the body.
    pub impacts: u32,
    /// Impacts that produced a forcing event.
    pub forwarded: u32,
    /// Impacts too weak to matter.
    pub below_threshold: u32,
    /// Impacts outside the pool.
    pub off_pool: u32,
}

/// One impact as seen by the sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactRecord {
    pub position: Vec3,
    pub velocity: Vec3,
    pub outcome: ImpactOutcome,
}

/// Collects impacts during a body step.
///
/// Only the most recent accepted event is kept, so a step with many
/// impacts still produces a single disturbance.
#[derive(Debug, Clone, Default)]
pub struct FeedbackSink {
    feedback: CollisionFeedback,
    latest: Option<ForcingEvent>,
    result: ContactResult,
    records: Vec<ImpactRecord>,
}

impl FeedbackSink {
    pub fn new(feedback: CollisionFeedback) -> Self {
        Self {
            feedback,
            ..Default::default()
        }
    }

    pub fn feedback(&self) -> &CollisionFeedback {
        &self.feedback
    }

    pub fn set_feedback(&mut self, feedback: CollisionFeedback) {
        self.feedback = feedback;
    }

    /// The latest accepted event.
    pub fn latest(&self) -> Option<&ForcingEvent> {
        self.latest.as_ref()
    }

    /// Removes and returns the latest accepted event.
    pub fn take_latest(&mut self) -> Option<ForcingEvent> {
        self.latest.take()
    }

    pub fn result(&self) -> &ContactResult {
        &self.result
    }

    /// Every impact since the last [`clear`](Self::clear), in order.
    pub fn records(&self) -> &[ImpactRecord] {
        &self.records
    }

    /// Forgets the pending event, the tally and the records.
    pub fn clear(&mut self) {
        self.latest = None;
        self.result = ContactResult::default();
        self.records.clear();
    }
}

impl ImpactSink for FeedbackSink {
    fn on_impact(&mut self, position: Vec3, velocity: Vec3) {
        let outcome = self.feedback.classify(position, velocity);
        self.result.impacts += 1;
        match outcome {
            ImpactOutcome::Forwarded(event) => {
                self.result.forwarded += 1;
                self.latest = Some(event);
            }
            ImpactOutcome::BelowThreshold { .. } => self.result.below_threshold += 1,
            ImpactOutcome::OffPool { uv } => {
                self.result.off_pool += 1;
                tracing::trace!(?position, ?uv, "impact outside pool discarded");
            }
        }
        self.records.push(ImpactRecord {
            position,
            velocity,
            outcome,
        });
    }
}
