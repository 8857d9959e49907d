//! Single-slot forcing input.
//!
//! Both user clicks and ball impacts write here. Only the most recent
//! submission survives until the next step consumes it.

use serde::{Deserialize, Serialize};
use tidepool_math::Vec2;

/// An impulse applied around a texture-space point during one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForcingEvent {
    /// Center in texture space, `[0, 1]²` for on-pool points.
    pub center: Vec2,
    /// Peak height added at the center.
    pub magnitude: f32,
}

impl ForcingEvent {
    pub fn new(center: Vec2, magnitude: f32) -> Self {
        Self { center, magnitude }
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.magnitude.is_finite()
    }
}

/// Holds at most one pending [`ForcingEvent`].
#[derive(Debug, Clone, Default)]
pub struct ForcingSlot {
    pending: Option<ForcingEvent>,
}

impl ForcingSlot {
    /// Replaces any pending event. Non-finite events are refused and leave
    /// the slot untouched; returns whether the event was stored.
    pub fn submit(&mut self, event: ForcingEvent) -> bool {
        if !event.is_finite() {
            return false;
        }
        self.pending = Some(event);
        true
    }

    /// Removes and returns the pending event.
    pub fn take(&mut self) -> Option<ForcingEvent> {
        self.pending.take()
    }

    /// The pending event, if any.
    pub fn peek(&self) -> Option<&ForcingEvent> {
        self.pending.as_ref()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
