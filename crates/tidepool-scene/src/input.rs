//! Input latched between frames.
//!
//! Pointer and light events arrive whenever the host delivers them and
//! are queued here. The world drains the queue at the start of its next
//! tick, so a frame never sees input change halfway through.

use tidepool_math::{Mat4, Vec2};
use tidepool_types::LightId;

/// Something the user did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button pressed at a point in normalized device coordinates.
    PointerDown(Vec2),
    /// Pointer moved while pressed.
    PointerMove(Vec2),
    /// Button released, or the pointer left the canvas.
    PointerUp,
    /// Flip one torch.
    ToggleLight(LightId),
    /// Switch every torch on or off.
    SetAllLights(bool),
}

/// Queue of pending input plus the camera it was produced under.
#[derive(Debug, Clone)]
pub struct InputLatch {
    events: Vec<InputEvent>,
    view_proj: Mat4,
}

impl Default for InputLatch {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            view_proj: Mat4::IDENTITY,
        }
    }
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, ndc: Vec2) {
        self.events.push(InputEvent::PointerDown(ndc));
    }

    /// Consecutive moves collapse into the latest one.
    pub fn pointer_move(&mut self, ndc: Vec2) {
        if let Some(InputEvent::PointerMove(last)) = self.events.last_mut() {
            *last = ndc;
        } else {
            self.events.push(InputEvent::PointerMove(ndc));
        }
    }

    pub fn pointer_up(&mut self) {
        self.events.push(InputEvent::PointerUp);
    }

    pub fn toggle_light(&mut self, id: LightId) {
        self.events.push(InputEvent::ToggleLight(id));
    }

    pub fn set_all_lights(&mut self, on: bool) {
        self.events.push(InputEvent::SetAllLights(on));
    }

    /// Camera used to interpret pointer positions.
    pub fn set_view_proj(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj;
    }

    pub fn view_proj(&self) -> Mat4 {
        self.view_proj
    }

    pub fn pending(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and returns every queued event in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}
