//! Constrained dragging of a picked particle.

use tidepool_math::{Mat4, Vec2, Vec4};
use tidepool_solver::MassSpringBody;
use tidepool_types::constants::PICK_RADIUS;
use tidepool_types::ParticleId;

use crate::picking::find_nearest;

/// Projection data captured when a hold begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    /// Inverse of the view-projection matrix at hold time.
    pub inv_view_proj: Mat4,
    /// Clip-space `z` of the particle at hold time.
    pub clip_z: f32,
    /// Clip-space `w` of the particle at hold time.
    pub clip_w: f32,
}

/// Pointer-driven selection and hold of one particle.
#[derive(Debug, Clone)]
pub struct Grabber {
    pick_radius: f32,
    selected: Option<ParticleId>,
    anchor: Option<DragAnchor>,
}

impl Default for Grabber {
    fn default() -> Self {
        Self::new(PICK_RADIUS)
    }
}

impl Grabber {
    pub fn new(pick_radius: f32) -> Self {
        Self {
            pick_radius,
            selected: None,
            anchor: None,
        }
    }

    /// Replaces the selection with the particle nearest to `screen`.
    pub fn select(&mut self, body: &MassSpringBody, screen: Vec2, view_proj: Mat4) -> Option<ParticleId> {
        self.selected = find_nearest(body.state(), screen, view_proj, self.pick_radius);
        self.selected
    }

    pub fn selected(&self) -> Option<ParticleId> {
        self.selected
    }

    pub fn anchor(&self) -> Option<&DragAnchor> {
        self.anchor.as_ref()
    }

    pub fn is_holding(&self) -> bool {
        self.anchor.is_some()
    }

    /// Starts holding the selected particle.
    ///
    /// Returns false when nothing is selected or `view_proj` is not
    /// invertible.
    pub fn begin_hold(&mut self, body: &mut MassSpringBody, view_proj: Mat4) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let det = view_proj.determinant();
        if det == 0.0 || !det.is_finite() {
            tracing::warn!("view-projection matrix is singular, hold refused");
            return false;
        }
        if body.grab(id).is_err() {
            return false;
        }

        let clip = view_proj * body.state().position(id.index()).extend(1.0);
        self.anchor = Some(DragAnchor {
            inv_view_proj: view_proj.inverse(),
            clip_z: clip.z,
            clip_w: clip.w,
        });
        true
    }

    /// Moves the hold target under the pointer at the captured depth.
    ///
    /// Returns false without a hold or when the unprojected `w` is zero.
    pub fn update_hold(&mut self, body: &mut MassSpringBody, screen: Vec2) -> bool {
        let Some(anchor) = &self.anchor else {
            return false;
        };
        let w = anchor.clip_w;
        let clip = Vec4::new(screen.x * w, screen.y * w, anchor.clip_z, w);
        let world = anchor.inv_view_proj * clip;
        if world.w == 0.0 {
            return false;
        }
        body.set_hold_target(world.truncate() / world.w)
    }

    /// Releases the hold and clears the selection.
    pub fn end_hold(&mut self, body: &mut MassSpringBody) {
        if self.anchor.take().is_some() {
            body.release();
        }
        self.selected = None;
    }
}
