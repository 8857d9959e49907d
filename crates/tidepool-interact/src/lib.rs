//! # tidepool-interact
//!
//! Screen-space picking and dragging of ball particles.
//!
//! Picking projects every particle through the view-projection matrix and
//! selects the one closest to the pointer in normalized device coordinates.
//! Dragging keeps the picked particle at its grab-time clip-space depth and
//! unprojects the moving pointer to a world-space hold target.

pub mod drag;
pub mod picking;

pub use drag::{DragAnchor, Grabber};
pub use picking::find_nearest;
