//! The torch bank.
//!
//! A fixed number of light slots, each either empty or holding a torch.
//! Switched-off torches keep their slot and position so they can be hit
//! by the pointer and switched back on.

use serde::{Deserialize, Serialize};
use tidepool_math::{Ray, Vec3};
use tidepool_types::constants::MAX_LIGHTS;
use tidepool_types::{LightId, TidepoolError, TidepoolResult};
use tidepool_water::PoolGeometry;

/// Hit radius of a torch: model radius 0.5, drawn at scale 2, padded 2×.
pub const TORCH_HIT_RADIUS: f32 = 0.5 * 2.0 * 2.0;

/// Height of the default torches above the water.
pub const TORCH_HEIGHT: f32 = 2.0;

/// Distance of the default torches from the pool edge.
pub const TORCH_INSET: f32 = 4.0;

/// Position reported for empty slots, far below anything it could light.
pub const EMPTY_SLOT_POSITION: Vec3 = Vec3::new(0.0, -9999.0, 0.0);

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Torch {
    pub position: Vec3,
    pub color: Vec3,
    pub is_on: bool,
}

impl Torch {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            color,
            is_on: true,
        }
    }
}

/// Per-slot arrays handed to the water shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUniforms {
    pub positions: [Vec3; MAX_LIGHTS],
    /// Zero for switched-off torches and empty slots.
    pub colors: [Vec3; MAX_LIGHTS],
}

/// Fixed-size bank of optional torches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    slots: [Option<Torch>; MAX_LIGHTS],
}

impl LightRig {
    /// A rig with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Eight coloured torches around the pool edge, all lit.
    ///
    /// Corners and edge midpoints, going from the `-x, +z` corner along the
    /// `+z` edge, then clockwise seen from above.
    pub fn default_torches(pool: &PoolGeometry) -> Self {
        let e = pool.half_extent() - TORCH_INSET;
        let h = TORCH_HEIGHT;
        let torches = [
            (Vec3::new(-e, h, e), Vec3::new(1.0, 0.0, 0.0)),
            (Vec3::new(0.0, h, e), Vec3::new(1.0, 0.5, 0.0)),
            (Vec3::new(e, h, e), Vec3::new(1.0, 1.0, 0.0)),
            (Vec3::new(e, h, 0.0), Vec3::new(0.5, 1.0, 0.5)),
            (Vec3::new(e, h, -e), Vec3::new(0.0, 0.0, 1.0)),
            (Vec3::new(0.0, h, -e), Vec3::new(0.2, 0.1, 0.4)),
            (Vec3::new(-e, h, -e), Vec3::new(0.5, 0.0, 1.0)),
            (Vec3::new(-e, h, 0.0), Vec3::new(0.9, 1.0, 0.5)),
        ];

        let mut rig = Self::new();
        for (slot, (position, color)) in rig.slots.iter_mut().zip(torches) {
            *slot = Some(Torch::new(position, color));
        }
        rig
    }

    /// Puts a torch into `id`, replacing whatever was there.
    pub fn insert(&mut self, id: LightId, torch: Torch) -> TidepoolResult<()> {
        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or_else(|| TidepoolError::config(format!("light slot {} out of range", id.0)))?;
        *slot = Some(torch);
        Ok(())
    }

    /// Empties `id`, returning its torch.
    pub fn remove(&mut self, id: LightId) -> Option<Torch> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    pub fn get(&self, id: LightId) -> Option<&Torch> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Flips a torch on or off. Returns the new state, or `None` for an
    /// empty or out-of-range slot.
    pub fn toggle(&mut self, id: LightId) -> Option<bool> {
        let torch = self.slots.get_mut(id.index())?.as_mut()?;
        torch.is_on = !torch.is_on;
        tracing::debug!(slot = id.0, on = torch.is_on, "torch toggled");
        Some(torch.is_on)
    }

    /// Switches every torch on or off.
    pub fn set_all(&mut self, on: bool) {
        for torch in self.slots.iter_mut().flatten() {
            torch.is_on = on;
        }
    }

    /// Occupied slots with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (LightId, &Torch)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|t| (LightId(i as u8), t)))
    }

    pub fn torch_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn lit_count(&self) -> usize {
        self.slots.iter().flatten().filter(|t| t.is_on).count()
    }

    pub fn uniforms(&self) -> LightUniforms {
        let mut uniforms = LightUniforms {
            positions: [EMPTY_SLOT_POSITION; MAX_LIGHTS],
            colors: [Vec3::ZERO; MAX_LIGHTS],
        };
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(torch) = slot {
                uniforms.positions[i] = torch.position;
                if torch.is_on {
                    uniforms.colors[i] = torch.color;
                }
            }
        }
        uniforms
    }

    /// The torch whose hit sphere the ray enters first.
    ///
    /// Off torches are hit-testable. On equal distances the lower slot wins.
    pub fn hit_test(&self, ray: &Ray, radius: f32) -> Option<LightId> {
        let mut best: Option<(LightId, f32)> = None;
        for (id, torch) in self.iter() {
            if let Some(t) = ray.intersect_sphere(torch.position, radius) {
                if best.map_or(true, |(_, best_t)| t < best_t) {
                    best = Some((id, t));
                }
            }
        }
        best.map(|(id, _)| id)
    }
}
