//! Double-buffered heightfield wave simulator.
//!
//! Per cell, per step:
//!
//! ```text
//! avg = mean of the 8 neighbours' current heights
//! h'  = (2h - h_prev + (avg - h) * propagation) * damping
//! h' += magnitude * smoothstep(radius, 0, dist)   if dist < radius
//! write (h', h)
//! ```
//!
//! Every cell reads only the front buffer and writes only its own slot of
//! the back buffer, so rows are processed in parallel with `rayon`.

use rayon::prelude::*;
use tidepool_math::{smoothstep, Vec2};
use tidepool_types::constants::WATER_LEVEL;
use tidepool_types::TidepoolResult;

use crate::buffer::HeightBuffer;
use crate::config::{Boundary, WaveConfig};
use crate::forcing::{ForcingEvent, ForcingSlot};
use crate::pool::PoolGeometry;

/// Heightfield wave simulator.
pub struct HeightfieldSim {
    config: WaveConfig,
    pool: PoolGeometry,
    front: HeightBuffer,
    back: HeightBuffer,
    forcing: ForcingSlot,
    steps: u64,
}

impl HeightfieldSim {
    /// Creates a flat, still field over the default pool footprint.
    pub fn new(config: WaveConfig) -> TidepoolResult<Self> {
        Self::with_pool(config, PoolGeometry::default())
    }

    /// Creates a flat, still field over `pool`.
    pub fn with_pool(config: WaveConfig, pool: PoolGeometry) -> TidepoolResult<Self> {
        config.validate()?;
        let r = config.resolution;
        tracing::debug!(resolution = r, damping = config.damping, "heightfield created");
        Ok(Self {
            front: HeightBuffer::new(r),
            back: HeightBuffer::new(r),
            forcing: ForcingSlot::default(),
            steps: 0,
            config,
            pool,
        })
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn pool(&self) -> &PoolGeometry {
        &self.pool
    }

    /// Replaces the configuration. A resolution change reallocates and
    /// zeros the field.
    pub fn set_config(&mut self, config: WaveConfig) -> TidepoolResult<()> {
        config.validate()?;
        if config.resolution != self.config.resolution {
            self.front = HeightBuffer::new(config.resolution);
            self.back = HeightBuffer::new(config.resolution);
            self.forcing.clear();
        }
        self.config = config;
        Ok(())
    }

    /// Changes only the damping factor.
    pub fn set_damping(&mut self, damping: f32) -> TidepoolResult<()> {
        let config = WaveConfig {
            damping,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Queues a forcing event for the next step, replacing any pending one.
    ///
    /// Non-finite events are discarded with a warning.
    pub fn submit_forcing(&mut self, event: ForcingEvent) {
        if !self.forcing.submit(event) {
            tracing::warn!(?event, "discarding non-finite forcing event");
        }
    }

    /// The event the next step will apply.
    pub fn pending_forcing(&self) -> Option<&ForcingEvent> {
        self.forcing.peek()
    }

    /// Advances the field by one step and consumes the forcing slot.
    pub fn step(&mut self) {
        let forcing = self.forcing.take();
        let r = self.config.resolution;
        let inv_r = 1.0 / r as f32;
        let cfg = &self.config;
        let src = &self.front;

        self.back
            .as_interleaved_mut()
            .par_chunks_mut(2 * r)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..r {
                    let current = src.current(x, y);
                    let previous = src.previous(x, y);
                    let avg = neighbor_average(src, x, y, cfg.boundary);

                    let mut next =
                        (2.0 * current - previous + (avg - current) * cfg.propagation) * cfg.damping;

                    if let Some(event) = &forcing {
                        let uv = Vec2::new((x as f32 + 0.5) * inv_r, (y as f32 + 0.5) * inv_r);
                        let dist = uv.distance(event.center);
                        if dist < cfg.forcing_radius {
                            next += event.magnitude * smoothstep(cfg.forcing_radius, 0.0, dist);
                        }
                    }

                    row[2 * x] = next;
                    row[2 * x + 1] = current;
                }
            });

        std::mem::swap(&mut self.front, &mut self.back);
        self.steps += 1;
    }

    /// The buffer holding the latest state, for the renderer.
    pub fn current(&self) -> &HeightBuffer {
        &self.front
    }

    /// Current height of cell `(x, y)`.
    pub fn height(&self, x: usize, y: usize) -> f32 {
        self.front.current(x, y)
    }

    /// Current height of the cell nearest to `uv`, clamped to the grid.
    pub fn height_at_uv(&self, uv: Vec2) -> f32 {
        let r = self.config.resolution;
        let cell = |c: f32| ((c * r as f32).floor().max(0.0) as usize).min(r - 1);
        self.front.current(cell(uv.x), cell(uv.y))
    }

    /// Displayed water height at a world-space XZ point.
    ///
    /// Points outside the pool sit at the rest water level.
    pub fn surface_height_at(&self, world_x: f32, world_z: f32) -> f32 {
        let uv = self.pool.world_to_uv(tidepool_math::Vec3::new(world_x, 0.0, world_z));
        if !self.pool.contains_uv(uv) {
            return WATER_LEVEL;
        }
        WATER_LEVEL + self.config.display_scale * self.height_at_uv(uv)
    }

    /// Number of steps taken since creation or the last reset.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Zeros both buffers and clears the forcing slot.
    pub fn reset(&mut self) {
        self.front.clear();
        self.back.clear();
        self.forcing.clear();
        self.steps = 0;
        tracing::debug!("heightfield reset");
    }

    // ─── Diagnostics ──────────────────────────────────────────

    /// Σ h² over the current channel.
    pub fn sum_of_squares(&self) -> f64 {
        self.front.currents().map(|h| (h as f64) * (h as f64)).sum()
    }

    /// Largest |h| over the current channel.
    pub fn max_abs_height(&self) -> f32 {
        self.front.currents().fold(0.0, |m, h| m.max(h.abs()))
    }

    /// Discrete energy of the two-level scheme.
    ///
    /// `E = Σh² − d·Σ h·(B·h_prev) + d·Σh_prev²` with
    /// `B = (2 − p)·I + p·A`, where `A` is the neighbour average operator.
    /// Without forcing, each step multiplies `E` by exactly `d`.
    pub fn wave_energy(&self) -> f64 {
        let r = self.config.resolution;
        let d = self.config.damping as f64;
        let p = self.config.propagation as f64;
        let buf = &self.front;

        let mut cross = 0.0f64;
        for y in 0..r {
            for x in 0..r {
                let avg_prev = previous_neighbor_average(buf, x, y, self.config.boundary) as f64;
                let b_prev = (2.0 - p) * buf.previous(x, y) as f64 + p * avg_prev;
                cross += buf.current(x, y) as f64 * b_prev;
            }
        }

        let cur_sq: f64 = buf.currents().map(|h| (h as f64).powi(2)).sum();
        let prev_sq: f64 = buf.previouses().map(|h| (h as f64).powi(2)).sum();
        cur_sq - d * cross + d * prev_sq
    }
}

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[inline]
fn neighbor_coord(c: usize, delta: isize, r: usize, boundary: Boundary) -> usize {
    let n = c as isize + delta;
    match boundary {
        Boundary::Clamp => n.clamp(0, r as isize - 1) as usize,
        Boundary::Wrap => n.rem_euclid(r as isize) as usize,
    }
}

fn sample_average(
    buf: &HeightBuffer,
    x: usize,
    y: usize,
    boundary: Boundary,
    channel: fn(&HeightBuffer, usize, usize) -> f32,
) -> f32 {
    let r = buf.resolution();
    let sum: f32 = NEIGHBORS
        .iter()
        .map(|&(dx, dy)| {
            channel(
                buf,
                neighbor_coord(x, dx, r, boundary),
                neighbor_coord(y, dy, r, boundary),
            )
        })
        .sum();
    sum / 8.0
}

#[inline]
fn neighbor_average(buf: &HeightBuffer, x: usize, y: usize, boundary: Boundary) -> f32 {
    sample_average(buf, x, y, boundary, HeightBuffer::current)
}

#[inline]
fn previous_neighbor_average(buf: &HeightBuffer, x: usize, y: usize, boundary: Boundary) -> f32 {
    sample_average(buf, x, y, boundary, HeightBuffer::previous)
}
