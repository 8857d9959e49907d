//! Particle state: SoA buffers for every per-particle quantity.
//!
//! Positions and velocities are the persistent state. The force channels
//! are a scratch accumulator, cleared and refilled each step.

use tidepool_math::Vec3;
use tidepool_types::ParticleId;

/// SoA particle buffers.
///
/// # Layout
///
/// All arrays have length `count`:
/// ```text
/// pos_x: [x0, x1, x2, ...]
/// pos_y: [y0, y1, y2, ...]
/// ...
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticleState {
    /// Number of particles.
    pub count: usize,

    // ─── Position ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,

    // ─── Force accumulator ───
    pub force_x: Vec<f32>,
    pub force_y: Vec<f32>,
    pub force_z: Vec<f32>,
}

impl ParticleState {
    /// Particles at `positions`, at rest.
    pub fn from_positions(positions: &[Vec3]) -> Self {
        let n = positions.len();
        Self {
            count: n,
            pos_x: positions.iter().map(|p| p.x).collect(),
            pos_y: positions.iter().map(|p| p.y).collect(),
            pos_z: positions.iter().map(|p| p.z).collect(),
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            vel_z: vec![0.0; n],
            force_x: vec![0.0; n],
            force_y: vec![0.0; n],
            force_z: vec![0.0; n],
        }
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.vel_x[i] = v.x;
        self.vel_y[i] = v.y;
        self.vel_z[i] = v.z;
    }

    #[inline]
    pub fn add_force(&mut self, i: usize, f: Vec3) {
        self.force_x[i] += f.x;
        self.force_y[i] += f.y;
        self.force_z[i] += f.z;
    }

    /// Sets every particle's force to `f`.
    pub fn fill_forces(&mut self, f: Vec3) {
        self.force_x.fill(f.x);
        self.force_y.fill(f.y);
        self.force_z.fill(f.z);
    }

    /// Explicit Euler: `v += F/m * dt; p += v * dt` for every particle.
    pub fn integrate(&mut self, mass: f32, dt: f32) {
        let inv_m = 1.0 / mass;
        for i in 0..self.count {
            self.vel_x[i] += self.force_x[i] * inv_m * dt;
            self.vel_y[i] += self.force_y[i] * inv_m * dt;
            self.vel_z[i] += self.force_z[i] * inv_m * dt;

            self.pos_x[i] += self.vel_x[i] * dt;
            self.pos_y[i] += self.vel_y[i] * dt;
            self.pos_z[i] += self.vel_z[i] * dt;
        }
    }

    /// Positions as AoS, for geometry routines.
    pub fn positions(&self) -> Vec<Vec3> {
        (0..self.count).map(|i| self.position(i)).collect()
    }

    /// Writes positions into an existing AoS buffer of length `count`.
    pub fn copy_positions_into(&self, out: &mut [Vec3]) {
        for (i, p) in out.iter_mut().enumerate().take(self.count) {
            *p = self.position(i);
        }
    }

    /// ½ m Σ |v|².
    pub fn kinetic_energy(&self, mass: f32) -> f64 {
        let sum: f64 = (0..self.count)
            .map(|i| self.velocity(i).length_squared() as f64)
            .sum();
        0.5 * mass as f64 * sum
    }

    /// The particle with the smallest `y`, lowest index on ties.
    pub fn lowest(&self) -> Option<(ParticleId, Vec3)> {
        let mut best: Option<usize> = None;
        for i in 0..self.count {
            if best.map_or(true, |b| self.pos_y[i] < self.pos_y[b]) {
                best = Some(i);
            }
        }
        best.map(|i| (ParticleId(i as u32), self.position(i)))
    }

    /// Mean particle position.
    pub fn centroid(&self) -> Option<Vec3> {
        if self.count == 0 {
            return None;
        }
        let sum: Vec3 = (0..self.count).map(|i| self.position(i)).sum();
        Some(sum / self.count as f32)
    }

    /// True if every position and velocity component is finite.
    pub fn is_finite(&self) -> bool {
        [
            &self.pos_x, &self.pos_y, &self.pos_z, &self.vel_x, &self.vel_y, &self.vel_z,
        ]
        .iter()
        .all(|c| c.iter().all(|v| v.is_finite()))
    }
}
