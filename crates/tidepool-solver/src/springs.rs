//! Spring network built from mesh edges.

use tidepool_math::Vec3;
use tidepool_mesh::Topology;
use tidepool_types::{ParticleId, SpringId};

use crate::state::ParticleState;

/// A damped spring between two particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub a: ParticleId,
    pub b: ParticleId,
    /// Distance between `a` and `b` when the network was built.
    pub rest_length: f32,
}

/// Immutable set of springs, one per unique undirected mesh edge.
#[derive(Debug, Clone, Default)]
pub struct SpringNetwork {
    springs: Vec<Spring>,
}

impl SpringNetwork {
    /// One spring per topology edge, rest length taken from `state`.
    pub fn from_topology(topology: &Topology, state: &ParticleState) -> Self {
        let springs = topology
            .edges
            .iter()
            .map(|&[a, b]| Spring {
                a: ParticleId(a),
                b: ParticleId(b),
                rest_length: state.position(a as usize).distance(state.position(b as usize)),
            })
            .collect();
        Self { springs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.springs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn get(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spring> {
        self.springs.iter()
    }

    /// Adds every spring's Hooke and damping force into the accumulator.
    ///
    /// Zero-length springs are skipped.
    pub fn accumulate_forces(&self, state: &mut ParticleState, stiffness: f32, damping: f32) {
        for s in &self.springs {
            let (a, b) = (s.a.index(), s.b.index());
            let delta = state.position(b) - state.position(a);
            let dist = delta.length();
            if dist == 0.0 {
                continue;
            }
            let dir = delta / dist;
            let rel_vel = state.velocity(b) - state.velocity(a);
            let total = stiffness * (dist - s.rest_length) + damping * rel_vel.dot(dir);
            let f = dir * total;
            state.add_force(a, f);
            state.add_force(b, -f);
        }
    }

    /// Σ ½ k (|d| − rest)².
    pub fn elastic_energy(&self, state: &ParticleState, stiffness: f32) -> f64 {
        self.springs
            .iter()
            .map(|s| {
                let ext = (state.position(s.b.index()) - state.position(s.a.index())).length() - s.rest_length;
                0.5 * stiffness as f64 * (ext as f64).powi(2)
            })
            .sum()
    }

    /// Largest absolute extension over all springs.
    pub fn max_extension(&self, state: &ParticleState) -> f32 {
        self.springs
            .iter()
            .map(|s| {
                let d: Vec3 = state.position(s.b.index()) - state.position(s.a.index());
                (d.length() - s.rest_length).abs()
            })
            .fold(0.0, f32::max)
    }
}
