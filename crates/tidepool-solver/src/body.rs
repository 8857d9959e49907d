//! The mass-spring ball.
//!
//! A loaded mesh is placed in the pool (horizontally centered, uniformly
//! scaled, lifted), then every vertex becomes a particle and every unique
//! edge a spring. [`MassSpringBody::advance`] performs one explicit step:
//!
//! ```text
//! 1. held particle: zero its velocity
//! 2. F = m * g for every particle
//! 3. F += spring forces (Hooke + axial damping)
//! 4. v += F/m * dt; p += v * dt
//! 5. held particle: p = target
//! 6. below the surface: clamp, report the impact, reflect v.y
//! ```

use std::time::Instant;

use tidepool_math::Vec3;
use tidepool_mesh::buffers::{fan_triangle_count, flatten_fan};
use tidepool_mesh::normals::compute_vertex_normals_into;
use tidepool_mesh::{PolyMesh, Topology};
use tidepool_types::{ParticleId, TidepoolError, TidepoolResult};

use crate::config::BodyConfig;
use crate::hold::{BodyPhase, HoldConstraint};
use crate::springs::SpringNetwork;
use crate::state::ParticleState;
use crate::surface::{CollisionSurface, ImpactSink};

/// Outcome of one [`MassSpringBody::advance`] call.
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    /// Particles clamped to the surface.
    pub collisions: u32,
    /// Of those, particles that were moving down (reported to the sink).
    pub impacts: u32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Pre-allocated renderer arrays, rewritten in place every frame.
#[derive(Debug, Clone, Default)]
struct RenderScratch {
    positions: Vec<f32>,
    normals: Vec<f32>,
    points: Vec<Vec3>,
    vertex_normals: Vec<Vec3>,
}

impl RenderScratch {
    fn for_mesh(mesh: &PolyMesh) -> Self {
        let floats = fan_triangle_count(&mesh.faces) * 9;
        Self {
            positions: vec![0.0; floats],
            normals: vec![0.0; floats],
            points: vec![Vec3::ZERO; mesh.vertex_count()],
            vertex_normals: vec![Vec3::ZERO; mesh.vertex_count()],
        }
    }
}

/// Flattened, fan-triangulated arrays for drawing the ball.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    /// Packed `xyz` per triangle corner.
    pub positions: &'a [f32],
    /// Packed `xyz` per triangle corner.
    pub normals: &'a [f32],
}

/// Deformable ball simulated as particles joined by springs.
pub struct MassSpringBody {
    mesh: PolyMesh,
    config: BodyConfig,
    state: ParticleState,
    springs: SpringNetwork,
    hold: Option<HoldConstraint>,
    render: RenderScratch,
}

impl MassSpringBody {
    /// Places `mesh` in the pool and builds particles and springs.
    pub fn from_mesh(mut mesh: PolyMesh, config: BodyConfig) -> TidepoolResult<Self> {
        config.validate()?;
        mesh.validate()?;

        place_mesh(&mut mesh, &config);

        let render = RenderScratch::for_mesh(&mesh);
        let mut body = Self {
            state: ParticleState::default(),
            springs: SpringNetwork::default(),
            hold: None,
            mesh,
            config,
            render,
        };
        body.reset();
        body.init_springs();

        tracing::debug!(
            particles = body.state.count,
            springs = body.springs.len(),
            "mass-spring body created"
        );
        Ok(body)
    }

    /// Restores positions from the placed mesh, zeros velocities and drops
    /// any hold.
    pub fn reset(&mut self) {
        self.state = ParticleState::from_positions(&self.mesh.positions);
        self.hold = None;
    }

    /// Rebuilds the spring network from the mesh edges, taking rest lengths
    /// from the current positions.
    pub fn init_springs(&mut self) {
        let topology = Topology::build(&self.mesh);
        self.springs = SpringNetwork::from_topology(&topology, &self.state);
    }

    /// Advances the body by `dt` seconds.
    ///
    /// Returns `InvalidConfig` for a non-finite or non-positive `dt`.
    pub fn advance(
        &mut self,
        dt: f32,
        surface: &dyn CollisionSurface,
        sink: &mut dyn ImpactSink,
    ) -> TidepoolResult<StepReport> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(TidepoolError::config(format!("timestep must be positive and finite, got {dt}")));
        }
        let start = Instant::now();
        let mut report = StepReport::default();
        if self.state.count == 0 {
            return Ok(report);
        }

        // 1. Hold: pin velocity
        if let Some(hold) = &self.hold {
            self.state.set_velocity(hold.particle.index(), Vec3::ZERO);
        }

        // 2-3. Forces
        self.state.fill_forces(self.config.gravity_vec() * self.config.mass);
        self.springs
            .accumulate_forces(&mut self.state, self.config.stiffness, self.config.damping);

        // 4. Integrate
        self.state.integrate(self.config.mass, dt);

        // 5. Pin
        if let Some(hold) = &self.hold {
            self.state.set_position(hold.particle.index(), hold.target);
        }

        // 6. Collide
        let restitution = self.config.restitution;
        let state = &mut self.state;
        for i in 0..state.count {
            let floor = surface.height_at(state.pos_x[i], state.pos_z[i]);
            if state.pos_y[i] < floor {
                state.pos_y[i] = floor;
                report.collisions += 1;
                if state.vel_y[i] < 0.0 {
                    sink.on_impact(state.position(i), state.velocity(i));
                    state.vel_y[i] *= -restitution;
                    report.impacts += 1;
                }
            }
        }

        report.wall_time = start.elapsed().as_secs_f64();
        Ok(report)
    }

    // ─── Hold ─────────────────────────────────────────────────

    /// Pins `id` at its current position.
    pub fn grab(&mut self, id: ParticleId) -> TidepoolResult<()> {
        if id.index() >= self.state.count {
            return Err(TidepoolError::config(format!(
                "particle {} out of range ({} particles)",
                id.0, self.state.count
            )));
        }
        self.hold = Some(HoldConstraint {
            particle: id,
            target: self.state.position(id.index()),
        });
        tracing::debug!(particle = id.0, "hold started");
        Ok(())
    }

    /// Moves the hold target. Ignored when nothing is held or the target is
    /// not finite; returns whether the target changed.
    pub fn set_hold_target(&mut self, target: Vec3) -> bool {
        match &mut self.hold {
            Some(hold) if target.is_finite() => {
                hold.target = target;
                true
            }
            Some(_) => {
                tracing::warn!(?target, "ignoring non-finite hold target");
                false
            }
            None => false,
        }
    }

    /// Ends any hold.
    pub fn release(&mut self) {
        if let Some(hold) = self.hold.take() {
            tracing::debug!(particle = hold.particle.0, "hold released");
        }
    }

    pub fn phase(&self) -> BodyPhase {
        match &self.hold {
            Some(hold) => BodyPhase::Held(hold.particle),
            None => BodyPhase::Resting,
        }
    }

    pub fn hold(&self) -> Option<&HoldConstraint> {
        self.hold.as_ref()
    }

    /// Gives every particle the same velocity.
    pub fn launch(&mut self, velocity: Vec3) {
        for i in 0..self.state.count {
            self.state.set_velocity(i, velocity);
        }
    }

    // ─── Configuration ────────────────────────────────────────

    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    /// Replaces the physical parameters. Placement fields (`scale`,
    /// `drop_height`) only take effect for the next loaded mesh.
    pub fn set_config(&mut self, config: BodyConfig) -> TidepoolResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // ─── Accessors ────────────────────────────────────────────

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    /// The placed mesh (rest shape).
    pub fn mesh(&self) -> &PolyMesh {
        &self.mesh
    }

    pub fn springs(&self) -> &SpringNetwork {
        &self.springs
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.state.count
    }

    /// Recomputes smooth normals from the current positions and refreshes the
    /// flattened triangle arrays.
    pub fn render_buffers(&mut self) -> RenderView<'_> {
        let r = &mut self.render;
        self.state.copy_positions_into(&mut r.points);
        compute_vertex_normals_into(&r.points, &self.mesh.faces, &mut r.vertex_normals);
        flatten_fan(&mut r.positions, &r.points, &self.mesh.faces);
        flatten_fan(&mut r.normals, &r.vertex_normals, &self.mesh.faces);
        RenderView {
            positions: &r.positions,
            normals: &r.normals,
        }
    }

    // ─── Diagnostics ──────────────────────────────────────────

    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy(self.config.mass)
    }

    pub fn elastic_energy(&self) -> f64 {
        self.springs.elastic_energy(&self.state, self.config.stiffness)
    }

    /// Position of the lowest particle.
    pub fn lowest_point(&self) -> Option<Vec3> {
        self.state.lowest().map(|(_, p)| p)
    }
}

/// Centers the mesh horizontally, scales it, then lifts it by the drop height.
fn place_mesh(mesh: &mut PolyMesh, config: &BodyConfig) {
    let Some(bounds) = mesh.bounding_box() else {
        return;
    };
    let center = bounds.center();
    let scale = match config.scale {
        Some(s) => s,
        None => {
            let extent = bounds.max_extent();
            if extent > 0.0 {
                extent
            } else {
                1.0
            }
        }
    };
    mesh.shift_and_scale(Vec3::new(-center.x, 0.0, -center.z), scale);
    mesh.translate(Vec3::new(0.0, config.drop_height, 0.0));
}
