//! The pool world: one water surface, one ball, the torches, and the
//! per-frame order that ties them together.
//!
//! ```text
//! tick(dt):
//!   1. copy tunables into the ball and the water
//!   2. replay latched input (grab / drag / release, torches, water clicks)
//!   3. ball.advance(dt) against the collision surface, impacts -> sink
//!   4. latest accepted impact -> water forcing slot (replaces a click)
//!   5. water.step()
//!   6. telemetry
//! ```

use std::time::Instant;

use tidepool_contact::{ContactResult, FeedbackSink, WaveSurface};
use tidepool_interact::Grabber;
use tidepool_io::{load_obj, validate_body_mesh, validate_scene, CollisionMode, SceneConfig};
use tidepool_math::{Ray, Vec2};
use tidepool_mesh::generators::uv_sphere;
use tidepool_mesh::PolyMesh;
use tidepool_solver::{FlatPlane, MassSpringBody, RenderView, StepReport};
use tidepool_telemetry::{EventBus, EventKind, SimulationEvent};
use tidepool_types::constants::WATER_LEVEL;
use tidepool_types::{LightId, ParticleId, TidepoolResult};
use tidepool_water::{ForcingEvent, HeightBuffer, HeightfieldSim};

use crate::input::{InputEvent, InputLatch};
use crate::lights::{LightRig, LightUniforms, TORCH_HIT_RADIUS};
use crate::params::TunableParams;

/// Radius of the generated ball used when the scene names no mesh.
pub const DEFAULT_BALL_RADIUS: f32 = 1.0;

/// The ball used when no mesh file is given.
pub fn default_ball_mesh() -> PolyMesh {
    uv_sphere(DEFAULT_BALL_RADIUS, 12, 24)
}

/// Effect of one latched input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameAction {
    Grabbed(ParticleId),
    Dragged,
    Released(ParticleId),
    LightToggled { id: LightId, on: bool },
    AllLights(bool),
    WaterClick(ForcingEvent),
}

/// Summary of one [`PoolWorld::tick`].
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Index of the frame this report describes.
    pub frame: u64,
    pub body: StepReport,
    pub contact: ContactResult,
    /// Impact forwarded to the water this frame.
    pub impact: Option<ForcingEvent>,
    /// Whether the wave step applied any forcing.
    pub wave_forced: bool,
    pub actions: Vec<FrameAction>,
    /// Wall-clock time for the whole frame (seconds).
    pub wall_time: f64,
}

/// Everything simulated in the pool.
pub struct PoolWorld {
    config: SceneConfig,
    water: HeightfieldSim,
    body: MassSpringBody,
    lights: LightRig,
    params: TunableParams,
    input: InputLatch,
    grabber: Grabber,
    sink: FeedbackSink,
    telemetry: EventBus,
    frame: u64,
    sim_time: f64,
}

impl PoolWorld {
    /// Builds a world from a scene, loading the ball mesh from disk when the
    /// scene names one.
    pub fn new(config: SceneConfig) -> TidepoolResult<Self> {
        let mesh = match &config.mesh {
            Some(path) => load_obj(path)?,
            None => default_ball_mesh(),
        };
        Self::with_mesh(config, mesh)
    }

    /// Builds a world around an already loaded ball mesh.
    pub fn with_mesh(config: SceneConfig, mesh: PolyMesh) -> TidepoolResult<Self> {
        validate_scene(&config)?;
        mesh.validate()?;
        if let Err(err) = validate_body_mesh(&mesh) {
            tracing::warn!(%err, "degenerate ball mesh");
        }

        let pool = config.pool();
        let water = HeightfieldSim::with_pool(config.wave.clone(), pool)?;
        let params = TunableParams::from_scene(&config);
        let body = MassSpringBody::from_mesh(mesh, params.body_config(&config.body))?;

        let mut lights = LightRig::default_torches(&pool);
        if !config.torches_on {
            lights.set_all(false);
        }

        tracing::debug!(
            resolution = config.wave.resolution,
            particles = body.particle_count(),
            collision = ?config.collision,
            "pool world created"
        );

        Ok(Self {
            sink: FeedbackSink::new(config.feedback()),
            water,
            body,
            lights,
            params,
            input: InputLatch::new(),
            grabber: Grabber::default(),
            telemetry: EventBus::new(),
            frame: 0,
            sim_time: 0.0,
            config,
        })
    }

    /// Advances the whole pool by one frame.
    pub fn tick(&mut self, dt: f32) -> TidepoolResult<FrameReport> {
        let start = Instant::now();
        let frame = self.frame;
        let mut report = FrameReport {
            frame,
            ..Default::default()
        };
        self.emit(EventKind::FrameBegin { sim_time: self.sim_time });

        self.apply_params()?;
        self.apply_input(&mut report.actions);

        // Ball
        self.sink.clear();
        report.body = match self.config.collision {
            CollisionMode::FlatPlane { height } => {
                self.body.advance(dt, &FlatPlane::new(height), &mut self.sink)?
            }
            CollisionMode::TrackWaves => {
                self.body
                    .advance(dt, &WaveSurface::new(&self.water), &mut self.sink)?
            }
        };
        report.contact = *self.sink.result();

        // Feedback
        if let Some(event) = self.sink.take_latest() {
            self.water.submit_forcing(event);
            report.impact = Some(event);
            self.emit(EventKind::Impact {
                u: event.center.x,
                v: event.center.y,
                magnitude: event.magnitude,
            });
        }

        // Water
        report.wave_forced = self.water.pending_forcing().is_some();
        self.water.step();

        if self.telemetry_active() {
            self.emit(EventKind::BodyStep {
                collisions: report.body.collisions,
                impacts: report.body.impacts,
                kinetic: self.body.kinetic_energy(),
                elastic: self.body.elastic_energy(),
            });
            self.emit(EventKind::WaveStep {
                max_height: self.water.max_abs_height(),
                energy: self.water.wave_energy(),
                forced: report.wave_forced,
            });
        }

        report.wall_time = start.elapsed().as_secs_f64();
        self.emit(EventKind::FrameEnd {
            wall_time: report.wall_time,
        });
        self.telemetry.flush();

        self.frame += 1;
        self.sim_time += f64::from(dt);
        Ok(report)
    }

    /// Ticks `frames` times with the scene's time step.
    pub fn run(&mut self, frames: u64) -> TidepoolResult<Vec<FrameReport>> {
        let dt = self.config.dt;
        (0..frames).map(|_| self.tick(dt)).collect()
    }

    /// Puts the ball back at its start pose, flattens the water and drops
    /// pending input.
    pub fn reset(&mut self) {
        self.grabber.end_hold(&mut self.body);
        self.body.reset();
        self.water.reset();
        self.sink.clear();
        self.input.drain();
        self.frame = 0;
        self.sim_time = 0.0;
    }

    // ─── Frame stages ─────────────────────────────────────────

    fn apply_params(&mut self) -> TidepoolResult<()> {
        let body_config = self.params.body_config(self.body.config());
        if body_config != *self.body.config() {
            self.body.set_config(body_config)?;
        }
        let damping = self.params.wave_damping();
        if damping != self.water.config().damping {
            self.water.set_damping(damping)?;
        }
        for clamp in self.params.take_clamps() {
            self.emit(EventKind::ParameterClamped {
                name: clamp.name.to_string(),
                requested: clamp.requested,
                applied: clamp.applied,
            });
        }
        Ok(())
    }

    fn apply_input(&mut self, actions: &mut Vec<FrameAction>) {
        for event in self.input.drain() {
            match event {
                InputEvent::PointerDown(ndc) => self.pointer_down(ndc, actions),
                InputEvent::PointerMove(ndc) => {
                    if self.grabber.update_hold(&mut self.body, ndc) {
                        actions.push(FrameAction::Dragged);
                    }
                }
                InputEvent::PointerUp => self.release(actions),
                InputEvent::ToggleLight(id) => self.toggle_light(id, actions),
                InputEvent::SetAllLights(on) => {
                    self.lights.set_all(on);
                    actions.push(FrameAction::AllLights(on));
                }
            }
        }
    }

    /// Ball first, then torches, then the water.
    fn pointer_down(&mut self, ndc: Vec2, actions: &mut Vec<FrameAction>) {
        self.release(actions);
        let view_proj = self.input.view_proj();

        if self.grabber.select(&self.body, ndc, view_proj).is_some()
            && self.grabber.begin_hold(&mut self.body, view_proj)
        {
            if let Some(hold) = self.body.hold() {
                let id = hold.particle;
                actions.push(FrameAction::Grabbed(id));
                self.emit(EventKind::HoldChanged { particle: Some(id.0) });
            }
            return;
        }

        let det = view_proj.determinant();
        if det == 0.0 || !det.is_finite() {
            return;
        }
        let Some(ray) = Ray::from_ndc(view_proj.inverse(), ndc) else {
            return;
        };

        if let Some(id) = self.lights.hit_test(&ray, TORCH_HIT_RADIUS) {
            self.toggle_light(id, actions);
            return;
        }

        let Some(t) = ray.intersect_horizontal_plane(WATER_LEVEL) else {
            return;
        };
        let pool = self.water.pool();
        let uv = pool.world_to_uv(ray.at(t));
        if !pool.contains_uv(uv) {
            tracing::trace!(?uv, "click outside pool ignored");
            return;
        }
        let event = ForcingEvent::new(uv, self.params.click_force());
        self.water.submit_forcing(event);
        actions.push(FrameAction::WaterClick(event));
    }

    fn release(&mut self, actions: &mut Vec<FrameAction>) {
        let held = self.body.hold().map(|h| h.particle);
        self.grabber.end_hold(&mut self.body);
        if let Some(id) = held {
            actions.push(FrameAction::Released(id));
            self.emit(EventKind::HoldChanged { particle: None });
        }
    }

    fn toggle_light(&mut self, id: LightId, actions: &mut Vec<FrameAction>) {
        if let Some(on) = self.lights.toggle(id) {
            actions.push(FrameAction::LightToggled { id, on });
            self.emit(EventKind::LightToggled { slot: id.0, on });
        }
    }

    fn telemetry_active(&self) -> bool {
        self.telemetry.is_enabled() && self.telemetry.sink_count() > 0
    }

    fn emit(&self, kind: EventKind) {
        self.telemetry.emit(SimulationEvent::new(self.frame, kind));
    }

    // ─── Accessors ────────────────────────────────────────────

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Switches between the flat plane and the live water surface.
    pub fn set_collision_mode(&mut self, mode: CollisionMode) {
        self.config.collision = mode;
    }

    pub fn water(&self) -> &HeightfieldSim {
        &self.water
    }

    pub fn water_mut(&mut self) -> &mut HeightfieldSim {
        &mut self.water
    }

    pub fn body(&self) -> &MassSpringBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut MassSpringBody {
        &mut self.body
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut LightRig {
        &mut self.lights
    }

    pub fn params(&self) -> &TunableParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut TunableParams {
        &mut self.params
    }

    /// Queue for input that the next tick will apply.
    pub fn input_mut(&mut self) -> &mut InputLatch {
        &mut self.input
    }

    pub fn grabber(&self) -> &Grabber {
        &self.grabber
    }

    pub fn telemetry_mut(&mut self) -> &mut EventBus {
        &mut self.telemetry
    }

    /// Number of completed ticks.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    // ─── Renderer outputs ─────────────────────────────────────

    /// The two-channel `(current, previous)` height image.
    pub fn height_image(&self) -> &HeightBuffer {
        self.water.current()
    }

    pub fn ball_buffers(&mut self) -> RenderView<'_> {
        self.body.render_buffers()
    }

    pub fn light_uniforms(&self) -> LightUniforms {
        self.lights.uniforms()
    }
}
