//! Integration tests for tidepool-scene.

use tidepool_io::{CollisionMode, SceneConfig};
use tidepool_math::{Mat4, Ray, Vec2, Vec3};
use tidepool_mesh::generators::uv_sphere;
use tidepool_mesh::PolyMesh;
use tidepool_scene::lights::EMPTY_SLOT_POSITION;
use tidepool_scene::{
    FrameAction, InputEvent, InputLatch, LightRig, PoolWorld, Torch, TunableParams, TORCH_HIT_RADIUS,
};
use tidepool_solver::{BodyConfig, BodyPhase};
use tidepool_telemetry::VecSink;
use tidepool_types::constants::WATER_LEVEL;
use tidepool_types::{LightId, ParticleId, TidepoolError};
use tidepool_water::{PoolGeometry, WaveConfig};

fn camera() -> Mat4 {
    let proj = Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 300.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 80.0, 80.0), Vec3::ZERO, Vec3::Y);
    proj * view
}

fn ndc_of(view_proj: Mat4, p: Vec3) -> Vec2 {
    let clip = view_proj * p.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

/// Small water grid and a unit ball with no springs, `drop` above the plane.
fn scene(drop: f32) -> SceneConfig {
    SceneConfig {
        wave: WaveConfig::preview(),
        body: BodyConfig {
            scale: Some(1.0),
            drop_height: 1.0 + drop,
            ..BodyConfig::free_fall()
        },
        ..Default::default()
    }
}

fn world(drop: f32) -> PoolWorld {
    let mut world = PoolWorld::with_mesh(scene(drop), uv_sphere(1.0, 6, 8)).unwrap();
    world.input_mut().set_view_proj(camera());
    world
}

// ─── Light Tests ──────────────────────────────────────────────

#[test]
fn default_torches_ring_the_pool() {
    let rig = LightRig::default_torches(&PoolGeometry::default());
    assert_eq!(rig.torch_count(), 8);
    assert_eq!(rig.lit_count(), 8);

    let first = rig.get(LightId(0)).unwrap();
    assert_eq!(first.position, Vec3::new(-26.0, 2.0, 26.0));
    assert_eq!(first.color, Vec3::new(1.0, 0.0, 0.0));

    let last = rig.get(LightId(7)).unwrap();
    assert_eq!(last.position, Vec3::new(-26.0, 2.0, 0.0));
    assert_eq!(last.color, Vec3::new(0.9, 1.0, 0.5));

    for (_, torch) in rig.iter() {
        assert_eq!(torch.position.y, 2.0);
        assert!(torch.position.x.abs() <= 26.0 && torch.position.z.abs() <= 26.0);
    }
}

#[test]
fn off_and_empty_slots_have_no_colour() {
    let mut rig = LightRig::default_torches(&PoolGeometry::default());
    assert_eq!(rig.toggle(LightId(1)), Some(false));
    rig.remove(LightId(3));

    let u = rig.uniforms();
    assert_eq!(u.colors[0], Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(u.colors[1], Vec3::ZERO);
    assert_eq!(u.positions[1], Vec3::new(0.0, 2.0, 26.0), "off torch keeps its position");
    assert_eq!(u.colors[3], Vec3::ZERO);
    assert_eq!(u.positions[3], EMPTY_SLOT_POSITION);
}

#[test]
fn toggle_set_all_and_insert() {
    let mut rig = LightRig::new();
    assert_eq!(rig.toggle(LightId(0)), None);
    assert!(rig.insert(LightId(8), Torch::new(Vec3::ZERO, Vec3::ONE)).is_err());

    rig.insert(LightId(2), Torch::new(Vec3::ZERO, Vec3::ONE)).unwrap();
    assert_eq!(rig.torch_count(), 1);
    rig.set_all(false);
    assert_eq!(rig.lit_count(), 0);
    assert_eq!(rig.toggle(LightId(2)), Some(true));
}

#[test]
fn hit_test_picks_nearest_torch() {
    let rig = LightRig::default_torches(&PoolGeometry::default());

    let diagonal = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 1.0)).unwrap();
    assert_eq!(rig.hit_test(&diagonal, TORCH_HIT_RADIUS), Some(LightId(2)));

    // Along -x the ray passes only the west midpoint torch
    let west = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_X).unwrap();
    assert_eq!(rig.hit_test(&west, TORCH_HIT_RADIUS), Some(LightId(7)));

    // Along +z the west column lines up slots 6, 7 and 0; the nearest wins
    let north = Ray::new(Vec3::new(-26.0, 2.0, -40.0), Vec3::Z).unwrap();
    assert_eq!(rig.hit_test(&north, TORCH_HIT_RADIUS), Some(LightId(6)));

    let up = Ray::new(Vec3::ZERO, Vec3::Y).unwrap();
    assert_eq!(rig.hit_test(&up, TORCH_HIT_RADIUS), None);
}

#[test]
fn switched_off_torch_is_still_hit() {
    let mut rig = LightRig::default_torches(&PoolGeometry::default());
    rig.set_all(false);
    let west = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_X).unwrap();
    assert_eq!(rig.hit_test(&west, TORCH_HIT_RADIUS), Some(LightId(7)));
}

#[test]
fn rig_serde_round_trip() {
    let mut rig = LightRig::default_torches(&PoolGeometry::new(40.0));
    rig.toggle(LightId(5));
    rig.remove(LightId(6));
    let json = serde_json::to_string(&rig).unwrap();
    let back: LightRig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rig);
    assert_eq!(back.get(LightId(0)).unwrap().position, Vec3::new(-16.0, 2.0, 16.0));
}

// ─── Parameter Tests ──────────────────────────────────────────

#[test]
fn setters_clamp_and_record() {
    let mut params = TunableParams::default();
    assert!(params.take_clamps().is_empty());

    assert_eq!(params.set_mass(-1.0), 0.01);
    assert_eq!(params.set_restitution(1.5), 1.0);
    assert_eq!(params.set_wave_damping(1.0), 0.999);
    assert_eq!(params.set_stiffness(120.0), 120.0);

    let clamps = params.take_clamps();
    assert_eq!(clamps.len(), 3);
    assert_eq!(clamps[0].name, "mass");
    assert_eq!(clamps[0].requested, -1.0);
    assert_eq!(clamps[0].applied, 0.01);
    assert!(params.take_clamps().is_empty());
}

#[test]
fn nan_keeps_previous_value() {
    let mut params = TunableParams::default();
    let before = params.stiffness();
    assert_eq!(params.set_stiffness(f32::NAN), before);
    assert_eq!(params.take_clamps().len(), 1);
}

#[test]
fn slider_units() {
    let mut params = TunableParams::default();
    assert!((params.set_wave_damping_slider(985.0) - 0.985).abs() < 1e-6);
    assert!((params.set_click_force_slider(30.0) - 0.3).abs() < 1e-6);
    assert_eq!(params.set_gravity(-3.7), -3.7);
}

#[test]
fn scene_values_outside_slider_ranges_survive() {
    let mut config = scene(1.0);
    config.body.stiffness = 2000.0;
    config.wave.damping = 0.3;

    let params = TunableParams::from_scene(&config);
    assert_eq!(params.stiffness(), 2000.0);
    assert_eq!(params.wave_damping(), 0.3);

    let mut world = PoolWorld::with_mesh(config, uv_sphere(1.0, 6, 8)).unwrap();
    let sink = VecSink::new();
    let log = sink.log();
    world.telemetry_mut().add_sink(Box::new(sink));
    world.tick(1.0 / 60.0).unwrap();

    assert_eq!(world.body().config().stiffness, 2000.0);
    assert_eq!(world.water().config().damping, 0.3);
    assert_eq!(log.count("parameter_clamped"), 0);

    // The sliders still clamp once touched.
    assert_eq!(world.params_mut().set_stiffness(1500.0), 1000.0);
}

#[test]
fn body_config_keeps_placement() {
    let mut params = TunableParams::default();
    params.set_gravity(-1.0);
    params.set_mass(0.5);
    let base = BodyConfig {
        gravity: [0.25, -9.8, 0.0],
        drop_height: 4.0,
        ..Default::default()
    };
    let cfg = params.body_config(&base);
    assert_eq!(cfg.gravity, [0.25, -1.0, 0.0]);
    assert_eq!(cfg.mass, 0.5);
    assert_eq!(cfg.drop_height, 4.0);
}

// ─── Input Tests ──────────────────────────────────────────────

#[test]
fn latch_keeps_order_and_merges_moves() {
    let mut latch = InputLatch::new();
    latch.pointer_down(Vec2::ZERO);
    latch.pointer_move(Vec2::new(0.1, 0.0));
    latch.pointer_move(Vec2::new(0.2, 0.0));
    latch.toggle_light(LightId(3));
    latch.pointer_move(Vec2::new(0.3, 0.0));
    latch.pointer_up();

    assert_eq!(latch.pending().len(), 5);
    let events = latch.drain();
    assert_eq!(
        events,
        vec![
            InputEvent::PointerDown(Vec2::ZERO),
            InputEvent::PointerMove(Vec2::new(0.2, 0.0)),
            InputEvent::ToggleLight(LightId(3)),
            InputEvent::PointerMove(Vec2::new(0.3, 0.0)),
            InputEvent::PointerUp,
        ]
    );
    assert!(latch.is_empty());
}

// ─── World Tests ──────────────────────────────────────────────

#[test]
fn default_world_builds_with_generated_ball() {
    let config = SceneConfig {
        wave: WaveConfig::preview(),
        ..Default::default()
    };
    let world = PoolWorld::new(config).unwrap();
    assert!(world.body().particle_count() > 0);
    assert_eq!(world.lights().lit_count(), 8);
    assert_eq!(world.frame(), 0);
}

#[test]
fn missing_mesh_file_is_io_error() {
    let config = SceneConfig {
        mesh: Some("/definitely/not/here.obj".into()),
        ..Default::default()
    };
    assert!(matches!(PoolWorld::new(config), Err(TidepoolError::Io(_))));
}

#[test]
fn degenerate_ball_mesh_runs_as_noop() {
    let mut world = PoolWorld::with_mesh(scene(1.0), PolyMesh::default()).unwrap();
    assert_eq!(world.body().particle_count(), 0);
    for _ in 0..5 {
        let report = world.tick(1.0 / 60.0).unwrap();
        assert_eq!(report.body.collisions, 0);
        assert!(report.impact.is_none());
    }
    assert_eq!(world.frame(), 5);

    let points_only = PolyMesh {
        positions: vec![Vec3::new(0.0, 3.0, 0.0)],
        ..Default::default()
    };
    let mut world = PoolWorld::with_mesh(scene(1.0), points_only).unwrap();
    world.tick(1.0 / 60.0).unwrap();
    assert_eq!(world.body().particle_count(), 1);
}

#[test]
fn broken_mesh_indices_are_still_rejected() {
    let broken = PolyMesh {
        positions: vec![Vec3::ZERO],
        faces: vec![vec![0, 1, 2]],
        ..Default::default()
    };
    assert!(matches!(
        PoolWorld::with_mesh(scene(1.0), broken),
        Err(TidepoolError::InvalidMesh(_))
    ));
}

#[test]
fn torches_can_start_dark() {
    let config = SceneConfig {
        torches_on: false,
        ..scene(1.0)
    };
    let world = PoolWorld::with_mesh(config, uv_sphere(1.0, 6, 8)).unwrap();
    assert_eq!(world.lights().lit_count(), 0);
    assert_eq!(world.light_uniforms().colors, [Vec3::ZERO; 8]);
}

#[test]
fn ball_never_sinks_below_water() {
    let mut world = world(0.5);
    for report in world.run(60).unwrap() {
        assert!(report.body.collisions <= world.body().particle_count() as u32);
    }
    let lowest = world.body().lowest_point().unwrap();
    assert!(lowest.y >= WATER_LEVEL);
    assert_eq!(world.frame(), 60);
    assert!((world.sim_time() - 1.0).abs() < 1e-3);
}

#[test]
fn falling_ball_makes_waves() {
    let mut world = world(0.1);
    let reports = world.run(20).unwrap();

    let hit = reports
        .iter()
        .find(|r| r.impact.is_some())
        .expect("ball should reach the water");
    let event = hit.impact.unwrap();
    assert!(hit.wave_forced);
    assert!(hit.contact.forwarded >= 1);
    assert!((event.center - Vec2::splat(0.5)).length() < 0.05);
    assert!(event.magnitude >= 0.02 && event.magnitude <= 0.8);
    assert!(world.water().max_abs_height() > 0.0);
}

#[test]
fn tunables_apply_at_frame_start() {
    let mut world = world(5.0);
    world.params_mut().set_stiffness(12.0);
    world.params_mut().set_wave_damping(0.95);
    assert_eq!(world.body().config().stiffness, 0.0);

    world.tick(1.0 / 60.0).unwrap();
    assert_eq!(world.body().config().stiffness, 12.0);
    assert_eq!(world.water().config().damping, 0.95);
}

#[test]
fn click_on_water_submits_forcing() {
    let mut world = world(10.0);
    let target = Vec3::new(10.0, 0.0, -5.0);
    world.input_mut().pointer_down(ndc_of(camera(), target));

    let report = world.tick(1.0 / 60.0).unwrap();
    let Some(FrameAction::WaterClick(event)) = report.actions.first().copied() else {
        panic!("expected a water click, got {:?}", report.actions);
    };
    let expected = PoolGeometry::default().world_to_uv(target);
    assert!((event.center - expected).length() < 1e-3);
    assert!((event.magnitude - 0.3).abs() < 1e-6);
    assert!(report.wave_forced);
    assert!(report.impact.is_none());
    assert!(world.water().max_abs_height() > 0.0);
}

#[test]
fn click_outside_pool_does_nothing() {
    let mut world = world(10.0);
    world.input_mut().pointer_down(ndc_of(camera(), Vec3::new(45.0, 0.0, 0.0)));
    let report = world.tick(1.0 / 60.0).unwrap();
    assert!(report.actions.is_empty());
    assert!(!report.wave_forced);
}

#[test]
fn click_on_torch_toggles_it() {
    let mut world = world(10.0);
    world
        .input_mut()
        .pointer_down(ndc_of(camera(), Vec3::new(26.0, 2.0, 26.0)));

    let report = world.tick(1.0 / 60.0).unwrap();
    assert_eq!(
        report.actions,
        vec![FrameAction::LightToggled {
            id: LightId(2),
            on: false
        }]
    );
    assert!(!report.wave_forced, "a torch click makes no wave");
    assert!(!world.lights().get(LightId(2)).unwrap().is_on);
}

#[test]
fn grab_drag_release() {
    let mut world = world(10.0);
    let top = world.body().state().position(0);
    world.input_mut().pointer_down(ndc_of(camera(), top));

    let report = world.tick(1.0 / 60.0).unwrap();
    assert_eq!(report.actions, vec![FrameAction::Grabbed(ParticleId(0))]);
    assert_eq!(world.body().phase(), BodyPhase::Held(ParticleId(0)));
    assert_eq!(world.body().state().position(0), top);

    let moved = ndc_of(camera(), top) + Vec2::new(0.1, 0.0);
    world.input_mut().pointer_move(moved);
    let report = world.tick(1.0 / 60.0).unwrap();
    assert_eq!(report.actions, vec![FrameAction::Dragged]);
    let target = world.body().hold().unwrap().target;
    assert!(target.x > top.x);
    assert_eq!(world.body().state().position(0), target);

    world.input_mut().pointer_up();
    let report = world.tick(1.0 / 60.0).unwrap();
    assert_eq!(report.actions, vec![FrameAction::Released(ParticleId(0))]);
    assert_eq!(world.body().phase(), BodyPhase::Resting);
    assert!(!world.grabber().is_holding());
}

#[test]
fn telemetry_sees_every_stage() {
    let mut world = world(5.0);
    let sink = VecSink::new();
    let log = sink.log();
    world.telemetry_mut().add_sink(Box::new(sink));

    world.params_mut().set_mass(0.0);
    world.input_mut().toggle_light(LightId(4));
    world.tick(1.0 / 60.0).unwrap();

    let labels: Vec<&str> = log.events().iter().map(|e| e.kind.label()).collect();
    assert_eq!(
        labels,
        vec![
            "frame_begin",
            "parameter_clamped",
            "light_toggled",
            "body_step",
            "wave_step",
            "frame_end"
        ]
    );
    assert!(log.events().iter().all(|e| e.frame == 0));
}

#[test]
fn reset_restores_start() {
    let mut world = world(0.2);
    world.input_mut().pointer_down(ndc_of(camera(), Vec3::new(10.0, 0.0, 10.0)));
    world.run(30).unwrap();
    assert!(world.water().max_abs_height() > 0.0);

    world.reset();
    assert_eq!(world.frame(), 0);
    assert_eq!(world.water().max_abs_height(), 0.0);
    assert_eq!(world.body().state().positions(), world.body().mesh().positions);
}

#[test]
fn tracking_waves_stays_finite() {
    let mut world = world(0.1);
    world.set_collision_mode(CollisionMode::TrackWaves);
    world.input_mut().pointer_down(ndc_of(camera(), Vec3::new(3.0, 0.0, 0.0)));
    world.run(40).unwrap();
    assert!(world.body().state().is_finite());
    assert!(world.water().max_abs_height().is_finite());
}

#[test]
fn renderer_outputs_have_expected_shape() {
    let mut world = world(1.0);
    let r = world.water().config().resolution;
    assert_eq!(world.height_image().as_interleaved().len(), r * r * 2);
    let view = world.ball_buffers();
    assert_eq!(view.positions.len(), view.normals.len());
    assert_eq!(view.positions.len() % 9, 0);
}
