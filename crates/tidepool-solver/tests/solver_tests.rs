//! Integration tests for tidepool-solver.

use proptest::prelude::*;
use tidepool_math::Vec3;
use tidepool_mesh::generators::{quad_grid, uv_sphere};
use tidepool_mesh::PolyMesh;
use tidepool_solver::{
    BodyConfig, BodyPhase, CollisionSurface, FlatPlane, ImpactLog, MassSpringBody, NullImpactSink,
    ParticleState,
};
use tidepool_types::constants::{IMPACT_GAIN, IMPACT_THRESHOLD};
use tidepool_types::ParticleId;

fn quad_body(config: BodyConfig) -> MassSpringBody {
    MassSpringBody::from_mesh(quad_grid(1, 1, 1.0, 1.0), config).unwrap()
}

fn ball(drop_height: f32) -> MassSpringBody {
    let config = BodyConfig {
        scale: Some(1.0),
        drop_height,
        ..Default::default()
    };
    MassSpringBody::from_mesh(uv_sphere(1.0, 6, 8), config).unwrap()
}

struct Slope;

impl CollisionSurface for Slope {
    fn height_at(&self, x: f32, _z: f32) -> f32 {
        0.25 * x
    }
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_matches_reference() {
    let cfg = BodyConfig::default();
    assert_eq!(cfg.gravity, [0.0, -9.8, 0.0]);
    assert_eq!(cfg.mass, 0.1);
    assert_eq!(cfg.stiffness, 80.0);
    assert_eq!(cfg.damping, 0.7);
    assert_eq!(cfg.restitution, 0.5);
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_rejects_bad_ranges() {
    let bad = [
        BodyConfig { mass: 0.0, ..Default::default() },
        BodyConfig { mass: -1.0, ..Default::default() },
        BodyConfig { restitution: 1.5, ..Default::default() },
        BodyConfig { stiffness: -1.0, ..Default::default() },
        BodyConfig { damping: f32::NAN, ..Default::default() },
        BodyConfig { gravity: [0.0, f32::INFINITY, 0.0], ..Default::default() },
        BodyConfig { scale: Some(0.0), ..Default::default() },
    ];
    for cfg in bad {
        assert!(cfg.validate().is_err(), "accepted {cfg:?}");
    }
}

#[test]
fn config_from_partial_toml() {
    let cfg: BodyConfig = toml::from_str("mass = 0.5\ndrop_height = 3.0\n").unwrap();
    assert_eq!(cfg.mass, 0.5);
    assert_eq!(cfg.drop_height, 3.0);
    assert_eq!(cfg.stiffness, 80.0);
    assert_eq!(cfg.scale, None);
}

#[test]
fn set_config_keeps_old_on_error() {
    let mut body = quad_body(BodyConfig::default());
    let bad = BodyConfig {
        mass: -2.0,
        ..Default::default()
    };
    assert!(body.set_config(bad).is_err());
    assert_eq!(body.config().mass, 0.1);
}

// ─── Placement Tests ──────────────────────────────────────────

#[test]
fn placement_centers_horizontally_and_lifts() {
    let mut mesh = quad_grid(2, 2, 2.0, 2.0);
    mesh.translate(Vec3::new(10.0, 1.0, -4.0));
    let config = BodyConfig {
        scale: Some(1.0),
        drop_height: 5.0,
        ..Default::default()
    };
    let body = MassSpringBody::from_mesh(mesh, config).unwrap();
    let bb = body.mesh().bounding_box().unwrap();
    assert!(bb.center().x.abs() < 1e-6);
    assert!(bb.center().z.abs() < 1e-6);
    assert!((bb.min.y - 6.0).abs() < 1e-6, "y is not re-centered");
}

#[test]
fn placement_scales_by_max_extent_by_default() {
    let body = MassSpringBody::from_mesh(quad_grid(1, 1, 2.0, 2.0), BodyConfig::default()).unwrap();
    let bb = body.mesh().bounding_box().unwrap();
    assert!((bb.max_extent() - 4.0).abs() < 1e-6);
}

#[test]
fn invalid_mesh_is_rejected() {
    let mesh = PolyMesh {
        positions: vec![Vec3::ZERO],
        faces: vec![vec![0, 1, 2]],
        texcoords: None,
        normals: None,
    };
    assert!(MassSpringBody::from_mesh(mesh, BodyConfig::default()).is_err());
}

// ─── Spring Tests ─────────────────────────────────────────────

#[test]
fn springs_match_unique_edges() {
    let body = quad_body(BodyConfig::default());
    assert_eq!(body.springs().len(), 4);

    let sphere = ball(2.0);
    let topo = tidepool_mesh::Topology::build(sphere.mesh());
    assert_eq!(sphere.springs().len(), topo.edge_count());
}

#[test]
fn rest_lengths_are_idempotent() {
    let config = BodyConfig {
        gravity: [0.0; 3],
        ..Default::default()
    };
    let config = BodyConfig {
        drop_height: 3.0,
        ..config
    };
    let mut body = MassSpringBody::from_mesh(uv_sphere(1.0, 6, 8), config).unwrap();
    assert_eq!(body.elastic_energy(), 0.0);
    assert_eq!(body.springs().max_extension(body.state()), 0.0);

    let before = body.state().positions();
    body.advance(0.01, &FlatPlane::default(), &mut NullImpactSink).unwrap();
    assert_eq!(body.state().positions(), before);
}

#[test]
fn stretched_spring_pulls_endpoints_together() {
    let mut state = ParticleState::from_positions(&[Vec3::ZERO, Vec3::X]);
    let topo = tidepool_mesh::Topology::from_faces(&[vec![0, 1]], 2);
    let springs = tidepool_solver::SpringNetwork::from_topology(&topo, &state);
    state.set_position(1, Vec3::X * 2.0);

    state.fill_forces(Vec3::ZERO);
    springs.accumulate_forces(&mut state, 10.0, 0.0);
    assert_eq!(state.force_x[0], 10.0);
    assert_eq!(state.force_x[1], -10.0);
}

// ─── Step Tests ───────────────────────────────────────────────

#[test]
fn free_fall_single_step() {
    let mut body = quad_body(BodyConfig {
        drop_height: 5.0,
        ..BodyConfig::free_fall()
    });
    let before = body.state().positions();
    let report = body.advance(0.01, &FlatPlane::default(), &mut NullImpactSink).unwrap();
    assert_eq!(report.collisions, 0);

    for i in 0..body.particle_count() {
        let v = body.state().velocity(i);
        assert!((v.y + 0.098).abs() < 1e-6, "v = {v:?}");
        assert_eq!(v.x, 0.0);
        let dy = body.state().position(i).y - before[i].y;
        assert!((dy + 0.00098).abs() < 1e-6, "dy = {dy}");
    }
}

#[test]
fn invalid_dt_is_rejected() {
    let mut body = quad_body(BodyConfig::default());
    for dt in [0.0, -0.01, f32::NAN, f32::INFINITY] {
        assert!(body.advance(dt, &FlatPlane::default(), &mut NullImpactSink).is_err());
    }
}

#[test]
fn empty_body_is_noop() {
    let mut body = MassSpringBody::from_mesh(PolyMesh::default(), BodyConfig::default()).unwrap();
    let report = body.advance(0.01, &FlatPlane::default(), &mut NullImpactSink).unwrap();
    assert_eq!(report.collisions, 0);
    assert!(body.lowest_point().is_none());
}

#[test]
fn impact_reports_then_reflects() {
    let mut body = quad_body(BodyConfig {
        drop_height: 0.001,
        ..BodyConfig::free_fall()
    });
    let mut log = ImpactLog::default();
    let report = body.advance(0.1, &FlatPlane::default(), &mut log).unwrap();

    assert_eq!(report.collisions, 4);
    assert_eq!(report.impacts, 4);
    assert_eq!(log.impacts.len(), 4);

    let (pos, vel) = log.impacts[0];
    assert_eq!(pos.y, 0.0);
    assert!(vel.y < 0.0, "sink sees the pre-bounce velocity");
    let after = body.state().velocity(0);
    assert!((after.y + 0.5 * vel.y).abs() < 1e-6);
}

#[test]
fn collision_follows_custom_surface() {
    let mut body = quad_body(BodyConfig::free_fall());
    for _ in 0..20 {
        body.advance(0.02, &Slope, &mut NullImpactSink).unwrap();
    }
    for i in 0..body.particle_count() {
        let p = body.state().position(i);
        assert!(p.y >= 0.25 * p.x - 1e-6);
    }
}

#[test]
fn ball_comes_to_rest_above_water() {
    let mut body = ball(1.0);
    for _ in 0..600 {
        body.advance(1.0 / 120.0, &FlatPlane::default(), &mut NullImpactSink).unwrap();
    }
    assert!(body.state().is_finite());
    assert!(body.lowest_point().unwrap().y >= 0.0);
    assert!(body.kinetic_energy().is_finite());
}

// ─── Hold Tests ───────────────────────────────────────────────

#[test]
fn held_particle_is_pinned() {
    let mut body = ball(2.0);
    body.grab(ParticleId(3)).unwrap();
    assert_eq!(body.phase(), BodyPhase::Held(ParticleId(3)));

    let target = Vec3::new(0.5, 4.0, -0.5);
    assert!(body.set_hold_target(target));
    for _ in 0..30 {
        body.advance(0.01, &FlatPlane::default(), &mut NullImpactSink).unwrap();
        assert_eq!(body.state().position(3), target);
    }

    body.release();
    assert_eq!(body.phase(), BodyPhase::Resting);
}

#[test]
fn held_particle_under_water_reports_impact() {
    let mut body = ball(2.0);
    body.grab(ParticleId(0)).unwrap();
    let target = Vec3::new(0.0, -1.0, 0.0);
    body.set_hold_target(target);

    let mut log = ImpactLog::default();
    let report = body.advance(1.0 / 60.0, &FlatPlane::default(), &mut log).unwrap();

    assert_eq!(report.impacts, 1);
    assert_eq!(log.impacts.len(), 1);
    let (pos, vel) = log.impacts[0];
    assert_eq!(pos, Vec3::ZERO);
    assert!(vel.y < 0.0);
    assert!(vel.y.abs() * IMPACT_GAIN >= IMPACT_THRESHOLD);

    assert_eq!(body.state().position(0).y, 0.0);
    assert!(body.state().velocity(0).y > 0.0, "velocity is reflected");
    assert_eq!(body.hold().unwrap().target, target, "stored target is untouched");
}

#[test]
fn hold_api_edge_cases() {
    let mut body = ball(2.0);
    assert!(!body.set_hold_target(Vec3::ONE), "no hold yet");
    assert!(body.grab(ParticleId(10_000)).is_err());

    body.grab(ParticleId(1)).unwrap();
    assert!(!body.set_hold_target(Vec3::new(f32::NAN, 0.0, 0.0)));

    body.reset();
    assert_eq!(body.phase(), BodyPhase::Resting);
}

#[test]
fn reset_restores_rest_shape() {
    let mut body = ball(2.0);
    let rest = body.state().positions();
    for _ in 0..10 {
        body.advance(0.01, &FlatPlane::default(), &mut NullImpactSink).unwrap();
    }
    assert_ne!(body.state().positions(), rest);
    body.reset();
    assert_eq!(body.state().positions(), rest);
    assert_eq!(body.kinetic_energy(), 0.0);
}

// ─── Render Buffer Tests ──────────────────────────────────────

#[test]
fn render_buffers_track_positions() {
    let mut body = quad_body(BodyConfig {
        drop_height: 2.0,
        ..Default::default()
    });
    let view = body.render_buffers();
    assert_eq!(view.positions.len(), 18);
    assert_eq!(view.normals.len(), 18);
    assert_eq!(view.positions[1], 2.0);
    assert!((view.normals[1] - 1.0).abs() < 1e-6);

    body.advance(0.01, &FlatPlane::default(), &mut NullImpactSink).unwrap();
    let y = body.state().position(0).y;
    let view = body.render_buffers();
    assert_eq!(view.positions[1], y);
}

// ─── Property Tests ───────────────────────────────────────────

proptest! {
    #[test]
    fn particles_never_end_below_surface(
        drop in 0.0f32..3.0,
        vy in -20.0f32..5.0,
        dt in 0.001f32..0.008,
        steps in 1usize..40,
    ) {
        let mut body = ball(drop);
        body.launch(Vec3::new(0.0, vy, 0.0));
        let mut log = ImpactLog::default();
        for _ in 0..steps {
            body.advance(dt, &FlatPlane::default(), &mut log).unwrap();
            for i in 0..body.particle_count() {
                prop_assert!(body.state().pos_y[i] >= 0.0);
            }
        }
    }
}
