//! Integration tests for tidepool-contact.

use tidepool_contact::{CollisionFeedback, FeedbackSink, ImpactConfig, ImpactOutcome, WaveSurface};
use tidepool_math::{Vec2, Vec3};
use tidepool_mesh::generators::quad_grid;
use tidepool_solver::{BodyConfig, CollisionSurface, FlatPlane, ImpactSink, MassSpringBody};
use tidepool_water::{ForcingEvent, HeightfieldSim, PoolGeometry, WaveConfig};

fn down(speed: f32) -> Vec3 {
    Vec3::new(0.0, -speed, 0.0)
}

// ─── Feedback Tests ───────────────────────────────────────────

#[test]
fn impact_maps_to_pool_uv() {
    let fb = CollisionFeedback::default();
    let event = fb.on_collision(Vec3::new(15.0, 0.0, -15.0), down(1.0)).unwrap();
    assert_eq!(event.center, Vec2::new(0.75, 0.25));
    assert!((event.magnitude - 0.2).abs() < 1e-6);
}

#[test]
fn weak_impact_is_dropped() {
    let fb = CollisionFeedback::default();
    // 0.05 * 0.2 = 0.01 < 0.02
    assert!(fb.on_collision(Vec3::ZERO, down(0.05)).is_none());
    assert!(matches!(
        fb.classify(Vec3::ZERO, down(0.05)),
        ImpactOutcome::BelowThreshold { .. }
    ));
}

#[test]
fn strong_impact_is_capped() {
    let fb = CollisionFeedback::default();
    let event = fb.on_collision(Vec3::ZERO, down(100.0)).unwrap();
    assert_eq!(event.magnitude, 0.8);
}

#[test]
fn off_pool_impact_is_dropped() {
    let fb = CollisionFeedback::default();
    assert!(fb.on_collision(Vec3::new(31.0, 0.0, 0.0), down(2.0)).is_none());
    // The pool edge itself is inside
    assert!(fb.on_collision(Vec3::new(30.0, 0.0, -30.0), down(2.0)).is_some());
}

#[test]
fn non_finite_velocity_is_dropped() {
    let fb = CollisionFeedback::default();
    assert!(fb.on_collision(Vec3::ZERO, Vec3::new(0.0, f32::NAN, 0.0)).is_none());
}

#[test]
fn custom_pool_dimension() {
    let fb = CollisionFeedback::new(ImpactConfig::default(), PoolGeometry::new(10.0));
    assert!(fb.on_collision(Vec3::new(6.0, 0.0, 0.0), down(1.0)).is_none());
    assert!(fb.on_collision(Vec3::new(4.0, 0.0, 0.0), down(1.0)).is_some());
}

#[test]
fn impact_config_validation_and_serde() {
    assert!(ImpactConfig::default().validate().is_ok());
    let bad = ImpactConfig {
        cap: -1.0,
        ..Default::default()
    };
    assert!(bad.validate().is_err());

    let json = serde_json::to_string(&ImpactConfig::default()).unwrap();
    let back: ImpactConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ImpactConfig::default());
    let partial: ImpactConfig = serde_json::from_str(r#"{"gain": 0.5}"#).unwrap();
    assert_eq!(partial.gain, 0.5);
    assert_eq!(partial.cap, 0.8);
}

// ─── Sink Tests ───────────────────────────────────────────────

#[test]
fn sink_keeps_latest_and_tallies() {
    let mut sink = FeedbackSink::new(CollisionFeedback::default());
    sink.on_impact(Vec3::new(-15.0, 0.0, 0.0), down(1.0));
    sink.on_impact(Vec3::new(15.0, 0.0, 0.0), down(2.0));
    sink.on_impact(Vec3::new(50.0, 0.0, 0.0), down(2.0));
    sink.on_impact(Vec3::ZERO, down(0.01));

    let latest = sink.latest().unwrap();
    assert_eq!(latest.center, Vec2::new(0.75, 0.5));
    let result = sink.result();
    assert_eq!(result.impacts, 4);
    assert_eq!(result.forwarded, 2);
    assert_eq!(result.off_pool, 1);
    assert_eq!(result.below_threshold, 1);
    assert_eq!(sink.records().len(), 4);

    assert!(sink.take_latest().is_some());
    assert!(sink.latest().is_none());
    sink.clear();
    assert_eq!(sink.result().impacts, 0);
    assert!(sink.records().is_empty());
}

#[test]
fn falling_ball_produces_forcing() {
    let config = BodyConfig {
        drop_height: 0.05,
        ..Default::default()
    };
    let mut body = MassSpringBody::from_mesh(quad_grid(2, 2, 1.0, 1.0), config).unwrap();
    let mut sink = FeedbackSink::new(CollisionFeedback::default());

    for _ in 0..30 {
        body.advance(1.0 / 60.0, &FlatPlane::default(), &mut sink).unwrap();
    }
    assert!(sink.result().forwarded > 0);
    let event = sink.latest().unwrap();
    assert!((event.center - Vec2::splat(0.5)).length() < 0.05);
}

// ─── Wave Surface Tests ───────────────────────────────────────

#[test]
fn wave_surface_tracks_heightfield() {
    let mut sim = HeightfieldSim::new(WaveConfig {
        resolution: 4,
        ..Default::default()
    })
    .unwrap();
    sim.submit_forcing(ForcingEvent::new(Vec2::new(0.625, 0.625), 1.0));
    sim.step();

    let surface = WaveSurface::new(&sim);
    assert_eq!(surface.height_at(7.5, 7.5), 0.5);
    assert_eq!(surface.height_at(-7.5, -7.5), 0.0);
    assert_eq!(surface.height_at(100.0, 100.0), 0.0);
}

#[test]
fn body_rests_on_wave_crest() {
    let mut sim = HeightfieldSim::new(WaveConfig {
        resolution: 4,
        ..Default::default()
    })
    .unwrap();
    // Cell (2, 2) holds the pool origin at this resolution
    sim.submit_forcing(ForcingEvent::new(Vec2::new(0.625, 0.625), 1.0));
    sim.step();

    let config = BodyConfig {
        scale: Some(1.0),
        ..BodyConfig::free_fall()
    };
    let mut body = MassSpringBody::from_mesh(quad_grid(1, 1, 0.5, 0.5), config).unwrap();

    let surface = WaveSurface::new(&sim);
    assert_eq!(surface.height_at(0.1, 0.1), 0.5);

    let mut sink = FeedbackSink::default();
    body.advance(0.01, &surface, &mut sink).unwrap();
    for i in 0..body.particle_count() {
        let p = body.state().position(i);
        assert!(p.y >= surface.height_at(p.x, p.z));
    }
    assert!(body.state().position(3).y == 0.5, "corner over the crest is lifted");
}
