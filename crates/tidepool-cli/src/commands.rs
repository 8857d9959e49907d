//! CLI command implementations.

use std::path::Path;

use tidepool_bench::metrics::BenchmarkMetrics;
use tidepool_bench::runner::BenchmarkRunner;
use tidepool_bench::scenarios::{Scenario, ScenarioKind};
use tidepool_io::{load_obj, validate_body_mesh, validate_scene, SceneConfig};
use tidepool_mesh::Topology;
use tidepool_scene::PoolWorld;
use tidepool_telemetry::TracingSink;

/// Run the pool headless.
pub fn simulate(
    config_path: Option<&str>,
    mesh_path: Option<&str>,
    frames: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tidepool Simulation");
    println!("───────────────────");

    let mut config = match config_path {
        Some(path) => {
            println!("Config: {path}");
            SceneConfig::load(path)?
        }
        None => {
            println!("Config: defaults");
            SceneConfig::default()
        }
    };
    if let Some(mesh) = mesh_path {
        config.mesh = Some(mesh.into());
    }
    match &config.mesh {
        Some(mesh) => println!("Ball:   {}", mesh.display()),
        None => println!("Ball:   generated sphere"),
    }
    println!();

    let mut world = PoolWorld::new(config)?;
    world
        .telemetry_mut()
        .add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));

    let dt = world.config().dt;
    let mut impacts = 0u32;
    let mut forwarded = 0u32;
    let mut peak_wave = 0.0f32;
    let mut wall = 0.0f64;
    for _ in 0..frames {
        let report = world.tick(dt)?;
        impacts += report.contact.impacts;
        forwarded += report.contact.forwarded;
        wall += report.wall_time;
        peak_wave = peak_wave.max(world.water().max_abs_height());
    }
    world.telemetry_mut().finish();

    let body = world.body();
    println!("Frames:        {}", world.frame());
    println!("Sim time:      {:.3}s", world.sim_time());
    println!("Particles:     {} ({} springs)", body.particle_count(), body.springs().len());
    println!("Impacts:       {impacts} ({forwarded} reached the water)");
    println!("Final KE:      {:.6e}", body.kinetic_energy());
    if let Some(lowest) = body.lowest_point() {
        println!("Lowest point:  {:.4}", lowest.y);
    }
    println!("Peak wave:     {peak_wave:.4}");
    println!("Wave energy:   {:.6e}", world.water().wave_energy());
    if frames > 0 {
        println!("Avg frame:     {:.3}ms", wall / frames as f64 * 1000.0);
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tidepool Benchmark Suite");
    println!("════════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_name.parse::<ScenarioKind>()?]
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);

        println!(
            "Running: {} ({} verts, {} frames)",
            kind.name(),
            scenario.ball.vertex_count(),
            scenario.frames,
        );

        let metrics = BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg frame:     {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Impacts fed:   {}", metrics.forwarded_impacts);
        println!("  Peak wave:     {:.4}", metrics.peak_wave_height);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Validate a mesh or config.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tidepool Validator");
    println!("──────────────────");
    println!();

    let extension = Path::new(path).extension().and_then(|e| e.to_str()).unwrap_or("");
    match extension {
        "toml" => {
            println!("Validating scene: {path}");
            let config = SceneConfig::load(path)?;
            validate_scene(&config)?;
            if let Some(mesh) = &config.mesh {
                let ball = load_obj(mesh)?;
                validate_body_mesh(&ball)?;
                println!("Ball mesh {} is valid.", mesh.display());
            }
            println!("✅ Scene is valid.");
        }
        "obj" => {
            println!("Validating mesh: {path}");
            let mesh = load_obj(path)?;
            match validate_body_mesh(&mesh) {
                Ok(()) => {
                    let topology = Topology::build(&mesh);
                    println!(
                        "✅ Mesh is valid ({} verts, {} faces, {} springs, {}).",
                        mesh.vertex_count(),
                        mesh.face_count(),
                        topology.edge_count(),
                        if topology.is_closed() {
                            "closed".to_string()
                        } else {
                            format!("{} boundary edges", topology.boundary_edge_count())
                        }
                    );
                }
                Err(e) => println!("❌ Mesh validation failed: {e}"),
            }
        }
        _ => println!("Unsupported file format. Use .toml (scene) or .obj (mesh)."),
    }

    Ok(())
}
