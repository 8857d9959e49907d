//! Benchmark runner: plays a scenario's script through a pool world and
//! collects metrics.

use std::time::Instant;

use tidepool_math::Vec2;
use tidepool_scene::PoolWorld;
use tidepool_types::TidepoolResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{CueAction, Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: &Scenario) -> TidepoolResult<BenchmarkMetrics> {
        let mut world = PoolWorld::with_mesh(scenario.config.clone(), scenario.ball.clone())?;
        world.input_mut().set_view_proj(scenario.view_proj);

        let dt = scenario.config.dt;
        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.frames as usize);
        let mut forwarded_impacts = 0u32;
        let mut peak_wave_height = 0.0f32;
        let mut pointer_origin = Vec2::ZERO;

        let total_start = Instant::now();

        for frame in 0..scenario.frames {
            for cue in scenario.cues_at(frame) {
                match cue.action {
                    CueAction::Click(ndc) => {
                        world.input_mut().pointer_down(ndc);
                        world.input_mut().pointer_up();
                    }
                    CueAction::GrabParticle(id) => {
                        let p = world.body().state().position(id.index());
                        let clip = scenario.view_proj * p.extend(1.0);
                        if clip.w != 0.0 {
                            pointer_origin = Vec2::new(clip.x / clip.w, clip.y / clip.w);
                            world.input_mut().pointer_down(pointer_origin);
                        }
                    }
                    CueAction::DragBy(offset) => world.input_mut().pointer_move(pointer_origin + offset),
                    CueAction::Release => world.input_mut().pointer_up(),
                }
            }

            let report = world.tick(dt)?;
            step_times.push(report.wall_time);
            forwarded_impacts += report.contact.forwarded;
            peak_wave_height = peak_wave_height.max(world.water().max_abs_height());
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            total_wall_time,
            frames: scenario.frames,
            avg_step_time: avg_step,
            min_step_time: if step_times.is_empty() { 0.0 } else { min_step },
            max_step_time: max_step,
            final_kinetic_energy: world.body().kinetic_energy(),
            forwarded_impacts,
            peak_wave_height,
            final_wave_energy: world.water().wave_energy(),
            particle_count: world.body().particle_count(),
            spring_count: world.body().springs().len(),
            resolution: world.water().config().resolution,
        })
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> TidepoolResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
