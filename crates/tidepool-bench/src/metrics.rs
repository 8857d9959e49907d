//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Number of frames executed.
    pub frames: u32,
    /// Average wall-clock time per frame (seconds).
    pub avg_step_time: f64,
    /// Minimum frame time.
    pub min_step_time: f64,
    /// Maximum frame time.
    pub max_step_time: f64,
    /// Final kinetic energy of the ball (should approach zero once it settles).
    pub final_kinetic_energy: f64,
    /// Impacts that reached the water.
    pub forwarded_impacts: u32,
    /// Largest |h| seen on the water at the end of any frame.
    pub peak_wave_height: f32,
    /// Wave energy after the last frame.
    pub final_wave_energy: f64,
    /// Ball particle count.
    pub particle_count: usize,
    /// Ball spring count.
    pub spring_count: usize,
    /// Heightfield cells per side.
    pub resolution: usize,
}

impl BenchmarkMetrics {
    /// CSV header line.
    pub fn to_csv_header() -> String {
        "scenario,particles,springs,resolution,frames,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,forwarded_impacts,peak_wave_height,final_wave_energy".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{},{:.6},{:.6e}",
            self.scenario,
            self.particle_count,
            self.spring_count,
            self.resolution,
            self.frames,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.forwarded_impacts,
            self.peak_wave_height,
            self.final_wave_energy,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
