//! Nearest-particle picking in NDC.

use tidepool_math::{Mat4, Vec2};
use tidepool_solver::ParticleState;
use tidepool_types::ParticleId;

/// The particle whose projection is closest to `screen`, if any lies
/// strictly within `radius` (NDC units).
///
/// Particles with clip `w == 0` are skipped. Ties go to the lowest index.
pub fn find_nearest(
    state: &ParticleState,
    screen: Vec2,
    view_proj: Mat4,
    radius: f32,
) -> Option<ParticleId> {
    let mut best = None;
    let mut min_dist = radius * radius;

    for i in 0..state.count {
        let clip = view_proj * state.position(i).extend(1.0);
        if clip.w == 0.0 {
            continue;
        }
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        let d2 = screen.distance_squared(ndc);
        if d2 < min_dist {
            min_dist = d2;
            best = Some(ParticleId(i as u32));
        }
    }
    best
}
