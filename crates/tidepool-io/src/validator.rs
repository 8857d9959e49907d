//! Scene and mesh validation.
//!
//! Validates configuration before a simulator receives it, catching
//! out-of-range values early with clear diagnostics.

use tidepool_mesh::PolyMesh;
use tidepool_types::{TidepoolError, TidepoolResult};

use crate::contract::{CollisionMode, SceneConfig};

/// Validates every field of a scene configuration.
pub fn validate_scene(config: &SceneConfig) -> TidepoolResult<()> {
    if !(config.dt > 0.0 && config.dt.is_finite()) {
        return Err(TidepoolError::config("Timestep dt must be positive"));
    }
    if config.dt > 1.0 {
        return Err(TidepoolError::config("Timestep dt > 1.0 is unreasonably large"));
    }
    if !(config.pool_dimension > 0.0 && config.pool_dimension.is_finite()) {
        return Err(TidepoolError::config("Pool dimension must be positive"));
    }
    if !(config.click_force >= 0.0 && config.click_force.is_finite()) {
        return Err(TidepoolError::config("Click force must be non-negative"));
    }
    if let CollisionMode::FlatPlane { height } = config.collision {
        if !height.is_finite() {
            return Err(TidepoolError::config("Collision plane height must be finite"));
        }
    }

    config.wave.validate()?;
    config.body.validate()?;
    config.impact.validate()?;
    Ok(())
}

/// Validates a mesh meant to become the ball.
///
/// Beyond index integrity the mesh must have at least one vertex and one
/// face with an edge, otherwise there is nothing to simulate.
pub fn validate_body_mesh(mesh: &PolyMesh) -> TidepoolResult<()> {
    mesh.validate()?;
    if mesh.is_empty() {
        return Err(TidepoolError::mesh("Body mesh has no vertices"));
    }
    if !mesh.faces.iter().any(|f| f.len() >= 2) {
        return Err(TidepoolError::mesh("Body mesh has no edges"));
    }
    Ok(())
}
