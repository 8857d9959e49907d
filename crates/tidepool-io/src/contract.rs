//! Scene configuration contract.
//!
//! Everything needed to set up a pool: time step, pool size, click force,
//! and the nested wave, body and impact configurations. Loaded from TOML
//! with every missing field defaulted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tidepool_contact::{CollisionFeedback, ImpactConfig};
use tidepool_solver::BodyConfig;
use tidepool_types::constants::{DEFAULT_CLICK_FORCE, DEFAULT_DT, POOL_DIMENSION, WATER_LEVEL};
use tidepool_types::{TidepoolError, TidepoolResult};
use tidepool_water::{PoolGeometry, WaveConfig};

/// Which surface the ball collides against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CollisionMode {
    /// A fixed horizontal plane.
    FlatPlane { height: f32 },
    /// The displaced heightfield.
    TrackWaves,
}

impl Default for CollisionMode {
    fn default() -> Self {
        Self::FlatPlane {
            height: WATER_LEVEL,
        }
    }
}

/// Complete scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Frame time step in seconds.
    pub dt: f32,

    /// Pool side length in world units.
    pub pool_dimension: f32,

    /// Magnitude of a water click.
    pub click_force: f32,

    /// Whether the torches start lit.
    pub torches_on: bool,

    /// Ball mesh to load. `None` uses a generated sphere.
    pub mesh: Option<PathBuf>,

    pub collision: CollisionMode,
    pub wave: WaveConfig,
    pub body: BodyConfig,
    pub impact: ImpactConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            pool_dimension: POOL_DIMENSION,
            click_force: DEFAULT_CLICK_FORCE,
            torches_on: true,
            mesh: None,
            collision: CollisionMode::default(),
            wave: WaveConfig::default(),
            body: BodyConfig::default(),
            impact: ImpactConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parses TOML. Syntax and type errors carry the offending line.
    pub fn from_toml_str(text: &str) -> TidepoolResult<Self> {
        toml::from_str(text).map_err(|e| {
            let line = e
                .span()
                .map(|span| text[..span.start.min(text.len())].matches('\n').count() + 1)
                .unwrap_or(0);
            TidepoolError::Parse {
                line,
                message: e.message().to_string(),
            }
        })
    }

    /// Reads and parses a TOML file. Relative mesh paths are resolved
    /// against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> TidepoolResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(mesh), Some(dir)) = (&config.mesh, path.parent()) {
            if mesh.is_relative() {
                config.mesh = Some(dir.join(mesh));
            }
        }
        tracing::debug!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> TidepoolResult<String> {
        toml::to_string_pretty(self).map_err(|e| TidepoolError::Serialization(e.to_string()))
    }

    pub fn pool(&self) -> PoolGeometry {
        PoolGeometry::new(self.pool_dimension)
    }

    /// Impact feedback wired to this scene's pool.
    pub fn feedback(&self) -> CollisionFeedback {
        CollisionFeedback::new(self.impact, self.pool())
    }
}
