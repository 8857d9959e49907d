//! Benchmark scenarios: scene + camera + input script for each case.
//!
//! Three canonical scenarios:
//! 1. **Ball drop**: The ball falls onto the water and settles
//! 2. **Ripple**: Repeated clicks on the water, the ball left alone
//! 3. **Drag release**: The ball is grabbed, lifted, and let go

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tidepool_io::SceneConfig;
use tidepool_math::{Mat4, Vec2, Vec3};
use tidepool_mesh::generators::uv_sphere;
use tidepool_mesh::PolyMesh;
use tidepool_solver::BodyConfig;
use tidepool_types::{ParticleId, TidepoolError};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Ball dropped onto calm water.
    BallDrop,
    /// Water clicked at several points.
    Ripple,
    /// Ball grabbed, dragged upward and released.
    DragRelease,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::BallDrop,
            ScenarioKind::Ripple,
            ScenarioKind::DragRelease,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::BallDrop => "ball_drop",
            ScenarioKind::Ripple => "ripple",
            ScenarioKind::DragRelease => "drag_release",
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = TidepoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::all().iter().map(|k| k.name()).collect();
                TidepoolError::config(format!("unknown scenario '{s}', expected one of: {}", names.join(", ")))
            })
    }
}

/// What the scripted user does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueAction {
    /// Press and release at a point in normalized device coordinates.
    Click(Vec2),
    /// Press over a particle's current screen position.
    GrabParticle(ParticleId),
    /// Move the pressed pointer by an offset from where it went down.
    DragBy(Vec2),
    /// Release the pointer.
    Release,
}

/// A scripted action delivered before a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub frame: u32,
    pub action: CueAction,
}

impl Cue {
    pub fn new(frame: u32, action: CueAction) -> Self {
        Self { frame, action }
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Pool setup.
    pub config: SceneConfig,
    /// Ball mesh.
    pub ball: PolyMesh,
    /// Camera the script's pointer positions refer to.
    pub view_proj: Mat4,
    /// Input script, sorted by frame.
    pub script: Vec<Cue>,
    /// Number of frames to simulate.
    pub frames: u32,
}

fn perspective() -> Mat4 {
    Mat4::perspective_rh_gl(60f32.to_radians(), 16.0 / 9.0, 0.1, 500.0)
}

fn ball() -> PolyMesh {
    uv_sphere(1.0, 12, 24)
}

impl Scenario {
    /// Create the ball drop scenario.
    ///
    /// A radius-2 ball released 3 units above the water, 3 seconds at 60fps.
    pub fn ball_drop() -> Self {
        let config = SceneConfig {
            body: BodyConfig {
                drop_height: 5.0,
                ..Default::default()
            },
            ..Default::default()
        };
        Self {
            kind: ScenarioKind::BallDrop,
            config,
            ball: ball(),
            view_proj: perspective() * Mat4::look_at_rh(Vec3::new(0.0, 8.0, 20.0), Vec3::ZERO, Vec3::Y),
            script: Vec::new(),
            frames: 180,
        }
    }

    /// Create the ripple scenario.
    ///
    /// A top-down camera clicks the four quadrants of the pool in turn,
    /// once every half second, for 4 seconds.
    pub fn ripple() -> Self {
        let config = SceneConfig {
            body: BodyConfig {
                drop_height: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let points = [
            Vec2::new(0.3, 0.5),
            Vec2::new(-0.3, 0.5),
            Vec2::new(-0.3, -0.5),
            Vec2::new(0.3, -0.5),
        ];
        let script = (0..8u32)
            .map(|i| Cue::new(i * 30, CueAction::Click(points[i as usize % points.len()])))
            .collect();
        Self {
            kind: ScenarioKind::Ripple,
            config,
            ball: ball(),
            view_proj: perspective() * Mat4::look_at_rh(Vec3::new(0.0, 60.0, 0.0), Vec3::ZERO, Vec3::NEG_Z),
            script,
            frames: 240,
        }
    }

    /// Create the drag release scenario.
    ///
    /// The ball rests on the water, its top particle is grabbed after half a
    /// second, dragged up over one second, then released and left to fall.
    pub fn drag_release() -> Self {
        let config = SceneConfig {
            body: BodyConfig {
                drop_height: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut script = vec![Cue::new(30, CueAction::GrabParticle(ParticleId(0)))];
        for k in 1..=60u32 {
            let lift = 0.4 * k as f32 / 60.0;
            script.push(Cue::new(30 + k, CueAction::DragBy(Vec2::new(0.0, lift))));
        }
        script.push(Cue::new(91, CueAction::Release));
        Self {
            kind: ScenarioKind::DragRelease,
            config,
            ball: ball(),
            view_proj: perspective() * Mat4::look_at_rh(Vec3::new(0.0, 4.0, 16.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y),
            script,
            frames: 240,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::BallDrop => Self::ball_drop(),
            ScenarioKind::Ripple => Self::ripple(),
            ScenarioKind::DragRelease => Self::drag_release(),
        }
    }

    /// Script cues due before `frame`.
    pub fn cues_at(&self, frame: u32) -> impl Iterator<Item = &Cue> {
        self.script.iter().filter(move |cue| cue.frame == frame)
    }
}
