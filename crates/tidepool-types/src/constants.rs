//! Simulation constants and reference defaults.

/// Gravitational acceleration magnitude (m/s²) used by the ball.
pub const GRAVITY: f32 = 9.8;

/// Default frame timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

// ─── Heightfield ───

/// Default heightfield resolution (cells per side).
pub const SIM_RESOLUTION: usize = 256;

/// Side length of the square pool in world units.
pub const POOL_DIMENSION: f32 = 60.0;

/// Wave propagation factor applied to the neighbour-average term.
pub const PROPAGATION_FACTOR: f32 = 1.5;

/// Default per-step multiplicative wave damping.
pub const DEFAULT_WAVE_DAMPING: f32 = 0.985;

/// Largest wave damping accepted by the interactive parameter surface.
pub const MAX_WAVE_DAMPING: f32 = 0.999;

/// Radius of a forcing disturbance in normalized (UV) units.
pub const FORCING_RADIUS: f32 = 0.05;

/// Vertical scale applied to heights when the surface is displaced for display.
pub const SURFACE_DISPLAY_SCALE: f32 = 0.5;

/// Default magnitude of a user click on the water.
pub const DEFAULT_CLICK_FORCE: f32 = 0.3;

// ─── Ball ───

/// Default per-particle mass.
pub const DEFAULT_PARTICLE_MASS: f32 = 0.1;

/// Default spring stiffness (Hooke's constant).
pub const DEFAULT_STIFFNESS: f32 = 80.0;

/// Default spring damping coefficient.
pub const DEFAULT_SPRING_DAMPING: f32 = 0.7;

/// Default restitution on bounce.
pub const DEFAULT_RESTITUTION: f32 = 0.5;

/// Height of the water collision plane.
pub const WATER_LEVEL: f32 = 0.0;

// ─── Collision feedback ───

/// Impact velocity to wave magnitude gain.
pub const IMPACT_GAIN: f32 = 0.2;

/// Upper bound on a single impact's wave magnitude.
pub const IMPACT_CAP: f32 = 0.8;

/// Impacts weaker than this are dropped.
pub const IMPACT_THRESHOLD: f32 = 0.02;

// ─── Interaction & lights ───

/// Picking radius in normalized device coordinates.
pub const PICK_RADIUS: f32 = 0.05;

/// Number of light slots in the torch bank.
pub const MAX_LIGHTS: usize = 8;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;
