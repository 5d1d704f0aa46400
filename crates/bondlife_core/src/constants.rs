// Default tuning constants (screen-space units: 1 unit = 1 logical pixel,
// 1 step = 1 integrator sub-step). `SimConfig::default()` is built from these.

/// Maximum interaction radius; also the spatial grid cell size
pub const MAX_DIST: f32 = 100.0;

/// Particle radius. `4 * r^2` is the core-repulsion and bond-comfort distance
pub const PARTICLE_RADIUS: f32 = 5.0;

/// Particles spawned by a reset
pub const PARTICLE_COUNT: u32 = 850;

/// Global impulse scale applied to every force term
pub const SPEED: f32 = 4.0;

/// Integrator sub-steps per rendered frame
pub const SUBSTEPS: u32 = 3;

/// Width of the reflective margin where particles are nudged inward
pub const BORDER: f32 = 30.0;

/// Restoring force of a stretched bond (negative pulls the pair together)
pub const LINK_FORCE: f32 = -0.015;

/// Height reserved at the bottom of the window for the status bar
pub const UI_MARGIN: f32 = 40.0;

/// Multiplicative velocity damping per sub-step
pub const DRAG: f32 = 0.98;

/// Hard cap on speed after damping
pub const MAX_SPEED: f32 = 1.0;

/// Inward velocity nudge inside the reflective margin, as a fraction of SPEED
pub const BORDER_PUSH: f32 = 0.05;

/// Velocity factor applied when a particle bounces off an edge
pub const BOUNCE: f32 = -0.5;

/// Coupling matrix increment used by the matrix editor
pub const MATRIX_STEP: f32 = 0.1;

/// Default world extent
pub const WORLD_WIDTH: f32 = 1920.0;
pub const WORLD_HEIGHT: f32 = 1080.0;

/// Number of particle kinds in the default rule set
pub const KIND_COUNT: usize = 3;

pub const DEFAULT_COUPLING: [[f32; KIND_COUNT]; KIND_COUNT] = [
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

pub const DEFAULT_LINKS: [u32; KIND_COUNT] = [1, 3, 2];

pub const DEFAULT_LINKS_POSSIBLE: [[u32; KIND_COUNT]; KIND_COUNT] = [
    [0, 1, 1],
    [1, 2, 1],
    [1, 1, 2],
];
