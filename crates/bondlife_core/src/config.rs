use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::rules::{CouplingMatrix, LinkRules};
use crate::types::{BoundaryMode, PlayArea};

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Window / world width
    pub width: f32,
    /// Window / world height, including the status bar margin
    pub height: f32,
    /// Height reserved for the status bar at the bottom
    pub ui_margin: f32,
    /// Number of particles spawned on reset
    pub particle_count: u32,
    /// Random seed for reproducible seeding
    pub seed: u64,
    /// Interaction radius and grid cell size
    pub max_dist: f32,
    pub particle_radius: f32,
    /// Impulse scale for all forces
    pub speed: f32,
    /// Integrator sub-steps per rendered frame
    pub substeps: u32,
    /// Width of the reflective margin
    pub border: f32,
    /// Bond restoring force (negative pulls together)
    pub link_force: f32,
    /// Per-step velocity damping factor
    pub drag: f32,
    pub max_speed: f32,
    /// Initial edge topology
    pub boundary: BoundaryMode,
    /// Saturated, unbonded pairs repel with `1/d2` instead of using the coupling
    pub saturated_repulsion: bool,
    /// Increment applied by the matrix editor
    pub matrix_step: f32,
    /// `coupling[i][j]`: coefficient felt by kind `i` near kind `j`
    pub coupling: Vec<Vec<f32>>,
    /// Maximum bonds per particle, per kind
    pub links: Vec<u32>,
    /// `links_possible[i][j]`: maximum partners of kind `j` for a particle of kind `i`
    pub links_possible: Vec<Vec<u32>>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ui_margin: UI_MARGIN,
            particle_count: PARTICLE_COUNT,
            seed: 42,
            max_dist: MAX_DIST,
            particle_radius: PARTICLE_RADIUS,
            speed: SPEED,
            substeps: SUBSTEPS,
            border: BORDER,
            link_force: LINK_FORCE,
            drag: DRAG,
            max_speed: MAX_SPEED,
            boundary: BoundaryMode::Reflective,
            saturated_repulsion: true,
            matrix_step: MATRIX_STEP,
            coupling: DEFAULT_COUPLING.iter().map(|row| row.to_vec()).collect(),
            links: DEFAULT_LINKS.to_vec(),
            links_possible: DEFAULT_LINKS_POSSIBLE.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("at least one particle kind is required")]
    NoKinds,
    #[error("coupling matrix must be {expected}x{expected}, row {row} has {found} entries")]
    CouplingShape { expected: usize, row: usize, found: usize },
    #[error("coupling matrix has {found} rows, expected {expected}")]
    CouplingRows { expected: usize, found: usize },
    #[error("links_possible must be {expected}x{expected}, row {row} has {found} entries")]
    LinksPossibleShape { expected: usize, row: usize, found: usize },
    #[error("links_possible has {found} rows, expected {expected}")]
    LinksPossibleRows { expected: usize, found: usize },
    #[error("at most 256 particle kinds are supported, got {0}")]
    TooManyKinds(usize),
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("drag must be in (0, 1], got {0}")]
    Drag(f32),
    #[error("ui margin {margin} leaves no play area in a window {height} high")]
    NoPlayArea { margin: f32, height: f32 },
}

impl SimConfig {
    /// Number of particle kinds, taken from the link capacity table
    pub fn kinds(&self) -> usize {
        self.links.len()
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(self.width, self.height - self.ui_margin)
    }

    pub fn coupling_matrix(&self) -> CouplingMatrix {
        CouplingMatrix::from_rows(&self.coupling)
    }

    pub fn link_rules(&self) -> LinkRules {
        LinkRules::new(&self.links, &self.links_possible)
    }

    /// Check table shapes and physical ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let k = self.kinds();
        if k == 0 {
            return Err(ConfigError::NoKinds);
        }
        if k > u8::MAX as usize + 1 {
            return Err(ConfigError::TooManyKinds(k));
        }
        if self.coupling.len() != k {
            return Err(ConfigError::CouplingRows { expected: k, found: self.coupling.len() });
        }
        if let Some((row, r)) = self.coupling.iter().enumerate().find(|(_, r)| r.len() != k) {
            return Err(ConfigError::CouplingShape { expected: k, row, found: r.len() });
        }
        if self.links_possible.len() != k {
            return Err(ConfigError::LinksPossibleRows {
                expected: k,
                found: self.links_possible.len(),
            });
        }
        if let Some((row, r)) = self.links_possible.iter().enumerate().find(|(_, r)| r.len() != k) {
            return Err(ConfigError::LinksPossibleShape { expected: k, row, found: r.len() });
        }

        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("max_dist", self.max_dist),
            ("particle_radius", self.particle_radius),
            ("speed", self.speed),
            ("max_speed", self.max_speed),
        ] {
            // written so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.drag > 0.0 && self.drag <= 1.0) {
            return Err(ConfigError::Drag(self.drag));
        }
        if !(self.height - self.ui_margin > 0.0) {
            return Err(ConfigError::NoPlayArea { margin: self.ui_margin, height: self.height });
        }
        Ok(())
    }
}
