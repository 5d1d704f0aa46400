use anyhow::{Context, Result};
use bondlife_core::{BoundaryMode, SimConfig};
use clap::Args;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Command-line options shared by the windowed and headless binaries
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML file with simulation settings; missing keys keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the number of particles spawned on reset
    #[arg(short = 'n', long)]
    pub particles: Option<u32>,

    /// Start with wrap-around edges instead of walls
    #[arg(long)]
    pub toroidal: bool,
}

impl ConfigArgs {
    /// Read the YAML file (if any), apply flag overrides and validate
    pub fn load(&self) -> Result<SimConfig> {
        let base = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                serde_yaml::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => SimConfig::default(),
        };
        let config = self.apply(base);
        config.validate().context("invalid simulation config")?;
        Ok(config)
    }

    fn apply(&self, mut config: SimConfig) -> SimConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(n) = self.particles {
            config.particle_count = n;
        }
        if self.toroidal {
            config.boundary = BoundaryMode::Toroidal;
        }
        config
    }
}
