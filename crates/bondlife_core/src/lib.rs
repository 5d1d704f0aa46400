pub mod config;
pub mod constants;
pub mod rules;
pub mod types;

pub use config::{ConfigError, SimConfig};
pub use constants::*;
pub use rules::{CouplingMatrix, LinkRules};
pub use types::*;
