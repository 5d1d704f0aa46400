pub mod bonds;
pub mod forces;
pub mod grid;
pub mod motion;
pub mod seed;
pub mod store;

pub use bonds::{BondLedger, BondSegment};
pub use forces::{Contact, ForceModel};
pub use grid::SpatialGrid;
pub use motion::Kinematics;
pub use store::{Particle, ParticleStore};
