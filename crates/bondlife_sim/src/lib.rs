pub mod clock;
pub mod integrator;
pub mod pipeline;
pub mod state;

pub use clock::SimulationClock;
pub use integrator::{step, StepReport};
pub use pipeline::{SimulationPlugin, SimulationTickSet};
pub use state::{ClickOutcome, SimulationState};
