use bevy::prelude::*;

use super::integrator::{self, StepReport};
use super::state::SimulationState;

/// Fixed sub-stepping per rendered frame
#[derive(Resource, Debug, Clone)]
pub struct SimulationClock {
    /// Integrator steps per frame
    pub substeps: u32,
    /// Frames ticked, paused or not
    pub frames: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(bondlife_core::SUBSTEPS)
    }
}

impl SimulationClock {
    pub fn new(substeps: u32) -> Self {
        Self {
            substeps,
            frames: 0,
        }
    }

    /// Run one frame's worth of steps unless the simulation is paused.
    /// Returns the summed step counters.
    pub fn tick(&mut self, state: &mut SimulationState) -> StepReport {
        self.frames += 1;
        let mut total = StepReport::default();
        if state.is_paused() {
            return total;
        }
        for _ in 0..self.substeps {
            let r = integrator::step(state);
            total.bonds_formed += r.bonds_formed;
            total.bonds_broken += r.bonds_broken;
            total.rebucketed += r.rebucketed;
        }
        total
    }
}
