use bevy::prelude::*;

use super::clock::SimulationClock;
use super::state::SimulationState;

/// Systems that advance the world. Input and drawing run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationTickSet;

/// Bevy plugin for the simulation pipeline.
/// Expects `SimulationState` to be inserted by the app.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(Update, simulation_tick.in_set(SimulationTickSet));
    }
}

/// Main simulation tick: run the frame's sub-steps
fn simulation_tick(mut clock: ResMut<SimulationClock>, mut state: ResMut<SimulationState>) {
    let report = clock.tick(&mut state);
    if report.bonds_formed + report.bonds_broken > 0 {
        trace!(
            "frame {}: +{} bonds, -{} bonds",
            clock.frames, report.bonds_formed, report.bonds_broken
        );
    }
}
