use super::state::SimulationState;

/// Counters from one integrator step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub bonds_formed: usize,
    pub bonds_broken: usize,
    /// Particles that changed grid cell
    pub rebucketed: usize,
}

/// Advance the world by one sub-step:
/// motion and edges, bond stress, re-bucketing, then pairwise forces.
pub fn step(state: &mut SimulationState) -> StepReport {
    let SimulationState {
        area,
        store,
        grid,
        bonds,
        model,
        kinematics,
        boundary,
        steps,
        ..
    } = state;
    let (area, boundary) = (*area, *boundary);

    for p in store.iter_mut() {
        kinematics.advance(p, area, boundary);
    }

    let bonds_broken = bonds.relax(store, model, area, boundary);
    let rebucketed = grid.rebucket(store);

    let mut bonds_formed = 0;
    grid.for_each_pair(|a, b| {
        if let Some(contact) = model.interact(a, b, store, bonds, area, boundary) {
            if contact.bonded {
                bonds_formed += 1;
            }
        }
    });

    *steps += 1;
    StepReport {
        bonds_formed,
        bonds_broken,
        rebucketed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlife_core::{BoundaryMode, ParticleKind, SimConfig};

    fn empty() -> SimulationState {
        SimulationState::empty(SimConfig {
            width: 800.0,
            height: 640.0,
            ..SimConfig::default()
        })
    }

    #[test]
    fn test_close_pair_bonds_in_one_step() {
        let mut state = empty();
        let a = state.insert(ParticleKind(1), [300.0, 300.0]).unwrap();
        let b = state.insert(ParticleKind(1), [340.0, 300.0]).unwrap();
        let report = step(&mut state);
        assert_eq!(report.bonds_formed, 1);
        assert!(state.bonds().contains(a, b));
        assert_eq!(state.steps(), 1);
    }

    #[test]
    fn test_distant_pair_does_not_bond() {
        let mut state = empty();
        state.insert(ParticleKind(1), [300.0, 300.0]).unwrap();
        state.insert(ParticleKind(1), [360.0, 300.0]).unwrap();
        step(&mut state);
        assert_eq!(state.bond_count(), 0);
    }

    #[test]
    fn test_pair_across_cell_boundary_interacts() {
        let mut state = empty();
        // cells (1, 1) and (2, 2): diagonal neighbours
        let a = state.insert(ParticleKind(1), [190.0, 190.0]).unwrap();
        let b = state.insert(ParticleKind(1), [210.0, 210.0]).unwrap();
        step(&mut state);
        assert!(state.bonds().contains(a, b));

        // cells (2, 1) and (1, 2): the anti-diagonal
        let c = state.insert(ParticleKind(1), [410.0, 190.0]).unwrap();
        let d = state.insert(ParticleKind(1), [390.0, 210.0]).unwrap();
        step(&mut state);
        assert!(state.bonds().contains(c, d));
    }

    #[test]
    fn test_torus_pair_bonds_across_seam() {
        let mut state = empty();
        state.toggle_boundary();
        assert_eq!(state.boundary(), BoundaryMode::Toroidal);
        let a = state.insert(ParticleKind(1), [795.0, 300.0]).unwrap();
        let b = state.insert(ParticleKind(1), [10.0, 300.0]).unwrap();
        step(&mut state);
        assert!(state.bonds().contains(a, b));
    }

    #[test]
    fn test_step_keeps_grid_current() {
        let mut state = SimulationState::new(SimConfig {
            width: 800.0,
            height: 640.0,
            particle_count: 200,
            ..SimConfig::default()
        });
        for _ in 0..20 {
            step(&mut state);
            for p in state.particles() {
                assert_eq!(state.grid().cell_containing(p.id), Some(state.grid().cell_of(p.position)));
            }
        }
    }
}
