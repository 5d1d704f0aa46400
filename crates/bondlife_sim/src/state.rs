use bevy::prelude::*;
use bondlife_core::{
    BondState, BoundaryMode, CouplingMatrix, LinkRules, ParticleId, ParticleKind, PlayArea,
    SimConfig,
};
use bondlife_physics::seed;
use bondlife_physics::{
    BondLedger, BondSegment, ForceModel, Kinematics, Particle, ParticleStore, SpatialGrid,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Result of a click in the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Removed(ParticleId),
    Inserted(ParticleId),
    /// Nothing under the cursor and the selected kind could not be placed
    Ignored,
}

/// The whole simulation world, tracked as a Bevy Resource.
///
/// Owns the particles, the grid, the bond ledger, the rule tables and the
/// controls. Everything that mutates the world goes through methods here so
/// the three structures stay in step.
#[derive(Resource)]
pub struct SimulationState {
    pub(crate) config: SimConfig,
    pub(crate) area: PlayArea,
    pub(crate) store: ParticleStore,
    pub(crate) grid: SpatialGrid,
    pub(crate) bonds: BondLedger,
    pub(crate) model: ForceModel,
    pub(crate) kinematics: Kinematics,
    pub(crate) boundary: BoundaryMode,
    pub(crate) paused: bool,
    pub(crate) selected: ParticleKind,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) steps: u64,
}

impl SimulationState {
    /// World with no particles (used by tests and by `clear`)
    pub fn empty(config: SimConfig) -> Self {
        let area = config.play_area();
        let boundary = config.boundary;
        Self {
            area,
            store: ParticleStore::new(),
            grid: SpatialGrid::new(area, config.max_dist, boundary),
            bonds: BondLedger::new(),
            model: ForceModel::from_config(&config),
            kinematics: Kinematics::from_config(&config),
            boundary,
            paused: false,
            selected: ParticleKind(0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            steps: 0,
            config,
        }
    }

    /// World seeded with `config.particle_count` random particles
    pub fn new(config: SimConfig) -> Self {
        let mut state = Self::empty(config);
        state.reset();
        state
    }

    // --- read side ---

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn area(&self) -> PlayArea {
        self.area
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.store.iter()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.store.get(id)
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn bonds(&self) -> &BondLedger {
        &self.bonds
    }

    pub fn bond_segments(&self) -> Vec<BondSegment> {
        self.bonds.segments(&self.store, self.area, self.boundary)
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn bond_state(&self, id: ParticleId) -> Option<BondState> {
        self.store.bond_state(id, &self.model.rules)
    }

    pub fn coupling(&self) -> &CouplingMatrix {
        &self.model.coupling
    }

    pub fn rules(&self) -> &LinkRules {
        &self.model.rules
    }

    pub fn kinds(&self) -> usize {
        self.model.rules.kinds()
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn selected_kind(&self) -> ParticleKind {
        self.selected
    }

    /// Integrator steps taken since startup
    pub fn steps(&self) -> u64 {
        self.steps
    }

    // --- control surface ---

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_boundary(&mut self) {
        self.boundary = self.boundary.toggled();
        self.grid.set_boundary(self.boundary);
        info!("Boundary mode: {}", self.boundary.name());
    }

    /// Returns false if `kind` is not a configured kind
    pub fn select_kind(&mut self, kind: ParticleKind) -> bool {
        if kind.index() >= self.kinds() {
            return false;
        }
        self.selected = kind;
        true
    }

    pub fn nudge_coupling(&mut self, i: usize, j: usize, delta: f32) -> Option<f32> {
        let value = self.model.coupling.nudge(i, j, delta)?;
        debug!("coupling[{}][{}] = {:.2}", i, j, value);
        Some(value)
    }

    /// Replace the world with a fresh random population. The RNG stream
    /// carries on, so successive resets give different layouts.
    pub fn reset(&mut self) {
        self.discard_world();
        let kinds = self.kinds();
        let ids = seed::populate(
            &mut self.rng,
            self.config.particle_count as usize,
            kinds,
            self.area,
            &mut self.store,
            &mut self.grid,
        );
        info!("Reset: seeded {} particles", ids.len());
    }

    /// Remove every particle and bond
    pub fn clear(&mut self) {
        self.discard_world();
        info!("Cleared all particles");
    }

    fn discard_world(&mut self) {
        self.store = ParticleStore::new();
        self.grid = SpatialGrid::new(self.area, self.config.max_dist, self.boundary);
        self.bonds = BondLedger::new();
    }

    /// Add a particle at rest. Returns `None` for an unknown kind.
    pub fn insert(&mut self, kind: ParticleKind, pos: [f32; 2]) -> Option<ParticleId> {
        if kind.index() >= self.kinds() {
            return None;
        }
        Some(self.store.insert(kind, pos, self.area, &mut self.grid))
    }

    /// Overwrite a particle's velocity. Returns false for an unknown id.
    pub fn set_velocity(&mut self, id: ParticleId, velocity: [f32; 2]) -> bool {
        match self.store.get_mut(id) {
            Some(p) => {
                p.velocity = velocity;
                true
            }
            None => false,
        }
    }

    /// Remove a particle, its bonds and its grid entry. Unknown ids are ignored.
    pub fn remove(&mut self, id: ParticleId) -> bool {
        self.store
            .remove(id, &mut self.grid, &mut self.bonds)
            .is_some()
    }

    /// Remove the particle under `pos`, or place one of the selected kind there
    pub fn click(&mut self, pos: [f32; 2]) -> ClickOutcome {
        let radius = 2.0 * self.config.particle_radius;
        if let Some(id) = self.store.pick(pos, radius) {
            self.remove(id);
            debug!("Removed particle {:?}", id);
            return ClickOutcome::Removed(id);
        }
        match self.insert(self.selected, pos) {
            Some(id) => {
                debug!("Inserted {:?} at ({:.0}, {:.0})", self.selected, pos[0], pos[1]);
                ClickOutcome::Inserted(id)
            }
            None => ClickOutcome::Ignored,
        }
    }
}
