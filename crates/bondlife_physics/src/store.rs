use bondlife_core::{BondState, LinkRules, ParticleId, ParticleKind, PlayArea};

use crate::bonds::BondLedger;
use crate::grid::SpatialGrid;

/// A simulated point particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    /// Bonded partners. Only the bond ledger edits this list, so its length is
    /// the bond count and it always mirrors the ledger.
    partners: Vec<ParticleId>,
}

impl Particle {
    pub fn new(id: ParticleId, kind: ParticleKind, position: [f32; 2]) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: [0.0, 0.0],
            partners: Vec::new(),
        }
    }

    /// Current bond count
    pub fn links(&self) -> usize {
        self.partners.len()
    }

    pub fn partners(&self) -> &[ParticleId] {
        &self.partners
    }

    pub fn is_bonded_to(&self, other: ParticleId) -> bool {
        self.partners.contains(&other)
    }

    pub fn speed(&self) -> f32 {
        self.velocity[0].hypot(self.velocity[1])
    }

    pub(crate) fn attach(&mut self, other: ParticleId) {
        self.partners.push(other);
    }

    pub(crate) fn detach(&mut self, other: ParticleId) -> bool {
        match self.partners.iter().position(|&p| p == other) {
            Some(i) => {
                self.partners.swap_remove(i);
                true
            }
            None => false,
        }
    }
}

/// Owns every live particle and hands out identities.
///
/// Retired ids go on a free list and are reused by later insertions; by then
/// nothing refers to them, because removal detaches every bond first.
#[derive(Debug, Default)]
pub struct ParticleStore {
    slots: Vec<Option<Particle>>,
    free: Vec<u32>,
    len: usize,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Create a particle at rest, clamped into the play area, and bucket it
    pub fn insert(
        &mut self,
        kind: ParticleKind,
        position: [f32; 2],
        area: PlayArea,
        grid: &mut SpatialGrid,
    ) -> ParticleId {
        let position = area.clamp(position);
        let id = match self.free.pop() {
            Some(slot) => ParticleId(slot),
            None => {
                self.slots.push(None);
                ParticleId((self.slots.len() - 1) as u32)
            }
        };
        self.slots[id.index()] = Some(Particle::new(id, kind, position));
        self.len += 1;
        grid.insert(id, position);
        id
    }

    /// Remove a particle together with every bond that references it and
    /// its grid entry. Unknown ids are ignored.
    pub fn remove(
        &mut self,
        id: ParticleId,
        grid: &mut SpatialGrid,
        bonds: &mut BondLedger,
    ) -> Option<Particle> {
        self.get(id)?;
        bonds.detach(self, id);
        grid.remove(id);
        let particle = self.slots[id.index()].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(particle)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Mutable access to two distinct particles at once
    pub fn pair_mut(&mut self, a: ParticleId, b: ParticleId) -> Option<(&mut Particle, &mut Particle)> {
        let (i, j) = (a.index(), b.index());
        if i == j || i >= self.slots.len() || j >= self.slots.len() {
            return None;
        }
        if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            Some((lo[i].as_mut()?, hi[0].as_mut()?))
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            Some((hi[0].as_mut()?, lo[j].as_mut()?))
        }
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.slots.iter_mut().flatten()
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.iter().map(|p| p.id)
    }

    /// How many of `id`'s partners are of `kind`
    pub fn partners_of_kind(&self, id: ParticleId, kind: ParticleKind) -> usize {
        self.get(id).map_or(0, |p| {
            p.partners()
                .iter()
                .filter(|&&q| self.get(q).is_some_and(|q| q.kind == kind))
                .count()
        })
    }

    pub fn bond_state(&self, id: ParticleId, rules: &LinkRules) -> Option<BondState> {
        self.get(id)
            .map(|p| BondState::classify(p.links(), rules.capacity(p.kind)))
    }

    /// Nearest particle whose centre lies within `radius` of `pos`
    pub fn pick(&self, pos: [f32; 2], radius: f32) -> Option<ParticleId> {
        let r2 = radius * radius;
        self.iter()
            .map(|p| {
                let dx = p.position[0] - pos[0];
                let dy = p.position[1] - pos[1];
                (p.id, dx * dx + dy * dy)
            })
            .filter(|&(_, d2)| d2 <= r2)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Particle count per kind, for `kinds` kinds
    pub fn census(&self, kinds: usize) -> Vec<usize> {
        let mut counts = vec![0; kinds];
        for p in self.iter() {
            if let Some(c) = counts.get_mut(p.kind.index()) {
                *c += 1;
            }
        }
        counts
    }
}
