use bondlife_core::{Bond, BoundaryMode, ParticleId, ParticleKind, PlayArea};

use crate::forces::ForceModel;
use crate::store::ParticleStore;

/// A bond ready to draw. `to` is the second endpoint as seen from `from`:
/// on a torus it may lie outside the play area so the segment takes the
/// short way across the seam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondSegment {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub kinds: (ParticleKind, ParticleKind),
}

/// Every live bond. Each entry is mirrored in both endpoints' partner lists;
/// all edits go through this type so the two views cannot drift apart.
#[derive(Debug, Default, Clone)]
pub struct BondLedger {
    bonds: Vec<Bond>,
}

impl BondLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.iter()
    }

    pub fn contains(&self, a: ParticleId, b: ParticleId) -> bool {
        self.bonds.contains(&Bond::new(a, b))
    }

    /// Bond `a` and `b`. Returns false for self-bonds, unknown ids or a pair
    /// that is already bonded. Capacity limits are the caller's business.
    pub fn link(&mut self, store: &mut ParticleStore, a: ParticleId, b: ParticleId) -> bool {
        let Some((pa, pb)) = store.pair_mut(a, b) else {
            return false;
        };
        if pa.is_bonded_to(b) || pb.is_bonded_to(a) {
            return false;
        }
        pa.attach(b);
        pb.attach(a);
        self.bonds.push(Bond::new(a, b));
        true
    }

    /// Destroy the bond between `a` and `b`, if there is one
    pub fn break_bond(&mut self, store: &mut ParticleStore, a: ParticleId, b: ParticleId) -> bool {
        let bond = Bond::new(a, b);
        let Some(i) = self.bonds.iter().position(|&x| x == bond) else {
            return false;
        };
        self.bonds.swap_remove(i);
        if let Some(p) = store.get_mut(a) {
            p.detach(b);
        }
        if let Some(p) = store.get_mut(b) {
            p.detach(a);
        }
        true
    }

    /// Destroy every bond touching `id`. Returns how many were removed.
    pub fn detach(&mut self, store: &mut ParticleStore, id: ParticleId) -> usize {
        let before = self.bonds.len();
        let mut partners = Vec::new();
        self.bonds.retain(|bond| match bond.other(id) {
            Some(other) => {
                partners.push(other);
                false
            }
            None => true,
        });
        for other in partners {
            if let Some(p) = store.get_mut(other) {
                p.detach(id);
            }
            if let Some(p) = store.get_mut(id) {
                p.detach(other);
            }
        }
        before - self.bonds.len()
    }

    /// Drop every bond and empty every partner list
    pub fn clear(&mut self, store: &mut ParticleStore) {
        for bond in std::mem::take(&mut self.bonds) {
            if let Some(p) = store.get_mut(bond.a) {
                p.detach(bond.b);
            }
            if let Some(p) = store.get_mut(bond.b) {
                p.detach(bond.a);
            }
        }
    }

    /// Stress pass: break overstretched bonds and pull the rest together.
    /// Returns the number of bonds broken.
    pub fn relax(
        &mut self,
        store: &mut ParticleStore,
        model: &ForceModel,
        area: PlayArea,
        boundary: BoundaryMode,
    ) -> usize {
        let pull = model.link_force * model.speed;
        let mut broken = Vec::new();

        for &bond in &self.bonds {
            let Some((a, b)) = store.pair_mut(bond.a, bond.b) else {
                continue;
            };
            let [dx, dy] = area.displacement(a.position, b.position, boundary);
            let d2 = dx * dx + dy * dy;
            if d2 > model.bond_dist2() {
                broken.push(bond);
            } else if d2 > model.core_dist2() {
                let (sin, cos) = dy.atan2(dx).sin_cos();
                a.velocity[0] += cos * pull;
                a.velocity[1] += sin * pull;
                b.velocity[0] -= cos * pull;
                b.velocity[1] -= sin * pull;
            }
        }

        for bond in &broken {
            self.break_bond(store, bond.a, bond.b);
        }
        broken.len()
    }

    pub fn segments(
        &self,
        store: &ParticleStore,
        area: PlayArea,
        boundary: BoundaryMode,
    ) -> Vec<BondSegment> {
        self.bonds
            .iter()
            .filter_map(|bond| {
                let a = store.get(bond.a)?;
                let b = store.get(bond.b)?;
                let [dx, dy] = area.displacement(a.position, b.position, boundary);
                Some(BondSegment {
                    from: a.position,
                    to: [a.position[0] - dx, a.position[1] - dy],
                    kinds: (a.kind, b.kind),
                })
            })
            .collect()
    }
}
