use bondlife_core::{BoundaryMode, CouplingMatrix, LinkRules, ParticleId, PlayArea, SimConfig};

use crate::bonds::BondLedger;
use crate::store::ParticleStore;

/// Pairwise interaction law: type coupling at range, bonding at mid range,
/// hard repulsion inside the particle core
#[derive(Debug, Clone)]
pub struct ForceModel {
    pub coupling: CouplingMatrix,
    pub rules: LinkRules,
    pub max_dist: f32,
    pub radius: f32,
    pub speed: f32,
    pub link_force: f32,
    pub saturated_repulsion: bool,
}

/// What one call to [`ForceModel::interact`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub impulse_a: [f32; 2],
    pub impulse_b: [f32; 2],
    /// A new bond was formed
    pub bonded: bool,
}

impl ForceModel {
    pub fn from_config(cfg: &SimConfig) -> Self {
        Self {
            coupling: cfg.coupling_matrix(),
            rules: cfg.link_rules(),
            max_dist: cfg.max_dist,
            radius: cfg.particle_radius,
            speed: cfg.speed,
            link_force: cfg.link_force,
            saturated_repulsion: cfg.saturated_repulsion,
        }
    }

    /// Squared interaction range
    pub fn max_dist2(&self) -> f32 {
        self.max_dist * self.max_dist
    }

    /// Squared distance below which bonds form and beyond which they break
    pub fn bond_dist2(&self) -> f32 {
        self.max_dist2() / 4.0
    }

    /// Squared contact distance of two particle cores
    pub fn core_dist2(&self) -> f32 {
        4.0 * self.radius * self.radius
    }

    /// Apply the interaction between `a` and `b` to both velocities, bonding
    /// them if they are close enough and have room. Returns `None` when the
    /// pair is out of range or either id is unknown.
    pub fn interact(
        &self,
        a: ParticleId,
        b: ParticleId,
        store: &mut ParticleStore,
        bonds: &mut BondLedger,
        area: PlayArea,
        boundary: BoundaryMode,
    ) -> Option<Contact> {
        if a == b {
            return None;
        }
        let pa = store.get(a)?;
        let pb = store.get(b)?;

        let [dx, dy] = area.displacement(pa.position, pb.position, boundary);
        let mut d2 = dx * dx + dy * dy;
        if d2 > self.max_dist2() {
            return None;
        }

        let inverse = if d2 != 0.0 { 1.0 / d2 } else { 0.0 };
        let mut da = self.coupling.between(pa.kind, pb.kind) * inverse;
        let mut db = self.coupling.between(pb.kind, pa.kind) * inverse;

        let partners = pa.is_bonded_to(b) || pb.is_bonded_to(a);
        let room = pa.links() < self.rules.capacity(pa.kind)
            && pb.links() < self.rules.capacity(pb.kind);

        let mut bonded = false;
        if room {
            if d2 < self.bond_dist2() && !partners {
                let (ka, kb) = (pa.kind, pb.kind);
                let fits = store.partners_of_kind(a, kb) < self.rules.pair_limit(ka, kb)
                    && store.partners_of_kind(b, ka) < self.rules.pair_limit(kb, ka);
                if fits {
                    bonded = bonds.link(store, a, b);
                }
            }
        } else if !partners && self.saturated_repulsion {
            da = inverse;
            db = inverse;
        }

        let (sin, cos) = dy.atan2(dx).sin_cos();
        d2 = d2.max(1.0);
        if d2 < self.core_dist2() {
            da = 1.0 / d2;
            db = 1.0 / d2;
        }

        let impulse_a = [cos * da * self.speed, sin * da * self.speed];
        let impulse_b = [-cos * db * self.speed, -sin * db * self.speed];
        let (pa, pb) = store.pair_mut(a, b)?;
        pa.velocity[0] += impulse_a[0];
        pa.velocity[1] += impulse_a[1];
        pb.velocity[0] += impulse_b[0];
        pb.velocity[1] += impulse_b[1];

        Some(Contact {
            impulse_a,
            impulse_b,
            bonded,
        })
    }
}
