use serde::{Deserialize, Serialize};

/// Stable particle identity. Ids are slot indices into the particle store and
/// may be reused once the particle holding them has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u32);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Discrete particle type, an index into the rule tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleKind(pub u8);

impl ParticleKind {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An unordered pair of bonded particles, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub a: ParticleId,
    pub b: ParticleId,
}

impl Bond {
    pub fn new(a: ParticleId, b: ParticleId) -> Self {
        if a <= b { Self { a, b } } else { Self { a: b, b: a } }
    }

    pub fn involves(&self, id: ParticleId) -> bool {
        self.a == id || self.b == id
    }

    /// The endpoint that is not `id`
    pub fn other(&self, id: ParticleId) -> Option<ParticleId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Topology of the play area edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Closed box: particles bounce off the edges
    #[default]
    Reflective,
    /// Torus: particles leaving one edge re-enter at the opposite one
    Toroidal,
}

impl BoundaryMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Reflective => Self::Toroidal,
            Self::Toroidal => Self::Reflective,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Reflective => "Reflective",
            Self::Toroidal => "Toroidal",
        }
    }
}

/// Bonding state of a single particle relative to its link capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondState {
    Free,
    Partial,
    Saturated,
}

impl BondState {
    pub fn classify(links: usize, capacity: usize) -> Self {
        if links >= capacity {
            Self::Saturated
        } else if links == 0 {
            Self::Free
        } else {
            Self::Partial
        }
    }
}

/// The usable simulation rectangle `[0, width] x [0, height]`.
/// `height` already excludes the status bar margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Displacement `from - to`, taking the shorter way round on a torus
    pub fn displacement(&self, from: [f32; 2], to: [f32; 2], boundary: BoundaryMode) -> [f32; 2] {
        let mut dx = from[0] - to[0];
        let mut dy = from[1] - to[1];
        if boundary == BoundaryMode::Toroidal {
            dx = min_image(dx, self.width);
            dy = min_image(dy, self.height);
        }
        [dx, dy]
    }

    /// Squared (minimum-image) distance
    pub fn distance2(&self, from: [f32; 2], to: [f32; 2], boundary: BoundaryMode) -> f32 {
        let [dx, dy] = self.displacement(from, to, boundary);
        dx * dx + dy * dy
    }

    pub fn clamp(&self, pos: [f32; 2]) -> [f32; 2] {
        [pos[0].clamp(0.0, self.width), pos[1].clamp(0.0, self.height)]
    }

    pub fn contains(&self, pos: [f32; 2]) -> bool {
        (0.0..=self.width).contains(&pos[0]) && (0.0..=self.height).contains(&pos[1])
    }
}

fn min_image(d: f32, extent: f32) -> f32 {
    if d.abs() > extent / 2.0 {
        if d > 0.0 { d - extent } else { d + extent }
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bond_is_unordered() {
        let ab = Bond::new(ParticleId(3), ParticleId(7));
        let ba = Bond::new(ParticleId(7), ParticleId(3));
        assert_eq!(ab, ba);
        assert_eq!(ab.a, ParticleId(3));
        assert_eq!(ab.other(ParticleId(7)), Some(ParticleId(3)));
        assert_eq!(ab.other(ParticleId(1)), None);
    }

    #[test]
    fn test_min_image_takes_short_way() {
        let area = PlayArea::new(1000.0, 500.0);
        let d = area.displacement([990.0, 10.0], [10.0, 490.0], BoundaryMode::Toroidal);
        assert!((d[0] - -20.0).abs() < 1e-4);
        assert!((d[1] - 20.0).abs() < 1e-4);

        let direct = area.displacement([990.0, 10.0], [10.0, 490.0], BoundaryMode::Reflective);
        assert!((direct[0] - 980.0).abs() < 1e-4);
        assert!((direct[1] - -480.0).abs() < 1e-4);
    }

    #[test]
    fn test_bond_state_thresholds() {
        assert_eq!(BondState::classify(0, 2), BondState::Free);
        assert_eq!(BondState::classify(1, 2), BondState::Partial);
        assert_eq!(BondState::classify(2, 2), BondState::Saturated);
        // a kind with zero capacity can never bond
        assert_eq!(BondState::classify(0, 0), BondState::Saturated);
    }
}
