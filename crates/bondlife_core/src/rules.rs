//! Per-kind interaction tables.
//!
//! Both tables are flat `K x K` arrays fixed at construction; every accessor
//! is bounds-checked so an out-of-range kind reads as "no interaction"
//! instead of panicking.

use crate::types::ParticleKind;

/// Coupling coefficients between particle kinds.
///
/// `get(i, j)` is the coefficient felt by a particle of kind `i` because of a
/// neighbour of kind `j`. The impulse points along the displacement from the
/// neighbour, so positive values push apart and negative values pull together.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMatrix {
    kinds: usize,
    values: Vec<f32>,
}

impl CouplingMatrix {
    /// All-zero matrix for `kinds` particle kinds
    pub fn new(kinds: usize) -> Self {
        Self {
            kinds,
            values: vec![0.0; kinds * kinds],
        }
    }

    /// Build from nested rows. Rows are truncated or zero-padded to `rows.len()`.
    pub fn from_rows(rows: &[Vec<f32>]) -> Self {
        let kinds = rows.len();
        let mut m = Self::new(kinds);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().take(kinds).enumerate() {
                m.values[i * kinds + j] = v;
            }
        }
        m
    }

    pub fn kinds(&self) -> usize {
        self.kinds
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        if i < self.kinds && j < self.kinds {
            self.values[i * self.kinds + j]
        } else {
            0.0
        }
    }

    /// Coefficient felt by `of` because of `toward`
    pub fn between(&self, of: ParticleKind, toward: ParticleKind) -> f32 {
        self.get(of.index(), toward.index())
    }

    /// Returns false and leaves the matrix unchanged if the index is out of range
    pub fn set(&mut self, i: usize, j: usize, value: f32) -> bool {
        if i < self.kinds && j < self.kinds {
            self.values[i * self.kinds + j] = value;
            true
        } else {
            false
        }
    }

    /// Add `delta` to one cell, returning the new value
    pub fn nudge(&mut self, i: usize, j: usize, delta: f32) -> Option<f32> {
        if i < self.kinds && j < self.kinds {
            let cell = &mut self.values[i * self.kinds + j];
            *cell += delta;
            Some(*cell)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact(0) panics; an empty matrix simply has no rows
        self.values.chunks_exact(self.kinds.max(1))
    }
}

/// Bond capacity limits.
///
/// `capacity(k)` is the most bonds a particle of kind `k` may hold at once;
/// `pair_limit(i, j)` is how many partners of kind `j` a particle of kind `i`
/// may hold.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRules {
    kinds: usize,
    capacity: Vec<u32>,
    pair_limit: Vec<u32>,
}

impl LinkRules {
    pub fn new(capacity: &[u32], pair_limit: &[Vec<u32>]) -> Self {
        let kinds = capacity.len();
        let mut limits = vec![0; kinds * kinds];
        for (i, row) in pair_limit.iter().take(kinds).enumerate() {
            for (j, &v) in row.iter().take(kinds).enumerate() {
                limits[i * kinds + j] = v;
            }
        }
        Self {
            kinds,
            capacity: capacity.to_vec(),
            pair_limit: limits,
        }
    }

    pub fn kinds(&self) -> usize {
        self.kinds
    }

    pub fn capacity(&self, kind: ParticleKind) -> usize {
        self.capacity.get(kind.index()).copied().unwrap_or(0) as usize
    }

    pub fn pair_limit(&self, of: ParticleKind, toward: ParticleKind) -> usize {
        let (i, j) = (of.index(), toward.index());
        if i < self.kinds && j < self.kinds {
            self.pair_limit[i * self.kinds + j] as usize
        } else {
            0
        }
    }
}
