//! Uniform spatial grid for near-neighbour force evaluation.
//!
//! Cells are `cell_size` wide (the interaction radius), so two particles can
//! only interact if they share a cell or sit in neighbouring cells. Each
//! unordered pair of neighbouring cells is listed once, under the cell that
//! comes first in row-major order (a half-stencil). For an interior cell the
//! forward neighbours are right, below-left, below and below-right; on a torus
//! the last column and row also pair with the first ones across the seam.
//!
//! Neighbourhood is decided by the gap between cell rectangles rather than by
//! index offsets, which keeps the seam correct when the last column or row is
//! only partly inside the play area and never lists a pair twice on grids
//! that are only one or two cells wide. Only cells within two columns and
//! rows are examined, so building the table is linear in the cell count.

use bondlife_core::{BoundaryMode, ParticleId, PlayArea};

use crate::store::ParticleStore;

pub struct SpatialGrid {
    area: PlayArea,
    cell_size: f32,
    cols: usize,
    rows: usize,
    boundary: BoundaryMode,
    cells: Vec<Vec<ParticleId>>,
    /// Current cell of each particle, indexed by id slot
    home: Vec<Option<usize>>,
    /// Forward neighbours of each cell
    forward: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(area: PlayArea, cell_size: f32, boundary: BoundaryMode) -> Self {
        let cols = (area.width / cell_size).floor() as usize + 1;
        let rows = (area.height / cell_size).floor() as usize + 1;
        let mut grid = Self {
            area,
            cell_size,
            cols,
            rows,
            boundary,
            cells: vec![Vec::new(); cols * rows],
            home: Vec::new(),
            forward: Vec::new(),
        };
        grid.forward = grid.build_forward();
        grid
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Switch topology; only the neighbour table depends on it
    pub fn set_boundary(&mut self, boundary: BoundaryMode) {
        if self.boundary != boundary {
            self.boundary = boundary;
            self.forward = self.build_forward();
        }
    }

    /// `(floor(x / size), floor(y / size))`, clamped to the grid
    pub fn cell_of(&self, pos: [f32; 2]) -> (usize, usize) {
        let cx = (pos[0] / self.cell_size).floor().max(0.0) as usize;
        let cy = (pos[1] / self.cell_size).floor().max(0.0) as usize;
        (cx.min(self.cols - 1), cy.min(self.rows - 1))
    }

    fn index_of(&self, pos: [f32; 2]) -> usize {
        let (cx, cy) = self.cell_of(pos);
        cy * self.cols + cx
    }

    fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    pub fn insert(&mut self, id: ParticleId, pos: [f32; 2]) {
        self.remove(id);
        let cell = self.index_of(pos);
        self.cells[cell].push(id);
        if self.home.len() <= id.index() {
            self.home.resize(id.index() + 1, None);
        }
        self.home[id.index()] = Some(cell);
    }

    /// Returns false if the particle was not in the grid
    pub fn remove(&mut self, id: ParticleId) -> bool {
        let Some(cell) = self.home.get_mut(id.index()).and_then(Option::take) else {
            return false;
        };
        let bucket = &mut self.cells[cell];
        if let Some(i) = bucket.iter().position(|&p| p == id) {
            bucket.swap_remove(i);
        }
        true
    }

    pub fn cell_containing(&self, id: ParticleId) -> Option<(usize, usize)> {
        self.home
            .get(id.index())
            .copied()
            .flatten()
            .map(|c| self.coords(c))
    }

    pub fn particles_in(&self, cell: (usize, usize)) -> &[ParticleId] {
        if cell.0 < self.cols && cell.1 < self.rows {
            &self.cells[cell.1 * self.cols + cell.0]
        } else {
            &[]
        }
    }

    /// Forward half-stencil neighbours of `cell`
    pub fn neighbors(&self, cell: (usize, usize)) -> impl Iterator<Item = (usize, usize)> + '_ {
        let list: &[usize] = if cell.0 < self.cols && cell.1 < self.rows {
            &self.forward[cell.1 * self.cols + cell.0]
        } else {
            &[]
        };
        list.iter().map(|&c| self.coords(c))
    }

    /// Move every particle whose position left its cell. Moves are collected
    /// first and applied afterwards so no bucket is edited while scanned.
    /// Returns how many particles changed cell.
    pub fn rebucket(&mut self, store: &ParticleStore) -> usize {
        let moves: Vec<(ParticleId, [f32; 2])> = store
            .iter()
            .filter(|p| {
                let current = self.home.get(p.id.index()).copied().flatten();
                current != Some(self.index_of(p.position))
            })
            .map(|p| (p.id, p.position))
            .collect();

        for &(id, pos) in &moves {
            self.insert(id, pos);
        }
        moves.len()
    }

    /// Visit every candidate pair once: pairs inside a cell, then pairs
    /// across each forward neighbour
    pub fn for_each_pair(&self, mut f: impl FnMut(ParticleId, ParticleId)) {
        for (cell, bucket) in self.cells.iter().enumerate() {
            for (i, &a) in bucket.iter().enumerate() {
                for &b in &bucket[i + 1..] {
                    f(a, b);
                }
                for &other in &self.forward[cell] {
                    for &b in &self.cells[other] {
                        f(a, b);
                    }
                }
            }
        }
    }

    fn build_forward(&self) -> Vec<Vec<usize>> {
        let wrap = self.boundary == BoundaryMode::Toroidal;
        let limit = self.cell_size * self.cell_size;
        let xs = axis_neighbors(self.cols, self.cell_size, self.area.width, wrap);
        let ys = axis_neighbors(self.rows, self.cell_size, self.area.height, wrap);

        let mut forward = vec![Vec::new(); self.cols * self.rows];
        for (i, list) in forward.iter_mut().enumerate() {
            let (ix, iy) = self.coords(i);
            for &(jy, gy) in &ys[iy] {
                for &(jx, gx) in &xs[ix] {
                    let j = jy * self.cols + jx;
                    if j > i && gx * gx + gy * gy < limit {
                        list.push(j);
                    }
                }
            }
        }
        forward
    }
}

/// For each index along one axis, the indices (itself included) whose span
/// lies closer than one cell, with that gap. Full cells more than one apart
/// are always a cell or more away, so only offsets up to two are tried; the
/// second offset matters across a seam next to a narrow last cell.
fn axis_neighbors(count: usize, size: f32, extent: f32, wrap: bool) -> Vec<Vec<(usize, f32)>> {
    (0..count)
        .map(|i| {
            let mut near: Vec<usize> = (-2isize..=2)
                .filter_map(|d| {
                    let j = i as isize + d;
                    if wrap {
                        Some(j.rem_euclid(count as isize) as usize)
                    } else {
                        usize::try_from(j).ok().filter(|&j| j < count)
                    }
                })
                .collect();
            near.sort_unstable();
            near.dedup();
            near.into_iter()
                .map(|j| (j, axis_gap(i, j, size, extent, wrap)))
                .filter(|&(_, gap)| gap < size)
                .collect()
        })
        .collect()
}

/// Smallest distance along one axis between the spans of cells `i` and `j`
fn axis_gap(i: usize, j: usize, size: f32, extent: f32, wrap: bool) -> f32 {
    let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
    if lo == hi {
        return 0.0;
    }
    let lo_start = lo as f32 * size;
    let lo_end = ((lo + 1) as f32 * size).min(extent);
    let hi_start = hi as f32 * size;
    let hi_end = ((hi + 1) as f32 * size).min(extent);

    let direct = (hi_start - lo_end).max(0.0);
    if wrap {
        let around = (extent - hi_end).max(0.0) + lo_start;
        direct.min(around)
    } else {
        direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlife_core::ParticleKind;
    use std::collections::HashSet;
    use std::time::{Duration, Instant};

    fn grid(w: f32, h: f32, boundary: BoundaryMode) -> SpatialGrid {
        SpatialGrid::new(PlayArea::new(w, h), 100.0, boundary)
    }

    #[test]
    fn test_cell_of_floors_and_clamps() {
        let g = grid(1000.0, 500.0, BoundaryMode::Reflective);
        assert_eq!((g.cols(), g.rows()), (11, 6));
        assert_eq!(g.cell_of([150.0, 50.0]), (1, 0));
        assert_eq!(g.cell_of([999.0, 499.0]), (9, 4));
        assert_eq!(g.cell_of([5000.0, -20.0]), (10, 0));
    }

    #[test]
    fn test_interior_half_stencil() {
        let g = grid(1000.0, 500.0, BoundaryMode::Reflective);
        let n: HashSet<_> = g.neighbors((3, 2)).collect();
        let expected: HashSet<_> = [(4, 2), (2, 3), (3, 3), (4, 3)].into_iter().collect();
        assert_eq!(n, expected);

        // bottom-right corner has nothing ahead of it
        assert_eq!(g.neighbors((10, 5)).count(), 0);
    }

    #[test]
    fn test_torus_pairs_seam_cells() {
        let g = grid(1000.0, 500.0, BoundaryMode::Toroidal);
        // 1000 is a multiple of the cell size, so column 10 is a zero-width
        // strip at x = 1000 and column 9 also touches the seam
        let first: HashSet<_> = g.neighbors((0, 0)).collect();
        assert!(first.contains(&(9, 0)));
        assert!(first.contains(&(10, 0)));
        assert!(first.contains(&(0, 4)));
        assert!(first.contains(&(9, 4)));
        assert!(!first.contains(&(8, 0)));
    }

    #[test]
    fn test_every_adjacent_pair_listed_once() {
        for boundary in [BoundaryMode::Reflective, BoundaryMode::Toroidal] {
            for (w, h) in [(1000.0, 500.0), (150.0, 150.0), (60.0, 950.0), (1920.0, 1040.0)] {
                let g = grid(w, h, boundary);
                let mut seen = HashSet::new();
                for y in 0..g.rows() {
                    for x in 0..g.cols() {
                        for n in g.neighbors((x, y)) {
                            assert_ne!(n, (x, y));
                            let key = if (x, y) < n { ((x, y), n) } else { (n, (x, y)) };
                            assert!(seen.insert(key), "pair {key:?} listed twice");
                        }
                    }
                }
            }
        }
    }

    /// Reference table: compare every cell with every later one
    fn exhaustive_forward(g: &SpatialGrid) -> Vec<Vec<usize>> {
        let wrap = g.boundary() == BoundaryMode::Toroidal;
        let n = g.cols() * g.rows();
        let mut forward = vec![Vec::new(); n];
        for i in 0..n {
            let (ix, iy) = g.coords(i);
            for j in (i + 1)..n {
                let (jx, jy) = g.coords(j);
                let gx = axis_gap(ix, jx, g.cell_size(), g.area.width, wrap);
                let gy = axis_gap(iy, jy, g.cell_size(), g.area.height, wrap);
                if gx * gx + gy * gy < g.cell_size() * g.cell_size() {
                    forward[i].push(j);
                }
            }
        }
        forward
    }

    #[test]
    fn test_windowed_table_matches_exhaustive_scan() {
        for boundary in [BoundaryMode::Reflective, BoundaryMode::Toroidal] {
            for (w, h) in [
                (1000.0, 500.0),
                (150.0, 150.0),
                (60.0, 950.0),
                (1920.0, 1040.0),
                (100.0, 100.0),
                (250.0, 30.0),
            ] {
                let g = grid(w, h, boundary);
                assert_eq!(g.forward, exhaustive_forward(&g), "{boundary:?} {w}x{h}");
            }
        }
    }

    #[test]
    fn test_fine_grid_builds_quickly() {
        let area = PlayArea::new(1920.0, 1040.0);
        let started = Instant::now();
        let mut g = SpatialGrid::new(area, 10.0, BoundaryMode::Reflective);
        g.set_boundary(BoundaryMode::Toroidal);
        g.set_boundary(BoundaryMode::Reflective);
        assert!(started.elapsed() < Duration::from_secs(1), "took {:?}", started.elapsed());

        assert_eq!((g.cols(), g.rows()), (193, 105));
        assert_eq!(g.neighbors((50, 50)).count(), 4);
    }

    #[test]
    fn test_rebucket_moves_only_stale_particles() {
        let area = PlayArea::new(1000.0, 500.0);
        let mut g = SpatialGrid::new(area, 100.0, BoundaryMode::Reflective);
        let mut store = ParticleStore::new();
        let a = store.insert(ParticleKind(0), [50.0, 50.0], area, &mut g);
        let b = store.insert(ParticleKind(0), [250.0, 50.0], area, &mut g);

        store.get_mut(a).unwrap().position = [450.0, 350.0];
        assert_eq!(g.rebucket(&store), 1);
        assert_eq!(g.cell_containing(a), Some((4, 3)));
        assert_eq!(g.cell_containing(b), Some((2, 0)));
        assert!(g.particles_in((0, 0)).is_empty());
        assert_eq!(g.particles_in((4, 3)), &[a]);
        assert_eq!(g.rebucket(&store), 0);
    }

    #[test]
    fn test_pairs_are_enumerated_once() {
        let area = PlayArea::new(400.0, 400.0);
        for boundary in [BoundaryMode::Reflective, BoundaryMode::Toroidal] {
            let mut g = SpatialGrid::new(area, 100.0, boundary);
            let mut store = ParticleStore::new();
            for i in 0..40 {
                let x = (i * 37 % 400) as f32;
                let y = (i * 91 % 400) as f32;
                store.insert(ParticleKind(0), [x, y], area, &mut g);
            }
            let mut seen = HashSet::new();
            g.for_each_pair(|a, b| {
                assert_ne!(a, b);
                let key = if a < b { (a, b) } else { (b, a) };
                assert!(seen.insert(key));
            });

            // every pair within range must be visited
            let all: Vec<_> = store.iter().collect();
            for (i, p) in all.iter().enumerate() {
                for q in &all[i + 1..] {
                    if area.distance2(p.position, q.position, boundary) <= 100.0 * 100.0 {
                        let key = if p.id < q.id { (p.id, q.id) } else { (q.id, p.id) };
                        assert!(seen.contains(&key), "{boundary:?}: missed {key:?}");
                    }
                }
            }
        }
    }
}
