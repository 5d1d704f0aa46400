use bondlife_core::{ParticleId, ParticleKind, PlayArea};
use rand::Rng;

use crate::grid::SpatialGrid;
use crate::store::ParticleStore;

/// Draw `count` particles with uniform kind and uniform position over the play area
pub fn scatter<R: Rng>(
    rng: &mut R,
    count: usize,
    kinds: usize,
    area: PlayArea,
) -> Vec<(ParticleKind, [f32; 2])> {
    if kinds == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let kind = ParticleKind(rng.gen_range(0..kinds) as u8);
            let x = rng.gen_range(0.0..=area.width);
            let y = rng.gen_range(0.0..=area.height);
            (kind, [x, y])
        })
        .collect()
}

/// Scatter particles straight into a store and its grid
pub fn populate<R: Rng>(
    rng: &mut R,
    count: usize,
    kinds: usize,
    area: PlayArea,
    store: &mut ParticleStore,
    grid: &mut SpatialGrid,
) -> Vec<ParticleId> {
    scatter(rng, count, kinds, area)
        .into_iter()
        .map(|(kind, pos)| store.insert(kind, pos, area, grid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondlife_core::BoundaryMode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scatter_is_reproducible() {
        let area = PlayArea::new(1920.0, 1040.0);
        let a = scatter(&mut ChaCha8Rng::seed_from_u64(7), 200, 3, area);
        let b = scatter(&mut ChaCha8Rng::seed_from_u64(7), 200, 3, area);
        assert_eq!(a, b);
        assert!(a.iter().all(|(k, p)| k.index() < 3 && area.contains(*p)));
        for kind in 0..3u8 {
            assert!(a.iter().any(|(k, _)| *k == ParticleKind(kind)));
        }
    }

    #[test]
    fn test_populate_buckets_everything() {
        let area = PlayArea::new(800.0, 600.0);
        let mut store = ParticleStore::new();
        let mut grid = SpatialGrid::new(area, 100.0, BoundaryMode::Reflective);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ids = populate(&mut rng, 50, 3, area, &mut store, &mut grid);
        assert_eq!(ids.len(), 50);
        assert_eq!(store.len(), 50);
        for p in store.iter() {
            assert_eq!(grid.cell_containing(p.id), Some(grid.cell_of(p.position)));
        }
    }

    #[test]
    fn test_no_kinds_no_particles() {
        let area = PlayArea::new(800.0, 600.0);
        assert!(scatter(&mut ChaCha8Rng::seed_from_u64(1), 10, 0, area).is_empty());
    }
}
