//! Sparse hash grid for neighbour queries over horde slot indices

use ahash::AHashMap;
use glam::DVec2;

/// Buckets horde indices by ground-plane cell for 3x3 neighbourhood queries
#[derive(Debug, Clone)]
pub struct SparseHashGrid {
    cell_size: f64,
    cells: AHashMap<(i32, i32), Vec<usize>>,
}

impl SparseHashGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: AHashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    fn cell_coord(&self, pos: DVec2) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, index: usize, pos: DVec2) {
        let coord = self.cell_coord(pos);
        self.cells.entry(coord).or_default().push(index);
    }

    /// Every index in the 3x3 block of cells around `pos`
    pub fn query_neighbors(&self, pos: DVec2) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = self.cell_coord(pos);

        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                self.cells
                    .get(&(cx + dx, cy + dy))
                    .into_iter()
                    .flatten()
                    .copied()
            })
        })
    }

    /// Indices within `radius` of `center`; `positions` is indexed by grid index
    pub fn query_radius(&self, center: DVec2, radius: f64, positions: &[DVec2]) -> Vec<usize> {
        let radius_sq = radius * radius;
        self.query_neighbors(center)
            .filter(|&index| {
                positions
                    .get(index)
                    .map(|pos| center.distance_squared(*pos) <= radius_sq)
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn rebuild(&mut self, entries: impl Iterator<Item = (usize, DVec2)>) {
        self.clear();
        for (index, pos) in entries {
            self.insert(index, pos);
        }
    }
}
