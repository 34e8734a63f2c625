// --- File: neighbor.rs ---
// Uniform-grid neighbour index.
//
// Each individual is bucketed by the cell containing its position. The cell edge is a hair
// wider than the largest possible query radius (largest species radius plus the detection
// margin), so every neighbour of a query lies in the 3x3 block of cells around it. Buckets
// are kept current while the sweep moves individuals one at a time, which makes results
// identical to a linear scan over the current positions.

use crate::individual::Individual;
use glam::Vec2;
use std::collections::HashMap;

pub type GridKey = (i32, i32);

const CELL_SLACK: f32 = 1.0001;

#[derive(Debug, Clone)]
pub struct NeighborIndex {
    cell_size: f32,
    grid: HashMap<GridKey, Vec<usize>>,
    cell_of: Vec<GridKey>,
}

impl NeighborIndex {
    pub fn new(max_radius: f32, margin: f32) -> Self {
        // Slightly wider than the largest reach so rounding in the cell lookup never pushes a
        // neighbour two cells away.
        let cell_size = ((max_radius + margin) * CELL_SLACK).max(f32::EPSILON);
        Self {
            cell_size,
            grid: HashMap::new(),
            cell_of: Vec::new(),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    fn grid_key(&self, position: Vec2) -> GridKey {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Re-buckets the whole population. Called once per tick before the sweep.
    pub fn rebuild(&mut self, individuals: &[Individual]) {
        for bucket in self.grid.values_mut() {
            bucket.clear();
        }
        self.cell_of.clear();
        self.cell_of.reserve(individuals.len());
        for (index, individual) in individuals.iter().enumerate() {
            let key = self.grid_key(individual.position);
            self.grid.entry(key).or_default().push(index);
            self.cell_of.push(key);
        }
    }

    /// Moves `index` to the bucket of its new position.
    pub fn relocate(&mut self, index: usize, position: Vec2) {
        let new_key = self.grid_key(position);
        let old_key = self.cell_of[index];
        if old_key == new_key {
            return;
        }
        if let Some(bucket) = self.grid.get_mut(&old_key) {
            if let Some(slot) = bucket.iter().position(|&i| i == index) {
                bucket.swap_remove(slot);
            }
        }
        self.grid.entry(new_key).or_default().push(index);
        self.cell_of[index] = new_key;
    }

    /// Collects, in ascending index order, every other individual whose centre lies within
    /// `radius + margin` of `individuals[index]`.
    pub fn neighbors_of(
        &self,
        individuals: &[Individual],
        index: usize,
        radius: f32,
        margin: f32,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        let origin = individuals[index].position;
        let reach = radius + margin;
        let (cx, cy) = self.cell_of[index];
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &j in bucket {
                    if j != index && individuals[j].position.distance(origin) <= reach {
                        out.push(j);
                    }
                }
            }
        }
        out.sort_unstable();
        log::trace!("individual #{index}: {} neighbours within {reach:.2}", out.len());
    }
}

// --- End of File: neighbor.rs ---
