use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Draws uniformly random coordinates and retries until enough of them were accepted.
///
/// Simple, but slows down sharply as the mine count approaches the number of free tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionPlacer {
    seed: u64,
}

impl RejectionPlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RejectionPlacer {
    fn place_mines(self, field: &mut Minefield) {
        let (rows, cols) = field.size();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let capacity = field.total_tiles().saturating_sub(1);
        let mut attempts: u64 = 0;

        while field.mines_left_to_place() > 0 && field.mines_placed() < capacity {
            let row = rng.random_range(0..rows);
            let col = rng.random_range(0..cols);
            field.place_mine(row, col);
            attempts += 1;
        }

        log::debug!(
            "Placed {} mines in {} attempts",
            field.mines_placed(),
            attempts
        );
    }
}

/// Picks a uniformly random subset of the free tiles in one pass, so it always terminates.
#[derive(Clone, Debug, PartialEq)]
pub struct SubsetPlacer {
    seed: u64,
}

impl SubsetPlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for SubsetPlacer {
    fn place_mines(self, field: &mut Minefield) {
        let remaining = field.mines_left_to_place() as usize;
        if remaining == 0 {
            return;
        }

        let free_tiles: Vec<Coord2> = field
            .iter_tiles()
            .filter(|&(coords, tile)| coords != SAFE_START && !tile.is_mine())
            .map(|(coords, _)| coords)
            .collect();
        if remaining > free_tiles.len() {
            log::warn!(
                "Only {} free tiles for {} mines",
                free_tiles.len(),
                remaining
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let amount = remaining.min(free_tiles.len());
        for i in index::sample(&mut rng, free_tiles.len(), amount) {
            let (row, col) = free_tiles[i];
            field.place_mine(row, col);
        }

        log::debug!("Placed {} mines", field.mines_placed());
    }
}
