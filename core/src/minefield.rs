use core::ops::Index;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// Tile that can never hold a mine, so the player always has one guaranteed safe opening.
pub const SAFE_START: Coord2 = (0, 0);

/// The grid of tiles together with its mine bookkeeping and display counters.
///
/// Dimensions are fixed at construction; a new game builds a new `Minefield`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    tiles: Array2<Tile>,
    mine_count: CellCount,
    mines_placed: CellCount,
    flagged_count: CellCount,
    mines_remaining: isize,
}

impl Minefield {
    /// Creates an empty field. A zero row or column count gives a valid field with no tiles.
    pub fn new(rows: Coord, cols: Coord, mine_count: CellCount) -> Self {
        let size = if rows == 0 || cols == 0 {
            (0, 0)
        } else {
            (rows, cols)
        };
        Self {
            tiles: Array2::default(nd_index(size)),
            mine_count,
            mines_placed: 0,
            flagged_count: 0,
            mines_remaining: mine_count as isize,
        }
    }

    pub fn from_params(params: LevelParams) -> Self {
        Self::new(params.rows, params.cols, params.mines)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.tiles.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_tiles(&self) -> CellCount {
        self.tiles.len() as CellCount
    }

    /// Target number of mines.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mines_placed(&self) -> CellCount {
        self.mines_placed
    }

    pub fn mines_left_to_place(&self) -> CellCount {
        self.mine_count - self.mines_placed
    }

    /// Marked tiles as of the last [`Minefield::refresh_counters`].
    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mine count minus marked tiles as of the last [`Minefield::refresh_counters`].
    /// Goes negative when more tiles are marked than there are mines.
    pub fn mines_remaining(&self) -> isize {
        self.mines_remaining
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile(&self, row: Coord, col: Coord) -> Option<Tile> {
        self.tiles.get(nd_index((row, col))).copied()
    }

    pub fn tiles(&self) -> ArrayView2<'_, Tile> {
        self.tiles.view()
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| ((row as Coord, col as Coord), tile))
    }

    /// Tries to put a mine on `(row, col)`.
    ///
    /// Refuses, without touching anything, out-of-bounds coordinates, the [`SAFE_START`] tile,
    /// tiles that are already mined, and any placement once the mine count is reached.
    pub fn place_mine(&mut self, row: Coord, col: Coord) -> bool {
        let coords = (row, col);
        if self.validate_coords(coords).is_err() || coords == SAFE_START {
            return false;
        }
        if self[coords].is_mine() || self.mines_placed >= self.mine_count {
            return false;
        }

        self.tiles[nd_index(coords)].set_mine();
        for pos in self.tiles.iter_neighbors(coords) {
            self.tiles[nd_index(pos)].add_adjacent_mine();
        }
        self.mines_placed += 1;
        true
    }

    /// Fills the field with randomly placed mines.
    pub fn populate(&mut self) {
        self.populate_with(SubsetPlacer::new(rand::random()));
    }

    /// Fills the field using the given placement strategy.
    pub fn populate_with(&mut self, placer: impl MinePlacer) {
        self.clamp_mine_count();
        placer.place_mines(self);
        self.refresh_counters();

        if self.mines_placed != self.mine_count {
            log::warn!(
                "Populated minefield count mismatch, actual: {}, requested: {}",
                self.mines_placed,
                self.mine_count
            );
        }
    }

    /// At least one tile must stay free of mines.
    fn clamp_mine_count(&mut self) {
        let capacity = self.total_tiles().saturating_sub(1);
        if self.mine_count > capacity {
            log::debug!(
                "Too many mines requested, {} clamped to {}",
                self.mine_count,
                capacity
            );
            self.mine_count = capacity;
        }
    }

    /// Flips the mark on a tile that has not been revealed yet.
    pub fn toggle_mark(&mut self, row: Coord, col: Coord) -> Result<MarkOutcome> {
        let coords = self.validate_coords((row, col))?;
        let tile = &mut self.tiles[nd_index(coords)];

        if tile.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }
        tile.toggle_marked();
        Ok(MarkOutcome::Changed)
    }

    /// Steps on a tile.
    ///
    /// Marked tiles are protected and report [`RevealOutcome::NoChange`]. Stepping on a mine
    /// reports [`RevealOutcome::HitMine`] and changes nothing; uncovering the rest of the
    /// field is left to the caller. A tile with no adjacent mines opens its whole connected
    /// zero region together with the numbered tiles bordering it.
    pub fn reveal(&mut self, row: Coord, col: Coord) -> Result<RevealOutcome> {
        let coords = self.validate_coords((row, col))?;
        let tile = self[coords];

        if tile.is_marked() {
            return Ok(RevealOutcome::NoChange);
        }
        if tile.is_mine() {
            return Ok(RevealOutcome::HitMine);
        }
        if tile.is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }

        let mut opened: CellCount = 0;
        let mut to_visit = vec![coords];
        while let Some(pos) = to_visit.pop() {
            let tile = self[pos];
            if tile.is_marked() || tile.is_mine() || tile.is_revealed() {
                continue;
            }

            self.tiles[nd_index(pos)].set_revealed();
            opened += 1;

            if tile.adjacent_mines() == 0 {
                to_visit.extend(
                    self.tiles
                        .iter_neighbors(pos)
                        .filter(|&neighbor| !self[neighbor].is_revealed()),
                );
            }
        }

        log::trace!("Revealed {opened} tiles from {coords:?}");
        Ok(RevealOutcome::Revealed)
    }

    /// Whether the field counts as cleared.
    ///
    /// Either every mine is marked and nothing else is, or the only tiles left hidden are
    /// the mines.
    pub fn is_solved(&self) -> bool {
        let mut correct: CellCount = 0;
        let mut marked: CellCount = 0;
        let mut revealed: CellCount = 0;

        for tile in self.tiles.iter() {
            if tile.is_correct() {
                correct += 1;
            }
            if tile.is_marked() {
                marked += 1;
            }
            if tile.is_revealed() {
                revealed += 1;
            }
        }

        let all_marked = correct == self.mines_placed && marked == correct;
        let only_mines_hidden = self.total_tiles() - revealed == self.mines_placed;
        all_marked || only_mines_hidden
    }

    /// Recomputes the flagged and mines-remaining display counters.
    pub fn refresh_counters(&mut self) {
        let flagged = self.tiles.iter().filter(|tile| tile.is_marked()).count() as CellCount;
        self.flagged_count = flagged;
        self.mines_remaining = self.mine_count as isize - flagged as isize;
    }

    /// Uncovers every mine, used once the game is over.
    pub fn reveal_all(&mut self) {
        for tile in self.tiles.iter_mut().filter(|tile| tile.is_mine()) {
            tile.set_revealed();
        }
    }
}

impl Index<Coord2> for Minefield {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[nd_index(coords)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(size: Coord2, mines: &[Coord2]) -> Minefield {
        let mut field = Minefield::new(size.0, size.1, mines.len() as CellCount);
        for &(row, col) in mines {
            assert!(field.place_mine(row, col));
        }
        field
    }

    #[test]
    fn degenerate_field_has_no_tiles() {
        let mut field = Minefield::new(0, 5, 3);
        assert_eq!(field.total_tiles(), 0);
        assert_eq!(field.size(), (0, 0));

        field.populate();
        assert_eq!(field.mine_count(), 0);
        assert_eq!(field.mines_placed(), 0);
        assert_eq!(field.reveal(0, 0), Err(GameError::InvalidCoords));
    }

    #[test]
    fn place_mine_rejects_invalid_targets() {
        let mut field = Minefield::new(3, 3, 2);

        assert!(!field.place_mine(3, 0));
        assert!(!field.place_mine(0, 3));
        assert!(!field.place_mine(0, 0));
        assert!(field.place_mine(1, 1));
        assert!(!field.place_mine(1, 1));
        assert!(field.place_mine(2, 2));
        assert!(!field.place_mine(2, 1));

        assert_eq!(field.mines_placed(), 2);
        assert_eq!(field.mines_left_to_place(), 0);
    }

    #[test]
    fn place_mine_updates_neighbor_counts() {
        let field = field((3, 3), &[(1, 1), (2, 2)]);

        assert_eq!(field[(0, 0)].adjacent_mines(), 1);
        assert_eq!(field[(1, 2)].adjacent_mines(), 2);
        assert_eq!(field[(2, 1)].adjacent_mines(), 2);
        assert_eq!(field[(1, 1)].adjacent_mines(), 1);
        assert_eq!(field[(2, 2)].adjacent_mines(), 1);
        assert_eq!(field[(0, 2)].adjacent_mines(), 1);
    }

    #[test]
    fn populate_clamps_to_leave_one_safe_tile() {
        let mut field = Minefield::new(2, 2, 10);
        field.populate_with(SubsetPlacer::new(7));

        assert_eq!(field.mine_count(), 3);
        assert_eq!(field.mines_placed(), 3);
        assert!(!field[SAFE_START].is_mine());
        assert_eq!(field.mines_remaining(), 3);
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut field = field((3, 3), &[(2, 2)]);

        assert_eq!(field.reveal(0, 0), Ok(RevealOutcome::Revealed));

        for (coords, tile) in field.iter_tiles() {
            assert_eq!(tile.is_revealed(), coords != (2, 2), "{coords:?}");
        }
        assert_eq!(field[(1, 1)].view(), TileView::Open(1));
        assert!(field.is_solved());
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // column 2 is a wall of mines, so only columns 0 and 1 open
        let mut field = field((3, 4), &[(0, 2), (1, 2), (2, 2)]);

        field.reveal(2, 0).unwrap();

        for (coords, tile) in field.iter_tiles() {
            assert_eq!(tile.is_revealed(), coords.1 < 2, "{coords:?}");
        }
    }

    #[test]
    fn flood_fill_skips_marked_tiles() {
        let mut field = field((3, 3), &[(2, 2)]);
        field.toggle_mark(0, 2).unwrap();

        field.reveal(0, 0).unwrap();

        assert!(!field[(0, 2)].is_revealed());
        assert!(field[(0, 2)].is_marked());
        assert!(field[(1, 2)].is_revealed());
    }

    #[test]
    fn reveal_marked_tile_is_protected() {
        let mut field = field((3, 3), &[(2, 2)]);
        field.toggle_mark(2, 2).unwrap();
        let before = field.clone();

        assert_eq!(field.reveal(2, 2), Ok(RevealOutcome::NoChange));
        assert!(field.reveal(2, 2).unwrap().is_safe());
        assert_eq!(field, before);
    }

    #[test]
    fn reveal_mine_signals_loss_without_cascade() {
        let mut field = field((3, 3), &[(2, 2)]);
        let before = field.clone();

        let outcome = field.reveal(2, 2).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert!(!outcome.is_safe());
        assert_eq!(field, before);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut field = field((3, 3), &[(2, 2)]);

        assert_eq!(field.reveal(1, 1), Ok(RevealOutcome::Revealed));
        let after_first = field.clone();
        assert_eq!(field.reveal(1, 1), Ok(RevealOutcome::NoChange));
        assert_eq!(field, after_first);
        assert!(!field[(0, 0)].is_revealed());
    }

    #[test]
    fn toggle_mark_ignores_revealed_tiles() {
        let mut field = field((3, 3), &[(2, 2)]);
        field.reveal(1, 1).unwrap();

        assert_eq!(field.toggle_mark(1, 1), Ok(MarkOutcome::NoChange));
        assert!(!field[(1, 1)].is_marked());

        assert_eq!(field.toggle_mark(0, 1), Ok(MarkOutcome::Changed));
        assert!(field[(0, 1)].is_marked());
        assert_eq!(field.toggle_mark(0, 1), Ok(MarkOutcome::Changed));
        assert!(!field[(0, 1)].is_marked());

        assert_eq!(field.toggle_mark(9, 9), Err(GameError::InvalidCoords));
    }

    #[test]
    fn solved_by_marking_every_mine() {
        let mut field = field((3, 3), &[(2, 2)]);
        assert!(!field.is_solved());

        field.toggle_mark(2, 2).unwrap();
        assert!(field.is_solved());
    }

    #[test]
    fn extra_marks_prevent_marking_win() {
        let mut field = field((3, 3), &[(2, 2)]);
        field.toggle_mark(2, 2).unwrap();
        field.toggle_mark(0, 1).unwrap();

        assert!(!field.is_solved());
    }

    #[test]
    fn solved_by_revealing_every_safe_tile() {
        let mut field = field((3, 3), &[(2, 2)]);
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (2, 2) {
                    assert!(field.reveal(row, col).unwrap().is_safe());
                }
            }
        }

        assert!(!field[(2, 2)].is_marked());
        assert!(field.is_solved());
    }

    #[test]
    fn is_solved_leaves_counters_alone() {
        let mut field = field((3, 3), &[(2, 2)]);
        field.toggle_mark(2, 2).unwrap();
        field.toggle_mark(0, 2).unwrap();

        field.is_solved();
        assert_eq!(field.flagged_count(), 0);
        assert_eq!(field.mines_remaining(), 1);

        field.refresh_counters();
        assert_eq!(field.flagged_count(), 2);
        assert_eq!(field.mines_remaining(), -1);
    }

    #[test]
    fn reveal_all_uncovers_only_mines() {
        let mut field = field((3, 3), &[(1, 1), (2, 2)]);

        field.reveal_all();

        for (coords, tile) in field.iter_tiles() {
            assert_eq!(tile.is_revealed(), tile.is_mine(), "{coords:?}");
        }
        assert_eq!(field[(1, 1)].view(), TileView::Mine);
    }
}
