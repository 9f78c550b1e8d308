use serde::{Deserialize, Serialize};

/// State of a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    mine: bool,
    adjacent_mines: u8,
    revealed: bool,
    marked: bool,
}

impl Tile {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_marked(self) -> bool {
        self.marked
    }

    /// Marked and actually mined.
    pub const fn is_correct(self) -> bool {
        self.marked && self.mine
    }

    /// What a renderer may show for this tile. The mine is only exposed once revealed.
    pub const fn view(self) -> TileView {
        match (self.revealed, self.marked, self.mine) {
            (true, _, true) => TileView::Mine,
            (true, _, false) => TileView::Open(self.adjacent_mines),
            (false, true, _) => TileView::Marked,
            (false, false, _) => TileView::Hidden,
        }
    }

    pub(crate) fn set_mine(&mut self) {
        self.mine = true;
    }

    pub(crate) fn add_adjacent_mine(&mut self) {
        self.adjacent_mines += 1;
    }

    pub(crate) fn set_revealed(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn toggle_marked(&mut self) {
        self.marked = !self.marked;
    }
}

/// Player-visible state of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Marked,
    Open(u8),
    Mine,
}

impl TileView {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Marked)
    }
}
