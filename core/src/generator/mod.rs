use crate::*;
pub use random::*;

mod random;

/// Strategy for filling a [`Minefield`] up to its mine count.
///
/// Implementations go through [`Minefield::place_mine`], so the reserved start tile and the
/// mine count limit hold whatever the strategy does.
pub trait MinePlacer {
    fn place_mines(self, field: &mut Minefield);
}
