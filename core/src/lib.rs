pub use clock::*;
pub use context::*;
pub use error::*;
pub use generator::*;
pub use level::*;
pub use minefield::*;
pub use score::*;
pub use session::*;
pub use settings::*;
pub use tile::*;
pub use types::*;

mod clock;
mod context;
mod error;
mod generator;
mod level;
mod minefield;
mod score;
mod session;
mod settings;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of stepping on a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Tile was marked or already open.
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }

    /// Anything but a mine.
    pub const fn is_safe(self) -> bool {
        !matches!(self, Self::HitMine)
    }
}
