use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelParams {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl LevelParams {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }
}

/// Parameters a custom level starts with.
pub const DEFAULT_CUSTOM: LevelParams = LevelParams::new(10, 10, 10);

fn plural(f: &mut fmt::Formatter<'_>, count: impl Into<u64>, unit: &str) -> fmt::Result {
    match count.into() {
        1 => write!(f, "1 {unit}"),
        n => write!(f, "{n} {unit}s"),
    }
}

/// Formats as `(10 Rows, 10 Columns, 10 Mines)`.
impl fmt::Display for LevelParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        plural(f, self.rows, "Row")?;
        f.write_str(", ")?;
        plural(f, self.cols, "Column")?;
        f.write_str(", ")?;
        plural(f, self.mines, "Mine")?;
        f.write_str(")")
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Easy,
    Medium,
    Hard,
    Challenging,
    Crazy,
    Custom,
}

impl Level {
    /// Every level in its fixed order, which is also the score ledger order.
    pub const ALL: [Level; 7] = [
        Level::Beginner,
        Level::Easy,
        Level::Medium,
        Level::Hard,
        Level::Challenging,
        Level::Crazy,
        Level::Custom,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub const fn name(self) -> &'static str {
        use Level::*;
        match self {
            Beginner => "Beginner",
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
            Challenging => "Challenging",
            Crazy => "Crazy",
            Custom => "Custom",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Exact match against the display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.name() == name)
    }

    /// Fixed parameters, `None` for [`Level::Custom`].
    pub const fn preset(self) -> Option<LevelParams> {
        use Level::*;
        match self {
            Beginner => Some(LevelParams::new(10, 10, 10)),
            Easy => Some(LevelParams::new(10, 10, 15)),
            Medium => Some(LevelParams::new(20, 20, 40)),
            Hard => Some(LevelParams::new(20, 20, 60)),
            Challenging => Some(LevelParams::new(30, 30, 200)),
            Crazy => Some(LevelParams::new(30, 30, 400)),
            Custom => None,
        }
    }

    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive, for command lines.
impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLevel(s.to_owned()))
    }
}

/// Which level is selected, and what the custom level currently looks like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    current: Level,
    custom: LevelParams,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            current: Level::default(),
            custom: DEFAULT_CUSTOM,
        }
    }
}

impl LevelConfig {
    pub fn current(&self) -> Level {
        self.current
    }

    pub fn set_current(&mut self, level: Level) {
        self.current = level;
    }

    /// Selects the level whose display name is exactly `name`.
    /// Returns false, keeping the current selection, when nothing matches.
    pub fn set_current_by_name(&mut self, name: &str) -> bool {
        match Level::from_name(name) {
            Some(level) => {
                self.current = level;
                true
            }
            None => {
                log::warn!("Ignoring unknown level name {name:?}");
                false
            }
        }
    }

    pub fn custom(&self) -> LevelParams {
        self.custom
    }

    /// No validation here, the minefield clamps what it cannot honour.
    pub fn set_custom(&mut self, params: LevelParams) {
        self.custom = params;
    }

    pub fn parameters(&self, level: Level) -> LevelParams {
        level.preset().unwrap_or(self.custom)
    }

    pub fn current_parameters(&self) -> LevelParams {
        self.parameters(self.current)
    }
}
