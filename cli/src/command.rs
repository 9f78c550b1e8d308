use core::str::FromStr;
use fieldsweep_core::{Coord, Level, LevelParams, UnknownLevel};
use std::num::ParseIntError;
use std::ops::RangeInclusive;

/// One line typed at the game prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord, Coord),
    Mark(Coord, Coord),
    NewGame,
    ChangeLevel(Level),
    Custom(LevelParams),
    Pause,
    Scores(Option<Level>),
    ResetScores,
    Help,
    Quit,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command `{0}`, `h` lists commands")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Not a number: {0}")]
    Number(#[from] ParseIntError),
    #[error(transparent)]
    Level(#[from] UnknownLevel),
}

pub const HELP: &str = "\
Commands:
  r ROW COL          reveal a tile
  m ROW COL          mark or unmark a tile
  n                  new game on the current level
  l LEVEL            switch level (Beginner, Easy, Medium, Hard, Challenging, Crazy, Custom)
  c ROWS COLS MINES  play a custom level, each value from 1 to 200
  p                  pause or resume the clock
  s [LEVEL]          show best times
  reset              reset best times
  h                  this help
  q                  save and quit";

/// Accepted range for each custom rows, columns and mines value.
pub const CUSTOM_RANGE: RangeInclusive<u32> = 1..=200;

fn args<const N: usize>(
    words: &[&str],
    usage: &'static str,
) -> Result<[u32; N], CommandError> {
    let words: [&str; N] = words.try_into().map_err(|_| CommandError::Usage(usage))?;
    let mut numbers = [0; N];
    for (number, word) in numbers.iter_mut().zip(words) {
        *number = word.parse()?;
    }
    Ok(numbers)
}

fn coords(words: &[&str], usage: &'static str) -> Result<(Coord, Coord), CommandError> {
    let [row, col] = args::<2>(words, usage)?;
    let row = Coord::try_from(row).map_err(|_| CommandError::Usage(usage))?;
    let col = Coord::try_from(col).map_err(|_| CommandError::Usage(usage))?;
    Ok((row, col))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, rest)) = words.split_first() else {
            return Err(CommandError::Usage("h for help"));
        };

        match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => {
                let (row, col) = coords(rest, "r ROW COL")?;
                Ok(Self::Reveal(row, col))
            }
            "m" | "mark" => {
                let (row, col) = coords(rest, "m ROW COL")?;
                Ok(Self::Mark(row, col))
            }
            "n" | "new" => Ok(Self::NewGame),
            "l" | "level" => match rest {
                [level] => Ok(Self::ChangeLevel(level.parse()?)),
                _ => Err(CommandError::Usage("l LEVEL")),
            },
            "c" | "custom" => {
                const USAGE: &str = "c ROWS COLS MINES, each from 1 to 200";
                let values = args::<3>(rest, USAGE)?;
                if !values.iter().all(|value| CUSTOM_RANGE.contains(value)) {
                    return Err(CommandError::Usage(USAGE));
                }
                let [rows, cols, mines] = values;
                let rows = Coord::try_from(rows).map_err(|_| CommandError::Usage(USAGE))?;
                let cols = Coord::try_from(cols).map_err(|_| CommandError::Usage(USAGE))?;
                Ok(Self::Custom(LevelParams::new(rows, cols, mines)))
            }
            "p" | "pause" => Ok(Self::Pause),
            "s" | "scores" => match rest {
                [] => Ok(Self::Scores(None)),
                [level] => Ok(Self::Scores(Some(level.parse()?))),
                _ => Err(CommandError::Usage("s [LEVEL]")),
            },
            "reset" => Ok(Self::ResetScores),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}
