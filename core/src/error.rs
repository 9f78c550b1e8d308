use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T, E = GameError> = core::result::Result<T, E>;

/// Failure while reading or writing the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file ended early, expected line {line}")]
    MissingLine { line: usize },
    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: invalid number")]
    InvalidNumber {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown level `{0}`")]
pub struct UnknownLevel(pub String);
