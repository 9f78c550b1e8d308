use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of a single player move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    NoChange,
    Changed,
    Won,
    Lost,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game: a populated minefield, its clock, and whether it is still being played.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    level: Level,
    params: LevelParams,
    minefield: Minefield,
    clock: GameClock,
    state: SessionState,
}

impl GameSession {
    /// Starts a game on a freshly populated field.
    pub fn new(level: Level, params: LevelParams, seed: u64) -> Self {
        let mut minefield = Minefield::from_params(params);
        minefield.populate_with(SubsetPlacer::new(seed));
        Self::with_minefield(level, params, minefield)
    }

    /// Starts a game on a field prepared by the caller.
    pub fn with_minefield(level: Level, params: LevelParams, minefield: Minefield) -> Self {
        log::debug!(
            "New {level} game {params}, {} mines placed",
            minefield.mines_placed()
        );
        Self {
            level,
            params,
            minefield,
            clock: GameClock::new(),
            state: SessionState::Playing,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Parameters the game was requested with, before any clamping by the minefield.
    pub fn params(&self) -> LevelParams {
        self.params
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.secs()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        !self.state.is_finished()
    }

    pub fn tick(&mut self) {
        self.clock.tick();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn reveal(&mut self, row: Coord, col: Coord) -> Result<MoveOutcome> {
        self.check_playing()?;

        match self.minefield.reveal(row, col)? {
            RevealOutcome::HitMine => {
                self.end_game(false);
                Ok(MoveOutcome::Lost)
            }
            outcome => Ok(self.settle(outcome.has_update())),
        }
    }

    pub fn toggle_mark(&mut self, row: Coord, col: Coord) -> Result<MoveOutcome> {
        self.check_playing()?;

        let outcome = self.minefield.toggle_mark(row, col)?;
        Ok(self.settle(outcome.has_update()))
    }

    /// Refreshes the counters after a move that did not lose and checks for a win.
    fn settle(&mut self, changed: bool) -> MoveOutcome {
        self.minefield.refresh_counters();

        if self.minefield.is_solved() {
            self.end_game(true);
            MoveOutcome::Won
        } else if changed {
            MoveOutcome::Changed
        } else {
            MoveOutcome::NoChange
        }
    }

    fn end_game(&mut self, won: bool) {
        self.minefield.reveal_all();
        self.clock.stop();
        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        log::info!(
            "{} game {:?} after {}s",
            self.level,
            self.state,
            self.clock.secs()
        );
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
