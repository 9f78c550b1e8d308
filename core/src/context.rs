use rand::prelude::*;
use rand::rngs::SmallRng;
use std::path::Path;

use crate::*;

/// Outcome of a move made through a [`Context`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub outcome: MoveOutcome,
    /// The win beat the last ledger entry and the player was asked for a name.
    pub high_score: bool,
}

/// Everything that lives for the whole run: persisted settings and the game in progress.
#[derive(Clone, Debug)]
pub struct Context {
    settings: Settings,
    session: GameSession,
    seeds: SmallRng,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        Self::with_seed(settings, rand::random())
    }

    /// Every game started by this context gets its field from a seed derived from `seed`.
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let session = Self::start(&settings.levels, &mut seeds);
        Self {
            settings,
            session,
            seeds,
        }
    }

    fn start(levels: &LevelConfig, seeds: &mut SmallRng) -> GameSession {
        let level = levels.current();
        GameSession::new(level, levels.parameters(level), seeds.random())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.settings.ledger
    }

    pub fn levels(&self) -> &LevelConfig {
        &self.settings.levels
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Replaces the current game with a new one on the selected level.
    pub fn new_game(&mut self) {
        self.session = Self::start(&self.settings.levels, &mut self.seeds);
    }

    pub fn change_level(&mut self, level: Level) {
        self.settings.levels.set_current(level);
        self.new_game();
    }

    /// Stores the custom parameters, selects the custom level and starts a game on it.
    pub fn set_custom(&mut self, params: LevelParams) {
        self.settings.levels.set_custom(params);
        self.change_level(Level::Custom);
    }

    pub fn tick(&mut self) {
        self.session.tick();
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    pub fn reveal(
        &mut self,
        row: Coord,
        col: Coord,
        prompt: &mut impl NamePrompt,
    ) -> Result<Turn> {
        let outcome = self.session.reveal(row, col)?;
        Ok(self.finish_turn(outcome, prompt))
    }

    pub fn toggle_mark(
        &mut self,
        row: Coord,
        col: Coord,
        prompt: &mut impl NamePrompt,
    ) -> Result<Turn> {
        let outcome = self.session.toggle_mark(row, col)?;
        Ok(self.finish_turn(outcome, prompt))
    }

    fn finish_turn(&mut self, outcome: MoveOutcome, prompt: &mut impl NamePrompt) -> Turn {
        let high_score = match outcome {
            MoveOutcome::Won => self.settings.ledger.add_score(
                self.session.level(),
                self.session.params(),
                self.session.elapsed_secs(),
                prompt,
            ),
            _ => false,
        };
        Turn {
            outcome,
            high_score,
        }
    }

    pub fn reset_scores(&mut self) {
        log::info!("Resetting high scores");
        self.settings.ledger.reset();
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        self.settings.save(path)
    }
}
