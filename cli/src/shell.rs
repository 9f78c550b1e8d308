use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use fieldsweep_core::*;

use crate::command::{Command, HELP};
use crate::render;

/// Turns wall-clock time into once-per-second clock ticks.
struct Ticker {
    last: Instant,
}

impl Ticker {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn restart(&mut self) {
        self.last = Instant::now();
    }

    /// Ticks once for every whole second since the previous call.
    fn catch_up(&mut self, context: &mut Context) {
        let secs = self.last.elapsed().as_secs();
        for _ in 0..secs {
            context.tick();
        }
        self.last += Duration::from_secs(secs);
    }
}

fn ask_name(
    input: &mut impl BufRead,
    out: &mut impl Write,
    level: Level,
    secs: u32,
) -> Option<String> {
    let asked = write!(out, "New best time on {level}: {}! Name: ", clock_secs(secs))
        .and_then(|()| out.flush());
    if let Err(err) = asked {
        log::warn!("Could not ask for a name: {err}");
        return None;
    }

    let mut name = String::new();
    match input.read_line(&mut name) {
        Ok(0) => None,
        Ok(_) => Some(name.trim().to_owned()),
        Err(err) => {
            log::warn!("Could not read a name: {err}");
            None
        }
    }
}

/// Line-oriented game loop.
pub struct Shell<R, W> {
    context: Context,
    input: R,
    out: W,
    ticker: Ticker,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(context: Context, input: R, out: W) -> Self {
        Self {
            context,
            input,
            out,
            ticker: Ticker::new(),
        }
    }

    /// Plays until `q` or end of input, and hands the context back for saving.
    pub fn run(mut self) -> anyhow::Result<Context> {
        writeln!(self.out, "{HELP}")?;
        self.show_game()?;

        let mut line = String::new();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            self.ticker.catch_up(&mut self.context);
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(err) => writeln!(self.out, "{err}")?,
            }
        }

        Ok(self.context)
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Reveal(row, col) => self.make_move(row, col, true),
            Command::Mark(row, col) => self.make_move(row, col, false),
            Command::NewGame => {
                self.context.new_game();
                self.started()
            }
            Command::ChangeLevel(level) => {
                self.context.change_level(level);
                self.started()
            }
            Command::Custom(params) => {
                self.context.set_custom(params);
                self.started()
            }
            Command::Pause => {
                match self.context.session().clock().state() {
                    ClockState::Running => self.context.pause(),
                    ClockState::Paused => self.context.resume(),
                    ClockState::Stopped => {}
                }
                writeln!(self.out, "{}", render::status(self.context.session()))?;
                Ok(())
            }
            Command::Scores(Some(level)) => {
                write!(self.out, "{}", render::scores(self.context.ledger(), level))?;
                Ok(())
            }
            Command::Scores(None) => {
                for level in Level::ALL {
                    write!(self.out, "{}", render::scores(self.context.ledger(), level))?;
                }
                Ok(())
            }
            Command::ResetScores => {
                self.context.reset_scores();
                writeln!(self.out, "Best times reset")?;
                Ok(())
            }
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn started(&mut self) -> anyhow::Result<()> {
        self.ticker.restart();
        self.show_game()
    }

    fn make_move(&mut self, row: Coord, col: Coord, reveal: bool) -> anyhow::Result<()> {
        if self.context.session().clock().state() == ClockState::Paused {
            writeln!(self.out, "Paused, `p` resumes the game")?;
            return Ok(());
        }

        let mut prompt = |level: Level, secs: u32| ask_name(&mut self.input, &mut self.out, level, secs);
        let turn = if reveal {
            self.context.reveal(row, col, &mut prompt)
        } else {
            self.context.toggle_mark(row, col, &mut prompt)
        };

        match turn {
            Ok(turn) => self.report(turn),
            Err(err) => {
                writeln!(self.out, "{err}")?;
                Ok(())
            }
        }
    }

    fn report(&mut self, turn: Turn) -> anyhow::Result<()> {
        if !turn.outcome.has_update() {
            writeln!(self.out, "Nothing changed")?;
            return Ok(());
        }
        self.show_game()?;

        let session = self.context.session();
        match turn.outcome {
            MoveOutcome::Lost => writeln!(self.out, "Boom! `n` starts a new game")?,
            MoveOutcome::Won => {
                writeln!(
                    self.out,
                    "Cleared in {}",
                    describe_secs(session.elapsed_secs())
                )?;
                if turn.high_score {
                    let ledger = self.context.ledger();
                    write!(self.out, "{}", render::scores(ledger, session.level()))?;
                }
            }
            MoveOutcome::Changed | MoveOutcome::NoChange => {}
        }
        Ok(())
    }

    fn show_game(&mut self) -> anyhow::Result<()> {
        let session = self.context.session();
        write!(self.out, "{}", render::board(session.minefield()))?;
        writeln!(self.out, "{}", render::status(session))?;
        Ok(())
    }
}
