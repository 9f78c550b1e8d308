use anyhow::Context as _;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use fieldsweep_core::{Context, Level, Score, ScoreLedger, Settings};
use serde::Serialize;
use std::io;
use std::path::PathBuf;

mod command;
mod render;
mod shell;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// File holding best times and the selected level
    #[arg(long, default_value = "settings.txt")]
    settings: PathBuf,

    /// Level to play instead of the saved one
    #[arg(short, long)]
    level: Option<Level>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print best times and exit
    Scores {
        /// Only this level
        level: Option<Level>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct LevelScores<'a> {
    level: Level,
    scores: &'a [Score],
}

fn print_scores(ledger: &ScoreLedger, level: Option<Level>, json: bool) -> anyhow::Result<()> {
    let levels = match level {
        Some(level) => vec![level],
        None => Level::ALL.to_vec(),
    };

    if json {
        let listing: Vec<_> = levels
            .into_iter()
            .map(|level| LevelScores {
                level,
                scores: ledger.scores(level),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for level in levels {
            print!("{}", render::scores(ledger, level));
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("seed: {:?}", args.seed);

    let mut settings = Settings::load(&args.settings);

    if let Some(Cmd::Scores { level, json }) = args.command {
        return print_scores(&settings.ledger, level, json);
    }

    if let Some(level) = args.level {
        settings.levels.set_current(level);
    }
    let context = match args.seed {
        Some(seed) => Context::with_seed(settings, seed),
        None => Context::new(settings),
    };

    let context = shell::Shell::new(context, io::stdin().lock(), io::stdout().lock()).run()?;

    context
        .save(&args.settings)
        .with_context(|| format!("Could not save settings to {}", args.settings.display()))
}
