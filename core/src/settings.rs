//! Plain-text persistence of the score ledger and the level selection.
//!
//! The file holds one record per line: five `name:secs` lines for every standard level,
//! five `name:secs:rows,cols,mines` lines for the custom level, all in [`Level::ALL`] order,
//! then the display name of the selected level and finally the custom `rows,cols,mines`.

use core::fmt;
use core::str::{FromStr, Lines};
use std::fs;
use std::path::Path;

use crate::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub ledger: ScoreLedger,
    pub levels: LevelConfig,
}

impl Settings {
    /// Reads settings from `path`, falling back to defaults on any failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!(
                    "Could not load settings from {}, resetting: {err}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        fs::read_to_string(path)?.parse()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_string())?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }
}

struct LineReader<'a> {
    lines: Lines<'a>,
    line: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<&'a str, SettingsError> {
        self.line += 1;
        self.lines
            .next()
            .ok_or(SettingsError::MissingLine { line: self.line })
    }

    fn fields(
        &self,
        text: &'a str,
        sep: char,
        expected: usize,
    ) -> Result<Vec<&'a str>, SettingsError> {
        let fields: Vec<_> = text.split(sep).collect();
        if fields.len() == expected {
            Ok(fields)
        } else {
            Err(SettingsError::FieldCount {
                line: self.line,
                expected,
                found: fields.len(),
            })
        }
    }

    fn number<T: FromStr<Err = core::num::ParseIntError>>(
        &self,
        text: &str,
    ) -> Result<T, SettingsError> {
        text.parse().map_err(|source| SettingsError::InvalidNumber {
            line: self.line,
            source,
        })
    }

    fn params(&self, text: &'a str) -> Result<LevelParams, SettingsError> {
        let fields = self.fields(text, ',', 3)?;
        Ok(LevelParams::new(
            self.number(fields[0])?,
            self.number(fields[1])?,
            self.number(fields[2])?,
        ))
    }

    fn score(&mut self, level: Level) -> Result<Score, SettingsError> {
        let text = self.next_line()?;
        if level.is_custom() {
            let fields = self.fields(text, ':', 3)?;
            Ok(Score::with_detail(
                fields[0],
                self.number(fields[1])?,
                self.params(fields[2])?,
            ))
        } else {
            let fields = self.fields(text, ':', 2)?;
            Ok(Score::new(fields[0], self.number(fields[1])?))
        }
    }
}

impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut reader = LineReader::new(text);

        let mut lists: [Vec<Score>; Level::COUNT] = Default::default();
        for level in Level::ALL {
            for _ in 0..LEDGER_SIZE {
                let score = reader.score(level)?;
                lists[level.index()].push(score);
            }
        }
        let ledger = ScoreLedger::from_lists(lists);

        let mut levels = LevelConfig::default();
        // unknown names keep the default selection
        levels.set_current_by_name(reader.next_line()?);
        let custom = reader.next_line()?;
        levels.set_custom(reader.params(custom)?);

        Ok(Self { ledger, levels })
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_params(f: &mut fmt::Formatter<'_>, params: LevelParams) -> fmt::Result {
            write!(f, "{},{},{}", params.rows, params.cols, params.mines)
        }

        for (level, scores) in self.ledger.iter() {
            for score in scores {
                write!(f, "{}:{}", score.name, score.secs)?;
                if level.is_custom() {
                    f.write_str(":")?;
                    write_params(f, score.detail.unwrap_or(DEFAULT_CUSTOM))?;
                }
                writeln!(f)?;
            }
        }
        writeln!(f, "{}", self.levels.current().name())?;
        write_params(f, self.levels.custom())?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settings {
        let mut settings = Settings::default();
        let ledger = &mut settings.ledger;
        let mut robin = |_: Level, _: u32| Some("Robin".to_owned());
        let mut sam = |_: Level, _: u32| Some("Sam".to_owned());
        ledger.add_score(Level::Easy, Level::Easy.preset().unwrap(), 33, &mut robin);
        ledger.add_score(Level::Custom, LevelParams::new(4, 9, 7), 12, &mut sam);
        settings.levels.set_current(Level::Hard);
        settings.levels.set_custom(LevelParams::new(4, 9, 7));
        settings
    }

    #[test]
    fn default_export_layout() {
        let text = Settings::default().to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), Level::COUNT * LEDGER_SIZE + 2);
        assert_eq!(lines[0], "Player:59999");
        assert_eq!(lines[30], "Player:59999:10,10,10");
        assert_eq!(lines[35], "Beginner");
        assert_eq!(lines[36], "10,10,10");
    }

    #[test]
    fn export_then_import_round_trips() {
        let settings = sample();

        let parsed: Settings = settings.to_string().parse().unwrap();

        assert_eq!(parsed, settings);
        assert_eq!(parsed.levels.current(), Level::Hard);
        assert_eq!(parsed.ledger.scores(Level::Easy)[0], Score::new("Robin", 33));
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let settings = sample();
        let text = settings.to_string().replace('\n', "\r\n");

        assert_eq!(text.parse::<Settings>().unwrap(), settings);
    }

    #[test]
    fn missing_lines_are_rejected() {
        let text = Settings::default().to_string();
        let truncated: String = text
            .lines()
            .take(36)
            .map(|line| format!("{line}\n"))
            .collect();

        assert!(matches!(
            truncated.parse::<Settings>(),
            Err(SettingsError::MissingLine { line: 37 })
        ));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let text = Settings::default().to_string().replacen("Player:59999", "Player", 1);

        assert!(matches!(
            text.parse::<Settings>(),
            Err(SettingsError::FieldCount {
                line: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn bad_number_is_rejected() {
        let text = Settings::default()
            .to_string()
            .replace("10,10,10\n", "10,ten,10\n");

        assert!(matches!(
            text.parse::<Settings>(),
            Err(SettingsError::InvalidNumber { line: 31, .. })
        ));
    }

    #[test]
    fn unknown_level_name_keeps_default() {
        let text = sample().to_string().replace("\nHard\n", "\nExpert\n");

        let parsed: Settings = text.parse().unwrap();
        assert_eq!(parsed.levels.current(), Level::Beginner);
        assert_eq!(parsed.levels.custom(), LevelParams::new(4, 9, 7));
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert_eq!(Settings::load(&missing), Settings::default());
        assert!(matches!(
            Settings::try_load(&missing),
            Err(SettingsError::Io(_))
        ));

        let garbage = dir.path().join("garbage.txt");
        fs::write(&garbage, "not:a:settings:file\n").unwrap();
        assert_eq!(Settings::load(&garbage), Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.txt");
        let settings = sample();

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);

        assert_eq!(loaded, settings);
    }
}
