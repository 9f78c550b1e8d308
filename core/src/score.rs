use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Entries kept per level.
pub const LEDGER_SIZE: usize = 5;

/// Longest name stored in the ledger, in characters.
pub const MAX_NAME_LEN: usize = 25;

pub const DEFAULT_NAME: &str = "Player";

/// Placeholder time for empty ledger slots, 999:59 on the clock.
pub const SENTINEL_SECS: u32 = 59_999;

/// One ledger entry. Custom level entries remember the parameters they were set on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub secs: u32,
    pub detail: Option<LevelParams>,
}

impl Score {
    pub fn new(name: impl Into<String>, secs: u32) -> Self {
        Self {
            name: name.into(),
            secs,
            detail: None,
        }
    }

    pub fn with_detail(name: impl Into<String>, secs: u32, detail: LevelParams) -> Self {
        Self {
            name: name.into(),
            secs,
            detail: Some(detail),
        }
    }

    /// Ranking order: faster first, ties broken by name.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.secs
            .cmp(&other.secs)
            .then_with(|| self.name.cmp(&other.name))
    }

    fn placeholder(level: Level) -> Self {
        if level.is_custom() {
            Self::with_detail(DEFAULT_NAME, SENTINEL_SECS, DEFAULT_CUSTOM)
        } else {
            Self::new(DEFAULT_NAME, SENTINEL_SECS)
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, describe_secs(self.secs))?;
        if let Some(detail) = self.detail {
            write!(f, " {detail}")?;
        }
        Ok(())
    }
}

/// Asks the player for a name after a qualifying time.
pub trait NamePrompt {
    /// `None` means the player declined to answer.
    fn request_name(&mut self, level: Level, secs: u32) -> Option<String>;
}

impl<F> NamePrompt for F
where
    F: FnMut(Level, u32) -> Option<String>,
{
    fn request_name(&mut self, level: Level, secs: u32) -> Option<String> {
        self(level, secs)
    }
}

/// Prompt that never answers, every entry gets the default name.
#[derive(Copy, Clone, Debug, Default)]
pub struct Anonymous;

impl NamePrompt for Anonymous {
    fn request_name(&mut self, _level: Level, _secs: u32) -> Option<String> {
        None
    }
}

/// Turns a prompt answer into a storable name.
///
/// Missing or empty answers become [`DEFAULT_NAME`], long ones are cut to [`MAX_NAME_LEN`]
/// characters. Field and line separators of the settings file are dropped.
pub fn normalize_name(answer: Option<String>) -> String {
    let name: String = answer
        .unwrap_or_default()
        .chars()
        .filter(|&c| c != ':' && c != '\n' && c != '\r')
        .take(MAX_NAME_LEN)
        .collect();
    if name.is_empty() {
        DEFAULT_NAME.to_owned()
    } else {
        name
    }
}

/// Best times for every level, always exactly [`LEDGER_SIZE`] sorted entries per level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    lists: [Vec<Score>; Level::COUNT],
}

impl Default for ScoreLedger {
    fn default() -> Self {
        let mut ledger = Self {
            lists: Default::default(),
        };
        ledger.reset();
        ledger
    }
}

impl ScoreLedger {
    /// Builds a ledger from already-read lists, sorted and cut to size.
    /// Short lists are filled up with placeholder entries.
    pub fn from_lists(mut lists: [Vec<Score>; Level::COUNT]) -> Self {
        for (level, list) in Level::ALL.into_iter().zip(&mut lists) {
            if list.len() < LEDGER_SIZE {
                list.resize(LEDGER_SIZE, Score::placeholder(level));
            }
            list.sort_by(Score::rank_cmp);
            list.truncate(LEDGER_SIZE);
        }
        Self { lists }
    }

    /// Fills every level with placeholder entries.
    pub fn reset(&mut self) {
        for level in Level::ALL {
            self.lists[level.index()] = vec![Score::placeholder(level); LEDGER_SIZE];
        }
    }

    pub fn scores(&self, level: Level) -> &[Score] {
        &self.lists[level.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, &[Score])> + '_ {
        Level::ALL
            .into_iter()
            .map(|level| (level, self.scores(level)))
    }

    /// Time of the last ranked entry.
    pub fn worst_secs(&self, level: Level) -> u32 {
        self.scores(level)
            .last()
            .map_or(SENTINEL_SECS, |score| score.secs)
    }

    pub fn qualifies(&self, level: Level, secs: u32) -> bool {
        secs < self.worst_secs(level)
    }

    /// Records a finished game.
    ///
    /// Only a time strictly better than the current last entry asks `prompt` for a name;
    /// otherwise the entry goes in under [`DEFAULT_NAME`]. Either way the entry is inserted and
    /// the list is cut back to size, so a time tying the last entry can still displace it.
    /// `params` is stored with custom level entries. Returns whether the time qualified.
    pub fn add_score(
        &mut self,
        level: Level,
        params: LevelParams,
        secs: u32,
        prompt: &mut impl NamePrompt,
    ) -> bool {
        let qualified = self.qualifies(level, secs);
        let name = if qualified {
            normalize_name(prompt.request_name(level, secs))
        } else {
            DEFAULT_NAME.to_owned()
        };

        let score = if level.is_custom() {
            Score::with_detail(name, secs, params)
        } else {
            Score::new(name, secs)
        };
        log::debug!("Adding score to {level}: {score}");

        let list = &mut self.lists[level.index()];
        list.push(score);
        list.sort_by(Score::rank_cmp);
        list.truncate(LEDGER_SIZE);

        qualified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ranked(ledger: &ScoreLedger) {
        for (level, scores) in ledger.iter() {
            assert_eq!(scores.len(), LEDGER_SIZE, "{level}");
            assert!(
                scores.windows(2).all(|w| w[0].rank_cmp(&w[1]).is_le()),
                "{level}"
            );
        }
    }

    #[test]
    fn from_lists_sorts_and_fills_to_size() {
        let mut lists: [Vec<Score>; Level::COUNT] = Default::default();
        lists[Level::Easy.index()] = vec![Score::new("Zoe", 90), Score::new("Ann", 30)];
        lists[Level::Hard.index()] = (0..8).rev().map(|secs| Score::new("Bo", secs)).collect();

        let ledger = ScoreLedger::from_lists(lists);

        assert_ranked(&ledger);
        let easy = ledger.scores(Level::Easy);
        assert_eq!(easy[0], Score::new("Ann", 30));
        assert_eq!(easy[1], Score::new("Zoe", 90));
        assert_eq!(easy[4], Score::new("Player", 59_999));
        let hard: Vec<_> = ledger.scores(Level::Hard).iter().map(|s| s.secs).collect();
        assert_eq!(hard, vec![0, 1, 2, 3, 4]);
        assert_eq!(
            ledger.scores(Level::Custom)[0].detail,
            Some(LevelParams::new(10, 10, 10))
        );
    }

    #[test]
    fn reset_fills_placeholders() {
        let ledger = ScoreLedger::default();

        for (level, scores) in ledger.iter() {
            for score in scores {
                assert_eq!(score.name, "Player");
                assert_eq!(score.secs, 59_999);
                let detail = level.is_custom().then_some(LevelParams::new(10, 10, 10));
                assert_eq!(score.detail, detail);
            }
        }
    }

    #[test]
    fn qualifying_time_asks_for_name() {
        let mut ledger = ScoreLedger::default();
        let mut asked = Vec::new();
        let mut prompt = |level: Level, secs: u32| {
            asked.push((level, secs));
            Some("Ada".to_owned())
        };

        let params = Level::Easy.preset().unwrap();
        assert!(ledger.add_score(Level::Easy, params, 42, &mut prompt));

        assert_eq!(asked, vec![(Level::Easy, 42)]);
        assert_eq!(ledger.scores(Level::Easy)[0], Score::new("Ada", 42));
        assert_ranked(&ledger);
    }

    #[test]
    fn non_qualifying_time_uses_default_name() {
        let mut ledger = ScoreLedger::default();
        let params = Level::Beginner.preset().unwrap();
        for secs in [10, 20, 30, 40, 50] {
            ledger.add_score(Level::Beginner, params, secs, &mut |_: Level, _: u32| {
                Some("Fast".to_owned())
            });
        }

        let mut prompt = |_: Level, _: u32| -> Option<String> { panic!("should not prompt") };
        assert!(!ledger.add_score(Level::Beginner, params, 60, &mut prompt));

        let times: Vec<_> = ledger.scores(Level::Beginner).iter().map(|s| s.secs).collect();
        assert_eq!(times, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn tying_time_can_displace_last_entry() {
        let mut ledger = ScoreLedger::default();
        let params = Level::Hard.preset().unwrap();
        for name in ["Amy", "Bob", "Cat", "Dan", "Zed"] {
            ledger.add_score(Level::Hard, params, 100, &mut |_: Level, _: u32| Some(name.to_owned()));
        }

        assert!(!ledger.add_score(Level::Hard, params, 100, &mut Anonymous));

        let names: Vec<_> = ledger
            .scores(Level::Hard)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Amy", "Bob", "Cat", "Dan", "Player"]);
    }

    #[test]
    fn custom_scores_keep_parameters() {
        let mut ledger = ScoreLedger::default();
        let params = LevelParams::new(8, 30, 12);

        ledger.add_score(Level::Custom, params, 77, &mut |_: Level, _: u32| Some("Kim".to_owned()));

        let best = &ledger.scores(Level::Custom)[0];
        assert_eq!(best, &Score::with_detail("Kim", 77, params));
        assert_eq!(
            best.to_string(),
            "Kim 01 minute and 17 seconds (8 Rows, 30 Columns, 12 Mines)"
        );
    }

    #[test]
    fn equal_times_sort_by_name() {
        let mut ledger = ScoreLedger::default();
        let params = Level::Medium.preset().unwrap();
        for name in ["Mia", "Abe", "Lou"] {
            ledger.add_score(Level::Medium, params, 5, &mut |_: Level, _: u32| Some(name.to_owned()));
        }

        let names: Vec<_> = ledger.scores(Level::Medium)[..3]
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Abe", "Lou", "Mia"]);
    }

    #[test]
    fn many_insertions_keep_ledger_bounded() {
        let mut ledger = ScoreLedger::default();
        for (i, secs) in [300, 5, 70, 5, 59_999, 1, 80_000, 12, 12, 0, 400]
            .into_iter()
            .enumerate()
        {
            let level = Level::ALL[i % Level::COUNT];
            let params = LevelConfig::default().parameters(level);
            ledger.add_score(level, params, secs, &mut Anonymous);
            assert_ranked(&ledger);
        }
    }

    #[test]
    fn names_are_normalized() {
        assert_eq!(normalize_name(None), "Player");
        assert_eq!(normalize_name(Some(String::new())), "Player");
        assert_eq!(normalize_name(Some("a:b\nc".to_owned())), "abc");
        let long = "x".repeat(40);
        assert_eq!(normalize_name(Some(long)).chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn serializes_with_detail_payload() {
        let score = Score::with_detail("Kim", 3, LevelParams::new(2, 3, 1));
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Kim","secs":3,"detail":{"rows":2,"cols":3,"mines":1}}"#
        );
    }
}
