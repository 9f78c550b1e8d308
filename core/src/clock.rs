use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    Running,
    Paused,
    Stopped,
}

/// Elapsed whole seconds of a game, advanced by an external once-per-second tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    secs: u32,
    state: ClockState,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// A running clock at zero.
    pub const fn new() -> Self {
        Self {
            secs: 0,
            state: ClockState::Running,
        }
    }

    pub const fn secs(&self) -> u32 {
        self.secs
    }

    pub const fn state(&self) -> ClockState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running)
    }

    pub fn tick(&mut self) {
        if self.is_running() {
            self.secs = self.secs.saturating_add(1);
        }
    }

    pub fn pause(&mut self) {
        if self.is_running() {
            self.state = ClockState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if matches!(self.state, ClockState::Paused) {
            self.state = ClockState::Running;
        }
    }

    /// Final, a stopped clock never runs again.
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// `SS` or `MM:SS`.
    pub fn display(&self) -> String {
        clock_secs(self.secs)
    }
}

/// Formats as `MM:SS`, or just `SS` under a minute, like a running game clock.
pub fn clock_secs(secs: u32) -> String {
    if secs < 60 {
        format!("{secs:02}")
    } else {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Formats as `01 minute and 05 seconds`.
pub fn describe_secs(secs: u32) -> String {
    let (minutes, seconds) = (secs / 60, secs % 60);
    match minutes {
        0 if secs == 1 => format!("{secs:02} second"),
        0 => format!("{secs:02} seconds"),
        1 => format!("01 minute and {seconds:02} seconds"),
        _ => format!("{minutes:02} minutes and {seconds:02} seconds"),
    }
}
