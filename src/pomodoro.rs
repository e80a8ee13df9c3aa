//! Pomodoro phase sequencing
//!
//! Decides which phase follows the one that just ended. Counting down is
//! left to the UI.

use std::time::Duration;

use crate::settings::PomodoroSettings;

/// Current phase of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Focus session
    #[default]
    Work,
    /// Break after a work session
    ShortBreak,
    /// Break after every `long_break_interval` work sessions
    LongBreak,
}

impl Phase {
    pub fn duration(&self, settings: &PomodoroSettings) -> Duration {
        let minutes = match self {
            Phase::Work => settings.work_duration,
            Phase::ShortBreak => settings.short_break_duration,
            Phase::LongBreak => settings.long_break_duration,
        };
        Duration::from_secs(u64::from(minutes) * 60)
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }
}

/// Result of finishing a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Phase,
    /// Start the next phase without waiting for the user
    pub auto_start: bool,
}

/// Position in the work/break cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomodoroCycle {
    pub phase: Phase,
    /// Work sessions finished so far
    pub completed_pomodoros: u32,
}

impl PomodoroCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish the current phase and move to the next one
    pub fn advance(&mut self, settings: &PomodoroSettings) -> Transition {
        let transition = match self.phase {
            Phase::Work => {
                self.completed_pomodoros += 1;
                let interval = settings.long_break_interval.max(1);
                let next = if self.completed_pomodoros % interval == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                Transition {
                    next,
                    auto_start: settings.auto_start_breaks,
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Transition {
                next: Phase::Work,
                auto_start: settings.auto_start_pomodoros,
            },
        };
        log::debug!(
            "Pomodoro {:?} -> {:?} (completed: {})",
            self.phase,
            transition.next,
            self.completed_pomodoros
        );
        self.phase = transition.next;
        transition
    }

    /// Jump to `phase` without counting anything (user skipped ahead)
    pub fn switch_to(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Back to a fresh work session with no completed pomodoros
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
