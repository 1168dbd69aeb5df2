use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::trial::Trial;

/// Aggregated outcome of every trial in a session.
///
/// The counters are only meaningful after [`SessionResult::finalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub user_name: String,
    pub trials: Vec<Trial>,
    pub num_correct: usize,
    pub num_trials: usize,
    pub percent_correct: f64,
    pub finished_at: Option<DateTime<Local>>,
}

impl SessionResult {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            trials: Vec::new(),
            num_correct: 0,
            num_trials: 0,
            percent_correct: 0.0,
            finished_at: None,
        }
    }

    pub fn add(&mut self, trial: Trial) {
        if trial.correct {
            self.num_correct += 1;
        }
        self.trials.push(trial);
    }

    pub fn finalize(&mut self) {
        self.num_trials = self.trials.len();
        self.percent_correct = percent(self.num_correct, self.num_trials);
        self.finished_at = Some(Local::now());
    }
}

/// Share of `part` in `whole` as a percentage; zero for an empty whole.
pub fn percent(part: usize, whole: usize) -> f64 {
    match whole {
        0 => 0.0,
        w => (part as f64 / w as f64) * 100.0,
    }
}

/// Per-session coordinator state. Replaced wholesale on every `Start`.
#[derive(Debug, Clone)]
pub struct Session {
    pub current_round: usize,
    pub num_rounds: usize,
    pub pattern: Option<String>,
    pub result: SessionResult,
}

impl Session {
    pub fn new(user_name: impl Into<String>, num_rounds: usize) -> Self {
        Self {
            current_round: 0,
            num_rounds,
            pattern: None,
            result: SessionResult::new(user_name),
        }
    }

    pub fn user_name(&self) -> &str {
        &self.result.user_name
    }

    pub fn is_last_round(&self) -> bool {
        self.current_round >= self.num_rounds
    }
}
