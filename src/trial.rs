use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        self == Outcome::Correct
    }
}

/// One typed character annotated against the pattern position it answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedChar {
    pub value: char,
    pub outcome: Outcome,
}

/// One user attempt at reproducing a pattern
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub user_input: String,
    pub pattern: String,
    pub correct: bool,
    /// Empty when the attempt was correct.
    pub marked_user_input: Vec<MarkedChar>,
}

impl Trial {
    /// Evaluates `user_input` against `pattern`.
    ///
    /// Both sides must hold the same number of characters. The front end
    /// gates submission on that, so a mismatch here is a caller bug.
    pub fn evaluate(pattern: &str, user_input: &str) -> Result<Self, QuizError> {
        let pattern_len = pattern.chars().count();
        let input_len = user_input.chars().count();
        if pattern_len != input_len {
            return Err(QuizError::LengthMismatch {
                pattern: pattern_len,
                input: input_len,
            });
        }

        let correct = pattern == user_input;
        let marked_user_input = if correct {
            vec![]
        } else {
            pattern
                .chars()
                .zip_eq(user_input.chars())
                .map(|(expected, value)| MarkedChar {
                    value,
                    outcome: if expected == value {
                        Outcome::Correct
                    } else {
                        Outcome::Incorrect
                    },
                })
                .collect_vec()
        };

        Ok(Self {
            user_input: user_input.to_string(),
            pattern: pattern.to_string(),
            correct,
            marked_user_input,
        })
    }

    pub fn mismatch_count(&self) -> usize {
        self.marked_user_input
            .iter()
            .filter(|m| !m.outcome.is_correct())
            .count()
    }
}
