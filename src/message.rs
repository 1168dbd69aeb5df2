//! Message vocabulary exchanged between the front end and the round coordinator.

use crate::session::SessionResult;

/// Sent by the front end in response to user actions
#[derive(Debug, Clone, PartialEq, strum_macros::Display)]
pub enum FrontendMessage {
    Start { user_name: String },
    Trial { user_input: String },
    Save,
    Exit,
}

/// The pattern for one round, with its position in the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternPrompt {
    pub current_round: usize,
    pub num_rounds: usize,
    pub value: String,
}

impl PatternPrompt {
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Sent by the coordinator, exactly one per accepted front-end message
#[derive(Debug, Clone, PartialEq, strum_macros::Display)]
pub enum CoordinatorMessage {
    Pattern(PatternPrompt),
    Result(SessionResult),
    BackToMain,
}
