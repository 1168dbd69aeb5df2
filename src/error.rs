use thiserror::Error;

/// Everything that can stop a session. All variants are fatal: neither side
/// of the channel tries to recover from them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// A message arrived that the coordinator cannot accept in its current state.
    #[error("unexpected message {message} while {state}")]
    UnexpectedMessage { state: String, message: String },

    /// The front end sent a trial whose length differs from the pattern.
    #[error("trial input has {input} characters but the pattern has {pattern}")]
    LengthMismatch { pattern: usize, input: usize },

    /// The other end of the channel hung up.
    #[error("channel peer disconnected")]
    Disconnected,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl QuizError {
    pub fn unexpected(state: impl ToString, message: impl ToString) -> Self {
        QuizError::UnexpectedMessage {
            state: state.to_string(),
            message: message.to_string(),
        }
    }
}
