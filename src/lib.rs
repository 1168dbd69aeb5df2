// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod channel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod message;
pub mod pattern;
pub mod runtime;
pub mod session;
pub mod trial;
pub mod ui;

pub use error::QuizError;
