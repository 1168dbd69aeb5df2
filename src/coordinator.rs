//! Round coordinator: owns session state and answers the front end.
//!
//! The coordinator never acts on its own. Each inbound [`FrontendMessage`]
//! is handled to completion and produces exactly one [`CoordinatorMessage`],
//! except `Exit`, which ends the run loop.

use std::fmt;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use crate::channel::CoordinatorEnd;
use crate::error::QuizError;
use crate::message::{CoordinatorMessage, FrontendMessage, PatternPrompt};
use crate::pattern::PatternSource;
use crate::session::Session;
use crate::trial::Trial;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Idle,
    AwaitingTrial { round: usize },
    Complete,
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundState::Idle => write!(f, "Idle"),
            RoundState::AwaitingTrial { round } => write!(f, "awaiting trial for round {round}"),
            RoundState::Complete => write!(f, "Complete"),
        }
    }
}

/// What the run loop should do after a message was handled
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Reply(CoordinatorMessage),
    Exit,
}

pub struct Coordinator<P: PatternSource> {
    num_rounds: usize,
    source: P,
    state: RoundState,
    session: Option<Session>,
}

impl<P: PatternSource> Coordinator<P> {
    pub fn new(num_rounds: usize, source: P) -> Self {
        Self {
            num_rounds,
            source,
            state: RoundState::Idle,
            session: None,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Advances the state machine by one inbound message.
    pub fn handle(&mut self, msg: FrontendMessage) -> Result<Step, QuizError> {
        match (self.state, msg) {
            (_, FrontendMessage::Exit) => {
                info!("coordinator finishing");
                Ok(Step::Exit)
            }
            (_, FrontendMessage::Start { user_name }) => Ok(Step::Reply(self.start(user_name))),
            (RoundState::AwaitingTrial { round }, FrontendMessage::Trial { user_input }) => {
                self.record_trial(round, &user_input).map(Step::Reply)
            }
            (state, FrontendMessage::Save) => {
                // TODO: persist the finished result once a store exists
                info!(%state, "save requested, persistence not implemented");
                self.state = RoundState::Idle;
                Ok(Step::Reply(CoordinatorMessage::BackToMain))
            }
            (state, msg) => Err(QuizError::unexpected(state, msg)),
        }
    }

    /// Blocking receive loop; returns once `Exit` arrives or on the first fatal error.
    pub fn run(mut self, end: CoordinatorEnd) -> Result<(), QuizError> {
        loop {
            let msg = end.recv()?;
            debug!(?msg, state = %self.state, "front-end message arrived");

            match self.handle(msg) {
                Ok(Step::Reply(reply)) => end.send(reply)?,
                Ok(Step::Exit) => return Ok(()),
                Err(e) => {
                    error!("coordinator stopped: {e}");
                    return Err(e);
                }
            }
        }
    }

    fn start(&mut self, user_name: String) -> CoordinatorMessage {
        info!(%user_name, rounds = self.num_rounds, "session started");
        let session = self.session.insert(Session::new(user_name, self.num_rounds));
        let prompt = advance(&mut self.source, session);
        self.state = RoundState::AwaitingTrial {
            round: prompt.current_round,
        };
        CoordinatorMessage::Pattern(prompt)
    }

    fn record_trial(
        &mut self,
        round: usize,
        user_input: &str,
    ) -> Result<CoordinatorMessage, QuizError> {
        let state = self.state;
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| QuizError::unexpected(state, "Trial"))?;
        let pattern = session
            .pattern
            .as_deref()
            .ok_or_else(|| QuizError::unexpected(state, "Trial"))?;

        let trial = Trial::evaluate(pattern, user_input)?;
        debug!(round, correct = trial.correct, "trial evaluated");
        session.result.add(trial);

        if !session.is_last_round() {
            let prompt = advance(&mut self.source, session);
            self.state = RoundState::AwaitingTrial {
                round: prompt.current_round,
            };
            return Ok(CoordinatorMessage::Pattern(prompt));
        }

        session.result.finalize();
        session.pattern = None;
        self.state = RoundState::Complete;
        info!(
            user_name = session.user_name(),
            correct = session.result.num_correct,
            trials = session.result.num_trials,
            "session finished"
        );
        Ok(CoordinatorMessage::Result(session.result.clone()))
    }
}

/// Moves the session to its next round with a freshly drawn pattern.
fn advance<P: PatternSource>(source: &mut P, session: &mut Session) -> PatternPrompt {
    let value = source.next_pattern();
    session.current_round += 1;
    session.pattern = Some(value.clone());

    PatternPrompt {
        current_round: session.current_round,
        num_rounds: session.num_rounds,
        value,
    }
}

/// Runs a coordinator on its own thread.
pub fn spawn<P: PatternSource>(
    coordinator: Coordinator<P>,
    end: CoordinatorEnd,
) -> std::io::Result<JoinHandle<Result<(), QuizError>>> {
    thread::Builder::new()
        .name("coordinator".into())
        .spawn(move || coordinator.run(end))
}
