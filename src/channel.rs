use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::error::QuizError;
use crate::message::{CoordinatorMessage, FrontendMessage};

/// One side of a duplex, ordered, in-process channel
#[derive(Debug)]
pub struct Endpoint<S, R> {
    tx: Sender<S>,
    rx: Receiver<R>,
}

pub type FrontendEnd = Endpoint<FrontendMessage, CoordinatorMessage>;
pub type CoordinatorEnd = Endpoint<CoordinatorMessage, FrontendMessage>;

/// Creates the connected front-end and coordinator endpoints
pub fn duplex() -> (FrontendEnd, CoordinatorEnd) {
    let (to_coordinator, from_frontend) = mpsc::channel();
    let (to_frontend, from_coordinator) = mpsc::channel();

    (
        Endpoint {
            tx: to_coordinator,
            rx: from_coordinator,
        },
        Endpoint {
            tx: to_frontend,
            rx: from_frontend,
        },
    )
}

impl<S, R> Endpoint<S, R> {
    pub fn send(&self, msg: S) -> Result<(), QuizError> {
        self.tx.send(msg).map_err(|_| QuizError::Disconnected)
    }

    /// Blocks until the peer sends a message or hangs up.
    pub fn recv(&self) -> Result<R, QuizError> {
        self.rx.recv().map_err(|_| QuizError::Disconnected)
    }

    /// Returns the next queued message without blocking.
    pub fn try_recv(&self) -> Result<Option<R>, QuizError> {
        match self.rx.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(QuizError::Disconnected),
        }
    }
}
