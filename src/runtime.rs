//! Terminal input and the fixed-cadence loop that feeds it into the app.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::app::App;
use crate::error::QuizError;

/// Cadence at which the UI polls the coordinator and redraws
pub const TICK_RATE_MS: u64 = 100;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where key and resize events come from
pub trait EventSource {
    /// Waits up to `timeout` for the next input event.
    fn next_event(&self, timeout: Duration) -> Option<AppEvent>;
}

impl EventSource for Receiver<AppEvent> {
    fn next_event(&self, timeout: Duration) -> Option<AppEvent> {
        match self.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // input is gone but ticks must keep their pace
                thread::sleep(timeout);
                None
            }
        }
    }
}

/// Key presses and resizes read from the terminal on a background thread
pub struct TerminalEvents {
    rx: Receiver<AppEvent>,
}

impl TerminalEvents {
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("terminal-events".into())
            .spawn(move || loop {
                let ev = match event::read() {
                    // presses only, Windows also reports releases
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Event::Resize(..)) => AppEvent::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::error!(error = %e, "terminal event reader stopped");
                        break;
                    }
                };
                if tx.send(ev).is_err() {
                    break;
                }
            })?;
        Ok(Self { rx })
    }
}

impl EventSource for TerminalEvents {
    fn next_event(&self, timeout: Duration) -> Option<AppEvent> {
        self.rx.next_event(timeout)
    }
}

/// Interleaves input with ticks. A tick is due every `tick` even while keys
/// keep arriving, so coordinator replies are never starved by typing.
pub struct Runner<E> {
    events: E,
    tick: Duration,
    last_tick: Instant,
}

impl<E: EventSource> Runner<E> {
    pub fn new(events: E) -> Self {
        Self::with_tick(events, Duration::from_millis(TICK_RATE_MS))
    }

    pub fn with_tick(events: E, tick: Duration) -> Self {
        Self {
            events,
            tick,
            last_tick: Instant::now(),
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Next input event, or `Tick` once the interval since the last tick has run out.
    pub fn step(&mut self) -> AppEvent {
        let remaining = self.tick.saturating_sub(self.last_tick.elapsed());
        if !remaining.is_zero() {
            if let Some(ev) = self.events.next_event(remaining) {
                return ev;
            }
        }
        self.last_tick = Instant::now();
        AppEvent::Tick
    }

    /// Takes one step and hands the result to the app.
    pub fn drive(&mut self, app: &mut App) -> Result<AppEvent, QuizError> {
        let ev = self.step();
        match &ev {
            AppEvent::Tick => app.on_tick(self.tick)?,
            AppEvent::Key(key) => app.on_key(*key)?,
            AppEvent::Resize => {}
        }
        Ok(ev)
    }
}
