//! Front-end state: which view is shown, what the user has typed, and the
//! link to the coordinator.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::channel::FrontendEnd;
use crate::error::QuizError;
use crate::message::{CoordinatorMessage, FrontendMessage, PatternPrompt};
use crate::session::SessionResult;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Name entry form
    Entry,
    /// A round's pattern plus the input line
    Input {
        prompt: PatternPrompt,
        elapsed_secs: f64,
    },
    Result(SessionResult),
}

#[derive(Debug)]
pub struct App {
    pub view: View,
    pub name: String,
    pub input: String,
    /// Seconds a pattern stays visible; `None` never hides it
    pub display_secs: Option<f64>,
    /// Set while a message is in flight and its reply has not arrived
    pub awaiting_reply: bool,
    pub should_quit: bool,
    link: FrontendEnd,
}

impl App {
    pub fn new(link: FrontendEnd, display_secs: Option<f64>, name: Option<String>) -> Self {
        Self {
            view: View::Entry,
            name: name.unwrap_or_default(),
            input: String::new(),
            display_secs,
            awaiting_reply: false,
            should_quit: false,
            link,
        }
    }

    pub fn can_start(&self) -> bool {
        !self.awaiting_reply && !self.name.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        match &self.view {
            View::Input { prompt, .. } => {
                !self.awaiting_reply && self.input.chars().count() == prompt.len()
            }
            _ => false,
        }
    }

    pub fn pattern_visible(&self) -> bool {
        match (&self.view, self.display_secs) {
            (View::Input { elapsed_secs, .. }, Some(limit)) => *elapsed_secs < limit,
            _ => true,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<(), QuizError> {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return self.quit();
        }

        match &self.view {
            View::Entry => match key.code {
                KeyCode::Char(c) => self.name.push(c),
                KeyCode::Backspace => {
                    self.name.pop();
                }
                KeyCode::Enter if self.can_start() => {
                    let user_name = self.name.clone();
                    self.send(FrontendMessage::Start { user_name })?;
                }
                _ => {}
            },
            View::Input { prompt, .. } => match key.code {
                KeyCode::Char(c) if self.input.chars().count() < prompt.len() => {
                    self.input.push(c)
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Enter if self.can_submit() => {
                    let user_input = std::mem::take(&mut self.input);
                    self.send(FrontendMessage::Trial { user_input })?;
                }
                _ => {}
            },
            View::Result(_) => match key.code {
                KeyCode::Char('s') | KeyCode::Enter if !self.awaiting_reply => {
                    self.send(FrontendMessage::Save)?;
                }
                _ => {}
            },
        }
        Ok(())
    }

    /// Advances the reveal clock by `elapsed` and applies everything the coordinator has sent.
    pub fn on_tick(&mut self, elapsed: Duration) -> Result<(), QuizError> {
        if let View::Input { elapsed_secs, .. } = &mut self.view {
            *elapsed_secs += elapsed.as_secs_f64();
        }
        self.poll().map(|_| ())
    }

    /// Drains pending coordinator messages without blocking; returns how many were applied.
    pub fn poll(&mut self) -> Result<usize, QuizError> {
        let mut applied = 0;
        while let Some(msg) = self.link.try_recv()? {
            self.apply(msg);
            applied += 1;
        }
        Ok(applied)
    }

    pub fn apply(&mut self, msg: CoordinatorMessage) {
        debug!(message = %msg, "coordinator message arrived");
        self.awaiting_reply = false;
        self.view = match msg {
            CoordinatorMessage::Pattern(prompt) => {
                self.input.clear();
                View::Input {
                    prompt,
                    elapsed_secs: 0.0,
                }
            }
            CoordinatorMessage::Result(result) => View::Result(result),
            CoordinatorMessage::BackToMain => View::Entry,
        };
    }

    fn quit(&mut self) -> Result<(), QuizError> {
        self.should_quit = true;
        self.link.send(FrontendMessage::Exit)
    }

    fn send(&mut self, msg: FrontendMessage) -> Result<(), QuizError> {
        debug!(message = %msg, "sending to coordinator");
        self.link.send(msg)?;
        self.awaiting_reply = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{duplex, CoordinatorEnd};
    use assert_matches::assert_matches;

    const TICK: Duration = Duration::from_millis(100);

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.on_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn prompt(round: usize, total: usize, value: &str) -> CoordinatorMessage {
        CoordinatorMessage::Pattern(PatternPrompt {
            current_round: round,
            num_rounds: total,
            value: value.into(),
        })
    }

    fn setup(display_secs: Option<f64>) -> (App, CoordinatorEnd) {
        let (front, back) = duplex();
        (App::new(front, display_secs, None), back)
    }

    #[test]
    fn test_new_app_shows_entry() {
        let (front, _back) = duplex();
        let app = App::new(front, None, Some("ada".into()));
        assert_eq!(app.view, View::Entry);
        assert_eq!(app.name, "ada");
        assert!(app.can_start());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_empty_name_does_not_start() {
        let (mut app, back) = setup(None);
        app.on_key(key(KeyCode::Enter)).unwrap();
        assert_matches!(back.try_recv(), Ok(None));
    }

    #[test]
    fn test_enter_sends_start() {
        let (mut app, back) = setup(None);
        type_str(&mut app, "adx");
        app.on_key(key(KeyCode::Backspace)).unwrap();
        type_str(&mut app, "a");
        app.on_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(
            back.try_recv().unwrap(),
            Some(FrontendMessage::Start {
                user_name: "ada".into()
            })
        );
        assert!(app.awaiting_reply);

        // no second start while the first is in flight
        app.on_key(key(KeyCode::Enter)).unwrap();
        assert_matches!(back.try_recv(), Ok(None));
    }

    #[test]
    fn test_pattern_switches_to_input_view() {
        let (mut app, back) = setup(None);
        back.send(prompt(1, 2, "4821")).unwrap();

        assert_eq!(app.poll().unwrap(), 1);
        assert_matches!(app.view, View::Input { ref prompt, .. } if prompt.value == "4821");
        assert!(!app.awaiting_reply);
    }

    #[test]
    fn test_input_capped_at_pattern_length() {
        let (mut app, back) = setup(None);
        app.apply(prompt(1, 1, "12"));

        type_str(&mut app, "1234");
        assert_eq!(app.input, "12");
        assert!(app.can_submit());
        drop(back);
    }

    #[test]
    fn test_short_input_not_submitted() {
        let (mut app, back) = setup(None);
        app.apply(prompt(1, 1, "4821"));
        type_str(&mut app, "48");
        app.on_key(key(KeyCode::Enter)).unwrap();

        assert_matches!(back.try_recv(), Ok(None));
        assert_eq!(app.input, "48");
    }

    #[test]
    fn test_full_input_sends_trial_and_clears() {
        let (mut app, back) = setup(None);
        app.apply(prompt(1, 1, "4821"));
        type_str(&mut app, "4829");
        app.on_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(
            back.try_recv().unwrap(),
            Some(FrontendMessage::Trial {
                user_input: "4829".into()
            })
        );
        assert!(app.input.is_empty());
        assert!(!app.can_submit());
    }

    #[test]
    fn test_result_then_save_then_back_to_main() {
        let (mut app, back) = setup(None);
        let mut result = SessionResult::new("ada");
        result.finalize();
        app.apply(CoordinatorMessage::Result(result));
        assert_matches!(app.view, View::Result(_));

        // typing in the result view does nothing
        app.on_key(key(KeyCode::Char('x'))).unwrap();
        assert_matches!(back.try_recv(), Ok(None));

        app.on_key(key(KeyCode::Char('s'))).unwrap();
        assert_eq!(back.try_recv().unwrap(), Some(FrontendMessage::Save));

        back.send(CoordinatorMessage::BackToMain).unwrap();
        app.poll().unwrap();
        assert_eq!(app.view, View::Entry);
    }

    #[test]
    fn test_escape_sends_exit() {
        let (mut app, back) = setup(None);
        app.on_key(key(KeyCode::Esc)).unwrap();

        assert!(app.should_quit);
        assert_eq!(back.try_recv().unwrap(), Some(FrontendMessage::Exit));
    }

    #[test]
    fn test_ctrl_c_sends_exit() {
        let (mut app, back) = setup(None);
        app.apply(prompt(1, 1, "12"));
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();

        assert!(app.should_quit);
        assert!(app.input.is_empty());
        assert_eq!(back.try_recv().unwrap(), Some(FrontendMessage::Exit));
    }

    #[test]
    fn test_pattern_hidden_after_display_window() {
        let (mut app, _back) = setup(Some(0.25));
        app.apply(prompt(1, 1, "12"));
        assert!(app.pattern_visible());

        app.on_tick(TICK).unwrap();
        app.on_tick(TICK).unwrap();
        assert!(app.pattern_visible());

        app.on_tick(TICK).unwrap();
        assert!(!app.pattern_visible());

        // the next round shows its pattern again
        app.apply(prompt(2, 2, "34"));
        assert!(app.pattern_visible());
    }

    #[test]
    fn test_pattern_always_visible_without_window() {
        let (mut app, _back) = setup(None);
        app.apply(prompt(1, 1, "12"));
        for _ in 0..100 {
            app.on_tick(TICK).unwrap();
        }
        assert!(app.pattern_visible());
    }

    #[test]
    fn test_tick_applies_pending_replies() {
        let (mut app, back) = setup(None);
        back.send(prompt(1, 2, "4821")).unwrap();
        back.send(prompt(2, 2, "1234")).unwrap();

        app.on_tick(TICK).unwrap();
        assert_matches!(app.view, View::Input { ref prompt, .. } if prompt.current_round == 2);

        drop(back);
        assert_matches!(app.on_tick(TICK), Err(QuizError::Disconnected));
    }

    #[test]
    fn test_poll_reports_dead_coordinator() {
        let (mut app, back) = setup(None);
        drop(back);
        assert_matches!(app.poll(), Err(QuizError::Disconnected));
        assert_matches!(
            app.on_key(key(KeyCode::Esc)),
            Err(QuizError::Disconnected)
        );
    }
}
