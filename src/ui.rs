pub mod results;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::{
    app::App,
    trial::{Outcome, Trial},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Placeholder for a masked or not yet typed character
pub const BLANK: char = '·';

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(&self.view).render(self, area, buf);
    }
}

pub(crate) fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_bold_style() -> Style {
    bold_style().add_modifier(Modifier::DIM)
}

pub(crate) fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

/// Splits `area` into a vertically centred band of `rows` single-line rows.
pub(crate) fn centered_rows(area: Rect, rows: u16) -> Vec<Rect> {
    let pad = area.height.saturating_sub(rows) / 2;
    let mut constraints = vec![Constraint::Length(pad)];
    constraints.extend(std::iter::repeat(Constraint::Length(1)).take(rows as usize));
    constraints.push(Constraint::Min(0));

    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(constraints)
        .split(area)
        .iter()
        .skip(1)
        .take(rows as usize)
        .copied()
        .collect()
}

/// Spans for a trial's input: green when right, wrong characters in red.
pub(crate) fn trial_spans(trial: &Trial) -> Vec<Span<'static>> {
    let green_bold_style = bold_style().fg(Color::Green);
    let red_bold_style = bold_style().fg(Color::Red);

    if trial.correct {
        return vec![Span::styled(trial.user_input.clone(), green_bold_style)];
    }

    trial
        .marked_user_input
        .iter()
        .map(|m| match m.outcome {
            Outcome::Correct => Span::styled(m.value.to_string(), bold_style()),
            Outcome::Incorrect => Span::styled(
                match m.value {
                    ' ' => BLANK.to_string(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
        })
        .collect()
}

pub fn format_percent(percent: f64) -> String {
    format!("{percent:.2}%")
}
