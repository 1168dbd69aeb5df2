use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    app::{App, View},
    ui::{bold_style, centered_rows, dim_bold_style, italic_style, results::render_results, BLANK},
};

/// A UI Screen boundary: renders one view of the app
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Name entry form
pub struct EntryScreen;

impl Screen for EntryScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let rows = centered_rows(area, 5);

        Paragraph::new(Span::styled(
            "recall",
            bold_style().fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(rows[0], buf);

        let cursor = Span::styled(" ", Style::default().add_modifier(Modifier::UNDERLINED));
        Paragraph::new(Line::from(vec![
            Span::styled("name: ", dim_bold_style()),
            Span::styled(app.name.clone(), bold_style()),
            cursor,
        ]))
        .alignment(Alignment::Center)
        .render(rows[2], buf);

        let legend = if app.can_start() {
            Span::styled("(enter) start / (esc)ape", italic_style())
        } else {
            Span::styled("type your name / (esc)ape", italic_style().add_modifier(Modifier::DIM))
        };
        Paragraph::new(legend)
            .alignment(Alignment::Center)
            .render(rows[4], buf);
    }
}

/// Pattern plus the input line for the current round
pub struct InputScreen;

impl Screen for InputScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let View::Input { prompt, .. } = &app.view else {
            return;
        };
        let rows = centered_rows(area, 7);

        Paragraph::new(Span::styled(
            format!("{}/{}", prompt.current_round, prompt.num_rounds),
            dim_bold_style(),
        ))
        .alignment(Alignment::Center)
        .render(rows[0], buf);

        let pattern = if app.pattern_visible() {
            Span::styled(prompt.value.clone(), bold_style().fg(Color::Magenta))
        } else {
            Span::styled(
                BLANK.to_string().repeat(prompt.len()),
                dim_bold_style(),
            )
        };
        Paragraph::new(pattern)
            .alignment(Alignment::Center)
            .render(rows[2], buf);

        let typed = app.input.chars().count();
        let remaining = prompt.len().saturating_sub(typed);
        let mut spans = vec![Span::styled(app.input.clone(), bold_style())];
        if remaining > 0 {
            spans.push(Span::styled(
                BLANK.to_string(),
                dim_bold_style().add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::styled(
                BLANK.to_string().repeat(remaining - 1),
                dim_bold_style(),
            ));
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(rows[4], buf);

        let legend = if app.can_submit() {
            Span::styled("(enter) next / (esc)ape", italic_style())
        } else {
            Span::styled("(esc)ape", italic_style().add_modifier(Modifier::DIM))
        };
        Paragraph::new(legend)
            .alignment(Alignment::Center)
            .render(rows[6], buf);
    }
}

/// Per-trial breakdown and score
pub struct ResultScreen;

impl Screen for ResultScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if let View::Result(result) = &app.view {
            render_results(result, area, buf);
        }
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: &View) -> Box<dyn Screen> {
    match view {
        View::Entry => Box::new(EntryScreen),
        View::Input { .. } => Box::new(InputScreen),
        View::Result(_) => Box::new(ResultScreen),
    }
}
