use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    session::SessionResult,
    ui::{
        bold_style, dim_bold_style, format_percent, italic_style, trial_spans, HORIZONTAL_MARGIN,
        VERTICAL_MARGIN,
    },
};

const COLUMN_GAP: &str = "   ";

/// Render the finished session: one row per trial followed by the score
pub fn render_results(result: &SessionResult, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(3),    // trials
            Constraint::Length(1), // stats
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = match result.finished_at {
        Some(at) => format!(" {} · {} ", result.user_name, at.format("%Y-%m-%d %H:%M")),
        None => format!(" {} ", result.user_name),
    };

    Paragraph::new(trial_lines(result))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, bold_style().fg(Color::Cyan))),
        )
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} patterns   {} correct   {}",
            result.num_trials,
            result.num_correct,
            format_percent(result.percent_correct)
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled("(s)ave / (esc)ape", italic_style())).render(chunks[3], buf);
}

fn trial_lines(result: &SessionResult) -> Vec<Line<'static>> {
    let pattern_width = result
        .trials
        .iter()
        .map(|t| t.pattern.width())
        .max()
        .unwrap_or(0)
        .max("pattern".len());

    let header = Line::from(vec![
        Span::styled(
            format!("{:<pattern_width$}", "pattern"),
            dim_bold_style().add_modifier(Modifier::UNDERLINED),
        ),
        Span::raw(COLUMN_GAP),
        Span::styled(
            format!("{:<pattern_width$}", "input"),
            dim_bold_style().add_modifier(Modifier::UNDERLINED),
        ),
    ]);

    let mut lines = vec![header];
    lines.extend(result.trials.iter().map(|trial| {
        let pad = pattern_width.saturating_sub(trial.pattern.width());
        let mut spans = vec![
            Span::styled(trial.pattern.clone(), bold_style()),
            Span::raw(" ".repeat(pad)),
            Span::raw(COLUMN_GAP),
        ];
        spans.extend(trial_spans(trial));
        spans.push(Span::raw(
            " ".repeat(pattern_width.saturating_sub(trial.user_input.width())),
        ));
        Line::from(spans)
    }));
    lines
}
