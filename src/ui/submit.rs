//! Submit view rendering.
//!
//! A small form for one reading (heart rate, blood oxygen, temperature)
//! plus a batch line that accepts a pasted JSON array of readings.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, FormField, RequestState};

const FIELDS: [FormField; 3] =
    [FormField::HeartRate, FormField::BloodOxygen, FormField::Temperature];

/// Render the Submit view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(7), // Single reading form
        Constraint::Length(5), // Batch line
        Constraint::Fill(1),   // Feedback
    ])
    .split(area);

    render_reading_form(frame, app, chunks[0]);
    render_batch_line(frame, app, chunks[1]);
    render_feedback(frame, app, chunks[2]);
}

fn field_line<'a>(app: &'a App, field: FormField) -> Line<'a> {
    let focused = app.form.focus == field;
    let marker = if focused { "▶ " } else { "  " };
    let value = app.form.field(field);

    let value_span = if focused {
        Span::styled(
            format!("{}_", value),
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        )
    } else if value.is_empty() {
        Span::styled("—", Style::default().add_modifier(Modifier::DIM))
    } else {
        Span::raw(value)
    };

    Line::from(vec![
        Span::raw(marker),
        Span::styled(
            format!("{:<20}", field.label()),
            Style::default().add_modifier(Modifier::DIM),
        ),
        value_span,
    ])
}

fn render_reading_form(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = FIELDS.iter().map(|&f| field_line(app, f)).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Enter publishes this reading for the configured device",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" Submit Patient Vitals ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_batch_line(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        field_line(app, FormField::Batch),
        Line::from(""),
        Line::from(Span::styled(
            "  Paste a JSON array of readings; invalid JSON is rejected before any request",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Batch Publish ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_feedback(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.submit_state {
        RequestState::Loading => Line::from(Span::styled(
            " Publishing…",
            Style::default().fg(app.theme.highlight),
        )),
        RequestState::Failed => Line::from(Span::styled(
            format!(
                " Publish failed: {}",
                app.last_error.as_deref().unwrap_or("unknown error")
            ),
            Style::default().fg(app.theme.critical),
        )),
        RequestState::Succeeded => Line::from(Span::styled(
            " Last publish acknowledged",
            Style::default().fg(app.theme.stable),
        )),
        RequestState::Idle => Line::from(Span::styled(
            " Fill in the fields and press Enter",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}
