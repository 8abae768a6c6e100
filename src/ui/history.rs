//! History view rendering.
//!
//! Displays the fetched vitals history as a chronological, scrollable
//! table, oldest first, matching the order of the chart.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Render the History view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref report) = app.report else {
        let block = Block::default()
            .title(" Vitals History ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));
        frame.render_widget(block, area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("Heart Rate"),
        Cell::from("SpO₂"),
        Cell::from("Temp"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = report
        .vitals_history
        .iter()
        .map(|sample| {
            Row::new(vec![
                Cell::from(
                    sample
                        .timestamp
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string(),
                ),
                Cell::from(format!("{:.1} bpm", sample.heart_rate))
                    .style(Style::default().fg(app.theme.heart_rate)),
                Cell::from(format!("{:.1} %", sample.blood_oxygen))
                    .style(Style::default().fg(app.theme.blood_oxygen)),
                Cell::from(format!("{:.1} °C", sample.temperature))
                    .style(Style::default().fg(app.theme.temperature)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let selected = app.history_index.min(rows.len().saturating_sub(1));

    let position_info = if !rows.is_empty() {
        format!(" [{}/{}]", selected + 1, rows.len())
    } else {
        String::new()
    };
    let title = format!(" Vitals History ({}){} ", rows.len(), position_info);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !report.vitals_history.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
