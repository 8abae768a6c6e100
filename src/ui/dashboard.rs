//! Dashboard view rendering.
//!
//! Shows the fetched report: the risk gauge, the most recent vitals, the
//! narrative summary, and the time-series chart of the full history.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{format_score, RiskLevel, VitalSeries, VitalsReport};

/// Longest summary the panel will display; the rest is elided.
const SUMMARY_DISPLAY_LIMIT: usize = 1200;

/// Render the Dashboard view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref report) = app.report else {
        let hint = Paragraph::new("No report loaded.\n\nPress f to fetch the latest vitals.")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(outer_block(app, " Dashboard "));
        frame.render_widget(hint, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(7),  // Gauge + latest vitals
        Constraint::Fill(2),    // Summary
        Constraint::Fill(3),    // Chart
    ])
    .split(area);

    let top = Layout::horizontal([Constraint::Length(42), Constraint::Fill(1)]).split(chunks[0]);

    render_gauge(frame, app, report, top[0]);
    render_latest(frame, app, report, top[1]);
    render_summary(frame, app, report, chunks[1]);
    render_chart(frame, app, chunks[2]);
}

fn outer_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Render the instability risk gauge.
///
/// The view branches on score presence: an absent score renders no
/// classification at all, never a zero.
fn render_gauge(frame: &mut Frame, app: &App, report: &VitalsReport, area: Rect) {
    let block = outer_block(app, " Instability Risk ");

    match report.risk_score {
        Some(score) => {
            // Classification is recomputed from the score on every render
            let level = RiskLevel::classify(score);
            let percent = (score.clamp(0.0, 1.0) * 100.0).round() as u16;
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(app.theme.risk_color(level)))
                .ratio(score.clamp(0.0, 1.0))
                .label(format!("{}% {} ({})", percent, level.label(), format_score(score)));
            frame.render_widget(gauge, area);
        }
        None => {
            let paragraph = Paragraph::new("no prediction in this report")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(block);
            frame.render_widget(paragraph, area);
        }
    }
}

/// Render the most recent sample as a readout card.
fn render_latest(frame: &mut Frame, app: &App, report: &VitalsReport, area: Rect) {
    let block = outer_block(app, " Most Recent Vitals ");

    let lines = match report.latest() {
        Some(sample) => vec![
            Line::from(vec![
                Span::styled("Time         ", Style::default().add_modifier(Modifier::DIM)),
                Span::raw(
                    sample
                        .timestamp
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Heart Rate   ", Style::default().add_modifier(Modifier::DIM)),
                Span::styled(
                    format!("{:.1} bpm", sample.heart_rate),
                    Style::default().fg(app.theme.heart_rate),
                ),
            ]),
            Line::from(vec![
                Span::styled("Blood Oxygen ", Style::default().add_modifier(Modifier::DIM)),
                Span::styled(
                    format!("{:.1} %", sample.blood_oxygen),
                    Style::default().fg(app.theme.blood_oxygen),
                ),
            ]),
            Line::from(vec![
                Span::styled("Temperature  ", Style::default().add_modifier(Modifier::DIM)),
                Span::styled(
                    format!("{:.1} °C", sample.temperature),
                    Style::default().fg(app.theme.temperature),
                ),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "no samples in this report",
            Style::default().add_modifier(Modifier::DIM),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the narrative summary panel, truncated and scrollable.
fn render_summary(frame: &mut Frame, app: &App, report: &VitalsReport, area: Rect) {
    let title = if app.showing_cached {
        " AI Clinical Summary (cached) "
    } else {
        " AI Clinical Summary "
    };
    let block = outer_block(app, title);

    let paragraph = match report.summary.as_deref() {
        Some(summary) if !summary.is_empty() => Paragraph::new(truncate_summary(summary))
            .wrap(Wrap { trim: false })
            .scroll((app.summary_scroll, 0))
            .block(block),
        _ => Paragraph::new("no summary in this report")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block),
    };

    frame.render_widget(paragraph, area);
}

/// Elide the summary past the display limit without splitting a character.
fn truncate_summary(summary: &str) -> String {
    match summary.char_indices().nth(SUMMARY_DISPLAY_LIMIT) {
        Some((byte_index, _)) => format!("{}…", &summary[..byte_index]),
        None => summary.to_string(),
    }
}

/// Render the vitals chart: one line per field over the full history.
///
/// No chart is drawn for an empty history; gaps in the source data stay
/// gaps in the lines.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = outer_block(app, " Patient Vitals Over Time ");

    let Some(ref series) = app.series else {
        let paragraph = Paragraph::new("no history to chart")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let heart_rate = VitalSeries::points(&series.heart_rate);
    let blood_oxygen = VitalSeries::points(&series.blood_oxygen);
    let temperature = VitalSeries::points(&series.temperature);

    let datasets = vec![
        Dataset::default()
            .name("Heart Rate (bpm)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.heart_rate))
            .data(&heart_rate),
        Dataset::default()
            .name("Blood Oxygen (%)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.blood_oxygen))
            .data(&blood_oxygen),
        Dataset::default()
            .name("Temperature (°C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.temperature))
            .data(&temperature),
    ];

    let (min, max) = series.value_bounds();
    // Pad the value axis so flat lines don't sit on the frame
    let pad = ((max - min) * 0.1).max(1.0);
    let (y_min, y_max) = (min - pad, max + pad);

    let x_max = (series.len().saturating_sub(1)) as f64;
    let x_labels = vec![
        Span::styled(
            series.labels.first().cloned().unwrap_or_default(),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(
            series.labels.last().cloned().unwrap_or_default(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    let y_labels = vec![
        Span::raw(format!("{:.0}", y_min)),
        Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{:.0}", y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels)
                .style(Style::default().fg(app.theme.border)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(y_labels)
                .style(Style::default().fg(app.theme.border)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_summary_unchanged() {
        assert_eq!(truncate_summary("stable overnight"), "stable overnight");
    }

    #[test]
    fn test_truncate_long_summary_elides() {
        let long = "x".repeat(SUMMARY_DISPLAY_LIMIT + 100);
        let shown = truncate_summary(&long);
        assert_eq!(shown.chars().count(), SUMMARY_DISPLAY_LIMIT + 1);
        assert!(shown.ends_with('…'));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "°".repeat(SUMMARY_DISPLAY_LIMIT + 5);
        let shown = truncate_summary(&long);
        assert!(shown.ends_with('…'));
    }
}
