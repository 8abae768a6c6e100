//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, RequestState, View};
use crate::data::{format_score, RiskLevel};

/// Render the header bar with the patient risk at a glance.
///
/// Displays: risk indicator, risk level and score, sample count, and
/// whether the display is a cache seed or a live fetch.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref report) = app.report else {
        let line = Line::from(vec![
            Span::styled(" CARELINK ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| No report loaded. Press f to fetch."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let mut spans = vec![];
    match report.risk_score {
        Some(score) => {
            let level = RiskLevel::classify(score);
            spans.push(Span::styled(" ● ", app.theme.risk_style(level)));
            spans.push(Span::styled(
                "CARELINK ",
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("│ "));
            spans.push(Span::styled(level.label(), app.theme.risk_style(level)));
            spans.push(Span::raw(format!(" risk {} │ ", format_score(score))));
        }
        None => {
            spans.push(Span::styled(" ○ ", Style::default().add_modifier(Modifier::DIM)));
            spans.push(Span::styled(
                "CARELINK ",
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("│ no prediction │ "));
        }
    }

    spans.push(Span::styled(
        format!("{}", report.vitals_history.len()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(" samples"));

    if app.showing_cached {
        spans.push(Span::styled(
            " │ cached",
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Dashboard "),
        Line::from(" 2:Submit "),
        Line::from(" 3:History "),
    ];

    let selected = match app.current_view {
        View::Dashboard => 0,
        View::Submit => 1,
        View::History => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows request state, available controls, and temporary status messages.
/// A failed request's cause is shown here until the next attempt.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let activity = match (app.fetch_state, app.submit_state) {
        (RequestState::Loading, _) => "Fetching…",
        (_, RequestState::Loading) => "Publishing…",
        (RequestState::Failed, _) | (_, RequestState::Failed) => "Error",
        _ => "Ready",
    };

    let controls = match app.current_view {
        View::Dashboard => "f:fetch Tab:switch ↑↓:scroll summary ?:help q:quit",
        View::Submit => "type values | Enter:publish Tab/↑↓:field Esc:back",
        View::History => "f:fetch ↑↓:select Home/End:jump Tab:switch ?:help q:quit",
    };

    let status = if let Some(ref err) = app.last_error {
        format!(" {} | {} | {}", activity, err, controls)
    } else {
        format!(" {} | {} | {}", activity, app.current_view.label(), controls)
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab         Next view"),
        Line::from("  1/2/3       Jump to a view"),
        Line::from("  ↑/↓ j/k     Scroll / select"),
        Line::from("  Home/End    Jump to first/last sample"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Data",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  f           Fetch the latest report"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Submit view",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/↑/↓     Move between fields"),
        Line::from("  Enter       Publish (batch line publishes batch)"),
        Line::from("  Ctrl-u      Clear the focused field"),
        Line::from("  Esc         Back to dashboard"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
