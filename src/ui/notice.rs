//! Panels shown instead of the metrics: fetch errors, empty data, loading.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::source::FetchError;

/// Render the error panel for a failed fetch.
pub fn render_error(frame: &mut Frame, app: &App, err: &FetchError, area: Rect) {
    let block = Block::default()
        .title(" Error fetching data from Notion ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.delayed));

    let mut lines = vec![Line::from(Span::styled(
        err.to_string(),
        Style::default().fg(app.theme.delayed).add_modifier(Modifier::BOLD),
    ))];

    if let Some(status) = err.status() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(status.to_string()),
        ]));
    }

    if let Some(body) = err.body() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Response body:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(pretty_body(body).lines().map(|l| Line::from(l.to_string())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "r:retry q:quit",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Pretty-print a JSON body, or return it unchanged.
fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| body.to_string())
}

/// Render the notice shown when the database returned no records.
pub fn render_no_data(frame: &mut Frame, app: &App, area: Rect) {
    render_centered(frame, app, " No data ", "No data available in the Notion database", area);
}

/// Render the placeholder shown before the first load completes.
pub fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    render_centered(frame, app, " Loading ", "Loading projects...", area);
}

fn render_centered(frame: &mut Frame, app: &App, title: &str, message: &str, area: Rect) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    // Push the message to the vertical middle of the panel
    let pad = area.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);
}
