//! Common UI components shared across views.
//!
//! This module contains the title bar, tab bar, footer and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::pipeline::Outcome;

pub const TITLE: &str = "Project Dashboard - Notion";
pub const FOOTER: &str = "Updated dynamically from the Notion API";

/// Render the title bar with the data source and load state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (icon, style) = match app.outcome {
        Some(Outcome::Ready { .. }) => ("●", Style::default().fg(app.theme.finished)),
        Some(Outcome::NoData) => ("●", Style::default().fg(app.theme.line)),
        Some(Outcome::Failed(_)) => ("●", Style::default().fg(app.theme.delayed)),
        None => ("○", Style::default().add_modifier(Modifier::DIM)),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", icon), style),
        Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled(
            app.source_description().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Views in tab order.
pub const TABS: [View; 2] = [View::Overview, View::Projects];

fn tab_title(index: usize, view: View) -> String {
    format!(" {}:{} ", index + 1, view.label())
}

/// The tab under a column of the tab bar, if any.
///
/// Each title gets one column of padding on both sides and tabs are split by
/// a one-column divider, matching the `Tabs` widget defaults.
pub fn tab_at(column: u16) -> Option<View> {
    let mut start = 0u16;
    for (i, view) in TABS.iter().enumerate() {
        let end = start + tab_title(i, *view).chars().count() as u16 + 2;
        if column < end {
            return Some(*view);
        }
        start = end + 1;
    }
    None
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TABS
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(tab_title(i, *view)))
        .collect();

    let selected = TABS.iter().position(|v| *v == app.current_view).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the footer.
///
/// Shows the static footer text, time since the last load and the controls.
/// Temporary status messages take its place while they last.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Overview => "Tab:switch r:reload e:export ?:help q:quit",
        View::Projects => "↑↓:select s:sort S:reverse Tab:switch r:reload ?:help q:quit",
    };

    let status = match app.last_updated {
        Some(at) => format!(
            " {} 🚀 | Loaded {:.0}s ago | {}",
            FOOTER,
            at.elapsed().as_secs_f64(),
            controls
        ),
        None => format!(" {} 🚀 | {}", FOOTER, controls),
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
        Line::from("  1/2         Overview/Projects"),
        Line::from("  ↑/↓ j/k     Navigate table"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Projects",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Reload from Notion"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
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
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 23u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
