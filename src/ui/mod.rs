//! Terminal UI rendering using ratatui.
//!
//! Each view lives in its own submodule with a `render` function, and
//! [`draw`] picks which one to call for the current load outcome.
//!
//! ## Submodules
//!
//! - [`overview`]: Headline counters, status bar chart and monthly delay line chart
//! - [`projects`]: Sortable table of the normalized project rows
//! - [`notice`]: Error panel, "no data" notice and loading placeholder
//! - [`common`]: Shared components (title, tabs, footer, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Title (common::render_header)        │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Content, one of:                     │
//! │   notice::render_error               │
//! │   notice::render_no_data             │
//! │   overview/projects::render          │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Footer (common::render_status_bar)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod notice;
pub mod overview;
pub mod projects;
pub mod theme;

pub use projects::SortColumn;
pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};
use crate::pipeline::Outcome;

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 12;

/// Draw one full frame for the current app state.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let top = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(0, top, area.width, 5.min(area.height - top));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match &app.outcome {
        None => notice::render_loading(frame, app, chunks[2]),
        Some(Outcome::Failed(err)) => notice::render_error(frame, app, err, chunks[2]),
        Some(Outcome::NoData) => notice::render_no_data(frame, app, chunks[2]),
        Some(Outcome::Ready { snapshot, .. }) => match app.current_view {
            View::Overview => overview::render(frame, app, snapshot, chunks[2]),
            View::Projects => projects::render(frame, app, chunks[2]),
        },
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

/// Format a project value for display (e.g., 1234 -> "1.2K", 2500000 -> "2.5M").
pub fn format_value(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}
