//! Application state and navigation logic.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::DashboardConfig;
use crate::data::ProjectRow;
use crate::pipeline::{self, Outcome};
use crate::source::RecordSource;
use crate::ui::projects::{sort_rows_by, SortColumn};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Headline counters and the two charts.
    Overview,
    /// Table of normalized project rows.
    Projects,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Projects,
            View::Projects => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        // Only two views, so previous and next coincide.
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Projects => "Projects",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn RecordSource>,
    pub config: DashboardConfig,
    pub outcome: Option<Outcome>,
    pub last_updated: Option<Instant>,

    // Navigation state (Projects view)
    pub selected_row: usize,
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App, picking a theme from the terminal background.
    pub fn new(source: Box<dyn RecordSource>, config: DashboardConfig) -> Self {
        Self::with_theme(source, config, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(
        source: Box<dyn RecordSource>,
        config: DashboardConfig,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            source,
            config,
            outcome: None,
            last_updated: None,
            selected_row: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Run the full pipeline again and replace the current outcome.
    pub fn reload_data(&mut self) {
        let outcome = pipeline::run(self.source.as_mut(), &self.config);

        let row_count = outcome.rows().len();
        if self.selected_row >= row_count {
            self.selected_row = row_count.saturating_sub(1);
        }

        self.outcome = Some(outcome);
        self.last_updated = Some(Instant::now());
    }

    /// Rows of the last successful load, in display order.
    pub fn sorted_rows(&self) -> Vec<&ProjectRow> {
        let mut rows: Vec<&ProjectRow> = self
            .outcome
            .as_ref()
            .map(|o| o.rows().iter().collect())
            .unwrap_or_default();
        sort_rows_by(&mut rows, self.sort_column, self.sort_ascending);
        rows
    }

    fn row_count(&self) -> usize {
        self.outcome.as_ref().map_or(0, |o| o.rows().len())
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.row_count().saturating_sub(1);
        self.selected_row = (self.selected_row + n).min(max);
    }

    /// Move selection up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_row = self.selected_row.saturating_sub(n);
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    /// Cycle to the next sort column of the Projects table.
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current outcome to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        let Some(ref outcome) = self.outcome else {
            anyhow::bail!("No data to export");
        };
        crate::export::write_outcome(outcome, path)
    }
}
