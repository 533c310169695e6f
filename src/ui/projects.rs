//! Projects view rendering.
//!
//! Displays the normalized rows in a sortable table.

use std::cmp::Ordering;

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::format_value;
use crate::app::App;
use crate::data::ProjectRow;

/// Column to sort by in the Projects view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Sort by project name alphabetically.
    #[default]
    Name,
    /// Sort by status label.
    Status,
    /// Sort by project value.
    Value,
    /// Sort by actual close date.
    Closed,
    /// Sort by delay in days.
    Delay,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Name => SortColumn::Status,
            SortColumn::Status => SortColumn::Value,
            SortColumn::Value => SortColumn::Closed,
            SortColumn::Closed => SortColumn::Delay,
            SortColumn::Delay => SortColumn::Name,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Status => "status",
            SortColumn::Value => "value",
            SortColumn::Closed => "closed",
            SortColumn::Delay => "delay",
        }
    }
}

/// Render the Projects view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.sorted_rows();

    let header = Row::new(vec![
        Cell::from(format_header("Project", SortColumn::Name, app)),
        Cell::from(format_header("Status", SortColumn::Status, app)),
        Cell::from(format_header("Value", SortColumn::Value, app)),
        Cell::from("Est. close"),
        Cell::from(format_header("Closed", SortColumn::Closed, app)),
        Cell::from(format_header("Delay", SortColumn::Delay, app)),
    ])
    .height(1)
    .style(app.theme.header);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|r| {
            let kind = app.config.labels.classify(&r.status);
            let delay = r.delay_days();
            let delay_style = match delay {
                Some(d) if d > 0 => Style::default().fg(app.theme.delayed),
                _ => Style::default(),
            };

            Row::new(vec![
                Cell::from(r.name.clone()),
                Cell::from(r.status.clone()).style(app.theme.status_style(kind)),
                Cell::from(format_value(r.value)),
                Cell::from(date_cell(r.estimated_close.as_deref())),
                Cell::from(date_cell(r.actual_close.as_deref())),
                Cell::from(delay.map(|d| format!("{}d", d)).unwrap_or_else(|| "-".to_string()))
                    .style(delay_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Min(11),
        Constraint::Min(11),
        Constraint::Min(6),
    ];

    let selected = app.selected_row.min(rows.len().saturating_sub(1));
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };
    let position_info = if !rows.is_empty() {
        format!(" [{}/{}]", selected + 1, rows.len())
    } else {
        String::new()
    };
    let title = format!(
        " Projects ({}) [s:sort {}{}]{} ",
        rows.len(),
        app.sort_column.label(),
        sort_dir,
        position_info
    );

    let table = Table::new(table_rows, widths)
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
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Date portion of a raw `date.start` value.
fn date_cell(raw: Option<&str>) -> String {
    match raw {
        Some(s) => s.get(..10).unwrap_or(s).to_string(),
        None => "-".to_string(),
    }
}

/// Sort rows by the given column and direction.
pub fn sort_rows_by(rows: &mut [&ProjectRow], column: SortColumn, ascending: bool) {
    rows.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::Status => a.status.cmp(&b.status),
            SortColumn::Value => a.value.total_cmp(&b.value),
            SortColumn::Closed => a.actual_close_at().cmp(&b.actual_close_at()),
            SortColumn::Delay => a.delay_days().cmp(&b.delay_days()),
        };

        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        // Secondary sort by name keeps equal rows stable
        if primary == Ordering::Equal {
            a.name.cmp(&b.name)
        } else {
            primary
        }
    });
}
