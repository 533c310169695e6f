//! Overview rendering: headline counters and the two charts.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::data::{AggregateSnapshot, MonthlyDelay, StatusKind};

/// Render counters on top and the status/delay charts below.
pub fn render(frame: &mut Frame, app: &App, snapshot: &AggregateSnapshot, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(6)]).split(area);

    render_counters(frame, app, snapshot, chunks[0]);

    let charts = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_status_chart(frame, app, snapshot, charts[0]);
    render_delay_chart(frame, app, &snapshot.delay_by_month, charts[1]);
}

fn render_counters(frame: &mut Frame, app: &App, snapshot: &AggregateSnapshot, area: Rect) {
    let counters = [
        ("Total Projects", snapshot.total, Style::default().add_modifier(Modifier::BOLD)),
        ("Active", snapshot.active, app.theme.status_style(StatusKind::Active)),
        ("Finished", snapshot.finished, app.theme.status_style(StatusKind::Finished)),
        ("Delayed", snapshot.delayed, app.theme.status_style(StatusKind::Delayed)),
    ];

    let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((title, count, style), cell) in counters.into_iter().zip(cells.iter()) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));
        let paragraph = Paragraph::new(Line::from(Span::styled(
            count.to_string(),
            style.add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(paragraph, *cell);
    }
}

fn render_status_chart(frame: &mut Frame, app: &App, snapshot: &AggregateSnapshot, area: Rect) {
    let block = Block::default()
        .title(" Project Status Distribution ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let bars: Vec<Bar> = snapshot
        .distribution
        .iter()
        .map(|s| {
            let style = match app.config.labels.classify(&s.status) {
                StatusKind::Other => Style::default().fg(app.theme.bar),
                kind => app.theme.status_style(kind),
            };
            Bar::default()
                .value(s.count as u64)
                .label(Line::from(s.status.clone()))
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area.width.saturating_sub(2), bars.len()))
        .bar_gap(1)
        .max(snapshot.max_status_count() as u64);

    frame.render_widget(chart, area);
}

/// Widest bar that fits `count` bars with one-column gaps.
fn bar_width(inner_width: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let count = count as u16;
    let gaps = count.saturating_sub(1);
    (inner_width.saturating_sub(gaps) / count).clamp(1, 12)
}

fn render_delay_chart(frame: &mut Frame, app: &App, series: &[MonthlyDelay], area: Rect) {
    let block = Block::default()
        .title(" Average Delay by Month (days) ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if series.is_empty() {
        let paragraph = Paragraph::new("No closed projects with both dates")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.mean_delay_days))
        .collect();

    let (y_min, y_max) = y_bounds(series);
    let x_max = (series.len().saturating_sub(1) as f64).max(1.0);

    let mut x_labels = vec![Span::from(series[0].month.to_string())];
    if series.len() > 2 {
        x_labels.push(Span::from(series[series.len() / 2].month.to_string()));
    }
    // The axis draws no labels unless it has at least two
    match series.len() {
        1 => x_labels.push(Span::from("")),
        n => x_labels.push(Span::from(series[n - 1].month.to_string())),
    }

    let line_style = Style::default().fg(app.theme.line);
    let datasets = vec![
        Dataset::default()
            .name("Mean delay")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(line_style)
            .data(&points),
        // Scatter on top so a single month still shows up
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(line_style.add_modifier(Modifier::BOLD))
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Month")
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Days")
                .style(Style::default().fg(app.theme.border))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::from(format!("{:.1}", y_min)),
                    Span::from(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::from(format!("{:.1}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Y range covering every mean delay and zero, at least one day tall.
fn y_bounds(series: &[MonthlyDelay]) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .map(|m| m.mean_delay_days)
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if hi - lo < 1.0 {
        (lo, lo + 1.0)
    } else {
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::YearMonth;

    fn month(m: u32, mean: f64) -> MonthlyDelay {
        MonthlyDelay {
            month: YearMonth::new(2024, m),
            mean_delay_days: mean,
            samples: 1,
        }
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(40, 0), 1);
        assert_eq!(bar_width(40, 1), 12);
        assert_eq!(bar_width(40, 4), 9);
        assert_eq!(bar_width(5, 10), 1);
    }

    #[test]
    fn test_y_bounds_include_zero() {
        assert_eq!(y_bounds(&[month(1, 10.0), month(2, 4.0)]), (0.0, 10.0));
        assert_eq!(y_bounds(&[month(1, -3.0), month(2, 2.0)]), (-3.0, 2.0));
        assert_eq!(y_bounds(&[month(1, 0.0)]), (0.0, 1.0));
    }
}
