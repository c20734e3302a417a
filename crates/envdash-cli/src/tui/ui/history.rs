//! History tab: four metric charts, or the records as a table.

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table};
use time::OffsetDateTime;
use time::macros::format_description;

use envdash_core::{ChartSeries, HistoryEntry, Metric, SeriesPoint, Tab, format_timestamp};

use super::theme::BORDER_TYPE;
use crate::tui::app::App;

/// Chart coordinates: x in unix seconds.
pub(super) fn chart_points(series: &[SeriesPoint]) -> Vec<(f64, f64)> {
    series
        .iter()
        .map(|p| (p.x.unix_timestamp() as f64, p.y))
        .collect()
}

/// X-axis bounds for the points; a single sample gets a one-second span.
pub(super) fn time_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if last.0 > first.0 => [first.0, last.0],
        (Some(first), _) => [first.0, first.0 + 1.0],
        _ => [0.0, 1.0],
    }
}

fn time_label(seconds: f64) -> String {
    OffsetDateTime::from_unix_timestamp(seconds as i64)
        .ok()
        .and_then(|t| t.format(format_description!("[hour]:[minute]")).ok())
        .unwrap_or_default()
}

pub(super) fn draw_history_panel(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let block = super::panel_block(app, Tab::History);
    let history = app.dashboard().history();

    if history.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No history records", theme.dim_style())),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.show_table {
        draw_history_table(frame, inner, app, history);
    } else {
        draw_charts(frame, inner, app, app.dashboard().series());
    }
}

fn draw_charts(frame: &mut Frame, area: Rect, app: &App, series: &ChartSeries) {
    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let [top_left, top_right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
    let [bottom_left, bottom_right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(bottom);

    let cells = [top_left, top_right, bottom_left, bottom_right];
    for (metric, cell) in Metric::ALL.into_iter().zip(cells) {
        draw_chart(frame, cell, app, series, metric);
    }
}

fn draw_chart(frame: &mut Frame, area: Rect, app: &App, series: &ChartSeries, metric: Metric) {
    let theme = app.app_theme();
    let color = theme.metric_color(metric);

    let points = chart_points(series.get(metric));
    let x_bounds = time_bounds(&points);
    let (y_min, y_max) = series.bounds(metric);

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", metric.label()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(Style::default().fg(theme.border)),
        )
        .x_axis(
            Axis::default()
                .style(theme.dim_style())
                .bounds(x_bounds)
                .labels([time_label(x_bounds[0]), time_label(x_bounds[1])]),
        )
        .y_axis(
            Axis::default()
                .style(theme.dim_style())
                .bounds([y_min, y_max])
                .labels([format!("{:.0}", y_min), format!("{:.0}", y_max)]),
        );

    frame.render_widget(chart, area);
}

fn draw_history_table(frame: &mut Frame, area: Rect, app: &App, history: &[HistoryEntry]) {
    let theme = app.app_theme();

    let mut header = vec![Cell::from("Time")];
    header.extend(Metric::ALL.iter().map(|m| Cell::from(m.label())));
    let header = Row::new(header).style(theme.title_style());

    // Newest first, as many as fit
    let visible = area.height.saturating_sub(1) as usize;
    let rows: Vec<Row> = history
        .iter()
        .rev()
        .take(visible)
        .map(|entry| {
            let mut cells = vec![Cell::from(format_timestamp(entry.time))];
            cells.extend(
                Metric::ALL
                    .iter()
                    .map(|m| Cell::from(m.format_value(m.value(entry)))),
            );
            Row::new(cells).style(Style::default().fg(theme.text))
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), area);
}
