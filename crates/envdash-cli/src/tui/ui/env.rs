//! Environment tab: the current reading.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use envdash_core::{EnvironmentReading, Metric, Tab, format_timestamp};

use crate::tui::app::App;

fn measured_at(reading: &EnvironmentReading) -> String {
    format!("{} UTC", format_timestamp(reading.time))
}

pub(super) fn draw_env_panel(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let reading = app.dashboard().env();

    let mut lines = vec![Line::from("")];
    for metric in Metric::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<20}", metric.label()), theme.dim_style()),
            Span::styled(
                metric.format_value(metric.reading_value(reading)),
                Style::default()
                    .fg(theme.metric_color(metric))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<20}", "Measured"), theme.dim_style()),
        Span::styled(measured_at(reading), Style::default().fg(theme.text)),
    ]));

    frame.render_widget(
        Paragraph::new(lines).block(super::panel_block(app, Tab::Env)),
        area,
    );
}
