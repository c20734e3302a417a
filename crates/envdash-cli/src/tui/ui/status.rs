//! Status tab: the device property list.

use ratatui::prelude::*;
use ratatui::widgets::{Cell, Row, Table};

use envdash_core::Tab;

use crate::tui::app::App;

pub(super) fn draw_status_panel(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let props = app.dashboard().properties();

    let header = Row::new(vec![Cell::from("Property"), Cell::from("Value")])
        .style(theme.title_style())
        .bottom_margin(1);

    let rows: Vec<Row> = props
        .entries
        .iter()
        .map(|prop| {
            let value = match &prop.display_value {
                // Seconds properties show the duration with the raw value dimmed
                Some(display) => Line::from(vec![
                    Span::styled(display.clone(), Style::default().fg(theme.text)),
                    Span::styled(format!("  ({})", prop.value), theme.dim_style()),
                ]),
                None => Line::from(Span::styled(
                    prop.value.to_string(),
                    Style::default().fg(theme.text),
                )),
            };
            Row::new(vec![
                Cell::from(Span::styled(prop.name.clone(), theme.dim_style())),
                Cell::from(value),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(35), Constraint::Fill(1)])
        .header(header)
        .column_spacing(2)
        .block(super::panel_block(app, Tab::Status));

    frame.render_widget(table, area);
}
