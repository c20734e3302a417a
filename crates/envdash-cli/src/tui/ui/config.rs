//! Config tab: server-confirmed values next to local edits.

use ratatui::prelude::*;
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use envdash_core::{ConfigReconciler, Tab, interval_text};

use crate::tui::app::App;

fn on_off(flag: bool) -> String {
    let text = if flag { "on" } else { "off" };
    text.to_string()
}

/// Label, server value, local value and dirty flag for each setting row.
pub(super) fn setting_rows(config: &ConfigReconciler) -> [(&'static str, String, String, bool); 2] {
    let server = config.server();
    let local = config.local();
    [
        (
            "History interval",
            interval_text(server.history_interval),
            interval_text(local.history_interval),
            config.history_interval_changed(),
        ),
        (
            "Sleep on reset",
            on_off(server.sleep_on_reset),
            on_off(local.sleep_on_reset),
            config.sleep_on_reset_changed(),
        ),
    ]
}

pub(super) fn draw_config_panel(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let config = app.dashboard().config();

    let block = super::panel_block(app, Tab::Config);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [table_area, footer] =
        Layout::vertical([Constraint::Min(4), Constraint::Length(2)]).areas(inner);

    let header = Row::new(vec![
        Cell::from("Setting"),
        Cell::from("Device"),
        Cell::from("Local"),
    ])
    .style(theme.title_style())
    .bottom_margin(1);

    let rows: Vec<Row> = setting_rows(config)
        .into_iter()
        .enumerate()
        .map(|(i, (label, server, local, changed))| {
            let local = if changed {
                Span::styled(
                    format!("{} *", local),
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(local, Style::default().fg(theme.text))
            };
            let row = Row::new(vec![
                Cell::from(label),
                Cell::from(Span::styled(server, theme.dim_style())),
                Cell::from(local),
            ]);
            if i == app.selected_setting {
                row.style(theme.selected_style())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(18),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .column_spacing(2);
    frame.render_widget(table, table_area);

    let footer_line = if config.config_changed() {
        Line::from(vec![
            Span::styled("Unsaved changes. ", Style::default().fg(theme.warning)),
            Span::styled("s", theme.title_style()),
            Span::styled(" save, ", theme.dim_style()),
            Span::styled("u", theme.title_style()),
            Span::styled(" revert", theme.dim_style()),
        ])
    } else {
        Line::from(Span::styled(
            "In sync with the device.",
            theme.dim_style(),
        ))
    };
    frame.render_widget(Paragraph::new(footer_line), footer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use envdash_core::ConfigResponse;

    #[test]
    fn test_setting_rows_mark_dirty_fields() {
        let mut config = ConfigReconciler::new();
        config.apply_response(&ConfigResponse {
            history_interval: Some(45),
            sleep_on_reset: None,
        });
        config.set_sleep_on_reset(true);

        let rows = setting_rows(&config);
        assert_eq!(rows[0].1, "45 s (custom)");
        assert!(!rows[0].3);
        assert_eq!(rows[1].1, "off");
        assert_eq!(rows[1].2, "on");
        assert!(rows[1].3);
    }
}
