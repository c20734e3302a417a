//! Layout and rendering for the dashboard.
//!
//! - **Header**: device host name, address and the current location
//! - **Tab bar**: one tab per resource, each with its loader indicator
//! - **Panel**: the active tab's content
//! - **Status bar**: key hints or the latest status message

pub mod theme;

mod config;
mod env;
mod history;
mod status;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};

use envdash_core::{LoaderState, Tab};

use super::app::{App, Theme};
use theme::BORDER_TYPE;

/// Draw the complete interface.
pub fn draw(frame: &mut Frame, app: &App) {
    if matches!(app.theme, Theme::Light) {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.bg())),
            frame.area(),
        );
    }

    let [header, tabs, panel, status_bar] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, app);
    draw_tab_bar(frame, tabs, app);

    match app.dashboard().active_tab() {
        Tab::Status => status::draw_status_panel(frame, panel, app),
        Tab::Env => env::draw_env_panel(frame, panel, app),
        Tab::History => history::draw_history_panel(frame, panel, app),
        Tab::Config => config::draw_config_panel(frame, panel, app),
    }

    draw_status_bar(frame, status_bar, app);

    if app.show_help {
        draw_help_overlay(frame, app);
    }
}

/// Indicator text for a resource: spinner while loading, a marker on error.
pub(crate) fn indicator(app: &App, state: LoaderState) -> &'static str {
    match state {
        LoaderState::Loading => app.spinner_char(),
        LoaderState::Error => "!",
        LoaderState::Done => "●",
        LoaderState::Idle => "○",
    }
}

/// Bordered panel for a tab, titled with its loader indicator.
pub(crate) fn panel_block<'a>(app: &App, tab: Tab) -> Block<'a> {
    let theme = app.app_theme();
    let state = app.dashboard().state(tab.resource());
    let mut title = vec![
        Span::styled(format!(" {} ", tab.title()), theme.title_style()),
        Span::styled(
            format!("{} ", indicator(app, state)),
            Style::default().fg(theme.loader_color(state)),
        ),
    ];
    if state == LoaderState::Error {
        title.push(Span::styled(
            "request failed ",
            Style::default().fg(theme.error),
        ));
    }

    Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(Style::default().fg(theme.border_focus))
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let props = app.dashboard().properties();

    let mut spans = vec![Span::styled(
        " envdash ",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(host) = &props.hostname {
        spans.push(Span::styled(
            format!(" {} ", host),
            Style::default().fg(theme.text),
        ));
    }
    if let Some(ip) = &props.ipaddr {
        spans.push(Span::styled(format!("({}) ", ip), theme.dim_style()));
    }
    spans.push(Span::styled(
        format!(" {} ", app.location()),
        theme.dim_style(),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.bar_style()),
        area,
    );
}

fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();
    let active = app.dashboard().active_tab();

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let state = app.dashboard().state(tab.resource());
            let name_style = if *tab == active {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.text_dim)
            };
            Line::from(vec![
                Span::styled(format!("{} {}", i + 1, tab.title()), name_style),
                Span::styled(
                    format!(" {}", indicator(app, state)),
                    Style::default().fg(theme.loader_color(state)),
                ),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BORDER_TYPE)
                .border_style(Style::default().fg(theme.border)),
        )
        .divider(Span::styled(" | ", theme.dim_style()))
        .select(active.index());

    frame.render_widget(tabs, area);
}

fn context_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("?", "help"), ("1-4", "tabs"), ("r", "refresh")];
    match app.dashboard().active_tab() {
        Tab::History => hints.push((
            "t",
            if app.show_table { "charts" } else { "table" },
        )),
        Tab::Config => {
            hints.push(("j/k", "select"));
            hints.push(("+/-", "change"));
            if app.dashboard().config().config_changed() {
                hints.push(("s", "save"));
                hints.push(("u", "revert"));
            }
        }
        Tab::Status | Tab::Env => {}
    }
    hints.push(("q", "quit"));
    hints
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.app_theme();

    let spans = if let Some(msg) = app.current_status_message() {
        vec![Span::styled(format!(" {}", msg), Style::default().fg(theme.text))]
    } else {
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in context_hints(app).into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", theme.dim_style()));
            }
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" {}", desc), theme.dim_style()));
        }
        spans
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_overlay(frame: &mut Frame, app: &App) {
    let theme = app.app_theme();
    let keys = [
        ("1-4", "Status / Environment / History / Config"),
        ("Tab, Shift+Tab", "Next / previous tab"),
        ("r", "Reload the current tab"),
        ("t", "History: charts or table"),
        ("j/k, Up/Down", "Config: select setting"),
        ("+/-, Enter", "Config: change setting"),
        ("s", "Config: save to device"),
        ("u", "Config: discard changes"),
        ("T", "Dark / light theme"),
        ("q, Esc", "Quit"),
    ];

    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:<16}", key),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*desc, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    let height = lines.len() as u16 + 2;
    let area = centered_rect(60, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(Span::styled(" Keys ", theme.title_style()))
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(Style::default().fg(theme.border_focus)),
        ),
        area,
    );
}

/// A rectangle `width` columns wide and `height` rows high, centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect, Rect::new(20, 10, 60, 10));
        let clipped = centered_rect(200, 50, area);
        assert_eq!(clipped, area);
    }

    #[test]
    fn test_draw_shows_tabs_and_location() {
        let app = App::new(Tab::Env, "http://10.0.0.5", Theme::Dark);
        let screen = render(&app);
        assert!(screen.contains("1 Status"));
        assert!(screen.contains("3 History"));
        assert!(screen.contains("http://10.0.0.5#env"));
    }

    #[test]
    fn test_draw_each_tab() {
        for tab in Tab::ALL {
            let mut app = App::new(tab, "http://d", Theme::Light);
            app.show_table = true;
            let screen = render(&app);
            assert!(screen.contains(tab.title()));
        }
    }

    #[test]
    fn test_help_overlay() {
        let mut app = App::new(Tab::Env, "http://d", Theme::Dark);
        app.toggle_help();
        assert!(render(&app).contains("Keys"));
    }

    #[test]
    fn test_config_hints_offer_save_only_when_changed() {
        let mut app = App::new(Tab::Config, "http://d", Theme::Dark);
        assert!(!context_hints(&app).iter().any(|(k, _)| *k == "s"));
        app.dashboard_mut().config_mut().set_history_interval(60);
        assert!(context_hints(&app).iter().any(|(k, _)| *k == "s"));
    }
}
