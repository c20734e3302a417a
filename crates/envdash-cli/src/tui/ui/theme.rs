//! Color palette and shared styles for the dashboard.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use envdash_core::{LoaderState, Metric};

/// Default border type for all blocks.
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

/// Dashboard colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppTheme {
    pub accent: Color,
    pub ok: Color,
    pub warning: Color,
    pub error: Color,

    pub text: Color,
    pub text_dim: Color,

    pub border: Color,
    pub border_focus: Color,

    pub bg_selected: Color,
    pub bg_bar: Color,

    /// Line colors for the four metrics, in [`Metric::ALL`] order.
    pub series: [Color; 4],
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl AppTheme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            accent: Color::Rgb(34, 211, 238),
            ok: Color::Rgb(74, 222, 128),
            warning: Color::Rgb(251, 191, 36),
            error: Color::Rgb(248, 113, 113),

            text: Color::Rgb(248, 250, 252),
            text_dim: Color::Rgb(100, 116, 139),

            border: Color::Rgb(71, 85, 105),
            border_focus: Color::Rgb(34, 211, 238),

            bg_selected: Color::Rgb(51, 65, 85),
            bg_bar: Color::Rgb(30, 41, 59),

            series: [
                Color::Rgb(248, 113, 113),
                Color::Rgb(96, 165, 250),
                Color::Rgb(45, 212, 191),
                Color::Rgb(192, 132, 252),
            ],
        }
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            accent: Color::Rgb(8, 145, 178),
            ok: Color::Rgb(22, 163, 74),
            warning: Color::Rgb(217, 119, 6),
            error: Color::Rgb(220, 38, 38),

            text: Color::Rgb(15, 23, 42),
            text_dim: Color::Rgb(100, 116, 139),

            border: Color::Rgb(203, 213, 225),
            border_focus: Color::Rgb(8, 145, 178),

            bg_selected: Color::Rgb(226, 232, 240),
            bg_bar: Color::Rgb(241, 245, 249),

            series: [
                Color::Rgb(220, 38, 38),
                Color::Rgb(37, 99, 235),
                Color::Rgb(13, 148, 136),
                Color::Rgb(147, 51, 234),
            ],
        }
    }

    /// Line color for a metric's chart.
    #[must_use]
    pub fn metric_color(&self, metric: Metric) -> Color {
        let index = Metric::ALL.iter().position(|m| *m == metric).unwrap_or(0);
        self.series[index]
    }

    /// Color of a loader indicator.
    #[must_use]
    pub fn loader_color(&self, state: LoaderState) -> Color {
        match state {
            LoaderState::Idle => self.text_dim,
            LoaderState::Loading => self.accent,
            LoaderState::Error => self.error,
            LoaderState::Done => self.ok,
        }
    }

    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.bg_selected)
            .fg(self.text)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    #[must_use]
    pub fn bar_style(&self) -> Style {
        Style::default().bg(self.bg_bar)
    }
}
