//! Application state for the TUI.
//!
//! [`App`] wraps the core [`Dashboard`] view state with what only the
//! terminal front end needs: overlays, the selected setting row, theme,
//! spinner and transient status messages.

use std::time::{Duration, Instant};

use envdash_core::{ConfigUpdate, Dashboard, DashboardEvent, FetchRequest, Tab};

use super::ui::theme::AppTheme;

/// Number of editable rows on the config tab.
pub const SETTING_ROWS: usize = 2;

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse a config file theme name; anything but "light" is dark.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// Toggle between themes.
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Background color for this theme.
    pub fn bg(self) -> ratatui::style::Color {
        match self {
            Self::Dark => ratatui::style::Color::Reset,
            Self::Light => ratatui::style::Color::White,
        }
    }
}

/// Main application state.
pub struct App {
    /// Core view state.
    dashboard: Dashboard,
    /// Device URL as given, used for the location line.
    base_url: String,
    /// Whether the application should exit.
    should_quit: bool,
    /// Whether to show the help overlay.
    pub show_help: bool,
    /// Whether the history tab shows the records table instead of charts.
    pub show_table: bool,
    /// Current UI theme.
    pub theme: Theme,
    /// Selected row on the config tab.
    pub selected_setting: usize,
    /// Body of the save request in flight, if any.
    pending_save: Option<ConfigUpdate>,
    /// Queue of status messages with their creation time.
    status_messages: Vec<(String, Instant)>,
    /// How long status messages stay visible.
    status_message_timeout: Duration,
    /// Current spinner animation frame.
    spinner_frame: usize,
}

impl App {
    pub fn new(tab: Tab, base_url: impl Into<String>, theme: Theme) -> Self {
        Self {
            dashboard: Dashboard::new(tab),
            base_url: base_url.into(),
            should_quit: false,
            show_help: false,
            show_table: false,
            theme,
            selected_setting: 0,
            pending_save: None,
            status_messages: Vec::new(),
            status_message_timeout: Duration::from_secs(5),
            spinner_frame: 0,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    /// Colors for the current theme.
    pub fn app_theme(&self) -> AppTheme {
        match self.theme {
            Theme::Dark => AppTheme::dark(),
            Theme::Light => AppTheme::light(),
        }
    }

    /// The device URL with the active tab as its fragment.
    pub fn location(&self) -> String {
        self.dashboard.location(&self.base_url)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Initial requests: status, then the active tab.
    pub fn startup(&mut self) -> [FetchRequest; 2] {
        self.dashboard.startup()
    }

    /// Switch tabs and request that tab's resource.
    pub fn open(&mut self, tab: Tab) -> FetchRequest {
        self.dashboard.open(tab)
    }

    /// Re-fetch the active tab's resource.
    pub fn refresh(&mut self) -> FetchRequest {
        self.dashboard.refresh()
    }

    /// Save local config edits, if there are any.
    pub fn save_config(&mut self) -> Option<FetchRequest> {
        if !self.dashboard.config().config_changed() {
            self.push_status_message("No changes to save".to_string());
            return None;
        }
        let request = self.dashboard.save_config();
        if let FetchRequest::SaveConfig(update) = request {
            self.pending_save = Some(update);
        }
        Some(request)
    }

    /// Discard local config edits.
    pub fn revert_config(&mut self) {
        if self.dashboard.config().config_changed() {
            self.dashboard.config_mut().revert();
            self.push_status_message("Local changes discarded".to_string());
        }
    }

    /// Adjust the selected setting; `forward` picks the direction for the interval.
    pub fn adjust_setting(&mut self, forward: bool) {
        let config = self.dashboard.config_mut();
        match self.selected_setting {
            0 => config.cycle_history_interval(forward),
            _ => config.toggle_sleep_on_reset(),
        }
    }

    pub fn select_next_setting(&mut self) {
        self.selected_setting = (self.selected_setting + 1) % SETTING_ROWS;
    }

    pub fn select_previous_setting(&mut self) {
        self.selected_setting = (self.selected_setting + SETTING_ROWS - 1) % SETTING_ROWS;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_table(&mut self) {
        self.show_table = !self.show_table;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    /// Apply a worker event.
    pub fn handle_event(&mut self, event: DashboardEvent) {
        let resource = event.resource();
        let failure = match &event {
            DashboardEvent::Failed { error, .. } => Some(error.clone()),
            DashboardEvent::Loaded(_) => None,
        };
        let is_save = event.is_save();

        self.dashboard.handle_event(event);

        // Only the save's own response settles it; a config read that
        // lands in between is applied like any other.
        if is_save {
            let requested = self.pending_save.take();
            match (failure, requested) {
                (Some(error), _) => self.push_status_message(format!("Save failed: {}", error)),
                (None, Some(requested)) => self.report_saved(requested),
                (None, None) => {}
            }
            return;
        }

        if let Some(error) = failure {
            self.push_status_message(format!("Failed to load {}: {}", resource, error));
        }
    }

    fn report_saved(&mut self, requested: ConfigUpdate) {
        let server = *self.dashboard.config().server();
        if server.history_interval == requested.history_interval
            && server.sleep_on_reset == requested.sleep_on_reset
        {
            self.push_status_message("Settings saved".to_string());
        } else {
            self.push_status_message(format!(
                "Device confirmed interval {}s, sleep on reset {}",
                server.history_interval,
                if server.sleep_on_reset { "on" } else { "off" }
            ));
        }
    }

    /// Add a status message to the queue.
    pub fn push_status_message(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
        while self.status_messages.len() > 5 {
            self.status_messages.remove(0);
        }
    }

    /// Remove expired status messages.
    pub fn clean_expired_messages(&mut self) {
        let timeout = self.status_message_timeout;
        self.status_messages
            .retain(|(_, created)| created.elapsed() < timeout);
    }

    /// The current status message to display.
    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }

    /// Advance the spinner animation frame.
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
    }

    /// The current spinner character.
    pub fn spinner_char(&self) -> &'static str {
        const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER[self.spinner_frame]
    }
}
