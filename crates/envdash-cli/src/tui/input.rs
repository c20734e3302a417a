//! Keyboard input handling for the TUI.
//!
//! Key presses are first mapped to an [`Action`] by [`handle_key`], then
//! applied to the [`App`] by [`apply_action`], which returns the command to
//! send to the worker, if any.

use crossterm::event::KeyCode;

use envdash_core::{Command, Tab};

use super::app::App;

/// User actions triggered by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Exit the application.
    Quit,
    /// Select a tab by position.
    SelectTab(Tab),
    /// Move to the next tab.
    NextTab,
    /// Move to the previous tab.
    PreviousTab,
    /// Re-fetch the active tab's resource.
    Refresh,
    /// Select the next setting row.
    NextSetting,
    /// Select the previous setting row.
    PreviousSetting,
    /// Step the selected setting forward.
    IncreaseSetting,
    /// Step the selected setting back.
    DecreaseSetting,
    /// Save local config edits to the device.
    Save,
    /// Discard local config edits.
    Revert,
    /// Switch the history tab between charts and table.
    ToggleTable,
    /// Switch between dark and light theme.
    ToggleTheme,
    /// Show or hide the help overlay.
    ToggleHelp,
    /// No action.
    None,
}

/// Map a key to an action.
///
/// While the help overlay is shown, only closing it or quitting is accepted.
pub fn handle_key(key: KeyCode, show_help: bool) -> Action {
    if show_help {
        return match key {
            KeyCode::Char('?') | KeyCode::Esc => Action::ToggleHelp,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Action::SelectTab(Tab::ALL[index])
        }
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PreviousTab,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('j') | KeyCode::Down => Action::NextSetting,
        KeyCode::Char('k') | KeyCode::Up => Action::PreviousSetting,
        KeyCode::Char('+') | KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => {
            Action::IncreaseSetting
        }
        KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => Action::DecreaseSetting,
        KeyCode::Char('s') => Action::Save,
        KeyCode::Char('u') => Action::Revert,
        KeyCode::Char('t') => Action::ToggleTable,
        KeyCode::Char('T') => Action::ToggleTheme,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Apply an action to the application state.
///
/// Setting edits and saves only apply on the config tab; the table toggle
/// only on the history tab.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    let active = app.dashboard().active_tab();
    let on_config = active == Tab::Config;

    match action {
        Action::Quit => {
            app.quit();
            None
        }
        Action::SelectTab(tab) => Some(Command::Fetch(app.open(tab))),
        Action::NextTab => Some(Command::Fetch(app.open(active.next()))),
        Action::PreviousTab => Some(Command::Fetch(app.open(active.previous()))),
        Action::Refresh => Some(Command::Fetch(app.refresh())),
        Action::NextSetting if on_config => {
            app.select_next_setting();
            None
        }
        Action::PreviousSetting if on_config => {
            app.select_previous_setting();
            None
        }
        Action::IncreaseSetting if on_config => {
            app.adjust_setting(true);
            None
        }
        Action::DecreaseSetting if on_config => {
            app.adjust_setting(false);
            None
        }
        Action::Save if on_config => app.save_config().map(Command::Fetch),
        Action::Revert if on_config => {
            app.revert_config();
            None
        }
        Action::ToggleTable if active == Tab::History => {
            app.toggle_table();
            None
        }
        Action::ToggleTheme => {
            app.toggle_theme();
            None
        }
        Action::ToggleHelp => {
            app.toggle_help();
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envdash_core::{FetchRequest, LoaderState, Resource};

    use crate::tui::app::Theme;

    fn app(tab: Tab) -> App {
        App::new(tab, "http://10.0.0.5", Theme::Dark)
    }

    #[test]
    fn test_number_keys_select_tabs() {
        assert_eq!(
            handle_key(KeyCode::Char('1'), false),
            Action::SelectTab(Tab::Status)
        );
        assert_eq!(
            handle_key(KeyCode::Char('4'), false),
            Action::SelectTab(Tab::Config)
        );
        assert_eq!(handle_key(KeyCode::Char('5'), false), Action::None);
    }

    #[test]
    fn test_quit_and_help_keys() {
        assert_eq!(handle_key(KeyCode::Char('q'), false), Action::Quit);
        assert_eq!(handle_key(KeyCode::Esc, false), Action::Quit);
        assert_eq!(handle_key(KeyCode::Char('?'), false), Action::ToggleHelp);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        assert_eq!(handle_key(KeyCode::Esc, true), Action::ToggleHelp);
        assert_eq!(handle_key(KeyCode::Char('q'), true), Action::Quit);
        assert_eq!(handle_key(KeyCode::Char('r'), true), Action::None);
        assert_eq!(handle_key(KeyCode::Char('2'), true), Action::None);
    }

    #[test]
    fn test_theme_keys_are_case_sensitive() {
        assert_eq!(handle_key(KeyCode::Char('t'), false), Action::ToggleTable);
        assert_eq!(handle_key(KeyCode::Char('T'), false), Action::ToggleTheme);
    }

    #[test]
    fn test_select_tab_issues_fetch() {
        let mut app = app(Tab::Env);
        let cmd = apply_action(&mut app, Action::SelectTab(Tab::History));
        assert!(matches!(cmd, Some(Command::Fetch(FetchRequest::History))));
        assert_eq!(app.dashboard().active_tab(), Tab::History);
        assert_eq!(
            app.dashboard().state(Resource::History),
            LoaderState::Loading
        );
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = app(Tab::Config);
        let cmd = apply_action(&mut app, Action::NextTab);
        assert!(matches!(cmd, Some(Command::Fetch(FetchRequest::Status))));
        let cmd = apply_action(&mut app, Action::PreviousTab);
        assert!(matches!(cmd, Some(Command::Fetch(FetchRequest::Config))));
    }

    #[test]
    fn test_refresh_refetches_active_tab() {
        let mut app = app(Tab::Env);
        let cmd = apply_action(&mut app, Action::Refresh);
        assert!(matches!(cmd, Some(Command::Fetch(FetchRequest::Env))));
    }

    #[test]
    fn test_setting_keys_ignored_off_config_tab() {
        let mut app = app(Tab::Env);
        assert!(apply_action(&mut app, Action::IncreaseSetting).is_none());
        assert!(!app.dashboard().config().config_changed());
        app.dashboard_mut().config_mut().set_history_interval(60);
        assert!(apply_action(&mut app, Action::Save).is_none());
    }

    #[test]
    fn test_edit_then_save_on_config_tab() {
        let mut app = app(Tab::Config);
        assert!(apply_action(&mut app, Action::Save).is_none());

        apply_action(&mut app, Action::IncreaseSetting);
        assert_eq!(app.dashboard().config().local().history_interval, 60);

        let cmd = apply_action(&mut app, Action::Save);
        match cmd {
            Some(Command::Fetch(FetchRequest::SaveConfig(update))) => {
                assert_eq!(update.history_interval, 60);
                assert!(!update.sleep_on_reset);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_toggle_table_only_on_history() {
        let mut app = app(Tab::Env);
        apply_action(&mut app, Action::ToggleTable);
        assert!(!app.show_table);

        let mut app = self::app(Tab::History);
        apply_action(&mut app, Action::ToggleTable);
        assert!(app.show_table);
    }

    #[test]
    fn test_quit_action() {
        let mut app = app(Tab::Env);
        assert!(apply_action(&mut app, Action::Quit).is_none());
        assert!(app.should_quit());
    }
}
