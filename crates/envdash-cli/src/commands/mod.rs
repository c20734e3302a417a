//! Command implementations for the CLI.

mod config;
mod env;
mod history;
mod settings;
mod status;

pub use config::cmd_config;
pub use env::cmd_env;
pub use history::cmd_history;
pub use settings::{cmd_settings_set, cmd_settings_show};
pub use status::cmd_status;
