//! Standalone terminal dashboard.
//!
//! Equivalent to `envdash dashboard`, without the CLI's dependencies.
//!
//! ```bash
//! envdash-tui http://192.168.1.20#history
//! ENVDASH_URL=http://192.168.1.20 envdash-tui
//! ```

use anyhow::{Result, bail};

use envdash_cli::config::{Config, resolve_tab, resolve_timeout, resolve_url};
use envdash_cli::envdash_core::tabs::fragment_of;
use envdash_cli::tui::{self, Theme};

#[tokio::main]
async fn main() -> Result<()> {
    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("-h" | "--help")) {
        println!("Usage: envdash-tui [URL[#tab]]");
        println!();
        println!("The URL defaults to ENVDASH_URL, then the envdash config file.");
        return Ok(());
    }

    let config = Config::load();
    let from_env = std::env::var("ENVDASH_URL").ok().filter(|s| !s.is_empty());
    let Some(url) = resolve_url(arg.or(from_env), &config) else {
        bail!("No device URL specified. Pass one as an argument or set ENVDASH_URL.");
    };

    let tab = resolve_tab(None, fragment_of(&url), &config);
    let theme = Theme::from_name(&config.dashboard.theme);

    tui::init_file_logging(false)?;
    tui::run(&url, resolve_timeout(None, &config), tab, theme).await
}
