use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod format;
mod style;
mod util;

use cli::{Cli, Commands, SettingsAction};
use commands::{
    cmd_config, cmd_env, cmd_history, cmd_settings_set, cmd_settings_show, cmd_status,
};
use envdash_cli::config::{Config, resolve_timeout, resolve_url};
use format::FormatOptions;
use util::{make_client, require_url};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "envdash", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load();
    let no_color = cli.no_color || config.no_color;

    // The dashboard owns the terminal, so it logs to a file instead
    #[cfg(feature = "tui")]
    {
        if let Commands::Dashboard { tab } = &cli.command {
            return run_dashboard(&cli, tab.as_deref(), &config).await;
        }
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let output = cli.output.as_ref();
    let timeout = resolve_timeout(cli.timeout, &config);

    match cli.command {
        Commands::Config { action } => cmd_config(action, no_color)?,
        Commands::Status { output: args } => {
            let client = make_client(&require_url(resolve_url(cli.url, &config))?, timeout)?;
            let opts = FormatOptions::new(no_color)
                .with_no_header(args.no_header)
                .with_compact(cli.compact);
            cmd_status(&client, args.resolve(cli.json, &config), output, &opts, cli.quiet)
                .await?;
        }
        Commands::Env { output: args } => {
            let client = make_client(&require_url(resolve_url(cli.url, &config))?, timeout)?;
            let opts = FormatOptions::new(no_color)
                .with_no_header(args.no_header)
                .with_compact(cli.compact);
            cmd_env(&client, args.resolve(cli.json, &config), output, &opts, cli.quiet).await?;
        }
        Commands::History {
            output: args,
            count,
        } => {
            let client = make_client(&require_url(resolve_url(cli.url, &config))?, timeout)?;
            let opts = FormatOptions::new(no_color)
                .with_no_header(args.no_header)
                .with_compact(cli.compact);
            cmd_history(
                &client,
                count,
                args.resolve(cli.json, &config),
                output,
                &opts,
                cli.quiet,
            )
            .await?;
        }
        Commands::Settings { action } => {
            let client = make_client(&require_url(resolve_url(cli.url, &config))?, timeout)?;
            match action {
                SettingsAction::Show { output: args } => {
                    let opts = FormatOptions::new(no_color)
                        .with_no_header(args.no_header)
                        .with_compact(cli.compact);
                    cmd_settings_show(
                        &client,
                        args.resolve(cli.json, &config),
                        output,
                        &opts,
                        cli.quiet,
                    )
                    .await?;
                }
                SettingsAction::Set {
                    interval,
                    sleep_on_reset,
                    force,
                } => {
                    let opts = FormatOptions::new(no_color);
                    cmd_settings_set(&client, interval, sleep_on_reset, force, cli.quiet, &opts)
                        .await?;
                }
            }
        }
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
        #[cfg(feature = "tui")]
        Commands::Dashboard { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
async fn run_dashboard(cli: &Cli, tab: Option<&str>, config: &Config) -> Result<()> {
    use envdash_cli::config::resolve_tab;
    use envdash_cli::tui::{self, Theme};
    use envdash_core::tabs::fragment_of;

    let url = require_url(resolve_url(cli.url.clone(), config))?;
    let tab = resolve_tab(tab, fragment_of(&url), config);
    let theme = Theme::from_name(&config.dashboard.theme);
    let timeout = resolve_timeout(cli.timeout, config);

    let log_path = tui::init_file_logging(cli.verbose)?;
    tracing::info!("Dashboard log: {}", log_path.display());

    tui::run(&url, timeout, tab, theme).await
}
