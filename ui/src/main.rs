use clap::{Parser, Subcommand};
use lumen::theme::ThemeManager;
use lumen::{commands, config, logger};
use lumen_core::{ResolvedAppearance, ThemePreference};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Parser)]
#[command(name = "lumen", about = "Theme preference controller for the Lumen editor")]
struct Cli {
    /// Configuration file (default: ./config.toml, then the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Pin the OS appearance instead of asking the desktop
    #[arg(long, global = true, value_name = "light|dark")]
    assume_os: Option<ResolvedAppearance>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current preference and resolved appearance
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Select and persist a theme preference
    Set {
        #[arg(value_name = "light|dark|system")]
        preference: ThemePreference,
    },
    /// List the selectable themes
    Options,
    /// Follow OS appearance changes until interrupted
    Watch {
        /// Override theme.poll_interval_ms
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let app_config = config::load_config(cli.config.as_deref())?;
    logger::setup_logger(app_config.logging())?;

    let mut settings = app_config.theme().clone();
    if let Some(appearance) = cli.assume_os {
        settings = settings.with_assume_os(appearance);
    }
    if let Command::Watch {
        interval_ms: Some(interval_ms),
    } = cli.command
    {
        settings = settings.with_poll_interval_ms(interval_ms);
    }

    let manager = ThemeManager::init(&settings)?;
    let mut stdout = std::io::stdout();

    match cli.command {
        Command::Show { json } => commands::show(&manager, json, &mut stdout)?,
        Command::Set { preference } => commands::set(&manager, preference, &mut stdout)?,
        Command::Options => commands::options(&manager, &mut stdout)?,
        Command::Watch { .. } => {
            let out = Arc::new(Mutex::new(std::io::stdout()));
            commands::watch(&manager, out, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    log::error!("Failed to listen for Ctrl-C: {e}");
                }
            })
            .await?
        }
    }

    Ok(())
}
