use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use mylocation_cli::cli::{Cli, Commands};
use mylocation_cli::commands::{
    CaptureArgs, ListArgs, cmd_capture, cmd_clear, cmd_config, cmd_list, cmd_theme,
};
use mylocation_cli::config::Config;
use mylocation_cli::format::FormatOptions;
use mylocation_cli::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "mylocation", &mut io::stdout());
        return Ok(());
    }

    let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));
    if interactive && cfg!(feature = "tui") {
        logging::init_file(&logging::default_log_path(), cli.quiet, cli.verbose)?;
    } else {
        logging::init_stderr(cli.quiet, cli.verbose);
    }

    let config = Config::load(cli.config.as_deref());
    let no_color = cli.no_color || config.no_color;
    let db_path = config.resolve_database(cli.database.clone());
    let prefs_path = config.resolve_preferences(cli.preferences.clone());
    tracing::debug!(db = %db_path.display(), prefs = %prefs_path.display(), "Resolved paths");

    match cli.command {
        Some(Commands::Capture {
            provider,
            timeout,
            format,
        }) => {
            let args = CaptureArgs {
                provider,
                timeout,
                format,
                quiet: cli.quiet,
                opts: FormatOptions::new(no_color),
            };
            cmd_capture(args, &db_path, &config).await?;
        }
        Some(Commands::List {
            limit,
            format,
            no_header,
            output,
        }) => {
            let args = ListArgs {
                limit,
                format,
                output,
                opts: FormatOptions::new(no_color).with_no_header(no_header),
            };
            cmd_list(args, &db_path)?;
        }
        Some(Commands::Clear { yes }) => {
            cmd_clear(&db_path, yes, cli.quiet)?;
        }
        Some(Commands::Theme { action }) => {
            cmd_theme(action, &prefs_path, no_color)?;
        }
        Some(Commands::Config { action }) => {
            cmd_config(action, cli.config.as_deref())?;
        }
        Some(Commands::Completions { .. }) => {
            // Already handled above
        }
        Some(Commands::Tui { provider }) => {
            run_tui(&config, provider, db_path, prefs_path).await?;
        }
        None => {
            run_tui(&config, None, db_path, prefs_path).await?;
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
async fn run_tui(
    config: &Config,
    provider: Option<mylocation_cli::cli::ProviderKind>,
    db_path: std::path::PathBuf,
    prefs_path: std::path::PathBuf,
) -> Result<()> {
    use mylocation_cli::tui;

    tui::run(tui::TuiOptions {
        db_path,
        prefs_path,
        provider: config.build_provider(provider)?,
        position: config.position_options(None),
    })
    .await
}

#[cfg(not(feature = "tui"))]
async fn run_tui(
    _config: &Config,
    _provider: Option<mylocation_cli::cli::ProviderKind>,
    _db_path: std::path::PathBuf,
    _prefs_path: std::path::PathBuf,
) -> Result<()> {
    anyhow::bail!("This build has no interactive screen; run `mylocation --help` for commands")
}
