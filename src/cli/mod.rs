use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// FakeCheck deepfake-detection media analysis
#[derive(Parser)]
#[command(name = "fakecheck")]
#[command(about = "FakeCheck deepfake-detection media analysis")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./fakecheck.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a local media file
    AnalyzeFile(commands::analyze::AnalyzeFileCommand),
    /// Fetch a media URL and analyse it
    AnalyzeUrl(commands::analyze::AnalyzeUrlCommand),
    /// Run the HTTP API
    Serve(commands::serve::ServeCommand),
    /// Relay a media URL to the API and update the badge and last analysis
    Relay(commands::relay::RelayCommand),
    /// Show the last relayed analysis
    Popup(commands::popup::PopupCommand),
    /// Print the effective configuration
    Config(commands::config::ConfigCommand),
}

impl Commands {
    /// Default log filter when RUST_LOG is unset
    fn default_log_filter(&self) -> &'static str {
        match self {
            Commands::Serve(_) | Commands::Relay(_) => "info",
            _ => "error",
        }
    }
}

pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise long-running commands log at info, the rest at error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(cli.command.default_log_filter())
            }),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::AnalyzeFile(command) => command.run(config_path).await,
        Commands::AnalyzeUrl(command) => command.run(config_path).await,
        Commands::Serve(command) => command.run(config_path).await,
        Commands::Relay(command) => command.run(config_path).await,
        Commands::Popup(command) => command.run(config_path),
        Commands::Config(command) => command.run(config_path),
    }
}
