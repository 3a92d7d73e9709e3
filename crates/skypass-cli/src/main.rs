mod cmd;
mod terminal;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cmd::{
    alert::AlertSubcommand, config::ConfigSubcommand, connection::ConnectionSubcommand, Context,
};
use skypass_core::config::{Config, CONFIG_FILE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skypass",
    about = "Skypass ISP dashboard actions: verify device pools and resend alerts",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./skypass.yaml, defaults used when absent)
    #[arg(long, global = true, env = "SKYPASS_CONFIG")]
    config: Option<PathBuf>,

    /// Dashboard backend URL, overrides `base_url` from the config file
    #[arg(long, global = true, env = "SKYPASS_URL")]
    base_url: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(long, global = true, short = 'y')]
    yes: bool,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify an ISP's device count against its GenieACS server
    Verify {
        /// ISP id (omit with --all)
        #[arg(required_unless_present = "all")]
        isp_id: Option<u64>,

        /// Verify every ISP (asks for confirmation)
        #[arg(long, conflicts_with = "isp_id")]
        all: bool,
    },

    /// Send or resend alert emails
    Alert {
        #[command(subcommand)]
        subcommand: AlertSubcommand,
    },

    /// Probe GenieACS connectivity through the backend
    Connection {
        #[command(subcommand)]
        subcommand: ConnectionSubcommand,
    },

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = load_context(&cli).and_then(|ctx| match cli.command {
        Commands::Verify { isp_id, all } => cmd::verify::run(&ctx, isp_id, all),
        Commands::Alert { subcommand } => cmd::alert::run(&ctx, subcommand),
        Commands::Connection { subcommand } => cmd::connection::run(&ctx, subcommand),
        Commands::Config { subcommand } => cmd::config::run(&ctx, subcommand),
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn load_context(cli: &Cli) -> anyhow::Result<Context> {
    let path = match &cli.config {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("config file not found: {}", explicit.display());
            }
            explicit.clone()
        }
        None => PathBuf::from(CONFIG_FILE),
    };

    let mut config = Config::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    Ok(Context {
        config,
        assume_yes: cli.yes,
        json: cli.json,
    })
}
