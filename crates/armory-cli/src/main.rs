use std::path::PathBuf;

use armory_core::AppConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod input;

#[derive(Debug, Parser)]
#[command(name = "armory-cli")]
#[command(about = "Inspect Lost Ark armory tooltips from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract renderable sections from a raw tooltip
    Sections {
        /// Read the tooltip from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Extract every scalar fact (quality, tier, stats, engravings)
    Facts {
        /// Read the tooltip from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Item display name, used for the enhancement level (e.g. "+18 ...")
        #[arg(long)]
        name: Option<String>,
    },
    /// List every text leaf of a tooltip with markup removed
    Text {
        /// Read the tooltip from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Strip markup from arbitrary text
    Strip {
        /// Read the text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Rewrite font colors into spans instead of removing all tags
        #[arg(long)]
        span: bool,
    },
    /// Classify an equipment type label (e.g. "목걸이")
    Classify { label: String },
    /// Parse an effect label (e.g. "1티어 수라의 길 Lv.1")
    Effect { desc: String },
    /// Look up display colors
    Colors {
        /// Item grade (e.g. 고대)
        #[arg(long, required_unless_present = "category", conflicts_with = "category")]
        grade: Option<String>,
        /// Ark passive category (진화, 깨달음, 도약)
        #[arg(long)]
        category: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // `--help` and the bare invocation must not depend on the environment.
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("armory-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = armory_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::debug!(env = %config.env, output = %config.output, "configuration loaded");

    let output = commands::run(command, &config)?;
    println!("{}", commands::render(&output, config.output)?);
    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let interactive = config.env.is_development();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(interactive)
        .with_target(interactive)
        .init();
    Ok(())
}
