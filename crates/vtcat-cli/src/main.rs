mod build;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "vtcat")]
#[command(about = "Builds the virtual-creator catalogue from the spreadsheet feed")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve every creator and publish the catalogue index (default).
    Build {
        /// Fetch the feed and list planned lookups without calling any platform.
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the catalogue cards from a published index.
    Render {
        #[arg(long, default_value = "vtubers/index.json")]
        index: PathBuf,
        #[arg(long, default_value = "catalogue.html")]
        output: PathBuf,
        /// URL prefix of the per-creator directories.
        #[arg(long, default_value = "upload/vtubers")]
        asset_base: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Build { dry_run: false }) {
        Commands::Build { dry_run } => {
            let config = vtcat_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            build::run_build(&config, dry_run).await
        }
        Commands::Render {
            index,
            output,
            asset_base,
        } => {
            init_tracing(&vtcat_core::log_level_from_env())?;
            render::run_render(&index, &output, &asset_base).await
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
