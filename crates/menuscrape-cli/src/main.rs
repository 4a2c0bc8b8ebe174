mod browser;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use menuscrape_core::{load_selectors, AppConfig, Selectors};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "menuscrape")]
#[command(about = "Scrape a restaurant store page into a menu record")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the store page in a browser and run both phases
    Scrape {
        /// Store page URL (defaults to `MENUSCRAPE_STORE_URL`)
        #[arg(long)]
        url: Option<String>,
        /// Output file (defaults to `MENUSCRAPE_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the initial extraction over a saved copy of the page
    Extract {
        #[arg(long)]
        html: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parsed before any config load so `--help` works with a broken environment.
    let cli = Cli::parse();

    let config = menuscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let selectors = resolve_selectors(&config)?;

    match cli.command {
        Commands::Scrape { url, output } => {
            let Some(url) = url.or_else(|| config.store_url.clone()) else {
                anyhow::bail!("no store URL: pass --url or set MENUSCRAPE_STORE_URL");
            };
            let output = output.unwrap_or_else(|| config.output_path.clone());
            run::run_scrape(&config, &selectors, &url, &output).await?;
        }
        Commands::Extract { html, output } => {
            let output = output.unwrap_or_else(|| config.output_path.clone());
            run::run_extract(&selectors, &html, &output)?;
        }
    }

    Ok(())
}

fn resolve_selectors(config: &AppConfig) -> anyhow::Result<Selectors> {
    match config.selectors_path.as_deref() {
        Some(path) => {
            let selectors = load_selectors(path)?;
            tracing::info!(path = %path.display(), "loaded selectors");
            Ok(selectors)
        }
        None => Ok(Selectors::default()),
    }
}

#[cfg(test)]
mod tests;
