mod crawl;
mod runner;
mod stats;
mod storefront;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopcat")]
#[command(about = "Crawl Shopify storefront catalogs into JSON files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl products.json for every configured store (or one store / URL)
    Crawl {
        /// Restrict the crawl to one store from stores.yaml (by slug)
        #[arg(long)]
        store: Option<String>,

        /// Crawl an ad-hoc storefront URL instead of the configured stores
        #[arg(long, conflicts_with = "store")]
        url: Option<String>,

        /// Directory for `{slug}.json` catalog files (defaults to SHOPCAT_OUTPUT_DIR)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Send a desktop browser User-Agent from the first request
        #[arg(long)]
        browser_profile: bool,

        /// Continue from an existing catalog file instead of starting empty
        #[arg(long)]
        resume: bool,

        /// List the stores that would be crawled and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Crawl via the Storefront GraphQL API for stores with a configured token
    Storefront {
        /// Restrict the crawl to one store from stores.yaml (by slug)
        #[arg(long)]
        store: Option<String>,

        /// Directory for `{slug}.json` catalog files (defaults to SHOPCAT_OUTPUT_DIR)
        #[arg(long)]
        output: Option<PathBuf>,

        /// List the stores that would be crawled and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Print aggregate statistics for one or more catalog files
    Stats {
        /// Catalog files written by `crawl` or `storefront`
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit JSON instead of a text summary
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Crawl {
            store,
            url,
            output,
            browser_profile,
            resume,
            dry_run,
        }) => {
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            crawl::run_crawl(
                &config,
                &crawl::CrawlOptions {
                    store: store.as_deref(),
                    url: url.as_deref(),
                    output_dir: &output_dir,
                    browser_profile,
                    resume,
                    dry_run,
                },
            )
            .await?;
        }
        Some(Commands::Storefront {
            store,
            output,
            dry_run,
        }) => {
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            storefront::run_storefront(&config, store.as_deref(), &output_dir, dry_run).await?;
        }
        Some(Commands::Stats { files, json }) => stats::run_stats(&files, json)?,
        None => println!("shopcat: no command given; run `shopcat --help` for usage"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
