//! `storefront`: Storefront GraphQL collection for stores with a token.

use std::path::Path;

use anyhow::Context;
use shopcat_core::{AppConfig, CatalogAccumulator, StoreConfig};
use shopcat_scraper::{normalize_storefront_product, StorefrontClient};

use crate::runner::{catalog_path, select_stores, StoreRun};

/// Crawls every selected store that names a Storefront token variable.
/// Stores without one are skipped with a warning; a named but unset
/// variable counts as a store failure.
///
/// # Errors
///
/// Returns an error if store selection fails, the client cannot be built,
/// or every eligible store fails.
pub(crate) async fn run_storefront(
    config: &AppConfig,
    store_filter: Option<&str>,
    output_dir: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let stores: Vec<StoreConfig> = select_stores(config, store_filter, None)?
        .into_iter()
        .filter(|s| {
            if s.storefront_token_env.is_none() {
                tracing::warn!(store = %s.slug(), "skipping store; no storefront_token_env configured");
                false
            } else {
                true
            }
        })
        .collect();

    if stores.is_empty() {
        println!("no stores with a storefront token configured; nothing to do");
        return Ok(());
    }

    if dry_run {
        let slugs: Vec<String> = stores.iter().map(StoreConfig::slug).collect();
        println!(
            "dry-run: would crawl the Storefront API for {} stores into {}: [{}]",
            stores.len(),
            output_dir.display(),
            slugs.join(", ")
        );
        return Ok(());
    }

    let client = StorefrontClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        &config.storefront_api_version,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )
    .context("failed to build Storefront client")?;

    let mut run = StoreRun::default();
    for store in &stores {
        let outcome = match store.storefront_token() {
            Ok(Some(token)) => crawl_store(&client, config, store, &token, output_dir).await,
            Ok(None) => continue,
            Err(e) => Err(e.into()),
        };
        run.record(store, outcome);
    }
    run.finish("storefront crawl")
}

pub(crate) async fn crawl_store(
    client: &StorefrontClient,
    config: &AppConfig,
    store: &StoreConfig,
    token: &str,
    output_dir: &Path,
) -> anyhow::Result<usize> {
    let slug = store.slug();
    let mut catalog =
        CatalogAccumulator::new(&slug, catalog_path(output_dir, store), config.flush_every);

    let raw_products = client
        .fetch_all_products(
            &store.shop_url,
            token,
            config.scraper_page_size,
            config.scraper_inter_request_delay_ms,
        )
        .await
        .with_context(|| format!("failed to fetch storefront products for {slug}"))?;
    tracing::info!(store = %slug, fetched = raw_products.len(), "fetched storefront catalog");

    for raw in raw_products {
        match normalize_storefront_product(raw, &store.shop_url) {
            Ok(product) => catalog.push(product)?,
            Err(e) => {
                tracing::warn!(store = %slug, error = %e, "skipping product; normalization failed");
            }
        }
    }

    catalog.flush()?;
    Ok(catalog.len())
}
