//! `crawl`: products.json collection into per-store catalog files.

use std::path::Path;

use anyhow::Context;
use shopcat_core::{AppConfig, CatalogAccumulator, StoreConfig};
use shopcat_scraper::{normalize_product, ShopifyClient, ShopifyProduct};

use crate::runner::{catalog_path, select_stores, StoreRun};

#[derive(Debug)]
pub(crate) struct CrawlOptions<'a> {
    pub store: Option<&'a str>,
    pub url: Option<&'a str>,
    pub output_dir: &'a Path,
    pub browser_profile: bool,
    pub resume: bool,
    pub dry_run: bool,
}

pub(crate) fn build_shopify_client(config: &AppConfig) -> anyhow::Result<ShopifyClient> {
    ShopifyClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )
    .context("failed to build Shopify client")
}

/// Crawls every selected store in turn.
///
/// # Errors
///
/// Returns an error if store selection fails, the client cannot be built,
/// or every store fails. Individual store failures are logged and skipped.
pub(crate) async fn run_crawl(config: &AppConfig, opts: &CrawlOptions<'_>) -> anyhow::Result<()> {
    let stores = select_stores(config, opts.store, opts.url)?;

    if opts.dry_run {
        let slugs: Vec<String> = stores.iter().map(StoreConfig::slug).collect();
        println!(
            "dry-run: would crawl products.json for {} stores into {}: [{}]",
            stores.len(),
            opts.output_dir.display(),
            slugs.join(", ")
        );
        return Ok(());
    }

    let client = build_shopify_client(config)?;
    let mut run = StoreRun::default();
    for store in &stores {
        let outcome = crawl_store(&client, config, store, opts).await;
        run.record(store, outcome);
    }
    run.finish("crawl")
}

/// Fetches, normalizes and writes one store's catalog. Returns the number of
/// products in the written file.
pub(crate) async fn crawl_store(
    client: &ShopifyClient,
    config: &AppConfig,
    store: &StoreConfig,
    opts: &CrawlOptions<'_>,
) -> anyhow::Result<usize> {
    let slug = store.slug();
    let path = catalog_path(opts.output_dir, store);
    let mut catalog = if opts.resume {
        CatalogAccumulator::resume(&slug, &path, config.flush_every)?
    } else {
        CatalogAccumulator::new(&slug, &path, config.flush_every)
    };

    let raw_products = fetch_products(client, config, store, opts.browser_profile).await?;
    tracing::info!(store = %slug, fetched = raw_products.len(), "fetched products.json catalog");

    for raw in raw_products {
        match normalize_product(raw, &store.shop_url) {
            Ok(product) => catalog.push(product)?,
            Err(e) => {
                tracing::warn!(store = %slug, error = %e, "skipping product; normalization failed");
            }
        }
    }

    catalog.flush()?;
    Ok(catalog.len())
}

/// Fetches the full catalog. A 403 on the default agent is retried once
/// with the browser profile.
async fn fetch_products(
    client: &ShopifyClient,
    config: &AppConfig,
    store: &StoreConfig,
    browser_profile: bool,
) -> anyhow::Result<Vec<ShopifyProduct>> {
    let page_size = config.scraper_page_size;
    let delay_ms = config.scraper_inter_request_delay_ms;

    if browser_profile {
        return client
            .fetch_all_products_browser_profile(&store.shop_url, page_size, delay_ms)
            .await
            .with_context(|| format!("failed to fetch products for {}", store.slug()));
    }

    match client
        .fetch_all_products(&store.shop_url, page_size, delay_ms)
        .await
    {
        Ok(products) => Ok(products),
        Err(e) if e.status() == Some(403) => {
            tracing::warn!(
                store = %store.slug(),
                error = %e,
                "storefront returned 403; retrying with browser-profile headers"
            );
            client
                .fetch_all_products_browser_profile(&store.shop_url, page_size, delay_ms)
                .await
                .with_context(|| {
                    format!(
                        "failed to fetch products for {} ({e}; browser-profile fallback also failed)",
                        store.slug()
                    )
                })
        }
        Err(e) => {
            Err(e).with_context(|| format!("failed to fetch products for {}", store.slug()))
        }
    }
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
