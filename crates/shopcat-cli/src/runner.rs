//! Store selection and per-store outcome bookkeeping shared by the crawl
//! commands.
//!
//! Stores are processed one at a time. A failing store is logged and
//! counted; the run as a whole fails only when every store failed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use shopcat_core::{load_stores, AppConfig, StoreConfig};

/// Resolves the stores for a run: the ad-hoc `url` if given, otherwise the
/// configured stores, optionally narrowed to one slug.
pub(crate) fn select_stores(
    config: &AppConfig,
    store_filter: Option<&str>,
    url: Option<&str>,
) -> anyhow::Result<Vec<StoreConfig>> {
    if let Some(url) = url {
        return Ok(vec![StoreConfig::ad_hoc(url)?]);
    }

    let stores_file = load_stores(&config.stores_path).with_context(|| {
        format!(
            "failed to load stores from {}",
            config.stores_path.display()
        )
    })?;

    match store_filter {
        Some(slug) => {
            let store = stores_file.find(slug).cloned().ok_or_else(|| {
                anyhow::anyhow!(
                    "store '{slug}' not found in {}",
                    config.stores_path.display()
                )
            })?;
            Ok(vec![store])
        }
        None => Ok(stores_file.stores),
    }
}

/// `{output_dir}/{slug}.json`.
pub(crate) fn catalog_path(output_dir: &Path, store: &StoreConfig) -> PathBuf {
    output_dir.join(format!("{}.json", store.slug()))
}

/// Running tally of per-store results for one command invocation.
#[derive(Debug, Default)]
pub(crate) struct StoreRun {
    succeeded: usize,
    failed: usize,
    products: usize,
}

impl StoreRun {
    /// Records the outcome for `store`. Failures are logged, not propagated.
    pub(crate) fn record(&mut self, store: &StoreConfig, outcome: anyhow::Result<usize>) {
        match outcome {
            Ok(products) => {
                self.succeeded += 1;
                self.products = self.products.saturating_add(products);
                tracing::info!(store = %store.slug(), products, "store crawl complete");
            }
            Err(e) => {
                self.failed += 1;
                tracing::error!(store = %store.slug(), error = %format!("{e:#}"), "store crawl failed");
            }
        }
    }

    /// Ends the run.
    ///
    /// # Errors
    ///
    /// Returns an error when at least one store was attempted and all failed.
    pub(crate) fn finish(self, label: &str) -> anyhow::Result<()> {
        let total = self.succeeded + self.failed;

        if self.failed > 0 {
            tracing::warn!(
                failed_stores = self.failed,
                total_stores = total,
                "some stores failed during {label}"
            );
        }

        if total > 0 && self.failed == total {
            anyhow::bail!("all {total} stores failed {label}");
        }

        println!(
            "{label}: {} products from {} of {total} stores",
            self.products, self.succeeded
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str) -> StoreConfig {
        StoreConfig {
            name: name.to_owned(),
            shop_url: "https://shop.example".to_owned(),
            storefront_token_env: None,
            notes: None,
        }
    }

    #[test]
    fn catalog_path_uses_slug() {
        let path = catalog_path(Path::new("/tmp/out"), &store("Deco Home"));
        assert_eq!(path, PathBuf::from("/tmp/out/deco-home.json"));
    }

    #[test]
    fn finish_succeeds_with_partial_failure() {
        let mut run = StoreRun::default();
        run.record(&store("A"), Ok(3));
        run.record(&store("B"), Err(anyhow::anyhow!("boom")));
        assert!(run.finish("crawl").is_ok());
    }

    #[test]
    fn finish_fails_when_every_store_fails() {
        let mut run = StoreRun::default();
        run.record(&store("A"), Err(anyhow::anyhow!("boom")));
        run.record(&store("B"), Err(anyhow::anyhow!("bang")));
        let err = run.finish("crawl").unwrap_err();
        assert!(err.to_string().contains("all 2 stores failed"));
    }

    #[test]
    fn finish_with_no_stores_is_ok() {
        assert!(StoreRun::default().finish("crawl").is_ok());
    }
}
