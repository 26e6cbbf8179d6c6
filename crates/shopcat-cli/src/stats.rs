//! `stats`: aggregate statistics across catalog files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use shopcat_core::{CatalogFile, CatalogProduct, CatalogStats};

/// Loads every file and combines their products into one product list.
pub(crate) fn load_products(files: &[PathBuf]) -> anyhow::Result<Vec<CatalogProduct>> {
    let mut products = Vec::new();
    for path in files {
        let file = read_catalog(path)?;
        tracing::debug!(
            path = %path.display(),
            store = %file.store,
            products = file.products.len(),
            "loaded catalog file"
        );
        products.extend(file.products);
    }
    Ok(products)
}

fn read_catalog(path: &Path) -> anyhow::Result<CatalogFile> {
    CatalogFile::read(path).with_context(|| format!("failed to load catalog {}", path.display()))
}

pub(crate) fn render_stats(stats: &CatalogStats, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(stats)?)
    } else {
        Ok(stats.to_string())
    }
}

/// Prints combined statistics for `files`.
///
/// # Errors
///
/// Returns an error if any file cannot be read or parsed.
pub(crate) fn run_stats(files: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let products = load_products(files)?;
    let stats = CatalogStats::from_products(&products);
    println!("{}", render_stats(&stats, json)?);
    Ok(())
}
