//! Owned, explicitly flushed accumulator for a single store's crawl output.
//!
//! A crawl run creates one [`CatalogAccumulator`] per store and hands it by
//! `&mut` to each stage. Products are held in memory and written to disk as a
//! whole [`CatalogFile`] on [`CatalogAccumulator::flush`], either explicitly
//! or automatically every `flush_every` new products. Nothing is written on
//! drop; the caller must flush at the end of a run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::CatalogProduct;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize catalog for {store}: {source}")]
    Serialize {
        store: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse catalog file {path}: {source}")]
    Deserialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub store: String,
    pub generated_at: DateTime<Utc>,
    pub products: Vec<CatalogProduct>,
}

impl CatalogFile {
    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Deserialize`] if it is not a valid catalog document.
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| CatalogError::Deserialize {
            path: path.display().to_string(),
            source: e,
        })
    }
}

pub struct CatalogAccumulator {
    store: String,
    path: PathBuf,
    products: Vec<CatalogProduct>,
    /// `source_product_id` → index into `products`.
    index: HashMap<String, usize>,
    flush_every: usize,
    unflushed: usize,
}

impl CatalogAccumulator {
    /// Creates an empty accumulator writing to `path`.
    ///
    /// `flush_every = 0` disables automatic flushing.
    #[must_use]
    pub fn new(store: impl Into<String>, path: impl Into<PathBuf>, flush_every: usize) -> Self {
        Self {
            store: store.into(),
            path: path.into(),
            products: Vec::new(),
            index: HashMap::new(),
            flush_every,
            unflushed: 0,
        }
    }

    /// Creates an accumulator pre-loaded with the products already stored at
    /// `path`, so an interrupted crawl can continue. A missing file yields an
    /// empty accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file exists but cannot be read or parsed.
    pub fn resume(
        store: impl Into<String>,
        path: impl Into<PathBuf>,
        flush_every: usize,
    ) -> Result<Self, CatalogError> {
        let mut acc = Self::new(store, path, flush_every);
        if !acc.path.exists() {
            return Ok(acc);
        }
        let file = CatalogFile::read(&acc.path)?;
        for product in file.products {
            acc.insert(product);
        }
        tracing::info!(
            store = %acc.store,
            path = %acc.path.display(),
            products = acc.products.len(),
            "resumed catalog from existing file"
        );
        Ok(acc)
    }

    /// Adds a product, replacing any earlier product with the same
    /// `source_product_id`. Triggers [`Self::flush`] once `flush_every`
    /// previously unseen products have accumulated since the last flush;
    /// replacements are written by the next flush but do not count.
    ///
    /// # Errors
    ///
    /// Propagates any error from an automatic flush.
    pub fn push(&mut self, product: CatalogProduct) -> Result<(), CatalogError> {
        if !self.insert(product) {
            return Ok(());
        }
        self.unflushed += 1;
        if self.flush_every > 0 && self.unflushed >= self.flush_every {
            self.flush()?;
        }
        Ok(())
    }

    /// Returns `true` if the product was new, `false` if it replaced one.
    fn insert(&mut self, product: CatalogProduct) -> bool {
        if let Some(&idx) = self.index.get(&product.source_product_id) {
            self.products[idx] = product;
            false
        } else {
            self.index
                .insert(product.source_product_id.clone(), self.products.len());
            self.products.push(product);
            true
        }
    }

    /// Writes every accumulated product to disk.
    ///
    /// The document is written to a sibling `.tmp` file and renamed over the
    /// target, so readers never observe a half-written catalog. Parent
    /// directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Serialize`] or [`CatalogError::Io`].
    pub fn flush(&mut self) -> Result<(), CatalogError> {
        let io_err = |path: &Path, source: std::io::Error| CatalogError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }

        let file = CatalogFileRef {
            store: &self.store,
            generated_at: Utc::now(),
            products: &self.products,
        };
        let body =
            serde_json::to_vec_pretty(&file).map_err(|e| CatalogError::Serialize {
                store: self.store.clone(),
                source: e,
            })?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, body).map_err(|e| io_err(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| io_err(&self.path, e))?;

        tracing::debug!(
            store = %self.store,
            path = %self.path.display(),
            products = self.products.len(),
            "flushed catalog"
        );
        self.unflushed = 0;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of new products pushed since the last flush.
    #[must_use]
    pub fn unflushed(&self) -> usize {
        self.unflushed
    }

    #[must_use]
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Borrowing twin of [`CatalogFile`] so flushing does not clone products.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFileRef<'a> {
    store: &'a str,
    generated_at: DateTime<Utc>,
    products: &'a [CatalogProduct],
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
