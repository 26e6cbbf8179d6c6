use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One Shopify storefront to crawl, as listed in `config/stores.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: String,
    /// Any URL on the storefront; only the origin is used for API calls.
    pub shop_url: String,
    /// Name of the env var holding the Storefront API access token. Stores
    /// without one are skipped by the GraphQL crawler.
    #[serde(default)]
    pub storefront_token_env: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl StoreConfig {
    /// Builds a one-off store for a URL given on the command line, named
    /// after its host.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `shop_url` is not an http(s) URL
    /// with a host.
    pub fn ad_hoc(shop_url: &str) -> Result<Self, ConfigError> {
        let host = shop_host(shop_url).ok_or_else(|| {
            ConfigError::Validation(format!(
                "invalid store URL '{shop_url}'; expected an http(s) URL"
            ))
        })?;
        Ok(Self {
            name: host.to_string(),
            shop_url: shop_url.to_string(),
            storefront_token_env: None,
            notes: None,
        })
    }

    /// Generate a URL-safe slug from the store name.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Resolve the Storefront API token from the env var named in
    /// `storefront_token_env`.
    ///
    /// Returns `Ok(None)` when the store has no token configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if the named variable is unset.
    pub fn storefront_token(&self) -> Result<Option<String>, ConfigError> {
        self.storefront_token_with(|key| std::env::var(key))
    }

    fn storefront_token_with<F>(&self, lookup: F) -> Result<Option<String>, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let Some(var) = self.storefront_token_env.as_deref() else {
            return Ok(None);
        };
        lookup(var)
            .map(Some)
            .map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    }
}

/// Lowercases `name` and keeps ASCII alphanumerics, joining words with `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' || c == '.' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreConfig>,
}

impl StoresFile {
    /// Finds a store by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&StoreConfig> {
        self.stores.iter().find(|s| s.slug() == slug)
    }
}

/// Load and validate the store list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_stores(path: &Path) -> Result<StoresFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let stores_file: StoresFile = serde_yaml::from_str(&content)?;

    validate_stores(&stores_file)?;

    Ok(stores_file)
}

fn validate_stores(stores_file: &StoresFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();

    for store in &stores_file.stores {
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store name must be non-empty".to_string(),
            ));
        }

        if shop_host(&store.shop_url).is_none() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has invalid shop_url '{}'; expected an http(s) URL",
                store.name, store.shop_url
            )));
        }

        let slug = store.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' produces an empty slug",
                store.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store slug: '{}' (from store '{}')",
                slug, store.name
            )));
        }
    }

    Ok(())
}

/// Host of an http(s) URL with any port removed. `None` for other schemes
/// or an empty host.
fn shop_host(shop_url: &str) -> Option<&str> {
    shop_url
        .strip_prefix("https://")
        .or_else(|| shop_url.strip_prefix("http://"))
        .and_then(|rest| rest.split(['/', '?', '#']).next())
        .and_then(|authority| authority.split(':').next())
        .filter(|host| !host.is_empty())
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
