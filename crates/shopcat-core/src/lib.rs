pub mod app_config;
pub mod catalog;
pub mod config;
pub mod products;
pub mod stats;
pub mod stores;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{CatalogAccumulator, CatalogError, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{CatalogProduct, RawImage, RawVariant, ResolvedVariant, SourcePlatform};
pub use stats::{CatalogStats, PriceSummary};
pub use stores::{load_stores, slugify, StoreConfig, StoresFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read stores file {path}: {source}")]
    StoresFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stores file: {0}")]
    StoresFileParse(#[from] serde_yaml::Error),

    #[error("invalid stores configuration: {0}")]
    Validation(String),
}
