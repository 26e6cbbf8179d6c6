//! Shopify catalog collection: HTTP clients for `products.json` and the
//! Storefront GraphQL API, variant image resolution, and normalization into
//! [`shopcat_core::CatalogProduct`].

pub mod client;
pub mod error;
pub mod image;
pub mod normalize;
pub mod pagination;
pub mod price;
mod rate_limit;
pub mod resolve;
pub mod storefront;
pub mod types;

pub use client::{extract_store_origin, ShopifyClient};
pub use error::ScraperError;
pub use image::{normalize_image_url, HIGH_RES_TOKEN};
pub use normalize::normalize_product;
pub use price::{normalize_price, parse_price, MINOR_UNIT_THRESHOLD};
pub use resolve::resolve_variants;
pub use storefront::types::StorefrontProduct;
pub use storefront::{normalize_storefront_product, StorefrontClient};
pub use types::{ShopifyProduct, ShopifyProductsResponse, ShopifyVariant};
