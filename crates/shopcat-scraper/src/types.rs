//! Response types for Shopify's public `products.json` endpoint.
//!
//! ## Observed shape
//!
//! ### `price`
//! Usually a decimal string (`"30.00"`). Some older themes and proxies
//! return a bare number, occasionally in minor units (`12999`). Modeled as
//! [`ShopifyPrice`] and normalized in [`crate::price`].
//!
//! ### `images[].variant_ids`
//! Numeric variant IDs the merchant tagged on a gallery image. Empty for
//! untagged images, which is most of them.
//!
//! ### `variants[].featured_image`
//! Full image object (same shape as `images[]`) when the merchant assigned a
//! variant image, otherwise `null`.
//!
//! ### `option1` / `option2` / `option3`
//! Option values in the product's option order. Single-option products use
//! `"Default Title"` for `option1`.
//!
//! ### `available`
//! Absent on some older stores; defaults to `true`.

use serde::Deserialize;

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyProductsResponse {
    pub products: Vec<ShopifyProduct>,
}

/// A single product from the Shopify storefront.
#[derive(Debug, Deserialize)]
pub struct ShopifyProduct {
    /// Shopify numeric product ID.
    pub id: i64,

    pub title: String,

    /// URL slug for the product page.
    pub handle: String,

    #[serde(default)]
    pub vendor: Option<String>,

    /// May be an empty string; normalized to `None`.
    #[serde(default)]
    pub product_type: Option<String>,

    /// Tags as a JSON array of strings.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Full image gallery in merchant order.
    #[serde(default)]
    pub images: Vec<ShopifyImage>,

    pub variants: Vec<ShopifyVariant>,
}

/// A single purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Deserialize)]
pub struct ShopifyVariant {
    /// Shopify numeric variant ID.
    pub id: i64,

    #[serde(default)]
    pub title: Option<String>,

    /// May be an empty string on some stores.
    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,

    pub price: ShopifyPrice,

    /// `null` when the variant is not on sale.
    #[serde(default)]
    pub compare_at_price: Option<ShopifyPrice>,

    #[serde(default = "default_available")]
    pub available: bool,

    #[serde(default)]
    pub featured_image: Option<ShopifyImage>,
}

/// A product image from `products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyImage {
    #[serde(default)]
    pub id: Option<i64>,
    /// CDN URL; may be protocol-relative on older stores.
    pub src: String,
    #[serde(default)]
    pub position: Option<i32>,
    /// Variant IDs associated with this image.
    #[serde(default)]
    pub variant_ids: Vec<i64>,
}

/// Price as returned by the storefront: string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ShopifyPrice {
    Text(String),
    Number(f64),
}

impl ShopifyPrice {
    /// Raw numeric value, before unit normalization.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            ShopifyPrice::Text(s) => crate::price::parse_price(s),
            ShopifyPrice::Number(n) => (n.is_finite() && *n >= 0.0).then_some(*n),
        }
    }
}

/// serde `default = "..."` needs a function path; absent means available.
fn default_available() -> bool {
    true
}
