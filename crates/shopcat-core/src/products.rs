use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product photo as scraped or fetched, before URL normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    /// Image URL exactly as found; may be relative or protocol-relative.
    pub src: String,
    /// Variant IDs this image is tagged with. Empty when untagged.
    #[serde(default)]
    pub variant_ids: Vec<String>,
}

impl RawImage {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            variant_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_variant_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variant_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// One purchasable SKU as scraped or fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    /// Opaque variant ID, stringified. `None` when the source omitted it.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    /// The variant's own image, if the source assigns one directly.
    #[serde(default)]
    pub featured_image_src: Option<String>,
    /// Price in major currency units, after normalization.
    pub price: f64,
    #[serde(default)]
    pub compare_at_price: Option<f64>,
    #[serde(default)]
    pub available: Option<bool>,
}

/// A [`RawVariant`] with its chosen image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedVariant {
    #[serde(flatten)]
    pub variant: RawVariant,
    /// Absolute, high-resolution image URL, or `None` when nothing matched.
    pub image: Option<String>,
}

/// Which Shopify surface a product was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePlatform {
    ProductsJson,
    StorefrontApi,
}

impl std::fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourcePlatform::ProductsJson => write!(f, "products_json"),
            SourcePlatform::StorefrontApi => write!(f, "storefront_api"),
        }
    }
}

/// A product ready to be written to a catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Shopify numeric product ID, as a string.
    pub source_product_id: String,
    pub source_platform: SourcePlatform,
    /// Shopify URL slug, e.g. `"wool-runner"`.
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Canonical storefront URL, e.g. `"https://shop.example/products/wool-runner"`.
    #[serde(default)]
    pub source_url: Option<String>,
    /// Gallery image URLs, normalized.
    #[serde(default)]
    pub images: Vec<String>,
    pub variants: Vec<ResolvedVariant>,
    pub scraped_at: DateTime<Utc>,
}

impl CatalogProduct {
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// `false` when every variant ended up without an image. Callers treat
    /// this as a data-quality signal, not an error.
    #[must_use]
    pub fn has_any_variant_image(&self) -> bool {
        self.variants.iter().any(|v| v.image.is_some())
    }

    /// Lowest and highest positive variant price, if any.
    #[must_use]
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.variants
            .iter()
            .map(|v| v.variant.price)
            .filter(|p| *p > 0.0)
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}
