//! Normalization from `products.json` shapes to [`shopcat_core::CatalogProduct`].
//!
//! Image choice is delegated to [`crate::resolve`] and price units to
//! [`crate::price`]; this module handles the structural conversion.

use chrono::Utc;
use shopcat_core::{CatalogProduct, RawImage, RawVariant, SourcePlatform};

use crate::client::extract_store_origin;
use crate::error::ScraperError;
use crate::image::normalize_image_url;
use crate::price::normalize_price;
use crate::resolve::resolve_variants;
use crate::types::{ShopifyPrice, ShopifyProduct, ShopifyVariant};

/// Normalizes a raw [`ShopifyProduct`] into a [`CatalogProduct`].
///
/// # Errors
///
/// Returns [`ScraperError::Normalization`] if the product has no variants.
pub fn normalize_product(
    product: ShopifyProduct,
    shop_url: &str,
) -> Result<CatalogProduct, ScraperError> {
    let source_product_id = product.id.to_string();
    if product.variants.is_empty() {
        return Err(ScraperError::Normalization {
            source_product_id,
            reason: "product has no variants".into(),
        });
    }

    let origin = extract_store_origin(shop_url);

    let raw_images: Vec<RawImage> = product
        .images
        .into_iter()
        .map(|image| RawImage {
            src: image.src,
            variant_ids: image.variant_ids.iter().map(ToString::to_string).collect(),
        })
        .collect();

    let raw_variants: Vec<RawVariant> = product
        .variants
        .into_iter()
        .map(|variant| to_raw_variant(variant, &source_product_id))
        .collect();

    let variants = resolve_variants(&raw_images, raw_variants, &origin);
    let images = raw_images
        .iter()
        .filter_map(|image| normalize_image_url(&origin, &image.src))
        .collect();

    Ok(CatalogProduct {
        source_url: Some(format!("{origin}/products/{}", product.handle)),
        source_product_id,
        source_platform: SourcePlatform::ProductsJson,
        handle: product.handle,
        title: product.title,
        vendor: non_empty(product.vendor),
        product_type: non_empty(product.product_type),
        tags: product.tags,
        images,
        variants,
        scraped_at: Utc::now(),
    })
}

fn to_raw_variant(variant: ShopifyVariant, source_product_id: &str) -> RawVariant {
    let price = price_or_zero(&variant.price, variant.id, source_product_id);
    let compare_at_price = variant
        .compare_at_price
        .as_ref()
        .and_then(ShopifyPrice::value)
        .map(normalize_price)
        .filter(|p| *p > 0.0);

    RawVariant {
        id: Some(variant.id.to_string()),
        title: non_empty(variant.title),
        sku: non_empty(variant.sku),
        option1: non_empty(variant.option1),
        option2: non_empty(variant.option2),
        option3: non_empty(variant.option3),
        featured_image_src: variant.featured_image.map(|image| image.src),
        price,
        compare_at_price,
        available: Some(variant.available),
    }
}

/// Unparseable prices keep the variant (priced at zero) rather than dropping
/// it; statistics skip zero prices.
fn price_or_zero(price: &ShopifyPrice, variant_id: i64, source_product_id: &str) -> f64 {
    if let Some(value) = price.value() {
        normalize_price(value)
    } else {
        tracing::warn!(
            source_product_id,
            variant_id,
            raw = ?price,
            "unparseable variant price; recording 0"
        );
        0.0
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
