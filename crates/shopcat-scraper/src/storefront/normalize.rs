//! Normalization from Storefront GraphQL shapes to [`CatalogProduct`].

use chrono::Utc;
use shopcat_core::{CatalogProduct, RawImage, RawVariant, SourcePlatform};

use crate::client::extract_store_origin;
use crate::error::ScraperError;
use crate::image::normalize_image_url;
use crate::normalize::non_empty;
use crate::price::{normalize_price, parse_price};
use crate::resolve::resolve_variants;

use super::types::{Money, StorefrontProduct, StorefrontVariant};

/// Normalizes a [`StorefrontProduct`] into a [`CatalogProduct`].
///
/// Global IDs are reduced to their numeric tail so catalogs built from
/// either source share IDs. Storefront images carry no variant tags, so
/// variants resolve through their own image or the first gallery image.
///
/// # Errors
///
/// Returns [`ScraperError::Normalization`] if the product has no variants.
pub fn normalize_storefront_product(
    product: StorefrontProduct,
    shop_url: &str,
) -> Result<CatalogProduct, ScraperError> {
    let source_product_id = gid_tail(&product.id).to_owned();
    if product.variants.nodes.is_empty() {
        return Err(ScraperError::Normalization {
            source_product_id,
            reason: "product has no variants".into(),
        });
    }

    let origin = extract_store_origin(shop_url);

    let mut raw_images: Vec<RawImage> = product
        .images
        .nodes
        .into_iter()
        .map(|image| RawImage::new(image.url))
        .collect();
    if raw_images.is_empty() {
        if let Some(featured) = product.featured_image {
            raw_images.push(RawImage::new(featured.url));
        }
    }

    let raw_variants: Vec<RawVariant> = product
        .variants
        .nodes
        .into_iter()
        .map(|variant| to_raw_variant(variant, &source_product_id))
        .collect();

    let variants = resolve_variants(&raw_images, raw_variants, &origin);
    let images = raw_images
        .iter()
        .filter_map(|image| normalize_image_url(&origin, &image.src))
        .collect();

    let source_url = non_empty(product.online_store_url)
        .unwrap_or_else(|| format!("{origin}/products/{}", product.handle));

    Ok(CatalogProduct {
        source_product_id,
        source_platform: SourcePlatform::StorefrontApi,
        handle: product.handle,
        title: product.title,
        vendor: non_empty(product.vendor),
        product_type: non_empty(product.product_type),
        tags: product.tags,
        source_url: Some(source_url),
        images,
        variants,
        scraped_at: Utc::now(),
    })
}

fn to_raw_variant(variant: StorefrontVariant, source_product_id: &str) -> RawVariant {
    let variant_id = gid_tail(&variant.id).to_owned();
    let price = money_or_zero(&variant.price, &variant_id, source_product_id);
    let compare_at_price = variant
        .compare_at_price
        .as_ref()
        .and_then(|money| parse_price(&money.amount))
        .map(normalize_price)
        .filter(|p| *p > 0.0);

    let mut options = variant
        .selected_options
        .into_iter()
        .map(|option| non_empty(Some(option.value)));

    RawVariant {
        id: Some(variant_id).filter(|id| !id.is_empty()),
        title: non_empty(variant.title),
        sku: non_empty(variant.sku),
        option1: options.next().flatten(),
        option2: options.next().flatten(),
        option3: options.next().flatten(),
        featured_image_src: variant.image.map(|image| image.url),
        price,
        compare_at_price,
        available: Some(variant.available_for_sale),
    }
}

fn money_or_zero(money: &Money, variant_id: &str, source_product_id: &str) -> f64 {
    if let Some(value) = parse_price(&money.amount) {
        normalize_price(value)
    } else {
        tracing::warn!(
            source_product_id,
            variant_id,
            raw = %money.amount,
            "unparseable storefront price; recording 0"
        );
        0.0
    }
}

/// `gid://shopify/ProductVariant/123` → `123`. Non-GID input is returned
/// unchanged.
fn gid_tail(id: &str) -> &str {
    if !id.starts_with("gid://") {
        return id;
    }
    let path = id.split('?').next().unwrap_or(id);
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
