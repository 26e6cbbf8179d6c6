//! Variant image resolution.
//!
//! Each variant gets one best-guess image, chosen by the first rule in
//! [`IMAGE_RULES`] that produces a URL:
//!
//! 1. the variant's own featured image,
//! 2. the last gallery image tagged with the variant's ID,
//! 3. the first gallery image.
//!
//! If no rule matches the variant keeps `image: None`. Every candidate is
//! run through [`normalize_image_url`] before it counts as a match, so a
//! resolved image is always absolute.

use std::collections::HashMap;

use shopcat_core::{RawImage, RawVariant, ResolvedVariant};

use crate::image::normalize_image_url;

type ImageRule = fn(&ResolveContext<'_>, &RawVariant) -> Option<String>;

const IMAGE_RULES: [(&str, ImageRule); 3] = [
    ("featured_image", featured_image),
    ("variant_id_mapping", mapped_by_variant_id),
    ("first_gallery_image", first_gallery_image),
];

/// Per-product lookup state shared by every rule.
struct ResolveContext<'a> {
    base_url: &'a str,
    by_variant_id: HashMap<&'a str, String>,
    first_image: Option<String>,
}

impl<'a> ResolveContext<'a> {
    fn new(images: &'a [RawImage], base_url: &'a str) -> Self {
        let mut by_variant_id = HashMap::new();
        for image in images.iter().filter(|i| !i.variant_ids.is_empty()) {
            let Some(url) = normalize_image_url(base_url, &image.src) else {
                continue;
            };
            for id in &image.variant_ids {
                by_variant_id.insert(id.as_str(), url.clone());
            }
        }

        let first_image = images
            .first()
            .and_then(|image| normalize_image_url(base_url, &image.src));

        Self {
            base_url,
            by_variant_id,
            first_image,
        }
    }
}

fn featured_image(ctx: &ResolveContext<'_>, variant: &RawVariant) -> Option<String> {
    variant
        .featured_image_src
        .as_deref()
        .and_then(|src| normalize_image_url(ctx.base_url, src))
}

fn mapped_by_variant_id(ctx: &ResolveContext<'_>, variant: &RawVariant) -> Option<String> {
    let id = variant.id.as_deref().filter(|id| !id.is_empty())?;
    ctx.by_variant_id.get(id).cloned()
}

fn first_gallery_image(ctx: &ResolveContext<'_>, _variant: &RawVariant) -> Option<String> {
    ctx.first_image.clone()
}

/// Assigns one image to every variant of a single product.
///
/// `base_url` is any URL on the store (typically the product page); relative
/// image paths are resolved against its origin. The output has the same
/// length and order as `variants`. Never fails.
#[must_use]
pub fn resolve_variants(
    images: &[RawImage],
    variants: Vec<RawVariant>,
    base_url: &str,
) -> Vec<ResolvedVariant> {
    let ctx = ResolveContext::new(images, base_url);

    variants
        .into_iter()
        .map(|variant| {
            let image = IMAGE_RULES.iter().find_map(|(rule, apply)| {
                let url = apply(&ctx, &variant)?;
                tracing::trace!(rule, variant_id = ?variant.id, url = %url, "variant image resolved");
                Some(url)
            });
            ResolvedVariant { variant, image }
        })
        .collect()
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
