//! Image URL normalization: relative → absolute, CDN size tier → high-res.
//!
//! Shopify serves pre-rendered resolution tiers by embedding a size word in
//! the file name, e.g. `hero_small.jpg` or `hero_grande@2x.png`. Rewriting
//! that word to [`HIGH_RES_TOKEN`] asks the CDN for the large rendition.
//!
//! A URL is treated as a Shopify CDN asset when any of these hold:
//! - the host is `cdn.shopify.com` or under `shopifycdn.com`/`shopifycdn.net`,
//! - the path is a storefront-proxied CDN path (`/cdn/shop/…`, `/s/files/…`),
//! - the URL shares its origin with the store (relative image paths on a
//!   storefront are served through the store's CDN proxy).
//!
//! Everything else passes through untouched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use crate::client::extract_store_origin;

/// Replacement size token for CDN image URLs.
pub const HIGH_RES_TOKEN: &str = "2048x2048";

/// Size tiers in image file names: the named words Shopify recognizes plus
/// explicit dimensions (`400x`, `x300`, `2048x2048`). Delimited by `_` on the
/// left and `_`, `.` or `@` on the right.
static SIZE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"_(pico|icon|thumb|small|compact|medium|large|grande|original|\d+x\d*|x\d+)[_.@]",
    )
    .expect("valid size suffix regex")
});

const CDN_PATH_PREFIXES: [&str; 2] = ["/cdn/shop/", "/s/files/"];

/// Normalizes a scraped image `src` against the store page at `base_url`.
///
/// Returns `None` when `src` is blank or cannot be made absolute.
#[must_use]
pub fn normalize_image_url(base_url: &str, src: &str) -> Option<String> {
    let origin = extract_store_origin(base_url);
    let mut url = absolutize(&origin, src)?;
    if is_shopify_cdn(&url, &origin) {
        rewrite_size_suffix(&mut url);
    }
    Some(url.to_string())
}

fn absolutize(origin: &str, src: &str) -> Option<Url> {
    let src = src.trim().replace("&amp;", "&");
    if src.is_empty() {
        return None;
    }
    if src.starts_with("//") {
        return Url::parse(&format!("https:{src}")).ok();
    }
    if let Ok(url) = Url::parse(&src) {
        return Some(url);
    }
    let base = Url::parse(origin)
        .map_err(|e| {
            tracing::debug!(origin, src, error = %e, "cannot resolve relative image URL");
        })
        .ok()?;
    base.join(&src).ok()
}

fn is_shopify_cdn(url: &Url, store_origin: &str) -> bool {
    let host_match = url.host_str().is_some_and(|host| {
        host == "cdn.shopify.com"
            || host.ends_with(".shopifycdn.com")
            || host.ends_with(".shopifycdn.net")
    });
    host_match
        || CDN_PATH_PREFIXES.iter().any(|p| url.path().starts_with(p))
        || url.origin().ascii_serialization() == store_origin
}

/// Rewrites the size tier of the file name (the last path segment). When
/// the name holds several tier-like words the last one is the tier; an
/// earlier one belongs to the stem (`logo_icon_small.jpg`). A file whose
/// last tier is already a dimension is left alone, which keeps the rewrite
/// idempotent.
fn rewrite_size_suffix(url: &mut Url) {
    let path = url.path().to_owned();
    let (dir, file) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
    let Some(tier) = last_size_tier(file) else {
        return;
    };
    if !is_named_tier(&file[tier.clone()]) {
        return;
    }
    let file = format!("{}{HIGH_RES_TOKEN}{}", &file[..tier.start], &file[tier.end..]);
    url.set_path(&format!("{dir}/{file}"));
}

/// Byte range of the last size tier in `file`. Matches may share a `_`
/// delimiter, so each search resumes at the end of the previous tier.
fn last_size_tier(file: &str) -> Option<Range<usize>> {
    let mut last = None;
    let mut start = 0;
    while let Some(tier) = SIZE_SUFFIX_RE
        .captures_at(file, start)
        .and_then(|caps| caps.get(1))
    {
        start = tier.end();
        last = Some(tier.range());
    }
    last
}

fn is_named_tier(tier: &str) -> bool {
    !tier.bytes().any(|b| b.is_ascii_digit())
}
