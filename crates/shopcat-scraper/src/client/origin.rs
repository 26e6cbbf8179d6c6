//! URL origin and domain extraction for store URLs.

/// Extracts the scheme+host origin from a store URL.
///
/// Given `"https://shop.example/collections/all"`, returns `"https://shop.example"`.
/// API endpoints and relative image paths always hang off the store root,
/// whatever page the configured URL points at.
#[must_use]
pub fn extract_store_origin(shop_url: &str) -> String {
    reqwest::Url::parse(shop_url).map_or_else(
        |e| {
            tracing::warn!(
                shop_url,
                error = %e,
                "could not parse shop_url as URL, falling back to string split for origin extraction"
            );
            // take "https://host" by splitting on '/' and keeping the first 3 parts
            shop_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Extracts the hostname from a store URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(crate) fn extract_domain(shop_url: &str) -> String {
    reqwest::Url::parse(shop_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| shop_url.to_owned())
}
