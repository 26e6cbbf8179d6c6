//! Failure modes of catalog collection from a single store.
//!
//! Both collectors (`/products.json` and the Storefront GraphQL API) report
//! through [`ScraperError`]. [`ScraperError::is_transient`] decides what the
//! retry loop may attempt again.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Connection, TLS or timeout failure below the HTTP status layer.
    #[error("request to store failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A body that arrived with a success status but did not parse.
    #[error("malformed response body from {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 429, or a GraphQL error carrying the `THROTTLED` code.
    #[error("{domain} is throttling requests (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    /// The store does not expose the endpoint (usually a non-Shopify site).
    #[error("no catalog endpoint at {url}")]
    NotFound { url: String },

    /// Any other non-2xx status. A 403 here triggers the browser-profile
    /// fallback in the CLI.
    #[error("store answered {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Top-level `errors` from a Storefront GraphQL response. `code` is the
    /// first `extensions.code` present, if any.
    #[error("storefront query rejected by {shop_url}: {messages}")]
    GraphQl {
        shop_url: String,
        messages: String,
        code: Option<String>,
    },

    /// A raw product that cannot become a catalog product.
    #[error("cannot normalize product {source_product_id}: {reason}")]
    Normalization {
        source_product_id: String,
        reason: String,
    },

    /// The page cap was hit before the store reported its last page.
    #[error("{shop_url} still had products after {max_pages} pages")]
    PaginationLimit { shop_url: String, max_pages: usize },

    #[error("unusable shop URL \"{shop_url}\": {reason}")]
    InvalidShopUrl { shop_url: String, reason: String },
}

impl ScraperError {
    /// `true` when repeating the same request may succeed: throttling and
    /// network-level failures. Everything else fails on the first attempt.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Http(_))
    }

    /// HTTP status behind the error, when the store answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_throttling_is_transient_among_store_answers() {
        let throttled = ScraperError::RateLimited {
            domain: "shop.example".to_owned(),
            retry_after_secs: 2,
        };
        let forbidden = ScraperError::UnexpectedStatus {
            status: 403,
            url: "https://shop.example/products.json".to_owned(),
        };
        let rejected = ScraperError::GraphQl {
            shop_url: "https://shop.example".to_owned(),
            messages: "Access denied".to_owned(),
            code: Some("ACCESS_DENIED".to_owned()),
        };

        assert!(throttled.is_transient());
        assert!(!forbidden.is_transient());
        assert!(!rejected.is_transient());
        assert_eq!(throttled.status(), Some(429));
        assert_eq!(forbidden.status(), Some(403));
        assert_eq!(rejected.status(), None);
    }

    #[test]
    fn messages_name_the_store() {
        let err = ScraperError::PaginationLimit {
            shop_url: "https://shop.example".to_owned(),
            max_pages: 200,
        };
        assert_eq!(
            err.to_string(),
            "https://shop.example still had products after 200 pages"
        );

        let err = ScraperError::NotFound {
            url: "https://blog.example/products.json".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "no catalog endpoint at https://blog.example/products.json"
        );
    }
}
