//! Multi-page product fetch loops for `ShopifyClient`.

use std::time::Duration;

use crate::error::ScraperError;
use crate::pagination::extract_next_cursor;
use crate::types::ShopifyProduct;

use super::{ShopifyClient, BROWSER_FALLBACK_UA, MAX_PAGES};

impl ShopifyClient {
    /// Fetches all products from a store by following `Link` header cursors
    /// until no `rel="next"` link is present.
    ///
    /// `inter_request_delay_ms` is slept between pages (not before the first).
    ///
    /// On any page failure the products fetched so far are discarded and
    /// the error is returned; a partial catalog would silently look like
    /// delisted products downstream.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`].
    /// Returns [`ScraperError::PaginationLimit`] past [`MAX_PAGES`] pages.
    pub async fn fetch_all_products(
        &self,
        shop_url: &str,
        limit: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<ShopifyProduct>, ScraperError> {
        self.fetch_all_with_user_agent(shop_url, limit, inter_request_delay_ms, None)
            .await
    }

    /// Same as [`Self::fetch_all_products`] but sends a desktop browser
    /// `User-Agent`, for stores that answer the default agent with 403.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the HTTP request fails or the response cannot be parsed.
    pub async fn fetch_all_products_browser_profile(
        &self,
        shop_url: &str,
        limit: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<ShopifyProduct>, ScraperError> {
        self.fetch_all_with_user_agent(
            shop_url,
            limit,
            inter_request_delay_ms,
            Some(BROWSER_FALLBACK_UA),
        )
        .await
    }

    async fn fetch_all_with_user_agent(
        &self,
        shop_url: &str,
        limit: u32,
        inter_request_delay_ms: u64,
        user_agent: Option<&str>,
    ) -> Result<Vec<ShopifyProduct>, ScraperError> {
        let mut all_products: Vec<ShopifyProduct> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ScraperError::PaginationLimit {
                    shop_url: shop_url.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            if page_count > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let (response, link_header) = self
                .fetch_products_page_with_user_agent(shop_url, limit, cursor.as_deref(), user_agent)
                .await?;

            tracing::debug!(
                shop_url,
                page = page_count,
                products = response.products.len(),
                "fetched products page"
            );
            all_products.extend(response.products);

            cursor = extract_next_cursor(link_header.as_deref());
            if cursor.is_none() {
                break;
            }
        }

        Ok(all_products)
    }
}
