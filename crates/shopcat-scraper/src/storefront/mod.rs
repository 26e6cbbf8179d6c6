//! Client for the Shopify Storefront GraphQL API.
//!
//! Used for stores that expose a public Storefront access token. Shares the
//! retry policy, status mapping, and page cap of the `products.json` client.

mod normalize;
mod query;
pub mod types;

use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use crate::client::{build_http_client, check_status, extract_domain, parse_origin_url, MAX_PAGES};
use crate::error::ScraperError;
use crate::pagination::next_graphql_cursor;
use crate::rate_limit::retry_with_backoff;

pub use normalize::normalize_storefront_product;
use query::PRODUCTS_QUERY;
use types::{GraphQlError, GraphQlResponse, ProductConnection, ProductsData, StorefrontProduct};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Storefront throttling carries no `Retry-After`; the backoff schedule
/// decides the actual wait.
const THROTTLED_RETRY_AFTER_SECS: u64 = 1;

pub struct StorefrontClient {
    client: Client,
    api_version: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl StorefrontClient {
    /// Creates a client pinned to one Storefront API version (e.g. `2024-01`).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        api_version: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            api_version: api_version.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one page of products, retrying transient errors.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 or a `THROTTLED` GraphQL
    ///   error, after retries are exhausted.
    /// - [`ScraperError::GraphQl`]: any other top-level GraphQL error, or a
    ///   response without `data` (not retried).
    /// - [`ScraperError::NotFound`], [`ScraperError::UnexpectedStatus`],
    ///   [`ScraperError::Deserialize`], [`ScraperError::Http`] as for
    ///   [`crate::ShopifyClient::fetch_products_page`].
    pub async fn fetch_products_page(
        &self,
        shop_url: &str,
        access_token: &str,
        first: u32,
        after: Option<&str>,
    ) -> Result<ProductConnection, ScraperError> {
        let url = self.graphql_url(shop_url)?;
        let body = json!({
            "query": PRODUCTS_QUERY,
            "variables": { "first": first, "after": after },
        });

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            let body = &body;
            async move {
                let response = self
                    .client
                    .post(&url)
                    .header(ACCESS_TOKEN_HEADER, access_token)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .json(body)
                    .send()
                    .await?;
                check_status(&response, shop_url, &url)?;

                let text = response.text().await?;
                let parsed = serde_json::from_str::<GraphQlResponse<ProductsData>>(&text)
                    .map_err(|e| ScraperError::Deserialize {
                        context: format!("storefront products page from {shop_url}"),
                        source: e,
                    })?;

                into_products(parsed, shop_url)
            }
        })
        .await
    }

    /// Fetches every product by following `pageInfo.endCursor` until
    /// `hasNextPage` is false.
    ///
    /// Like the `products.json` loop, a failure on any page discards the
    /// products fetched so far.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`].
    /// Returns [`ScraperError::PaginationLimit`] past the page cap.
    pub async fn fetch_all_products(
        &self,
        shop_url: &str,
        access_token: &str,
        first: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<StorefrontProduct>, ScraperError> {
        let mut all_products = Vec::new();
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

            let page = self
                .fetch_products_page(shop_url, access_token, first, cursor.as_deref())
                .await?;

            tracing::debug!(
                shop_url,
                page = page_count,
                products = page.edges.len(),
                "fetched storefront products page"
            );

            cursor = next_graphql_cursor(
                page.page_info.has_next_page,
                page.page_info.end_cursor.as_deref(),
            );
            all_products.extend(page.edges.into_iter().map(|edge| edge.node));

            if cursor.is_none() {
                break;
            }
        }

        Ok(all_products)
    }

    fn graphql_url(&self, shop_url: &str) -> Result<String, ScraperError> {
        let path = format!("/api/{}/graphql.json", self.api_version);
        Ok(parse_origin_url(shop_url, &path)?.to_string())
    }
}

/// Splits a GraphQL envelope into data or a typed error. Throttling is
/// surfaced as [`ScraperError::RateLimited`] so the retry loop backs off.
fn into_products(
    response: GraphQlResponse<ProductsData>,
    shop_url: &str,
) -> Result<ProductConnection, ScraperError> {
    if !response.errors.is_empty() {
        if response
            .errors
            .iter()
            .any(|e| e.code() == Some("THROTTLED"))
        {
            return Err(ScraperError::RateLimited {
                domain: extract_domain(shop_url),
                retry_after_secs: THROTTLED_RETRY_AFTER_SECS,
            });
        }
        return Err(ScraperError::GraphQl {
            shop_url: shop_url.to_owned(),
            messages: join_messages(&response.errors),
            code: response.errors.iter().find_map(|e| e.code()).map(str::to_owned),
        });
    }

    response
        .data
        .map(|data| data.products)
        .ok_or_else(|| ScraperError::GraphQl {
            shop_url: shop_url.to_owned(),
            messages: "response carried neither data nor errors".to_owned(),
            code: None,
        })
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
