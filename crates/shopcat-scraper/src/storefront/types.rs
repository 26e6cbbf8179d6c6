//! Response types for the Storefront GraphQL `products` query.
//!
//! IDs arrive as global IDs (`gid://shopify/Product/123`). Money amounts are
//! decimal strings in major units. Field names are camelCase on the wire.

use serde::Deserialize;

/// GraphQL envelope. A response may carry `data`, `errors`, or both.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Absent when the request failed outright (throttling, bad token).
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

impl GraphQlError {
    /// Machine-readable error code such as `THROTTLED`, if present.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.code.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: ProductConnection,
}

/// One page of the top-level product listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub page_info: PageInfo,
    #[serde(default)]
    pub edges: Vec<Edge<StorefrontProduct>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    #[serde(default)]
    pub cursor: Option<String>,
    pub node: T,
}

/// Nested connection queried with `nodes { ... }`.
#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontProduct {
    /// Global ID, e.g. `gid://shopify/Product/123`.
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `null` when the product is not published to the online store.
    #[serde(default)]
    pub online_store_url: Option<String>,
    #[serde(default)]
    pub featured_image: Option<StorefrontImage>,
    #[serde(default)]
    pub images: Nodes<StorefrontImage>,
    #[serde(default)]
    pub variants: Nodes<StorefrontVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontImage {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontVariant {
    /// Global ID, e.g. `gid://shopify/ProductVariant/456`.
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    #[serde(default)]
    pub image: Option<StorefrontImage>,
}

/// `MoneyV2`: decimal string amount plus ISO currency code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

fn default_available() -> bool {
    true
}
