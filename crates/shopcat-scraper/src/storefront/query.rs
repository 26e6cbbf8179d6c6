/// Paged product listing. Nested connections are capped at 250, the
/// Storefront API maximum; products with more images or variants are
/// truncated.
pub(crate) const PRODUCTS_QUERY: &str = r"
query Products($first: Int!, $after: String) {
  products(first: $first, after: $after) {
    pageInfo {
      hasNextPage
      endCursor
    }
    edges {
      cursor
      node {
        id
        handle
        title
        vendor
        productType
        tags
        onlineStoreUrl
        featuredImage {
          url
        }
        images(first: 250) {
          nodes {
            url
          }
        }
        variants(first: 250) {
          nodes {
            id
            title
            sku
            availableForSale
            price {
              amount
              currencyCode
            }
            compareAtPrice {
              amount
              currencyCode
            }
            selectedOptions {
              name
              value
            }
            image {
              url
            }
          }
        }
      }
    }
  }
}
";
