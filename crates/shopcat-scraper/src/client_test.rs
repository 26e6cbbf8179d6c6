use super::*;

#[test]
fn products_url_without_cursor() {
    let url =
        ShopifyClient::products_url("https://shop.example/collections/all", 250, None).unwrap();
    assert_eq!(url, "https://shop.example/products.json?limit=250");
}

#[test]
fn products_url_with_cursor() {
    let url = ShopifyClient::products_url(
        "https://shop.example/collections/all",
        250,
        Some("eyJsYXN0X2lkIjo2fQ"),
    )
    .unwrap();
    assert_eq!(
        url,
        "https://shop.example/products.json?limit=250&page_info=eyJsYXN0X2lkIjo2fQ"
    );
}

#[test]
fn products_url_strips_trailing_slash() {
    let url = ShopifyClient::products_url("https://shop.example/", 50, None).unwrap();
    assert_eq!(url, "https://shop.example/products.json?limit=50");
}

#[test]
fn products_url_keeps_non_default_port() {
    let url = ShopifyClient::products_url("http://127.0.0.1:8080/products/x", 10, None).unwrap();
    assert_eq!(url, "http://127.0.0.1:8080/products.json?limit=10");
}

#[test]
fn products_url_rejects_invalid_origin() {
    let result = ShopifyClient::products_url("not-a-url", 250, None);
    let err = result.unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidShopUrl { .. }),
        "expected InvalidShopUrl, got: {err:?}"
    );
}

#[test]
fn parse_origin_url_appends_path() {
    let url = parse_origin_url("https://shop.example/pages/about", "/api/2024-01/graphql.json")
        .unwrap();
    assert_eq!(url.as_str(), "https://shop.example/api/2024-01/graphql.json");
}

#[test]
fn extract_store_origin_strips_path() {
    assert_eq!(
        extract_store_origin("https://shop.example/collections/all"),
        "https://shop.example"
    );
}

#[test]
fn extract_store_origin_bare_domain() {
    assert_eq!(
        extract_store_origin("https://shop.example"),
        "https://shop.example"
    );
}

#[test]
fn extract_store_origin_trailing_slash() {
    assert_eq!(
        extract_store_origin("https://shop.example/"),
        "https://shop.example"
    );
}

#[test]
fn extract_domain_strips_scheme_and_path() {
    assert_eq!(extract_domain("https://shop.example"), "shop.example");
    assert_eq!(
        extract_domain("http://us.store.example/products/tee"),
        "us.store.example"
    );
}

#[test]
fn extract_domain_fallback_no_scheme() {
    assert_eq!(extract_domain("shop.example"), "shop.example");
}
