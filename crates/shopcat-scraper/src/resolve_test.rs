use super::*;

const BASE: &str = "https://shop.example";

fn variant(id: Option<&str>) -> RawVariant {
    RawVariant {
        id: id.map(str::to_owned),
        price: 10.0,
        ..RawVariant::default()
    }
}

fn featured(id: &str, src: &str) -> RawVariant {
    RawVariant {
        featured_image_src: Some(src.to_owned()),
        ..variant(Some(id))
    }
}

fn images_of(resolved: &[ResolvedVariant]) -> Vec<Option<&str>> {
    resolved.iter().map(|r| r.image.as_deref()).collect()
}

// -----------------------------------------------------------------------
// rule order
// -----------------------------------------------------------------------

#[test]
fn scenario_mapped_and_fallback_share_first_image() {
    let images = vec![RawImage::new("/a_small_.jpg").with_variant_ids(["9"])];
    let variants = vec![variant(Some("9")), variant(Some("10"))];

    let resolved = resolve_variants(&images, variants, BASE);

    assert_eq!(
        images_of(&resolved),
        vec![
            Some("https://shop.example/a_2048x2048_.jpg"),
            Some("https://shop.example/a_2048x2048_.jpg"),
        ]
    );
}

#[test]
fn featured_image_wins_over_mapping() {
    let images = vec![
        RawImage::new("https://cdn.shopify.com/s/files/gallery.jpg"),
        RawImage::new("https://cdn.shopify.com/s/files/mapped.jpg").with_variant_ids(["1"]),
    ];
    let variants = vec![featured("1", "https://cdn.shopify.com/s/files/own_medium.jpg")];

    let resolved = resolve_variants(&images, variants, BASE);

    assert_eq!(
        resolved[0].image.as_deref(),
        Some("https://cdn.shopify.com/s/files/own_2048x2048.jpg")
    );
}

#[test]
fn mapping_wins_over_first_image() {
    let images = vec![
        RawImage::new("https://cdn.shopify.com/s/files/first.jpg"),
        RawImage::new("https://cdn.shopify.com/s/files/blue.jpg").with_variant_ids(["2"]),
    ];
    let resolved = resolve_variants(&images, vec![variant(Some("2"))], BASE);
    assert_eq!(
        resolved[0].image.as_deref(),
        Some("https://cdn.shopify.com/s/files/blue.jpg")
    );
}

#[test]
fn last_mapped_image_wins() {
    let images = vec![
        RawImage::new("https://cdn.shopify.com/s/files/one.jpg").with_variant_ids(["5", "6"]),
        RawImage::new("https://cdn.shopify.com/s/files/two.jpg").with_variant_ids(["5"]),
    ];
    let resolved = resolve_variants(&images, vec![variant(Some("5")), variant(Some("6"))], BASE);
    assert_eq!(
        images_of(&resolved),
        vec![
            Some("https://cdn.shopify.com/s/files/two.jpg"),
            Some("https://cdn.shopify.com/s/files/one.jpg"),
        ]
    );
}

#[test]
fn unmatched_variant_falls_back_to_first_image() {
    let images = vec![
        RawImage::new("https://cdn.shopify.com/s/files/first.jpg"),
        RawImage::new("https://cdn.shopify.com/s/files/red.jpg").with_variant_ids(["1"]),
    ];
    let resolved = resolve_variants(&images, vec![variant(Some("99"))], BASE);
    assert_eq!(
        resolved[0].image.as_deref(),
        Some("https://cdn.shopify.com/s/files/first.jpg")
    );
}

#[test]
fn no_images_yields_none() {
    let resolved = resolve_variants(&[], vec![variant(Some("1")), variant(None)], BASE);
    assert_eq!(images_of(&resolved), vec![None, None]);
}

#[test]
fn variant_without_id_skips_mapping() {
    let images = vec![
        RawImage::new("https://cdn.shopify.com/s/files/first.jpg"),
        RawImage::new("https://cdn.shopify.com/s/files/tagged.jpg").with_variant_ids([""]),
    ];
    let resolved = resolve_variants(&images, vec![variant(None), variant(Some(""))], BASE);
    assert_eq!(
        images_of(&resolved),
        vec![
            Some("https://cdn.shopify.com/s/files/first.jpg"),
            Some("https://cdn.shopify.com/s/files/first.jpg"),
        ]
    );
}

#[test]
fn blank_featured_image_falls_through() {
    let images = vec![RawImage::new("https://cdn.shopify.com/s/files/first.jpg")];
    let resolved = resolve_variants(&images, vec![featured("1", "  ")], BASE);
    assert_eq!(
        resolved[0].image.as_deref(),
        Some("https://cdn.shopify.com/s/files/first.jpg")
    );
}

#[test]
fn unresolvable_featured_image_falls_through() {
    // Relative featured path with an unusable base cannot be made absolute;
    // the absolute gallery image still resolves.
    let images = vec![RawImage::new("https://cdn.shopify.com/s/files/first.jpg")];
    let resolved = resolve_variants(&images, vec![featured("1", "/own.jpg")], "not a url");
    assert_eq!(
        resolved[0].image.as_deref(),
        Some("https://cdn.shopify.com/s/files/first.jpg")
    );
}

// -----------------------------------------------------------------------
// shape guarantees
// -----------------------------------------------------------------------

#[test]
fn preserves_length_order_and_variant_fields() {
    let variants: Vec<RawVariant> = (1..=5)
        .map(|i| RawVariant {
            sku: Some(format!("SKU-{i}")),
            option1: Some(format!("Size {i}")),
            ..variant(Some(i.to_string().as_str()))
        })
        .collect();
    let expected = variants.clone();

    let resolved = resolve_variants(&[], variants, BASE);

    assert_eq!(resolved.len(), 5);
    for (r, v) in resolved.iter().zip(&expected) {
        assert_eq!(&r.variant, v);
    }
}

#[test]
fn every_resolved_image_is_absolute() {
    let images = vec![
        RawImage::new("relative/path_small.jpg").with_variant_ids(["1"]),
        RawImage::new("//cdn.shopify.com/s/files/x.jpg").with_variant_ids(["2"]),
    ];
    let variants = vec![
        variant(Some("1")),
        variant(Some("2")),
        featured("3", "/own.jpg"),
        variant(Some("4")),
    ];
    let resolved = resolve_variants(&images, variants, "https://shop.example/products/hat");
    for r in &resolved {
        let url = r.image.as_deref().expect("every variant should resolve");
        assert!(url.starts_with("https://"), "not absolute: {url}");
    }
    assert_eq!(
        resolved[0].image.as_deref(),
        Some("https://shop.example/relative/path_2048x2048.jpg")
    );
}
