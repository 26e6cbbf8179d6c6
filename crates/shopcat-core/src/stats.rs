//! Aggregate statistics over collected catalog products.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::products::CatalogProduct;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Number of variants with a positive price.
    pub priced_variants: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStats {
    pub product_count: usize,
    pub variant_count: usize,
    pub available_variant_count: usize,
    pub variants_with_image: usize,
    pub variants_without_image: usize,
    /// Products where no variant resolved an image.
    pub products_without_variant_image: usize,
    pub distinct_image_count: usize,
    pub price: Option<PriceSummary>,
    pub vendors: BTreeMap<String, usize>,
    pub product_types: BTreeMap<String, usize>,
}

impl CatalogStats {
    #[must_use]
    pub fn from_products(products: &[CatalogProduct]) -> Self {
        let mut stats = Self {
            product_count: products.len(),
            ..Self::default()
        };
        let mut images: HashSet<&str> = HashSet::new();
        let mut price_sum = 0.0_f64;
        let mut price_bounds: Option<(f64, f64)> = None;
        let mut priced = 0usize;

        for product in products {
            stats.variant_count += product.variants.len();
            if !product.has_any_variant_image() {
                stats.products_without_variant_image += 1;
            }

            let vendor = product.vendor.as_deref().unwrap_or("(none)");
            *stats.vendors.entry(vendor.to_string()).or_default() += 1;
            let product_type = product.product_type.as_deref().unwrap_or("(none)");
            *stats
                .product_types
                .entry(product_type.to_string())
                .or_default() += 1;

            images.extend(product.images.iter().map(String::as_str));

            for resolved in &product.variants {
                if resolved.variant.available.unwrap_or(true) {
                    stats.available_variant_count += 1;
                }
                match resolved.image.as_deref() {
                    Some(url) => {
                        stats.variants_with_image += 1;
                        images.insert(url);
                    }
                    None => stats.variants_without_image += 1,
                }

                let price = resolved.variant.price;
                if price > 0.0 {
                    priced += 1;
                    price_sum += price;
                    price_bounds = Some(match price_bounds {
                        None => (price, price),
                        Some((lo, hi)) => (lo.min(price), hi.max(price)),
                    });
                }
            }
        }

        stats.distinct_image_count = images.len();
        #[allow(clippy::cast_precision_loss)] // variant counts stay far below 2^52
        let mean = if priced == 0 { 0.0 } else { price_sum / priced as f64 };
        stats.price = price_bounds.map(|(min, max)| PriceSummary {
            min,
            max,
            mean,
            priced_variants: priced,
        });
        stats
    }
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "products:                 {}", self.product_count)?;
        writeln!(f, "variants:                 {}", self.variant_count)?;
        writeln!(f, "  available:              {}", self.available_variant_count)?;
        writeln!(f, "  with image:             {}", self.variants_with_image)?;
        writeln!(f, "  without image:          {}", self.variants_without_image)?;
        writeln!(
            f,
            "products w/o any image:   {}",
            self.products_without_variant_image
        )?;
        writeln!(f, "distinct images:          {}", self.distinct_image_count)?;
        match &self.price {
            Some(p) => writeln!(
                f,
                "price:                    min {:.2} / max {:.2} / mean {:.2} ({} priced)",
                p.min, p.max, p.mean, p.priced_variants
            )?,
            None => writeln!(f, "price:                    n/a")?,
        }
        writeln!(f, "vendors:")?;
        for (vendor, count) in &self.vendors {
            writeln!(f, "  {vendor}: {count}")?;
        }
        writeln!(f, "product types:")?;
        for (product_type, count) in &self.product_types {
            writeln!(f, "  {product_type}: {count}")?;
        }
        Ok(())
    }
}
