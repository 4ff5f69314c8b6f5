//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! foodchain products --search farm --filter organic
//! foodchain product 1
//! ```

use foodchain_core::ProductId;
use foodchain_storefront::catalog::{Catalog, ProductFilter};
use foodchain_storefront::error::AppError;
use foodchain_storefront::models::Product;

/// One-line summary of a product for listings.
pub fn product_row(product: &Product) -> String {
    format!(
        "{:>3}  {:<24} {:>8}  {:<22} ★ {:.1} ({})  [{}]",
        product.id,
        product.name,
        product.price.to_string(),
        product.vendor,
        product.rating,
        product.reviews,
        product.tags.join(", ")
    )
}

/// Full product detail including the supply-chain trail.
pub fn product_detail(product: &Product) -> String {
    let mut out = format!(
        "{} ({})\n{}\n\nVendor:         {}\nOrigin:         {}\nPrice:          {}\nRating:         {:.1} from {} reviews\nCertifications: {}\nTags:           {}\n",
        product.name,
        product.id,
        product.description,
        product.vendor,
        product.origin,
        product.price,
        product.rating,
        product.reviews,
        product.certifications.join(", "),
        product.tags.join(", "),
    );

    out.push_str("\nSupply chain:\n");
    for step in &product.supply_chain {
        let mark = if step.verified { "✓" } else { "…" };
        out.push_str(&format!(
            "  {mark} {}. {:<12} {:<28} {}\n",
            step.id, step.step, step.location, step.timestamp
        ));
    }
    if product.supply_chain_verified() {
        out.push_str("  All steps verified\n");
    }
    out
}

/// Filter bar with the active filter bracketed.
pub fn filter_bar(active: &ProductFilter) -> String {
    ProductFilter::presets()
        .into_iter()
        .map(|(filter, label)| {
            if &filter == active {
                format!("[{label}]")
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Print products matching `search` and `filter`.
#[allow(clippy::print_stdout)]
pub fn list(catalog: &Catalog, search: &str, filter: &ProductFilter) {
    println!("{}", filter_bar(filter));
    let products = catalog.search(search, filter);
    if products.is_empty() {
        println!("No products match.");
        return;
    }
    for product in products {
        println!("{}", product_row(product));
    }
}

/// Print one product.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the catalog.
#[allow(clippy::print_stdout)]
pub fn show(catalog: &Catalog, id: ProductId) -> Result<(), AppError> {
    let product = catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;
    println!("{}", product_detail(product));
    Ok(())
}
