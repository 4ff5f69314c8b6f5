//! Catalog product types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use foodchain_core::{Price, ProductId, Quantity, SupplyStepId};

/// One hop in a product's supply chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainStep {
    /// Position of the step within the product's trail.
    pub id: SupplyStepId,
    /// What happened (e.g., "Harvested", "Shipped").
    pub step: String,
    /// Where it happened.
    pub location: String,
    /// Day the step was recorded.
    pub timestamp: NaiveDate,
    /// Whether the step carries a (simulated) verification.
    pub verified: bool,
}

/// A product offered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Product image URL.
    pub image: String,
    /// Producer selling the product.
    pub vendor: String,
    /// Filterable tags (e.g., "organic", "halal").
    pub tags: Vec<String>,
    /// Where the product comes from.
    pub origin: String,
    /// Certifications held by the product.
    pub certifications: Vec<String>,
    /// Long-form description.
    pub description: String,
    /// Average review rating on a 0-5 scale.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub reviews: u32,
    /// Ordered supply-chain trail, farm to shelf.
    #[serde(default)]
    pub supply_chain: Vec<SupplyChainStep>,
}

impl Product {
    /// Whether the product carries `tag` (case-insensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether the name or vendor contains `needle`.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.vendor.to_lowercase().contains(needle)
    }

    /// Price of `quantity` units of this product.
    #[must_use]
    pub fn line_total(&self, quantity: Quantity) -> Price {
        self.price.times(quantity)
    }

    /// True when every recorded supply-chain step is verified.
    ///
    /// A product without a trail is not considered verified.
    #[must_use]
    pub fn supply_chain_verified(&self) -> bool {
        !self.supply_chain.is_empty() && self.supply_chain.iter().all(|s| s.verified)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use foodchain_core::CurrencyCode;

    /// Build a minimal product for tests.
    pub(crate) fn product(id: i32, name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_cents(cents, CurrencyCode::USD),
            image: String::new(),
            vendor: "Test Farm".to_string(),
            tags: vec!["organic".to_string(), "local".to_string()],
            origin: "Nowhere".to_string(),
            certifications: Vec::new(),
            description: String::new(),
            rating: 4.5,
            reviews: 10,
            supply_chain: vec![SupplyChainStep {
                id: SupplyStepId::new(1),
                step: "Harvested".to_string(),
                location: "Test Farm".to_string(),
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                verified: true,
            }],
        }
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let p = product(1, "Avocados", 1299);
        assert!(p.has_tag("Organic"));
        assert!(!p.has_tag("halal"));
    }

    #[test]
    fn test_matches_text_name_or_vendor() {
        let p = product(1, "Organic Avocados", 1299);
        assert!(p.matches_text("avocado"));
        assert!(p.matches_text("test farm"));
        assert!(p.matches_text(""));
        assert!(!p.matches_text("salmon"));
    }

    #[test]
    fn test_line_total() {
        let p = product(1, "Avocados", 1299);
        assert_eq!(p.line_total(Quantity::new(2).unwrap()).to_string(), "$25.98");
    }

    #[test]
    fn test_supply_chain_verified() {
        let mut p = product(1, "Avocados", 1299);
        assert!(p.supply_chain_verified());

        p.supply_chain[0].verified = false;
        assert!(!p.supply_chain_verified());

        p.supply_chain.clear();
        assert!(!p.supply_chain_verified());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": 9, "name": "Honey", "price": {"amount": "16.99"},
            "image": "", "vendor": "Hive", "tags": ["raw"], "origin": "VT",
            "certifications": [], "description": "", "rating": 4.8, "reviews": 92,
            "supplyChain": [{"id": 1, "step": "Collected", "location": "VT",
                             "timestamp": "2024-01-13", "verified": true}]
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProductId::new(9));
        assert_eq!(p.supply_chain.len(), 1);
        assert_eq!(p.price.to_string(), "$16.99");
    }
}
