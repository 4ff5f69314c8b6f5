//! Product catalog and browsing.
//!
//! The catalog is static data handed to the storefront by a data source:
//! either the built-in seed or a JSON file named in configuration. Proposal
//! seed data for the governance board is loaded through the same helpers.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use foodchain_core::{CurrencyCode, ProductId};

use crate::models::Product;

const SEED_PRODUCTS: &str = include_str!("../data/products.json");

/// Errors loading catalog or proposal data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The data was not valid JSON for the expected records.
    #[error("invalid data: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records share an ID.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: i32 },

    /// A product is priced in a currency the store does not sell in.
    #[error("product {id} is priced in {actual}, expected {expected}")]
    CurrencyMismatch {
        id: i32,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Read and deserialize a JSON data file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Product filter offered alongside the search box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    /// No tag restriction.
    #[default]
    All,
    /// Only products carrying this tag.
    Tag(String),
}

impl ProductFilter {
    /// Filters offered in the storefront, with their labels.
    #[must_use]
    pub fn presets() -> Vec<(Self, &'static str)> {
        vec![
            (Self::All, "All Products"),
            (Self::Tag("halal".to_string()), "Halal"),
            (Self::Tag("organic".to_string()), "Organic"),
            (Self::Tag("local".to_string()), "Local"),
            (Self::Tag("sustainable".to_string()), "Sustainable"),
        ]
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => product.has_tag(tag),
        }
    }
}

impl std::str::FromStr for ProductFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Tag(s.to_lowercase()))
        }
    }
}

/// The set of products on sale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product IDs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "product",
                    id: product.id.as_i32(),
                });
            }
        }
        Ok(Self { products })
    }

    /// The built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled seed data is malformed.
    pub fn seed() -> Result<Self, CatalogError> {
        Self::from_json(SEED_PRODUCTS)
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or contains duplicate IDs.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let catalog = Self::new(read_json(path)?)?;
        tracing::info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Check every product is priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CurrencyMismatch` for the first product that is not.
    pub fn ensure_currency(&self, currency: CurrencyCode) -> Result<(), CatalogError> {
        match self.products.iter().find(|p| p.price.currency_code != currency) {
            Some(product) => Err(CatalogError::CurrencyMismatch {
                id: product.id.as_i32(),
                expected: currency.code(),
                actual: product.price.currency_code.code(),
            }),
            None => Ok(()),
        }
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose name or vendor contains `query` (case-insensitive)
    /// and that pass `filter`. An empty query matches everything.
    #[must_use]
    pub fn search(&self, query: &str, filter: &ProductFilter) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches_text(&needle) && filter.matches(p))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::product::tests::product;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_seed_loads() {
        let catalog = Catalog::seed().unwrap();
        assert_eq!(catalog.len(), 6);
        let avocados = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(avocados.name, "Organic Avocados");
        assert_eq!(avocados.supply_chain.len(), 3);
    }

    #[test]
    fn test_search_by_name_and_vendor() {
        let catalog = Catalog::seed().unwrap();
        let hits = catalog.search("ORGANIC", &ProductFilter::All);
        assert_eq!(
            names(&hits),
            vec!["Organic Avocados".to_string(), "Organic Blueberries".to_string()]
        );

        let hits = catalog.search("prairie", &ProductFilter::All);
        assert_eq!(names(&hits), vec!["Grass-Fed Beef".to_string()]);
    }

    #[test]
    fn test_filter_by_tag() {
        let catalog = Catalog::seed().unwrap();
        let halal = catalog.search("", &"halal".parse().unwrap());
        assert_eq!(halal.len(), 5);
        assert!(halal.iter().all(|p| p.name != "Wild Salmon Fillet"));

        let sustainable = catalog.search("", &"Sustainable".parse().unwrap());
        assert_eq!(names(&sustainable), vec!["Wild Salmon Fillet".to_string()]);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let catalog = Catalog::seed().unwrap();
        let hits = catalog.search("organic", &ProductFilter::Tag("local".to_string()));
        assert_eq!(names(&hits), vec!["Organic Avocados".to_string()]);
        assert!(catalog.search("caviar", &ProductFilter::All).is_empty());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<ProductFilter>().unwrap(), ProductFilter::All);
        assert_eq!("".parse::<ProductFilter>().unwrap(), ProductFilter::All);
        assert_eq!(
            "Local".parse::<ProductFilter>().unwrap(),
            ProductFilter::Tag("local".to_string())
        );
        assert_eq!(ProductFilter::presets().len(), 5);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![product(1, "A", 100), product(1, "B", 200)]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateId { kind: "product", id: 1 })
        ));
    }

    #[test]
    fn test_ensure_currency() {
        let catalog = Catalog::seed().unwrap();
        assert!(catalog.ensure_currency(CurrencyCode::USD).is_ok());
        assert!(matches!(
            catalog.ensure_currency(CurrencyCode::EUR),
            Err(CatalogError::CurrencyMismatch {
                id: 1,
                expected: "EUR",
                actual: "USD"
            })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load(Path::new("/nonexistent/products.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }
}
