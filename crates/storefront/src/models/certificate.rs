//! Simulated provenance certificates.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use foodchain_core::{ProductId, WalletAddress};

use super::{CurrentUser, Product};

/// A provenance certificate "minted" for a product.
///
/// Nothing is written to a chain; the token ID is a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Certificate {
    pub token_id: Uuid,
    pub product_id: ProductId,
    pub product_name: String,
    pub owner: WalletAddress,
    pub supply_chain_verified: bool,
    pub minted_at: DateTime<Utc>,
}

impl Certificate {
    /// Issue a certificate for `product` owned by `user`.
    #[must_use]
    pub fn issue(product: &Product, user: &CurrentUser) -> Self {
        Self {
            token_id: Uuid::new_v4(),
            product_id: product.id,
            product_name: product.name.clone(),
            owner: user.wallet.clone(),
            supply_chain_verified: product.supply_chain_verified(),
            minted_at: Utc::now(),
        }
    }
}
