//! Integration tests for FoodChain.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p foodchain-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Session gate, cart merging and logout
//! - `storefront_governance` - Voting, proposals and certificates
//! - `storefront_data` - Loading catalog and proposals from files

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use foodchain_core::Quantity;
use foodchain_storefront::config::StorefrontConfig;
use foodchain_storefront::models::{LoginMethod, WalletKind};
use foodchain_storefront::state::AppState;

/// Login method used when a test just needs someone signed in.
pub const DEFAULT_LOGIN: LoginMethod = LoginMethod::Wallet(WalletKind::MetaMask);

/// Configuration with instant logins and the built-in seed data.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        wallet_connect_delay: Duration::ZERO,
        social_login_delay: Duration::ZERO,
        ..StorefrontConfig::default()
    }
}

/// Fresh, signed-out state over the seed data.
///
/// # Panics
///
/// Panics if the bundled seed data fails to load.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_state() -> AppState {
    AppState::new(test_config()).expect("seed data should load")
}

/// Fresh state with a wallet session already started.
///
/// # Panics
///
/// Panics if the seed data fails to load or the login is rejected.
#[allow(clippy::expect_used)]
pub async fn signed_in_state() -> AppState {
    let state = test_state();
    state.login(DEFAULT_LOGIN).await.expect("login should succeed");
    state
}

/// Shorthand for a non-zero quantity.
///
/// # Panics
///
/// Panics if `n` is zero.
#[must_use]
#[allow(clippy::expect_used)]
pub fn qty(n: u32) -> Quantity {
    Quantity::new(n).expect("quantity must be non-zero")
}

/// Write `contents` to a temporary JSON file.
///
/// The file is deleted when the returned handle is dropped.
///
/// # Panics
///
/// Panics if the file cannot be created or written.
#[must_use]
#[allow(clippy::expect_used)]
pub fn temp_json(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("foodchain-")
        .suffix(".json")
        .tempfile()
        .expect("temp file should be creatable");
    file.write_all(contents.as_bytes())
        .expect("temp file should be writable");
    file.flush().expect("temp file should flush");
    file
}
