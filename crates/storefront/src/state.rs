//! Application state shared across the CLI and tests.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::instrument;

use foodchain_core::{Price, ProductId, ProposalId, Quantity, VoteChoice};

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::models::{
    Cart, Certificate, CurrentUser, GatedAction, LoginMethod, Product, Proposal, ProposalDraft,
    VoteReceipt,
};
use crate::services::{AuthService, GovernanceBoard, Shop};

/// Application state shared across all callers.
///
/// This struct is cheaply cloneable via `Arc`. The session, cart and
/// governance board sit behind one lock, so each operation is observed
/// either entirely or not at all.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    auth: AuthService,
    shop: RwLock<Shop>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the catalog and proposals from the configured files, or the
    /// built-in seed data when no path is set.
    ///
    /// # Errors
    ///
    /// Returns an error if a data file cannot be read or parsed, or if a
    /// product is not priced in the configured currency.
    pub fn new(config: StorefrontConfig) -> std::result::Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::seed()?,
        };
        catalog.ensure_currency(config.currency)?;
        let board = match &config.proposals_path {
            Some(path) => GovernanceBoard::load(path)?,
            None => GovernanceBoard::seed()?,
        };
        Ok(Self::with_data(config, catalog, board))
    }

    /// Create application state from already-loaded data.
    #[must_use]
    pub fn with_data(config: StorefrontConfig, catalog: Catalog, board: GovernanceBoard) -> Self {
        let auth = AuthService::from_config(&config);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                auth,
                shop: RwLock::new(Shop::new(board)),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    fn shop(&self) -> Result<RwLockReadGuard<'_, Shop>> {
        self.inner
            .shop
            .read()
            .map_err(|_| AppError::Internal("shop state lock poisoned".to_string()))
    }

    fn shop_mut(&self) -> Result<RwLockWriteGuard<'_, Shop>> {
        self.inner
            .shop
            .write()
            .map_err(|_| AppError::Internal("shop state lock poisoned".to_string()))
    }

    fn product(&self, id: ProductId) -> Result<&Product> {
        self.inner
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Product {id}")))
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Log in with `method` and start a fresh session.
    ///
    /// The shop lock is not held while the simulated provider is pending.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if another login is still in flight.
    #[instrument(skip(self, method), fields(method = %method))]
    pub async fn login(&self, method: LoginMethod) -> Result<CurrentUser> {
        let user = self.inner.auth.login(method).await?;

        self.shop_mut()?.sign_in(user.clone());
        set_sentry_user(&user.wallet, &user.name);
        add_breadcrumb("auth", "Signed in", Some(&[("method", method.to_string().as_str())]));
        Ok(user)
    }

    /// End the session and empty the cart in one step.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the state lock is poisoned.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<Option<CurrentUser>> {
        let previous = self.shop_mut()?.logout();
        clear_sentry_user();
        if let Some(user) = &previous {
            tracing::info!(wallet = %user.wallet, "Logged out");
        }
        Ok(previous)
    }

    /// The signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the state lock is poisoned.
    pub fn session(&self) -> Result<Option<CurrentUser>> {
        Ok(self.shop()?.session().cloned())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of product `id` to the cart.
    ///
    /// Returns a snapshot of the cart after the change.
    ///
    /// # Errors
    ///
    /// - `AppError::AuthRequired` if nobody is signed in, whatever `id` is
    /// - `AppError::NotFound` if the product is not in the catalog
    #[instrument(skip(self), fields(product_id = %id, quantity = %quantity))]
    pub fn add_to_cart(&self, id: ProductId, quantity: Quantity) -> Result<Cart> {
        let cart = {
            let mut shop = self.shop_mut()?;
            shop.require_session(GatedAction::AddToCart)?;
            shop.add_to_cart(self.product(id)?, quantity)?.clone()
        };

        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[
                ("product_id", id.to_string().as_str()),
                ("quantity", quantity.to_string().as_str()),
            ]),
        );
        Ok(cart)
    }

    /// Snapshot of the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the state lock is poisoned.
    pub fn cart(&self) -> Result<Cart> {
        Ok(self.shop()?.cart().clone())
    }

    /// Total units in the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the state lock is poisoned.
    pub fn cart_item_count(&self) -> Result<u64> {
        Ok(self.shop()?.cart_item_count())
    }

    /// Cart subtotal in the configured currency.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the state lock is poisoned or a line
    /// is priced in another currency.
    pub fn cart_subtotal(&self) -> Result<Price> {
        let currency = self.inner.config.currency;
        self.shop()?.cart().subtotal(currency).ok_or_else(|| {
            AppError::Internal(format!("cart holds prices not in {}", currency.code()))
        })
    }

    // =========================================================================
    // Provenance
    // =========================================================================

    /// Mint a provenance certificate for product `id`.
    ///
    /// # Errors
    ///
    /// - `AppError::AuthRequired` if nobody is signed in, whatever `id` is
    /// - `AppError::NotFound` if the product is not in the catalog
    pub fn mint_certificate(&self, id: ProductId) -> Result<Certificate> {
        let shop = self.shop()?;
        shop.require_session(GatedAction::MintCertificate)?;
        shop.mint_certificate(self.product(id)?)
    }

    // =========================================================================
    // Governance
    // =========================================================================

    /// Snapshot of all proposals.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the state lock is poisoned.
    pub fn proposals(&self) -> Result<Vec<Proposal>> {
        Ok(self.shop()?.board().proposals().to_vec())
    }

    /// The signed-in user's ballot on proposal `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the state lock is poisoned.
    pub fn ballot(&self, id: ProposalId) -> Result<Option<VoteChoice>> {
        Ok(self.shop()?.ballot(id))
    }

    /// Vote on proposal `id`.
    ///
    /// # Errors
    ///
    /// - `AppError::AuthRequired` if nobody is signed in
    /// - `AppError::NotFound`, `BadRequest` or `Conflict` from the board
    pub fn vote(&self, id: ProposalId, choice: VoteChoice) -> Result<VoteReceipt> {
        let receipt = self.shop_mut()?.vote(id, choice)?;
        add_breadcrumb(
            "governance",
            "Vote recorded",
            Some(&[
                ("proposal_id", id.to_string().as_str()),
                ("choice", choice.to_string().as_str()),
            ]),
        );
        Ok(receipt)
    }

    /// Create a proposal that opens for voting today.
    ///
    /// # Errors
    ///
    /// - `AppError::AuthRequired` if nobody is signed in
    /// - `AppError::BadRequest` if the draft is incomplete
    pub fn create_proposal(&self, draft: ProposalDraft) -> Result<Proposal> {
        let today = Utc::now().date_naive();
        Ok(self.shop_mut()?.create_proposal(draft, today)?.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use foodchain_core::{ProposalCategory, ProposalStatus};

    use super::*;
    use crate::models::{GatedAction, SocialProvider, WalletKind};

    fn state() -> AppState {
        let config = StorefrontConfig {
            wallet_connect_delay: Duration::ZERO,
            social_login_delay: Duration::ZERO,
            ..StorefrontConfig::default()
        };
        AppState::new(config).unwrap()
    }

    const METAMASK: LoginMethod = LoginMethod::Wallet(WalletKind::MetaMask);

    #[tokio::test]
    async fn test_login_starts_session() {
        let state = state();
        assert!(state.session().unwrap().is_none());

        let user = state.login(METAMASK).await.unwrap();
        assert_eq!(state.session().unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_add_to_cart_and_logout() {
        let state = state();
        state.login(METAMASK).await.unwrap();

        state.add_to_cart(ProductId::new(1), Quantity::ONE).unwrap();
        let cart = state
            .add_to_cart(ProductId::new(2), Quantity::new(2).unwrap())
            .unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(state.cart_item_count().unwrap(), 3);

        state.logout().unwrap();
        assert!(state.session().unwrap().is_none());
        assert!(state.cart().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let state = state();
        state.login(METAMASK).await.unwrap();
        let err = state.add_to_cart(ProductId::new(99), Quantity::ONE).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_session_checked_before_product_lookup() {
        let state = state();

        let add = state.add_to_cart(ProductId::new(404), Quantity::ONE).unwrap_err();
        assert!(matches!(
            add,
            AppError::AuthRequired {
                action: GatedAction::AddToCart
            }
        ));

        let mint = state.mint_certificate(ProductId::new(404)).unwrap_err();
        assert!(matches!(
            mint,
            AppError::AuthRequired {
                action: GatedAction::MintCertificate
            }
        ));
    }

    #[test]
    fn test_catalog_must_match_configured_currency() {
        let config = StorefrontConfig {
            currency: foodchain_core::CurrencyCode::EUR,
            ..StorefrontConfig::default()
        };
        assert!(matches!(
            AppState::new(config),
            Err(CatalogError::CurrencyMismatch { expected: "EUR", .. })
        ));
    }

    #[test]
    fn test_add_without_session() {
        let state = state();
        let err = state.add_to_cart(ProductId::new(1), Quantity::ONE).unwrap_err();
        assert!(matches!(
            err,
            AppError::AuthRequired {
                action: GatedAction::AddToCart
            }
        ));
        assert_eq!(state.cart_item_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_subtotal_uses_catalog_prices() {
        let state = state();
        state.login(LoginMethod::Social(SocialProvider::Google)).await.unwrap();
        state
            .add_to_cart(ProductId::new(1), Quantity::new(2).unwrap())
            .unwrap();

        let unit = state.catalog().get(ProductId::new(1)).unwrap().price.amount;
        let expected = unit * rust_decimal::Decimal::from(2);
        assert_eq!(state.cart_subtotal().unwrap().amount, expected);
    }

    #[tokio::test]
    async fn test_create_proposal_ends_after_duration() {
        let state = state();
        state.login(METAMASK).await.unwrap();

        let draft = ProposalDraft::new(ProposalCategory::Tag, "Add 'Fair Trade'", "New tag");
        let proposal = state.create_proposal(draft).unwrap();

        assert_eq!(proposal.status, ProposalStatus::Active);
        let days = (proposal.end_date - Utc::now().date_naive()).num_days();
        assert!((6..=7).contains(&days));
        assert_eq!(state.proposals().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_vote_and_mint() {
        let state = state();
        let user = state.login(METAMASK).await.unwrap();

        state.vote(ProposalId::new(2), VoteChoice::For).unwrap();
        assert_eq!(state.ballot(ProposalId::new(2)).unwrap(), Some(VoteChoice::For));

        let certificate = state.mint_certificate(ProductId::new(4)).unwrap();
        assert_eq!(certificate.owner, user.wallet);
    }
}
