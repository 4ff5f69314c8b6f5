//! Session gate and cart manager.
//!
//! `Shop` owns the session, the cart and the governance board. Every action
//! that needs a signed-in user goes through [`Shop::require_session`], which
//! reports `AppError::AuthRequired` instead of acting. Logout clears the
//! session and the cart together, so a cart never outlives its session.

use chrono::NaiveDate;
use tracing::instrument;

use foodchain_core::{ProposalId, Quantity, VoteChoice};

use crate::error::{AppError, Result};
use crate::models::{
    Cart, Certificate, CurrentUser, GatedAction, Product, Proposal, ProposalDraft, VoteReceipt,
};
use crate::services::governance::GovernanceBoard;

/// Mutable storefront state for one browser session.
#[derive(Debug, Default)]
pub struct Shop {
    session: Option<CurrentUser>,
    cart: Cart,
    board: GovernanceBoard,
}

impl Shop {
    /// Create a signed-out shop with an empty cart.
    #[must_use]
    pub fn new(board: GovernanceBoard) -> Self {
        Self {
            session: None,
            cart: Cart::new(),
            board,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&CurrentUser> {
        self.session.as_ref()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The signed-in user, or `AuthRequired` for `action`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AuthRequired` when nobody is signed in.
    pub fn require_session(&self, action: GatedAction) -> Result<&CurrentUser> {
        self.session
            .as_ref()
            .ok_or(AppError::AuthRequired { action })
    }

    /// Start a session for `user`.
    ///
    /// Signing in over an existing session replaces it and empties the cart.
    pub fn sign_in(&mut self, user: CurrentUser) -> &CurrentUser {
        if let Some(previous) = self.session.take() {
            tracing::info!(previous = %previous.wallet, "Replacing existing session");
            self.cart.clear();
        }
        self.session.insert(user)
    }

    /// End the session and empty the cart.
    ///
    /// Returns the user that was signed in, if any.
    pub fn logout(&mut self) -> Option<CurrentUser> {
        self.cart.clear();
        self.session.take()
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total units in the cart, for the badge.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AuthRequired` without touching the cart when nobody
    /// is signed in.
    #[instrument(skip(self, product), fields(product_id = %product.id, quantity = %quantity))]
    pub fn add_to_cart(&mut self, product: &Product, quantity: Quantity) -> Result<&Cart> {
        self.require_session(GatedAction::AddToCart)?;

        let line_quantity = self.cart.add(product, quantity);
        tracing::info!(
            line_quantity = %line_quantity,
            cart_items = self.cart.total_quantity(),
            "Added {quantity} {} to cart",
            product.name
        );
        Ok(&self.cart)
    }

    /// The governance board.
    #[must_use]
    pub const fn board(&self) -> &GovernanceBoard {
        &self.board
    }

    /// The signed-in user's ballot on proposal `id`, if any.
    #[must_use]
    pub fn ballot(&self, id: ProposalId) -> Option<VoteChoice> {
        self.session
            .as_ref()
            .and_then(|user| self.board.ballot(id, &user.wallet))
    }

    /// Vote on proposal `id` as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AuthRequired` when nobody is signed in, or any error
    /// from [`GovernanceBoard::record_vote`].
    #[instrument(skip(self), fields(proposal_id = %id, choice = %choice))]
    pub fn vote(&mut self, id: ProposalId, choice: VoteChoice) -> Result<VoteReceipt> {
        let voter = self.require_session(GatedAction::Vote)?.wallet.clone();
        let receipt = self.board.record_vote(id, &voter, choice)?;
        tracing::info!(voter = %voter, "Vote recorded");
        Ok(receipt)
    }

    /// Submit a new proposal as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AuthRequired` when nobody is signed in, or
    /// `AppError::BadRequest` for an incomplete draft.
    #[instrument(skip(self, draft), fields(category = %draft.category))]
    pub fn create_proposal(&mut self, draft: ProposalDraft, today: NaiveDate) -> Result<&Proposal> {
        let author = self.require_session(GatedAction::CreateProposal)?.wallet.clone();
        let proposal = self.board.submit(draft, today)?;
        tracing::info!(proposal_id = %proposal.id, author = %author, "Proposal created");
        Ok(proposal)
    }

    /// Mint a provenance certificate for `product` to the signed-in wallet.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AuthRequired` when nobody is signed in.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn mint_certificate(&self, product: &Product) -> Result<Certificate> {
        let owner = self.require_session(GatedAction::MintCertificate)?;
        let certificate = Certificate::issue(product, owner);
        tracing::info!(token_id = %certificate.token_id, owner = %owner.wallet, "Certificate minted");
        Ok(certificate)
    }
}
