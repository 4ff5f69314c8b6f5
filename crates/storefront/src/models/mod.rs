//! Domain models for the storefront.
//!
//! # Models
//!
//! - [`product`] - Catalog records and their supply-chain trail
//! - [`cart`] - In-memory cart with merge-on-add lines
//! - [`session`] - The signed-in identity and how it was obtained
//! - [`proposal`] - Governance proposals, tallies and drafts
//! - [`certificate`] - Simulated provenance certificates

pub mod cart;
pub mod certificate;
pub mod product;
pub mod proposal;
pub mod session;

pub use cart::{Cart, CartLine};
pub use certificate::Certificate;
pub use product::{Product, SupplyChainStep};
pub use proposal::{Proposal, ProposalDraft, VoteReceipt, VoteTally};
pub use session::{CurrentUser, GatedAction, LoginMethod, SocialProvider, WalletKind};
