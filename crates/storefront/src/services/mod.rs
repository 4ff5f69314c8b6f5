//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Simulated wallet connect and social login
//! - `governance` - Proposal board and ballots
//! - `shop` - Session gate, cart and gated actions

pub mod auth;
pub mod governance;
pub mod shop;

pub use auth::{AuthError, AuthService};
pub use governance::GovernanceBoard;
pub use shop::Shop;
