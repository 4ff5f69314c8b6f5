//! FoodChain Core - Shared types library.
//!
//! This crate provides common types used across all FoodChain components:
//! - `storefront` - Catalog, session/cart manager and governance board
//! - `cli` - Command-line shell for browsing and driving a session
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no clocks, no randomness.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities,
//!   wallet addresses, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
