//! FoodChain storefront library.
//!
//! Session, cart and governance state for the FoodChain marketplace. The
//! `foodchain` CLI drives it interactively; integration tests drive it
//! through [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
