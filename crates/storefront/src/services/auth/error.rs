//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during (simulated) login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Another login is still waiting on its provider.
    #[error("a login is already in progress")]
    LoginInProgress,

    /// The generated identity failed validation.
    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] foodchain_core::WalletAddressError),
}
