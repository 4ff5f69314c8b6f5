//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for every storefront operation. The
//! authentication-required condition is an ordinary variant so callers can
//! match on it and show a login prompt instead of treating it as a failure.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::models::GatedAction;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The action needs a signed-in session.
    #[error("Authentication required to {action}")]
    AuthRequired {
        /// What the caller tried to do.
        action: GatedAction,
    },

    /// Login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog or proposal data could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The action was already performed.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for the authentication-required condition.
    #[must_use]
    pub const fn auth_required(action: GatedAction) -> Self {
        Self::AuthRequired { action }
    }

    /// Whether the caller should present a login prompt.
    #[must_use]
    pub const fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired { .. })
    }

    /// Whether the error comes from our side rather than the caller's input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Internal(_))
    }

    /// Message that is safe to show to the person at the keyboard.
    ///
    /// Internal error details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRequired { action } => {
                format!("Connect a wallet or sign in to {action}")
            }
            Self::Auth(AuthError::LoginInProgress) => {
                "A login is already in progress, please wait".to_string()
            }
            Self::Auth(_) => "Login failed, please try again".to_string(),
            Self::Catalog(_) | Self::Internal(_) => "Something went wrong".to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) | Self::Conflict(msg) => msg.clone(),
        }
    }

    /// Send internal errors to Sentry and the log.
    ///
    /// Caller-side conditions (auth required, bad input) are not reported.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Storefront action rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from the signed-in wallet.
///
/// Call this after a successful login to associate errors with the session.
pub fn set_sentry_user(wallet: &impl ToString, name: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(wallet.to_string()),
            username: Some(name.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product 123".to_string());
        assert_eq!(err.to_string(), "Not found: Product 123");

        let err = AppError::auth_required(GatedAction::Vote);
        assert_eq!(err.to_string(), "Authentication required to vote on proposals");
    }

    #[test]
    fn test_auth_required_is_observable() {
        assert!(AppError::auth_required(GatedAction::AddToCart).is_auth_required());
        assert!(!AppError::BadRequest("x".to_string()).is_auth_required());
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::Internal("lock poisoned at shop.rs:42".to_string());
        assert_eq!(err.user_message(), "Something went wrong");
        assert!(err.is_internal());

        let err = AppError::Conflict("You already voted".to_string());
        assert_eq!(err.user_message(), "You already voted");
        assert!(!err.is_internal());
    }

    #[test]
    fn test_user_message_prompts_login() {
        let err = AppError::auth_required(GatedAction::MintCertificate);
        assert_eq!(
            err.user_message(),
            "Connect a wallet or sign in to mint certificates"
        );
    }
}
