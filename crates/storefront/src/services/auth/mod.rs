//! Authentication service.
//!
//! Simulates wallet connect and social login. Each method waits a fixed
//! delay standing in for the provider round-trip and then hands back a
//! freshly generated identity. No credentials are checked anywhere.

mod error;

pub use error::AuthError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::instrument;

use foodchain_core::WalletAddress;

use crate::config::StorefrontConfig;
use crate::models::{CurrentUser, LoginMethod};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const HEX: &[u8] = b"0123456789abcdef";

/// Length of the random suffix in wallet-login display names.
const WALLET_NAME_SUFFIX: usize = 6;
/// Length of the random suffix in social-login display names.
const SOCIAL_NAME_SUFFIX: usize = 4;

/// Simulated authentication service.
///
/// Only one login may be in flight at a time.
#[derive(Debug)]
pub struct AuthService {
    wallet_connect_delay: Duration,
    social_login_delay: Duration,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the login finishes or is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, AuthError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AuthError::LoginInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AuthService {
    /// Create an authentication service with explicit delays.
    #[must_use]
    pub const fn new(wallet_connect_delay: Duration, social_login_delay: Duration) -> Self {
        Self {
            wallet_connect_delay,
            social_login_delay,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Create an authentication service using the configured delays.
    #[must_use]
    pub const fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.wallet_connect_delay, config.social_login_delay)
    }

    /// How long `method` takes to complete.
    #[must_use]
    pub const fn delay_for(&self, method: LoginMethod) -> Duration {
        match method {
            LoginMethod::Wallet(_) => self.wallet_connect_delay,
            LoginMethod::Social(_) => self.social_login_delay,
        }
    }

    /// Whether a login is currently waiting on its provider.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Log in with `method`.
    ///
    /// Waits for the method's delay and returns a newly generated identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::LoginInProgress` if another login has not finished.
    #[instrument(skip(self, method), fields(method = %method))]
    pub async fn login(&self, method: LoginMethod) -> Result<CurrentUser, AuthError> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        tracing::debug!(delay_ms = self.delay_for(method).as_millis(), "Connecting");
        tokio::time::sleep(self.delay_for(method)).await;

        let user = generate_identity(method, &mut rand::rng())?;
        tracing::info!(name = %user.name, wallet = %user.wallet, "Login completed");
        Ok(user)
    }
}

/// Generate a display name and wallet address for `method`.
///
/// Wallet logins are named `User_xxxxxx`; social logins are named
/// `<Provider>_user_xxxx`. Both get a random 40-digit hex address.
///
/// # Errors
///
/// Returns `AuthError::InvalidIdentity` if the generated address is malformed.
pub fn generate_identity<R: Rng + ?Sized>(
    method: LoginMethod,
    rng: &mut R,
) -> Result<CurrentUser, AuthError> {
    let name = match method {
        LoginMethod::Wallet(_) => format!("User_{}", random_string(rng, BASE36, WALLET_NAME_SUFFIX)),
        LoginMethod::Social(provider) => format!(
            "{}_user_{}",
            provider.label(),
            random_string(rng, BASE36, SOCIAL_NAME_SUFFIX)
        ),
    };
    let wallet = WalletAddress::parse(&format!(
        "0x{}",
        random_string(rng, HEX, WalletAddress::HEX_DIGITS)
    ))?;

    Ok(CurrentUser {
        name,
        wallet,
        method,
        signed_in_at: Utc::now(),
    })
}

fn random_string<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .filter_map(|_| alphabet.choose(rng).copied().map(char::from))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::{SocialProvider, WalletKind};

    #[test]
    fn test_wallet_identity_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let user = generate_identity(LoginMethod::Wallet(WalletKind::MetaMask), &mut rng).unwrap();

        let suffix = user.name.strip_prefix("User_").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(user.wallet.as_str().len(), 42);
        assert!(user.wallet.as_str().starts_with("0x"));
    }

    #[test]
    fn test_social_identity_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let user =
            generate_identity(LoginMethod::Social(SocialProvider::GitHub), &mut rng).unwrap();

        let suffix = user.name.strip_prefix("GitHub_user_").unwrap();
        assert_eq!(suffix.len(), 4);
        assert_eq!(user.method, LoginMethod::Social(SocialProvider::GitHub));
    }

    #[test]
    fn test_identities_differ() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = generate_identity(LoginMethod::Wallet(WalletKind::Sui), &mut rng).unwrap();
        let b = generate_identity(LoginMethod::Wallet(WalletKind::Sui), &mut rng).unwrap();
        assert_ne!(a.wallet, b.wallet);
    }

    #[test]
    fn test_delay_for_method() {
        let auth = AuthService::new(Duration::from_millis(2000), Duration::from_millis(1500));
        assert_eq!(
            auth.delay_for(LoginMethod::Wallet(WalletKind::MetaMask)),
            Duration::from_millis(2000)
        );
        assert_eq!(
            auth.delay_for(LoginMethod::Social(SocialProvider::Google)),
            Duration::from_millis(1500)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_delay() {
        let auth = AuthService::new(Duration::from_millis(2000), Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        let user = auth
            .login(LoginMethod::Social(SocialProvider::Facebook))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert!(user.name.starts_with("Facebook_user_"));
        assert!(!auth.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_login_rejected_while_in_flight() {
        let auth = Arc::new(AuthService::new(
            Duration::from_millis(2000),
            Duration::from_millis(1500),
        ));

        let first = tokio::spawn({
            let auth = Arc::clone(&auth);
            async move { auth.login(LoginMethod::Wallet(WalletKind::MetaMask)).await }
        });
        tokio::task::yield_now().await;
        assert!(auth.is_busy());

        let second = auth.login(LoginMethod::Wallet(WalletKind::Sui)).await;
        assert!(matches!(second, Err(AuthError::LoginInProgress)));

        assert!(first.await.unwrap().is_ok());
        assert!(!auth.is_busy());
    }
}
