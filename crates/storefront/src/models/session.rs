//! Session-related types.
//!
//! Types describing who is signed in and which actions need a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodchain_core::WalletAddress;

/// Session-held user identity.
///
/// Present only while someone is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Generated display name.
    pub name: String,
    /// Generated wallet address.
    pub wallet: WalletAddress,
    /// How the session was started.
    pub method: LoginMethod,
    /// When the session was started.
    pub signed_in_at: DateTime<Utc>,
}

/// Browser wallets offered for wallet login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletKind {
    MetaMask,
    Sui,
}

/// Social providers offered for social login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialProvider {
    Google,
    GitHub,
    Facebook,
}

impl SocialProvider {
    /// Provider name as shown to users and used in generated display names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::GitHub => "GitHub",
            Self::Facebook => "Facebook",
        }
    }
}

/// A way to sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "via")]
pub enum LoginMethod {
    /// Connect a browser wallet.
    Wallet(WalletKind),
    /// Sign in through a social account.
    Social(SocialProvider),
}

impl LoginMethod {
    /// Every supported method, wallets first.
    pub const ALL: [Self; 5] = [
        Self::Wallet(WalletKind::MetaMask),
        Self::Wallet(WalletKind::Sui),
        Self::Social(SocialProvider::Google),
        Self::Social(SocialProvider::GitHub),
        Self::Social(SocialProvider::Facebook),
    ];
}

impl std::fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wallet(WalletKind::MetaMask) => write!(f, "metamask"),
            Self::Wallet(WalletKind::Sui) => write!(f, "sui"),
            Self::Social(SocialProvider::Google) => write!(f, "google"),
            Self::Social(SocialProvider::GitHub) => write!(f, "github"),
            Self::Social(SocialProvider::Facebook) => write!(f, "facebook"),
        }
    }
}

impl std::str::FromStr for LoginMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.to_string() == lower)
            .ok_or_else(|| {
                format!("invalid login method: {s} (expected metamask, sui, google, github or facebook)")
            })
    }
}

/// Actions that require a signed-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedAction {
    AddToCart,
    Vote,
    CreateProposal,
    MintCertificate,
}

impl std::fmt::Display for GatedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddToCart => write!(f, "add items to the cart"),
            Self::Vote => write!(f, "vote on proposals"),
            Self::CreateProposal => write!(f, "create proposals"),
            Self::MintCertificate => write!(f, "mint certificates"),
        }
    }
}
