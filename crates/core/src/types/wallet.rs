//! Wallet address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`WalletAddress`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletAddressError {
    /// The input string is empty.
    #[error("wallet address cannot be empty")]
    Empty,
    /// The input does not start with `0x`.
    #[error("wallet address must start with 0x")]
    MissingPrefix,
    /// The input has the wrong number of hex digits.
    #[error("wallet address must have {expected} hex digits (got {actual})")]
    WrongLength {
        /// Required number of hex digits.
        expected: usize,
        /// Number of digits found.
        actual: usize,
    },
    /// The input contains a non-hex character.
    #[error("wallet address contains non-hex character '{0}'")]
    InvalidCharacter(char),
}

/// A wallet-style address: `0x` followed by 40 hex digits.
///
/// Addresses are normalised to lowercase. Nothing here is checked against a
/// chain; the type only guarantees the shape.
///
/// ## Examples
///
/// ```
/// use foodchain_core::WalletAddress;
///
/// assert!(WalletAddress::parse("0x52908400098527886E0F7030069857D2E4169EE7").is_ok());
///
/// assert!(WalletAddress::parse("").is_err());          // empty
/// assert!(WalletAddress::parse("52908400").is_err());  // missing 0x
/// assert!(WalletAddress::parse("0x1234").is_err());    // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Number of hex digits after the `0x` prefix.
    pub const HEX_DIGITS: usize = 40;

    /// Parse a `WalletAddress` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Does not start with `0x`
    /// - Does not have exactly 40 hex digits after the prefix
    pub fn parse(s: &str) -> Result<Self, WalletAddressError> {
        if s.is_empty() {
            return Err(WalletAddressError::Empty);
        }

        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(WalletAddressError::MissingPrefix)?;

        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(WalletAddressError::InvalidCharacter(c));
        }

        if digits.len() != Self::HEX_DIGITS {
            return Err(WalletAddressError::WrongLength {
                expected: Self::HEX_DIGITS,
                actual: digits.len(),
            });
        }

        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display, e.g. `0x5290…9ee7`.
    #[must_use]
    pub fn short(&self) -> String {
        let head = self.0.get(..6).unwrap_or(&self.0);
        let tail = self.0.get(self.0.len().saturating_sub(4)..).unwrap_or("");
        format!("{head}…{tail}")
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = WalletAddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.0
    }
}
