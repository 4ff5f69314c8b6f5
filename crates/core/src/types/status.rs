//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Governance proposal lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Voting is open.
    #[default]
    Active,
    /// Voting closed and the proposal was accepted.
    Passed,
    /// Voting closed and the proposal was turned down.
    Rejected,
}

impl ProposalStatus {
    /// Whether the proposal still accepts votes.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Passed => write!(f, "passed"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// What a governance proposal is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalCategory {
    /// Approving a new vendor.
    Vendor,
    /// Adding or changing a product tag.
    Tag,
    /// Spending from the community treasury.
    Treasury,
}

impl ProposalCategory {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vendor => "Vendor Approval",
            Self::Tag => "Product Tag",
            Self::Treasury => "Treasury Allocation",
        }
    }
}

impl std::fmt::Display for ProposalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vendor => write!(f, "vendor"),
            Self::Tag => write!(f, "tag"),
            Self::Treasury => write!(f, "treasury"),
        }
    }
}

impl std::str::FromStr for ProposalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vendor" => Ok(Self::Vendor),
            "tag" => Ok(Self::Tag),
            "treasury" => Ok(Self::Treasury),
            _ => Err(format!("invalid proposal category: {s}")),
        }
    }
}

/// A ballot choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    For,
    Against,
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::For => write!(f, "for"),
            Self::Against => write!(f, "against"),
        }
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "for" | "yes" => Ok(Self::For),
            "against" | "no" => Ok(Self::Against),
            _ => Err(format!("invalid vote: {s} (expected 'for' or 'against')")),
        }
    }
}
