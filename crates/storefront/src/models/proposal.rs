//! Governance proposal types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use foodchain_core::{ProposalCategory, ProposalId, ProposalStatus, VoteChoice, WalletAddress};

/// Displayed vote counts for a proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Votes in favour.
    #[serde(rename = "for")]
    pub for_votes: u32,
    /// Votes against.
    pub against: u32,
}

impl VoteTally {
    /// Total ballots cast.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.for_votes) + u64::from(self.against)
    }

    /// Share of ballots in favour, 0-100. Zero when nobody has voted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Tallies are far below f64 precision limits
    pub fn for_percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.for_votes) / total as f64 * 100.0
    }

    /// Share of ballots against, 0-100.
    ///
    /// Always `100 - for_percentage()`, so an empty tally reads as 100% against.
    #[must_use]
    pub fn against_percentage(&self) -> f64 {
        100.0 - self.for_percentage()
    }
}

/// A governance proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Unique proposal ID.
    pub id: ProposalId,
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// What the proposal is about.
    #[serde(rename = "type")]
    pub category: ProposalCategory,
    /// Displayed tallies.
    pub votes: VoteTally,
    /// Lifecycle status.
    pub status: ProposalStatus,
    /// Last day of voting.
    pub end_date: NaiveDate,
}

/// A new proposal as submitted by a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub category: ProposalCategory,
    pub title: String,
    pub description: String,
    /// Voting window in days.
    pub duration_days: u32,
}

impl ProposalDraft {
    /// Shortest allowed voting window.
    pub const MIN_DURATION_DAYS: u32 = 1;
    /// Longest allowed voting window.
    pub const MAX_DURATION_DAYS: u32 = 30;
    /// Voting window used when none is given.
    pub const DEFAULT_DURATION_DAYS: u32 = 7;

    /// Create a draft with the default voting window.
    #[must_use]
    pub fn new(
        category: ProposalCategory,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
            duration_days: Self::DEFAULT_DURATION_DAYS,
        }
    }

    /// Check the draft is complete.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("proposal title cannot be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("proposal description cannot be empty".to_string());
        }
        if !(Self::MIN_DURATION_DAYS..=Self::MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(format!(
                "voting duration must be between {} and {} days (got {})",
                Self::MIN_DURATION_DAYS,
                Self::MAX_DURATION_DAYS,
                self.duration_days
            ));
        }
        Ok(())
    }
}

/// Confirmation that a vote was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    pub proposal_id: ProposalId,
    pub choice: VoteChoice,
    pub voter: WalletAddress,
    pub cast_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_for_percentage() {
        let tally = VoteTally {
            for_votes: 1247,
            against: 89,
        };
        assert!((tally.for_percentage() - 93.338_323).abs() < 0.001);
        assert!((tally.for_percentage() + tally.against_percentage() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_for_percentage_without_votes() {
        let tally = VoteTally::default();
        assert!(tally.for_percentage().abs() < f64::EPSILON);
        assert!((tally.against_percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_draft_defaults_to_seven_days() {
        let draft = ProposalDraft::new(ProposalCategory::Tag, "Add tag", "Why");
        assert_eq!(draft.duration_days, 7);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = ProposalDraft::new(ProposalCategory::Vendor, "  ", "Why");
        assert!(draft.validate().unwrap_err().contains("title"));

        draft.title = "Approve vendor".to_string();
        draft.description = String::new();
        assert!(draft.validate().unwrap_err().contains("description"));

        draft.description = "Details".to_string();
        draft.duration_days = 0;
        assert!(draft.validate().is_err());
        draft.duration_days = 31;
        assert!(draft.validate().is_err());
        draft.duration_days = 30;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_deserialize_seed_record_shape() {
        let json = r#"{
            "id": 1, "title": "Approve vendor", "description": "Details",
            "type": "vendor", "votes": {"for": 10, "against": 2},
            "status": "active", "endDate": "2024-02-15"
        }"#;
        let proposal: Proposal = serde_json::from_str(json).unwrap();
        assert_eq!(proposal.category, ProposalCategory::Vendor);
        assert_eq!(proposal.votes.for_votes, 10);
        assert_eq!(proposal.end_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    }
}
