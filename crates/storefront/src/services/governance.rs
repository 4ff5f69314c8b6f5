//! Community governance board.
//!
//! Holds the proposal list and the ballots cast from this storefront. The
//! displayed tallies are static seed data; a recorded ballot only marks that
//! a wallet has voted so it cannot vote on the same proposal twice.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{Days, NaiveDate, Utc};
use tracing::instrument;

use foodchain_core::{ProposalId, ProposalStatus, VoteChoice, WalletAddress};

use crate::catalog::{CatalogError, read_json};
use crate::error::AppError;
use crate::models::{Proposal, ProposalDraft, VoteReceipt, VoteTally};

const SEED_PROPOSALS: &str = include_str!("../../data/proposals.json");

/// Proposals and the ballots recorded against them.
#[derive(Debug, Clone, Default)]
pub struct GovernanceBoard {
    proposals: Vec<Proposal>,
    ballots: HashMap<ProposalId, HashMap<WalletAddress, VoteChoice>>,
}

impl GovernanceBoard {
    /// Build a board, rejecting duplicate proposal IDs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two proposals share an ID.
    pub fn new(proposals: Vec<Proposal>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for proposal in &proposals {
            if !seen.insert(proposal.id) {
                return Err(CatalogError::DuplicateId {
                    kind: "proposal",
                    id: proposal.id.as_i32(),
                });
            }
        }
        Ok(Self {
            proposals,
            ballots: HashMap::new(),
        })
    }

    /// The built-in proposal list.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled seed data is malformed.
    pub fn seed() -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(SEED_PROPOSALS)?)
    }

    /// Load proposals from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let board = Self::new(read_json(path)?)?;
        tracing::info!(proposals = board.proposals.len(), "Proposals loaded");
        Ok(board)
    }

    /// All proposals in board order.
    #[must_use]
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Look up a proposal by ID.
    #[must_use]
    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    /// The ballot `voter` cast on `id`, if any.
    #[must_use]
    pub fn ballot(&self, id: ProposalId, voter: &WalletAddress) -> Option<VoteChoice> {
        self.ballots.get(&id).and_then(|b| b.get(voter)).copied()
    }

    /// Record `voter`'s ballot on proposal `id`.
    ///
    /// # Errors
    ///
    /// - `AppError::NotFound` if there is no such proposal
    /// - `AppError::BadRequest` if voting on it has closed
    /// - `AppError::Conflict` if `voter` already voted on it
    pub fn record_vote(
        &mut self,
        id: ProposalId,
        voter: &WalletAddress,
        choice: VoteChoice,
    ) -> Result<VoteReceipt, AppError> {
        let proposal = self
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Proposal {id}")))?;

        if !proposal.status.is_open() {
            return Err(AppError::BadRequest(format!(
                "Proposal {id} is {} and no longer accepts votes",
                proposal.status
            )));
        }

        let ballots = self.ballots.entry(id).or_default();
        if ballots.contains_key(voter) {
            return Err(AppError::Conflict(format!(
                "You have already voted on proposal {id}"
            )));
        }
        ballots.insert(voter.clone(), choice);

        Ok(VoteReceipt {
            proposal_id: id,
            choice,
            voter: voter.clone(),
            cast_at: Utc::now(),
        })
    }

    /// Add a new proposal built from `draft`, open for voting from `today`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the draft is incomplete, or
    /// `AppError::Conflict` once proposal ids are exhausted.
    pub fn submit(&mut self, draft: ProposalDraft, today: NaiveDate) -> Result<&Proposal, AppError> {
        draft.validate().map_err(AppError::BadRequest)?;

        let end_date = today
            .checked_add_days(Days::new(u64::from(draft.duration_days)))
            .ok_or_else(|| AppError::BadRequest("voting end date out of range".to_string()))?;

        let proposal = Proposal {
            id: self.next_id()?,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            category: draft.category,
            votes: VoteTally::default(),
            status: ProposalStatus::Active,
            end_date,
        };
        self.proposals.push(proposal);
        self.proposals
            .last()
            .ok_or_else(|| AppError::Internal("proposal list empty after insert".to_string()))
    }

    fn next_id(&self) -> Result<ProposalId, AppError> {
        let max = self.proposals.iter().map(|p| p.id.as_i32()).max().unwrap_or(0);
        max.checked_add(1)
            .map(ProposalId::new)
            .ok_or_else(|| AppError::Conflict("no proposal ids left".to_string()))
    }
}
