//! Governance board commands.

use foodchain_storefront::models::{Certificate, Proposal, VoteReceipt};

/// Summary of a proposal with its vote split.
pub fn proposal_row(proposal: &Proposal) -> String {
    let votes = &proposal.votes;
    format!(
        "#{} [{}] {} ({})\n    {}\n    For {} ({:.0}%)  Against {} ({:.0}%)  Ends {}",
        proposal.id,
        proposal.category.label(),
        proposal.title,
        proposal.status,
        proposal.description,
        votes.for_votes,
        votes.for_percentage(),
        votes.against,
        votes.against_percentage(),
        proposal.end_date,
    )
}

/// Print every proposal.
#[allow(clippy::print_stdout)]
pub fn list(proposals: &[Proposal]) {
    if proposals.is_empty() {
        println!("No proposals yet.");
        return;
    }
    for proposal in proposals {
        println!("{}\n", proposal_row(proposal));
    }
}

/// Print a vote confirmation.
#[allow(clippy::print_stdout)]
pub fn print_receipt(receipt: &VoteReceipt) {
    println!(
        "Vote Recorded: {} on proposal #{} from {}",
        receipt.choice,
        receipt.proposal_id,
        receipt.voter.short()
    );
}

/// Print a minted certificate.
#[allow(clippy::print_stdout)]
pub fn print_certificate(certificate: &Certificate) {
    println!("Certificate minted for {}", certificate.product_name);
    println!("  Token:  {}", certificate.token_id);
    println!("  Owner:  {}", certificate.owner);
    println!(
        "  Supply chain: {}",
        if certificate.supply_chain_verified {
            "verified"
        } else {
            "unverified steps"
        }
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodchain_core::ProposalId;
    use foodchain_storefront::services::GovernanceBoard;

    use super::*;

    #[test]
    fn test_proposal_row_shows_split() {
        let board = GovernanceBoard::seed().unwrap();
        let proposal = board.get(ProposalId::new(1)).unwrap();
        let row = proposal_row(proposal);

        assert!(row.starts_with("#1 "));
        assert!(row.contains(&proposal.title));
        assert!(row.contains(&format!("{:.0}%", proposal.votes.for_percentage())));
    }
}
