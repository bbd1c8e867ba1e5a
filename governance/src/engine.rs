//! The proposal engine — creation, weighted voting, quorum, tallying.

use crate::error::GovernanceError;
use crate::proposal::{Ballot, Proposal, ProposalStatus, Tally};
use agora_types::{quorum_threshold, ProposalId, Timestamp, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info};

/// Result of recording a vote.
#[derive(Clone, Debug)]
pub struct VoteOutcome {
    /// The weight the ballot carried.
    pub weight: f64,
    /// The final tally, present iff this vote reached quorum and
    /// auto-finalized the proposal.
    pub tally: Option<Tally>,
}

/// Concurrent proposal engine.
///
/// Each proposal is its own lockable unit; vote recording, the quorum check,
/// and auto-finalization all happen under that single entity lock, so a
/// proposal finalizes exactly once even under concurrent voting.
#[derive(Debug)]
pub struct ProposalEngine {
    proposals: RwLock<HashMap<ProposalId, Arc<Mutex<Proposal>>>>,
    next_id: AtomicU64,
    quorum_ratio_bps: u32,
}

fn lock(entity: &Mutex<Proposal>) -> MutexGuard<'_, Proposal> {
    entity.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ProposalEngine {
    pub fn new(quorum_ratio_bps: u32) -> Self {
        Self {
            proposals: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            quorum_ratio_bps,
        }
    }

    fn handle(&self, id: ProposalId) -> Option<Arc<Mutex<Proposal>>> {
        self.proposals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Create a new open proposal with an empty vote map.
    pub fn propose(
        &self,
        proposer: UserId,
        title: String,
        description: String,
        external_ref: String,
    ) -> ProposalId {
        let id = ProposalId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let proposal = Proposal {
            id,
            proposer,
            title,
            description,
            external_ref,
            votes: HashMap::new(),
            status: ProposalStatus::Open,
            finalized: false,
            tally: None,
            created_at: Timestamp::now(),
        };
        self.proposals
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(proposal)));
        debug!(proposal = %id, "created proposal");
        id
    }

    /// Record a vote and auto-tally if quorum is reached.
    ///
    /// `weight` is the voter's current vote weight (sqrt of reputation,
    /// computed by the caller against the registry). `eligible_voters` is
    /// the current count of registered users meeting the voting requirement;
    /// quorum is recomputed against it on every vote.
    pub fn vote(
        &self,
        voter: UserId,
        id: ProposalId,
        option: String,
        weight: f64,
        eligible_voters: u32,
    ) -> Result<VoteOutcome, GovernanceError> {
        let handle = self.handle(id).ok_or(GovernanceError::NotFound(id))?;
        let mut proposal = lock(&handle);

        if proposal.status != ProposalStatus::Open || proposal.finalized {
            return Err(GovernanceError::Closed(id));
        }

        // Last vote per voter wins.
        proposal.votes.insert(voter, Ballot { option, weight });

        let quorum = quorum_threshold(eligible_voters, self.quorum_ratio_bps);
        let tally = if proposal.distinct_voters() >= quorum {
            Some(Self::finalize(&mut proposal))
        } else {
            None
        };

        Ok(VoteOutcome { weight, tally })
    }

    /// Explicitly tally a proposal, closing and finalizing it.
    pub fn tally_votes(&self, id: ProposalId) -> Result<Tally, GovernanceError> {
        let handle = self.handle(id).ok_or(GovernanceError::NotFound(id))?;
        let mut proposal = lock(&handle);

        if proposal.finalized {
            return Err(GovernanceError::Finalized(id));
        }
        if proposal.votes.is_empty() {
            return Err(GovernanceError::NoVotes(id));
        }
        Ok(Self::finalize(&mut proposal))
    }

    /// Sum weights per option and close permanently. Caller holds the lock.
    fn finalize(proposal: &mut Proposal) -> Tally {
        let mut tally = Tally::new();
        for ballot in proposal.votes.values() {
            *tally.entry(ballot.option.clone()).or_insert(0.0) += ballot.weight;
        }
        proposal.status = ProposalStatus::Closed;
        proposal.finalized = true;
        proposal.tally = Some(tally.clone());
        info!(proposal = %proposal.id, voters = proposal.votes.len(), "proposal finalized");
        tally
    }

    /// Snapshot of a proposal, if it exists.
    pub fn proposal(&self, id: ProposalId) -> Option<Proposal> {
        let handle = self.handle(id)?;
        let proposal = lock(&handle);
        Some(proposal.clone())
    }
}
