//! The executor — the single public surface over all engines.

use crate::error::RuntimeError;
use agora_content::{ContentAddressor, ContentError, ContentStore};
use agora_disputes::{
    DisputeEngine, JurorBallot, JurorSampler, Resolution, Subject,
};
use agora_governance::{ProposalEngine, Tally, VoteOutcome};
use agora_identity::IdentityRegistry;
use agora_ledger::{Event, EventKind, Ledger};
use agora_types::{
    Action, CommentId, ContentRef, DisputeId, PostId, ProposalId, ProtocolParams, UserId,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Payload returned by `create_post`.
#[derive(Clone, Debug)]
pub struct PostCreated {
    pub id: PostId,
    pub content_ref: ContentRef,
}

/// Payload returned by `create_comment`.
#[derive(Clone, Debug)]
pub struct CommentCreated {
    pub id: CommentId,
    pub content_ref: ContentRef,
}

/// Payload returned by `create_dispute` and `report`.
#[derive(Clone, Debug)]
pub struct DisputeCreated {
    pub id: DisputeId,
    pub jurors: Vec<UserId>,
    pub description_ref: ContentRef,
}

/// The runtime executor.
///
/// Engines carry their own per-entity locks, so the executor itself is
/// freely shareable (`&self` everywhere) and concurrent operations on
/// different entities never contend.
pub struct Executor {
    params: ProtocolParams,
    registry: IdentityRegistry,
    content: ContentStore,
    proposals: ProposalEngine,
    disputes: DisputeEngine,
    addressor: Arc<dyn ContentAddressor>,
    ledger: Arc<dyn Ledger>,
}

impl Executor {
    pub fn new(
        params: ProtocolParams,
        addressor: Arc<dyn ContentAddressor>,
        ledger: Arc<dyn Ledger>,
        sampler: Arc<dyn JurorSampler>,
    ) -> Self {
        Self {
            registry: IdentityRegistry::new(),
            content: ContentStore::new(),
            proposals: ProposalEngine::new(params.quorum_ratio_bps),
            disputes: DisputeEngine::new(params.jury_size, params.jury_quorum_ratio_bps, sampler),
            params,
            addressor,
            ledger,
        }
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn proposals(&self) -> &ProposalEngine {
        &self.proposals
    }

    pub fn disputes(&self) -> &DisputeEngine {
        &self.disputes
    }

    // ── Collaborator plumbing ────────────────────────────────────────────

    /// Emit one event, best-effort. Failures are logged, never propagated.
    fn emit(&self, kind: EventKind, payload: serde_json::Value) {
        if let Err(err) = self.ledger.add_event(kind, payload) {
            warn!(kind = %kind, %err, "event emission failed");
        }
    }

    /// Mint a reward, best-effort. A refused or failed mint emits
    /// `reward_failed` and the parent operation still succeeds.
    fn reward(&self, user: &UserId, amount: u64, reward_type: &'static str) {
        match self.ledger.deposit(user, amount) {
            Ok(true) => self.emit(
                EventKind::Reward,
                json!({ "type": reward_type, "user": user, "amount": amount }),
            ),
            Ok(false) => self.emit(
                EventKind::RewardFailed,
                json!({ "type": reward_type, "user": user, "reason": "supply_cap" }),
            ),
            Err(err) => {
                warn!(user = %user, reward_type, %err, "reward mint failed");
                self.emit(
                    EventKind::RewardFailed,
                    json!({ "type": reward_type, "user": user, "reason": err.to_string() }),
                );
            }
        }
    }

    /// The identity gate. `level_override` replaces the table entry for this
    /// call only.
    fn gate(
        &self,
        user: &UserId,
        action: Action,
        level_override: Option<u32>,
    ) -> Result<u32, RuntimeError> {
        let required = level_override.unwrap_or_else(|| self.params.required_level(action));
        if self.registry.meets_requirement(user, required) {
            Ok(required)
        } else {
            Err(RuntimeError::InsufficientLevel {
                user: user.to_string(),
                action: action.name(),
                required,
            })
        }
    }

    // ── Users ────────────────────────────────────────────────────────────

    /// Register a user at a verification level.
    pub fn register_user(&self, id: UserId, level: u32) -> Result<(), RuntimeError> {
        self.registry.register(id.clone(), level)?;
        if let Err(err) = self
            .ledger
            .create_account(&id)
            .and_then(|()| self.ledger.set_eligible(&id, true))
        {
            warn!(user = %id, %err, "ledger account setup failed");
        }
        self.emit(
            EventKind::UserRegister,
            json!({ "user": id, "level": level }),
        );
        Ok(())
    }

    /// Increase a user's reputation. Returns the new score.
    pub fn grant_reputation(&self, user: &UserId, amount: f64) -> Result<f64, RuntimeError> {
        let new_score = self.registry.grant_reputation(user, amount)?;
        self.emit(
            EventKind::Reputation,
            json!({ "user": user, "delta": amount, "new_score": new_score }),
        );
        Ok(new_score)
    }

    /// Decrease a user's reputation, saturating at 0. Returns the new score.
    pub fn slash_reputation(&self, user: &UserId, amount: f64) -> Result<f64, RuntimeError> {
        let new_score = self.registry.slash_reputation(user, amount)?;
        self.emit(
            EventKind::Reputation,
            json!({ "user": user, "delta": -amount, "new_score": new_score }),
        );
        Ok(new_score)
    }

    // ── Governance ───────────────────────────────────────────────────────

    /// Submit a proposal.
    pub fn propose(
        &self,
        user: &UserId,
        title: &str,
        description: &str,
        external_ref: &str,
        level_override: Option<u32>,
    ) -> Result<ProposalId, RuntimeError> {
        self.gate(user, Action::Propose, level_override)?;
        let id = self.proposals.propose(
            user.clone(),
            title.to_string(),
            description.to_string(),
            external_ref.to_string(),
        );
        self.emit(
            EventKind::Proposal,
            json!({
                "proposal_id": id.as_u64(),
                "user": user,
                "title": title,
                "external_ref": external_ref,
            }),
        );
        Ok(id)
    }

    /// Cast a weighted vote; auto-tallies when quorum is reached.
    pub fn vote(
        &self,
        user: &UserId,
        proposal_id: ProposalId,
        option: &str,
        level_override: Option<u32>,
    ) -> Result<VoteOutcome, RuntimeError> {
        let required = self.gate(user, Action::Vote, level_override)?;
        let weight = self.registry.vote_weight(user);
        // The eligible population is everyone who could cast this vote, re-
        // counted on every vote so quorum tracks registrations.
        let eligible = self.registry.eligible_count(required);
        let outcome = self
            .proposals
            .vote(user.clone(), proposal_id, option.to_string(), weight, eligible)?;
        self.emit(
            EventKind::Vote,
            json!({
                "proposal_id": proposal_id.as_u64(),
                "user": user,
                "option": option,
                "weight": weight,
            }),
        );
        Ok(outcome)
    }

    /// Explicitly tally a proposal.
    pub fn tally_votes(&self, proposal_id: ProposalId) -> Result<Tally, RuntimeError> {
        Ok(self.proposals.tally_votes(proposal_id)?)
    }

    // ── Content ──────────────────────────────────────────────────────────

    /// Create a post. Uploads the content first; an upload failure surfaces
    /// before any state changes.
    pub fn create_post(
        &self,
        user: &UserId,
        content: &[u8],
        tags: Vec<String>,
        level_override: Option<u32>,
    ) -> Result<PostCreated, RuntimeError> {
        self.gate(user, Action::Post, level_override)?;
        let content_ref = self.addressor.put(content)?;
        let id = self
            .content
            .create_post(user.clone(), content_ref.clone(), tags.clone());
        self.reward(user, self.params.post_reward, "post");
        if let Err(err) = self.ledger.add_to_pool("creators", user) {
            warn!(user = %user, %err, "pool membership update failed");
        }
        self.emit(
            EventKind::Post,
            json!({
                "user": user,
                "post_id": id.as_u64(),
                "content_ref": content_ref,
                "tags": tags,
            }),
        );
        Ok(PostCreated { id, content_ref })
    }

    /// Partial-edit a post; absent fields stay untouched.
    pub fn edit_post(
        &self,
        user: &UserId,
        id: PostId,
        new_content: Option<&[u8]>,
        new_tags: Option<Vec<String>>,
        level_override: Option<u32>,
    ) -> Result<(), RuntimeError> {
        self.gate(user, Action::Post, level_override)?;
        let content_ref = match new_content {
            Some(bytes) => Some(self.addressor.put(bytes)?),
            None => None,
        };
        self.content.edit_post(id, content_ref, new_tags)?;
        Ok(())
    }

    /// Delete a post, cascading to its comments.
    pub fn delete_post(
        &self,
        user: &UserId,
        id: PostId,
        level_override: Option<u32>,
    ) -> Result<Vec<CommentId>, RuntimeError> {
        self.gate(user, Action::Post, level_override)?;
        Ok(self.content.delete_post(id)?)
    }

    /// Create a comment on a post.
    pub fn create_comment(
        &self,
        user: &UserId,
        post_id: PostId,
        content: &[u8],
        tags: Vec<String>,
        comment_id: Option<CommentId>,
        level_override: Option<u32>,
    ) -> Result<CommentCreated, RuntimeError> {
        self.gate(user, Action::Comment, level_override)?;
        if !self.content.post_exists(post_id) {
            return Err(ContentError::PostNotFound(post_id).into());
        }
        let content_ref = self.addressor.put(content)?;
        let id = self.content.create_comment(
            user.clone(),
            post_id,
            content_ref.clone(),
            tags.clone(),
            comment_id,
        )?;
        self.reward(user, self.params.comment_reward, "comment");
        if let Err(err) = self.ledger.add_to_pool("creators", user) {
            warn!(user = %user, %err, "pool membership update failed");
        }
        self.emit(
            EventKind::Comment,
            json!({
                "user": user,
                "comment_id": id.as_u64(),
                "post_id": post_id.as_u64(),
                "content_ref": content_ref,
                "tags": tags,
            }),
        );
        Ok(CommentCreated { id, content_ref })
    }

    /// Partial-edit a comment; absent fields stay untouched.
    pub fn edit_comment(
        &self,
        user: &UserId,
        id: CommentId,
        new_content: Option<&[u8]>,
        new_tags: Option<Vec<String>>,
        level_override: Option<u32>,
    ) -> Result<(), RuntimeError> {
        self.gate(user, Action::Comment, level_override)?;
        let content_ref = match new_content {
            Some(bytes) => Some(self.addressor.put(bytes)?),
            None => None,
        };
        self.content.edit_comment(id, content_ref, new_tags)?;
        Ok(())
    }

    /// Delete a comment, unlinking it from its post.
    pub fn delete_comment(
        &self,
        user: &UserId,
        id: CommentId,
        level_override: Option<u32>,
    ) -> Result<(), RuntimeError> {
        self.gate(user, Action::Comment, level_override)?;
        Ok(self.content.delete_comment(id)?)
    }

    // ── Disputes ─────────────────────────────────────────────────────────

    fn subject_exists(&self, subject: Subject) -> Result<(), RuntimeError> {
        match subject {
            Subject::Post(id) if !self.content.post_exists(id) => {
                Err(ContentError::PostNotFound(id).into())
            }
            Subject::Comment(id) if !self.content.comment_exists(id) => {
                Err(ContentError::CommentNotFound(id).into())
            }
            _ => Ok(()),
        }
    }

    /// Shared dispute-creation path; the caller has already passed its gate.
    fn open_dispute(
        &self,
        complainant: &UserId,
        subject: Subject,
        description: &[u8],
    ) -> Result<DisputeCreated, RuntimeError> {
        self.subject_exists(subject)?;
        let description_ref = self.addressor.put(description)?;
        let candidates = self.registry.eligible_users(self.params.juror_level);
        let (id, jurors) =
            self.disputes
                .create_dispute(complainant.clone(), subject, description_ref.clone(), &candidates)?;
        self.reward(complainant, self.params.dispute_bounty, "dispute_bounty");
        self.emit(
            EventKind::DisputeCreate,
            json!({
                "dispute_id": id.as_u64(),
                "reporter": complainant,
                "subject_type": subject.kind(),
                "subject_id": subject.id_value(),
            }),
        );
        self.emit(
            EventKind::JurorsAssigned,
            json!({ "dispute_id": id.as_u64(), "jurors": jurors }),
        );
        Ok(DisputeCreated {
            id,
            jurors,
            description_ref,
        })
    }

    /// Open a dispute directly (gated at the dispute level).
    pub fn create_dispute(
        &self,
        complainant: &UserId,
        subject: Subject,
        description: &[u8],
        level_override: Option<u32>,
    ) -> Result<DisputeCreated, RuntimeError> {
        self.gate(complainant, Action::Dispute, level_override)?;
        self.open_dispute(complainant, subject, description)
    }

    /// Reporting facade: gate on the report level, verify the subject, then
    /// delegate to dispute creation. Adds no state of its own.
    pub fn report(
        &self,
        reporter: &UserId,
        subject: Subject,
        description: &[u8],
        level_override: Option<u32>,
    ) -> Result<DisputeCreated, RuntimeError> {
        self.gate(reporter, Action::Report, level_override)?;
        self.open_dispute(reporter, subject, description)
    }

    /// Record a juror's ballot; applies the content cascade when the vote
    /// resolves the dispute as `valid`.
    pub fn juror_vote(
        &self,
        juror: &UserId,
        dispute_id: DisputeId,
        ballot: JurorBallot,
    ) -> Result<Option<Resolution>, RuntimeError> {
        let resolution = self.disputes.juror_vote(juror.clone(), dispute_id, ballot)?;
        self.emit(
            EventKind::JurorVote,
            json!({
                "dispute_id": dispute_id.as_u64(),
                "juror": juror,
                "decision": ballot,
            }),
        );

        if let Some(resolution) = &resolution {
            self.emit(
                EventKind::DisputeResolution,
                json!({
                    "dispute_id": resolution.dispute_id.as_u64(),
                    "outcome": resolution.decision.as_str(),
                    "subject_type": resolution.subject.kind(),
                    "subject_id": resolution.subject.id_value(),
                }),
            );
            if resolution.decision == agora_disputes::Decision::Valid {
                self.remove_subject(resolution.subject);
            }
        }
        Ok(resolution)
    }

    /// Apply a `valid` verdict to the content store. The subject may already
    /// be gone (deleted manually while the jury deliberated) — that is not
    /// an error of the juror's vote.
    fn remove_subject(&self, subject: Subject) {
        let result = match subject {
            Subject::Post(id) => self.content.delete_post(id).map(|_| ()),
            Subject::Comment(id) => self.content.delete_comment(id),
        };
        match result {
            Ok(()) => debug!(%subject, "removed content after valid verdict"),
            Err(err) => debug!(%subject, %err, "subject already gone at resolution"),
        }
    }

    // ── Events ───────────────────────────────────────────────────────────

    /// The most recent `count` events (all when `None`).
    pub fn list_events(&self, count: Option<usize>) -> Result<Vec<Event>, RuntimeError> {
        Ok(self.ledger.list_events(count)?)
    }
}
