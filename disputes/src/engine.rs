//! The dispute engine — creation, juror voting, quorum-gated resolution.

use crate::dispute::{Decision, Dispute, DisputeStatus, JurorBallot, Subject};
use crate::error::DisputeError;
use crate::sampler::JurorSampler;
use agora_types::{quorum_threshold, ContentRef, DisputeId, Timestamp, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info};

/// A dispute's terminal verdict, reported to the caller so it can apply the
/// content cascade (`Valid` removes the subject; `Invalid` and `Tie` leave
/// it untouched).
#[derive(Clone, Debug)]
pub struct Resolution {
    pub dispute_id: DisputeId,
    pub subject: Subject,
    pub decision: Decision,
}

/// Concurrent dispute engine.
///
/// Each dispute is its own lockable unit; ballot recording, the quorum
/// check, and closing all happen under that single entity lock, so two
/// simultaneous juror votes cannot both trigger resolution.
pub struct DisputeEngine {
    disputes: RwLock<HashMap<DisputeId, Arc<Mutex<Dispute>>>>,
    next_id: AtomicU64,
    jury_size: u32,
    jury_quorum_ratio_bps: u32,
    sampler: Arc<dyn JurorSampler>,
}

fn lock(entity: &Mutex<Dispute>) -> MutexGuard<'_, Dispute> {
    entity.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DisputeEngine {
    pub fn new(jury_size: u32, jury_quorum_ratio_bps: u32, sampler: Arc<dyn JurorSampler>) -> Self {
        Self {
            disputes: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            jury_size,
            jury_quorum_ratio_bps,
            sampler,
        }
    }

    fn handle(&self, id: DisputeId) -> Option<Arc<Mutex<Dispute>>> {
        self.disputes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Open a dispute and sample its jury from `candidates`.
    ///
    /// A pool smaller than the configured jury size yields a degraded jury
    /// of the whole pool; the resolution quorum is then computed against the
    /// actual juror count so the dispute can still resolve. An empty pool is
    /// rejected outright.
    ///
    /// Returns the dispute id and the selected jurors.
    pub fn create_dispute(
        &self,
        complainant: UserId,
        subject: Subject,
        description: ContentRef,
        candidates: &[UserId],
    ) -> Result<(DisputeId, Vec<UserId>), DisputeError> {
        let jurors = self.sampler.sample(candidates, self.jury_size as usize);
        if jurors.is_empty() {
            return Err(DisputeError::NoCandidates);
        }

        let id = DisputeId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let dispute = Dispute {
            id,
            subject,
            complainant,
            description,
            status: DisputeStatus::Open,
            jurors: jurors.clone(),
            votes: HashMap::new(),
            jury_size: self.jury_size,
            decision: None,
            created_at: Timestamp::now(),
        };
        self.disputes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(dispute)));
        debug!(dispute = %id, %subject, jurors = jurors.len(), "created dispute");
        Ok((id, jurors))
    }

    /// Record a juror's ballot and evaluate resolution.
    ///
    /// Returns `Some(Resolution)` iff this ballot closed the dispute. A
    /// closed dispute rejects every further vote, including from jurors who
    /// had not voted yet — the decision never changes.
    pub fn juror_vote(
        &self,
        juror: UserId,
        id: DisputeId,
        ballot: JurorBallot,
    ) -> Result<Option<Resolution>, DisputeError> {
        let handle = self.handle(id).ok_or(DisputeError::NotFound(id))?;
        let mut dispute = lock(&handle);

        if dispute.status == DisputeStatus::Closed {
            return Err(DisputeError::Closed(id));
        }
        if !dispute.is_juror(&juror) {
            return Err(DisputeError::NotJuror {
                dispute: id,
                juror: juror.to_string(),
            });
        }

        // Last ballot per juror wins.
        dispute.votes.insert(juror, ballot);

        let quorum = quorum_threshold(dispute.jurors.len() as u32, self.jury_quorum_ratio_bps);
        if (dispute.votes.len() as u32) < quorum {
            return Ok(None);
        }

        let decision = Self::verdict(&dispute.votes);
        dispute.status = DisputeStatus::Closed;
        dispute.decision = Some(decision);
        info!(
            dispute = %id,
            subject = %dispute.subject,
            decision = decision.as_str(),
            "dispute resolved"
        );
        Ok(Some(Resolution {
            dispute_id: id,
            subject: dispute.subject,
            decision,
        }))
    }

    /// Mode of the ballots: a unique maximum wins, a shared maximum is a tie.
    fn verdict(votes: &HashMap<UserId, JurorBallot>) -> Decision {
        let valid = votes.values().filter(|b| **b == JurorBallot::Valid).count();
        let invalid = votes.len() - valid;
        match valid.cmp(&invalid) {
            std::cmp::Ordering::Greater => Decision::Valid,
            std::cmp::Ordering::Less => Decision::Invalid,
            std::cmp::Ordering::Equal => Decision::Tie,
        }
    }

    /// Snapshot of a dispute, if it exists.
    pub fn dispute(&self, id: DisputeId) -> Option<Dispute> {
        let handle = self.handle(id)?;
        let dispute = lock(&handle);
        Some(dispute.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::PostId;

    /// Deterministic sampler: takes the first `k` candidates in order.
    struct FirstK;

    impl JurorSampler for FirstK {
        fn sample(&self, pool: &[UserId], k: usize) -> Vec<UserId> {
            pool.iter().take(k).cloned().collect()
        }
        fn name(&self) -> &str {
            "first-k"
        }
    }

    fn uid(s: &str) -> UserId {
        UserId::new(s)
    }

    fn jurors(n: usize) -> Vec<UserId> {
        (0..n).map(|i| uid(&format!("j{i}"))).collect()
    }

    fn engine(jury_size: u32) -> DisputeEngine {
        DisputeEngine::new(jury_size, 5000, Arc::new(FirstK))
    }

    fn open_dispute(engine: &DisputeEngine, pool: &[UserId]) -> DisputeId {
        let (id, _) = engine
            .create_dispute(
                uid("reporter"),
                Subject::Post(PostId::new(5)),
                ContentRef::new("complaint"),
                pool,
            )
            .unwrap();
        id
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = engine(3)
            .create_dispute(
                uid("r"),
                Subject::Post(PostId::new(1)),
                ContentRef::new("c"),
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, DisputeError::NoCandidates));
    }

    #[test]
    fn short_pool_selects_everyone() {
        let pool = jurors(2);
        let engine = engine(7);
        let (id, selected) = engine
            .create_dispute(
                uid("r"),
                Subject::Post(PostId::new(1)),
                ContentRef::new("c"),
                &pool,
            )
            .unwrap();
        assert_eq!(selected, pool);
        assert_eq!(engine.dispute(id).unwrap().jury_size, 7);
    }

    #[test]
    fn non_juror_cannot_vote() {
        let engine = engine(3);
        let id = open_dispute(&engine, &jurors(3));
        let err = engine
            .juror_vote(uid("outsider"), id, JurorBallot::Valid)
            .unwrap_err();
        assert!(matches!(err, DisputeError::NotJuror { .. }));
    }

    #[test]
    fn majority_valid_resolves_at_quorum() {
        // Jury of 3, 50% quorum -> 2 votes resolve.
        let engine = engine(3);
        let id = open_dispute(&engine, &jurors(3));

        assert!(engine
            .juror_vote(uid("j0"), id, JurorBallot::Valid)
            .unwrap()
            .is_none());
        let resolution = engine
            .juror_vote(uid("j1"), id, JurorBallot::Valid)
            .unwrap()
            .expect("second vote reaches quorum");
        assert_eq!(resolution.decision, Decision::Valid);
        assert_eq!(resolution.subject, Subject::Post(PostId::new(5)));

        let dispute = engine.dispute(id).unwrap();
        assert_eq!(dispute.status, DisputeStatus::Closed);
        assert_eq!(dispute.decision, Some(Decision::Valid));
    }

    #[test]
    fn closed_dispute_rejects_late_jurors() {
        let engine = engine(3);
        let id = open_dispute(&engine, &jurors(3));
        engine.juror_vote(uid("j0"), id, JurorBallot::Valid).unwrap();
        engine.juror_vote(uid("j1"), id, JurorBallot::Valid).unwrap();

        // j2 never voted, but the verdict is in.
        let err = engine
            .juror_vote(uid("j2"), id, JurorBallot::Invalid)
            .unwrap_err();
        assert!(matches!(err, DisputeError::Closed(_)));
        assert_eq!(engine.dispute(id).unwrap().decision, Some(Decision::Valid));
    }

    #[test]
    fn even_split_is_a_tie() {
        // Jury of 4, 50% quorum -> resolves after 2 votes; 1-1 split.
        let engine = engine(4);
        let id = open_dispute(&engine, &jurors(4));
        engine.juror_vote(uid("j0"), id, JurorBallot::Valid).unwrap();
        let resolution = engine
            .juror_vote(uid("j1"), id, JurorBallot::Invalid)
            .unwrap()
            .expect("quorum of 2 reached");
        assert_eq!(resolution.decision, Decision::Tie);
    }

    #[test]
    fn revote_overwrites_before_quorum() {
        // Jury of 5, 50% quorum -> 3 votes needed.
        let engine = engine(5);
        let id = open_dispute(&engine, &jurors(5));
        engine.juror_vote(uid("j0"), id, JurorBallot::Valid).unwrap();
        engine.juror_vote(uid("j0"), id, JurorBallot::Invalid).unwrap();

        let dispute = engine.dispute(id).unwrap();
        assert_eq!(dispute.votes.len(), 1);
        assert_eq!(dispute.votes[&uid("j0")], JurorBallot::Invalid);
    }

    #[test]
    fn degraded_jury_can_still_resolve() {
        // Configured size 7, pool of 2: quorum is measured against the
        // actual jury, so ceil(2 * 0.5) = 1 vote resolves.
        let engine = engine(7);
        let id = open_dispute(&engine, &jurors(2));
        let resolution = engine
            .juror_vote(uid("j0"), id, JurorBallot::Invalid)
            .unwrap()
            .expect("degraded jury must be able to resolve");
        assert_eq!(resolution.decision, Decision::Invalid);
    }
}
