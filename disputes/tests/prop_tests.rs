use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use agora_disputes::{
    Decision, DisputeEngine, DisputeStatus, JurorBallot, JurorSampler, Subject, SystemSampler,
};
use agora_types::{ContentRef, PostId, UserId};

fn candidates(n: usize) -> Vec<UserId> {
    (0..n).map(|i| UserId::new(format!("juror{i}"))).collect()
}

proptest! {
    /// The system sampler never selects a non-candidate, never duplicates,
    /// and selects exactly `k` jurors whenever the pool allows.
    #[test]
    fn sampling_is_well_formed(pool_size in 0usize..40, k in 0usize..15) {
        let pool = candidates(pool_size);
        let jury = SystemSampler.sample(&pool, k);

        prop_assert_eq!(jury.len(), k.min(pool_size));
        let unique: HashSet<_> = jury.iter().collect();
        prop_assert_eq!(unique.len(), jury.len(), "duplicate juror selected");
        for juror in &jury {
            prop_assert!(pool.contains(juror), "non-candidate selected");
        }
    }

    /// Whatever order ballots arrive in, the dispute closes exactly once,
    /// and the stored decision matches the valid/invalid counts at the
    /// moment quorum was reached.
    #[test]
    fn resolution_is_exactly_once(
        jury_size in 1u32..10,
        ballots in prop::collection::vec(prop::bool::ANY, 1..10),
    ) {
        let engine = DisputeEngine::new(jury_size, 5000, Arc::new(SystemSampler));
        let pool = candidates(jury_size as usize);
        let (id, jurors) = engine
            .create_dispute(
                UserId::new("reporter"),
                Subject::Post(PostId::new(1)),
                ContentRef::new("complaint"),
                &pool,
            )
            .unwrap();

        let mut resolutions = 0;
        let mut valid = 0usize;
        let mut invalid = 0usize;
        for (juror, cast_valid) in jurors.iter().zip(ballots.iter()) {
            let ballot = if *cast_valid { JurorBallot::Valid } else { JurorBallot::Invalid };
            match engine.juror_vote(juror.clone(), id, ballot) {
                Ok(Some(resolution)) => {
                    resolutions += 1;
                    if *cast_valid { valid += 1 } else { invalid += 1 }
                    let expected = match valid.cmp(&invalid) {
                        std::cmp::Ordering::Greater => Decision::Valid,
                        std::cmp::Ordering::Less => Decision::Invalid,
                        std::cmp::Ordering::Equal => Decision::Tie,
                    };
                    prop_assert_eq!(resolution.decision, expected);
                }
                Ok(None) => {
                    if *cast_valid { valid += 1 } else { invalid += 1 }
                }
                Err(_) => {
                    // Only possible once the dispute has closed.
                    prop_assert_eq!(
                        engine.dispute(id).unwrap().status,
                        DisputeStatus::Closed
                    );
                }
            }
        }
        prop_assert!(resolutions <= 1, "dispute resolved more than once");
    }
}
