//! Juror sampling behind a capability trait.
//!
//! Juror selection is trust-critical: a predictable or biased sampler lets a
//! bad actor steer disputes toward a jury it controls. The production
//! sampler draws from the operating system's CSPRNG; tests inject
//! deterministic doubles through the same trait.

use agora_types::UserId;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

/// Capability trait for drawing a jury from a candidate pool.
pub trait JurorSampler: Send + Sync {
    /// Draw a uniform sample of `min(k, pool.len())` distinct members.
    ///
    /// Must never return duplicates or ids outside `pool`.
    fn sample(&self, pool: &[UserId], k: usize) -> Vec<UserId>;

    /// Human-readable name of this sampler.
    fn name(&self) -> &str;
}

/// Unbiased sampler backed by the OS randomness source.
#[derive(Debug, Default)]
pub struct SystemSampler;

impl JurorSampler for SystemSampler {
    fn sample(&self, pool: &[UserId], k: usize) -> Vec<UserId> {
        pool.choose_multiple(&mut OsRng, k).cloned().collect()
    }

    fn name(&self) -> &str {
        "os-csprng"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<UserId> {
        (0..n).map(|i| UserId::new(format!("juror{i}"))).collect()
    }

    #[test]
    fn sample_is_distinct_and_exact_size() {
        let candidates = pool(20);
        let sampler = SystemSampler;
        let jury = sampler.sample(&candidates, 7);
        assert_eq!(jury.len(), 7);
        let unique: HashSet<_> = jury.iter().collect();
        assert_eq!(unique.len(), 7);
        assert!(jury.iter().all(|j| candidates.contains(j)));
    }

    #[test]
    fn short_pool_returns_whole_pool() {
        let candidates = pool(3);
        let jury = SystemSampler.sample(&candidates, 7);
        let unique: HashSet<_> = jury.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn empty_pool_returns_empty() {
        assert!(SystemSampler.sample(&[], 7).is_empty());
    }
}
