//! Quorum arithmetic shared by the proposal and dispute engines.

/// Ceiling of `population × ratio_bps / 10_000`.
///
/// All quorum math is integer basis points — no floating point, so every
/// node computes the same threshold. A zero population yields a zero
/// threshold (quorum is trivially met; callers gate on other conditions
/// before that matters).
pub fn quorum_threshold(population: u32, ratio_bps: u32) -> u32 {
    let product = population as u64 * ratio_bps as u64;
    product.div_ceil(10_000) as u32
}

#[cfg(test)]
mod tests {
    use super::quorum_threshold;

    #[test]
    fn sixty_percent_of_two_is_two() {
        // ceil(2 * 0.6) = 2 — both voters must participate.
        assert_eq!(quorum_threshold(2, 6000), 2);
    }

    #[test]
    fn rounds_up_not_down() {
        assert_eq!(quorum_threshold(5, 6000), 3); // 3.0 exactly
        assert_eq!(quorum_threshold(7, 6000), 5); // 4.2 -> 5
        assert_eq!(quorum_threshold(3, 5000), 2); // 1.5 -> 2
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(quorum_threshold(0, 6000), 0);
        assert_eq!(quorum_threshold(10, 0), 0);
        assert_eq!(quorum_threshold(10, 10_000), 10);
    }
}
