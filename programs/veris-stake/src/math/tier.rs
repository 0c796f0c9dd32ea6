//! Stake-size tier classification.
//!
//! Tiers are derived on every evaluation, never stored, so a withdrawal or
//! merge that crosses a threshold changes the effective multiplier on the
//! very next call with no extra bookkeeping.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    None,
    One,
    Two,
    Three,
}

/// Classify a stake amount against strictly ascending thresholds, highest
/// tier first.
pub fn classify(amount: u64, thresholds: &[u64; 3]) -> Tier {
    if amount >= thresholds[2] {
        Tier::Three
    } else if amount >= thresholds[1] {
        Tier::Two
    } else if amount >= thresholds[0] {
        Tier::One
    } else {
        Tier::None
    }
}

/// Reward-bonus multiplier for a tier, in basis points.
pub fn multiplier_bps(tier: Tier, multipliers: &[u64; 3]) -> u64 {
    match tier {
        Tier::None => 0,
        Tier::One => multipliers[0],
        Tier::Two => multipliers[1],
        Tier::Three => multipliers[2],
    }
}

/// `true` when `thresholds` satisfies the strictly-ascending invariant.
pub fn thresholds_ascending(thresholds: &[u64; 3]) -> bool {
    thresholds[0] < thresholds[1] && thresholds[1] < thresholds[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: [u64; 3] = [10_000, 100_000, 1_000_000];
    const MULTIPLIERS: [u64; 3] = [500, 1_000, 2_000];

    #[test]
    fn classification_boundaries_are_inclusive() {
        assert_eq!(classify(9_999, &THRESHOLDS), Tier::None);
        assert_eq!(classify(10_000, &THRESHOLDS), Tier::One);
        assert_eq!(classify(99_999, &THRESHOLDS), Tier::One);
        assert_eq!(classify(100_000, &THRESHOLDS), Tier::Two);
        assert_eq!(classify(1_000_000, &THRESHOLDS), Tier::Three);
        assert_eq!(classify(u64::MAX, &THRESHOLDS), Tier::Three);
    }

    #[test]
    fn multiplier_follows_the_tier() {
        assert_eq!(multiplier_bps(Tier::None, &MULTIPLIERS), 0);
        assert_eq!(multiplier_bps(Tier::One, &MULTIPLIERS), 500);
        assert_eq!(multiplier_bps(Tier::Two, &MULTIPLIERS), 1_000);
        assert_eq!(multiplier_bps(Tier::Three, &MULTIPLIERS), 2_000);
    }

    #[test]
    fn ascending_check_rejects_ties() {
        assert!(thresholds_ascending(&[1, 2, 3]));
        assert!(!thresholds_ascending(&[1, 1, 3]));
        assert!(!thresholds_ascending(&[3, 2, 1]));
    }
}
