//! Early-exit penalty decay and the burn/treasury/refill split.

use crate::{BPS_DENOMINATOR, MAX_PENALTY_RATE_BPS, PENALTY_PERIOD};

/// Linear decay from `MAX_PENALTY_RATE_BPS` at elapsed = 0 down to zero at
/// and after `PENALTY_PERIOD`.
pub fn penalty_rate_bps(elapsed: u64) -> u64 {
    if elapsed >= PENALTY_PERIOD {
        return 0;
    }
    MAX_PENALTY_RATE_BPS * (PENALTY_PERIOD - elapsed) / PENALTY_PERIOD
}

/// Penalty charged on the sub-amount being withdrawn. The rate depends only
/// on the position's elapsed time, never on the remaining balance.
pub fn penalty_amount(amount: u64, elapsed: u64) -> Option<u64> {
    let charged = (amount as u128)
        .checked_mul(penalty_rate_bps(elapsed) as u128)?
        .checked_div(BPS_DENOMINATOR as u128)?;
    Some(charged as u64)
}

/// A value routed through the configured penalty split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitParts {
    pub burn: u64,
    pub treasury: u64,
    /// Remainder share; absorbs all rounding so no value is silently lost.
    pub refill: u64,
}

/// Split `amount` by the configured weights. Burn and treasury parts round
/// down, the refill part takes the remainder.
pub fn split(amount: u64, burn_bps: u64, treasury_bps: u64) -> Option<SplitParts> {
    let burn = (amount as u128)
        .checked_mul(burn_bps as u128)?
        .checked_div(BPS_DENOMINATOR as u128)? as u64;
    let treasury = (amount as u128)
        .checked_mul(treasury_bps as u128)?
        .checked_div(BPS_DENOMINATOR as u128)? as u64;
    let refill = amount.checked_sub(burn)?.checked_sub(treasury)?;
    Some(SplitParts {
        burn,
        treasury,
        refill,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rate_is_maximal_at_zero_elapsed() {
        assert_eq!(penalty_rate_bps(0), MAX_PENALTY_RATE_BPS);
    }

    #[test]
    fn rate_is_zero_at_and_after_the_period() {
        assert_eq!(penalty_rate_bps(PENALTY_PERIOD), 0);
        assert_eq!(penalty_rate_bps(PENALTY_PERIOD + 1), 0);
        assert_eq!(penalty_rate_bps(u64::MAX), 0);
    }

    #[test]
    fn rate_at_half_period_is_exactly_half_the_maximum() {
        assert_eq!(penalty_rate_bps(PENALTY_PERIOD / 2), MAX_PENALTY_RATE_BPS / 2);
    }

    #[test]
    fn penalty_applies_to_the_withdrawn_sub_amount_only() {
        // Withdrawing 1_000 out of a much larger position at t = 0.
        let p = penalty_amount(1_000, 0).unwrap();
        assert_eq!(p, 1_000 * MAX_PENALTY_RATE_BPS / BPS_DENOMINATOR);
    }

    #[test]
    fn full_exit_at_open_returns_amount_minus_max_penalty() {
        let amount = 1_000_000u64;
        let penalty = penalty_amount(amount, 0).unwrap();
        assert_eq!(amount - penalty, 750_000);
    }

    #[test]
    fn split_remainder_goes_to_refill() {
        // 3333 + 3333 bps of 10 leaves rounding dust in the refill share.
        let parts = split(10, 3_333, 3_333).unwrap();
        assert_eq!(parts.burn, 3);
        assert_eq!(parts.treasury, 3);
        assert_eq!(parts.refill, 4);
    }

    proptest! {
        #[test]
        fn rate_is_monotonically_non_increasing(a in 0u64..PENALTY_PERIOD * 2, b in 0u64..PENALTY_PERIOD * 2) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(penalty_rate_bps(lo) >= penalty_rate_bps(hi));
        }

        #[test]
        fn rate_never_exceeds_the_maximum(elapsed in 0u64..u64::MAX) {
            prop_assert!(penalty_rate_bps(elapsed) <= MAX_PENALTY_RATE_BPS);
        }

        #[test]
        fn split_parts_always_sum_to_the_amount(
            amount in 0u64..u64::MAX,
            burn_bps in 0u64..=BPS_DENOMINATOR,
        ) {
            let treasury_bps = BPS_DENOMINATOR - burn_bps;
            let parts = split(amount, burn_bps, treasury_bps).unwrap();
            prop_assert_eq!(parts.burn + parts.treasury + parts.refill, amount);
        }

        #[test]
        fn penalty_never_exceeds_the_amount(amount in 0u64..u64::MAX, elapsed in 0u64..u64::MAX) {
            prop_assert!(penalty_amount(amount, elapsed).unwrap() <= amount);
        }
    }
}
