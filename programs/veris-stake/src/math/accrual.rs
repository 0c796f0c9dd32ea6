//! Reward accrual math.
//!
//! The global index `acc_reward_per_share` accumulates reward per staked base
//! unit, scaled by `crate::SCALE`. Every mutating instruction checkpoints the
//! index and settles the touched record before changing any ledger state;
//! that ordering is the only thing keeping rewards fair under arbitrary call
//! interleavings. All divisions truncate toward zero; the dust is an accepted,
//! never-corrected loss.

use crate::error::ErrorCode;
use crate::states::{RewardPool, StakeRecord};
use crate::{BPS_DENOMINATOR, SCALE};
use anchor_lang::prelude::*;
use spl_math::uint::U256;

/// Index growth for one elapsed interval. Emission is capped at the
/// remaining budget; the caller skips the call entirely while nothing is
/// staked.
pub fn accumulator_delta(
    elapsed: u64,
    emissions_per_second: u64,
    remaining_emissions: u64,
    total_staked: u64,
) -> Option<u128> {
    if total_staked == 0 {
        return None;
    }
    let emitted = (elapsed as u128)
        .checked_mul(emissions_per_second as u128)?
        .min(remaining_emissions as u128);
    emitted.checked_mul(SCALE)?.checked_div(total_staked as u128)
}

/// Reward owed for `amount` across an index delta, truncated to base units.
pub fn pending_reward(amount: u64, acc: u128, checkpoint: u128) -> Option<u64> {
    let delta = acc.checked_sub(checkpoint)?;
    let owed = U256::from(amount)
        .checked_mul(U256::from(delta))?
        .checked_div(U256::from(SCALE))?;
    if owed > U256::from(u64::MAX) {
        return None;
    }
    Some(owed.as_u64())
}

/// Advance the global index to `now`. The accumulator is frozen while
/// `total_staked` is zero, but the checkpoint timestamp always moves.
pub fn checkpoint(pool: &mut RewardPool, now: u64) -> Result<()> {
    let elapsed = now.saturating_sub(pool.last_checkpoint_ts);
    if elapsed > 0 && pool.total_staked > 0 {
        let delta = accumulator_delta(
            elapsed,
            pool.emissions_per_second,
            pool.remaining_emissions,
            pool.total_staked,
        )
        .ok_or(ErrorCode::MathOverflow)?;
        pool.acc_reward_per_share = pool
            .acc_reward_per_share
            .checked_add(delta)
            .ok_or(ErrorCode::MathOverflow)?;
    }
    pool.last_checkpoint_ts = now;
    Ok(())
}

/// Fold the index delta since the record's last settlement into
/// `accrued_reward` and advance the record's checkpoint. For a dead record
/// this only re-bases the checkpoint, which is what lets a subsequent open
/// start accruing from the current index.
pub fn settle(pool: &RewardPool, record: &mut StakeRecord) -> Result<()> {
    if record.is_live() {
        let owed = pending_reward(
            record.amount,
            pool.acc_reward_per_share,
            record.reward_checkpoint,
        )
        .ok_or(ErrorCode::MathOverflow)?;
        record.accrued_reward = record
            .accrued_reward
            .checked_add(owed)
            .ok_or(ErrorCode::MathOverflow)?;
    }
    record.reward_checkpoint = pool.acc_reward_per_share;
    Ok(())
}

/// Result of applying a tier bonus to a settled base reward, capped at the
/// remaining emission budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    /// Portion of the settled base actually consumed by this claim.
    pub base_consumed: u64,
    /// Tier bonus paid on top of the consumed base.
    pub bonus: u64,
    /// Total paid out or compounded; never exceeds the remaining budget.
    pub total: u64,
    /// Unconsumed base left owed on the record for a future call.
    pub carry: u64,
}

/// Apply the tier multiplier to `base` and cap the result at
/// `remaining_emissions`. Under a cap the consumed base is back-computed as
/// `total * 10000 / (10000 + multiplier)`, which treats the bonus as
/// proportional to the whole base; the truncation dust favors the pool.
pub fn tiered_claim(
    base: u64,
    multiplier_bps: u64,
    remaining_emissions: u64,
) -> Option<ClaimOutcome> {
    let bonus = (base as u128)
        .checked_mul(multiplier_bps as u128)?
        .checked_div(BPS_DENOMINATOR as u128)? as u64;
    let total = base.checked_add(bonus)?;
    if total <= remaining_emissions {
        return Some(ClaimOutcome {
            base_consumed: base,
            bonus,
            total,
            carry: 0,
        });
    }
    let total = remaining_emissions;
    let base_consumed = (total as u128)
        .checked_mul(BPS_DENOMINATOR as u128)?
        .checked_div(BPS_DENOMINATOR.checked_add(multiplier_bps)? as u128)?
        as u64;
    Some(ClaimOutcome {
        base_consumed,
        bonus: total.checked_sub(base_consumed)?,
        total,
        carry: base.checked_sub(base_consumed)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DAY: u64 = 86_400;

    fn pool(total_staked: u64, eps: u64, remaining: u64) -> RewardPool {
        RewardPool {
            bump: 255,
            acc_reward_per_share: 0,
            last_checkpoint_ts: 0,
            total_staked,
            remaining_emissions: remaining,
            emissions_per_second: eps,
            expired_pool_amount: 0,
        }
    }

    #[test]
    fn single_staker_earns_full_emission_over_a_year() {
        let stake = 1_000_000u64;
        let eps = 10u64;
        let mut p = pool(stake, eps, u64::MAX);
        let mut r = StakeRecord {
            amount: stake,
            ..Default::default()
        };

        checkpoint(&mut p, 365 * DAY).unwrap();
        settle(&p, &mut r).unwrap();

        assert_eq!(r.accrued_reward, eps * 365 * DAY);
        assert_eq!(p.last_checkpoint_ts, 365 * DAY);
    }

    #[test]
    fn emission_is_capped_at_remaining_budget() {
        let mut p = pool(1_000, 100, 5_000);
        checkpoint(&mut p, 1_000_000).unwrap();
        // 100 * 1_000_000 would far exceed the budget of 5_000.
        assert_eq!(p.acc_reward_per_share, 5_000 * SCALE / 1_000);
    }

    #[test]
    fn accumulator_is_frozen_while_nothing_is_staked() {
        let mut p = pool(0, 100, u64::MAX);
        checkpoint(&mut p, 1_000).unwrap();
        assert_eq!(p.acc_reward_per_share, 0);
        assert_eq!(p.last_checkpoint_ts, 1_000);
    }

    #[test]
    fn settle_rebases_a_dead_record_without_accruing() {
        let mut p = pool(500, 10, u64::MAX);
        checkpoint(&mut p, 100).unwrap();
        let mut r = StakeRecord::default();
        settle(&p, &mut r).unwrap();
        assert_eq!(r.accrued_reward, 0);
        assert_eq!(r.reward_checkpoint, p.acc_reward_per_share);
    }

    #[test]
    fn two_stakers_split_proportionally() {
        // a stakes 3x what b stakes; a should earn 3x the reward.
        let mut p = pool(4_000, 40, u64::MAX);
        let mut a = StakeRecord {
            amount: 3_000,
            ..Default::default()
        };
        let mut b = StakeRecord {
            amount: 1_000,
            ..Default::default()
        };
        checkpoint(&mut p, 1_000).unwrap();
        settle(&p, &mut a).unwrap();
        settle(&p, &mut b).unwrap();
        assert_eq!(a.accrued_reward, 30_000);
        assert_eq!(b.accrued_reward, 10_000);
    }

    #[test]
    fn tiered_claim_uncapped() {
        let out = tiered_claim(10_000, 1_500, u64::MAX).unwrap();
        assert_eq!(out.base_consumed, 10_000);
        assert_eq!(out.bonus, 1_500);
        assert_eq!(out.total, 11_500);
        assert_eq!(out.carry, 0);
    }

    #[test]
    fn tiered_claim_capped_leaves_base_owed() {
        let out = tiered_claim(10_000, 1_500, 5_000).unwrap();
        assert_eq!(out.total, 5_000);
        // 5_000 * 10_000 / 11_500 = 4_347
        assert_eq!(out.base_consumed, 4_347);
        assert_eq!(out.bonus, 653);
        assert_eq!(out.carry, 10_000 - 4_347);
    }

    #[test]
    fn tiered_claim_zero_base_is_zero() {
        let out = tiered_claim(0, 2_000, u64::MAX).unwrap();
        assert_eq!(out.total, 0);
    }

    proptest! {
        #[test]
        fn accumulator_never_decreases(
            steps in proptest::collection::vec((1u64..10_000, 1u64..1_000_000), 1..20),
            eps in 0u64..1_000_000,
            remaining in 0u64..u64::MAX / 2,
        ) {
            let mut p = pool(0, eps, remaining);
            let mut now = 0u64;
            let mut last_acc = 0u128;
            for (dt, staked) in steps {
                now += dt;
                p.total_staked = staked;
                checkpoint(&mut p, now).unwrap();
                prop_assert!(p.acc_reward_per_share >= last_acc);
                last_acc = p.acc_reward_per_share;
            }
        }

        #[test]
        fn settled_reward_never_exceeds_emission(
            stake in 1u64..u64::MAX / 4,
            eps in 1u64..1_000_000,
            elapsed in 1u64..(10 * 365 * DAY),
        ) {
            let mut p = pool(stake, eps, u64::MAX);
            let mut r = StakeRecord { amount: stake, ..Default::default() };
            checkpoint(&mut p, elapsed).unwrap();
            settle(&p, &mut r).unwrap();
            // The sole staker can never be owed more than was emitted.
            prop_assert!(r.accrued_reward <= eps.saturating_mul(elapsed));
        }

        #[test]
        fn capped_claim_consumes_exactly_the_remainder(
            base in 1u64..u64::MAX / 4,
            mult in 0u64..=BPS_DENOMINATOR,
            remaining in 0u64..u64::MAX / 4,
        ) {
            let out = tiered_claim(base, mult, remaining).unwrap();
            prop_assert!(out.total <= remaining || out.total == base + out.bonus);
            prop_assert!(out.base_consumed <= base);
            prop_assert_eq!(out.carry, base - out.base_consumed);
            prop_assert_eq!(out.total, out.base_consumed + out.bonus);
        }
    }
}
