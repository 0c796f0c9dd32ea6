//! Read-only previews over ledger state.
//!
//! Everything here is side-effect free and operates on fetched account data,
//! so the client can answer "what would happen if" questions without sending
//! a transaction. The accumulator is simulated forward to `now` the same way
//! a real checkpoint would advance it.

use crate::math::{accrual, penalty, stake, tier};
use crate::states::{AllocationPool, GlobalConfig, RewardPool, StakeRecord};
use crate::PENALTY_PERIOD;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// The accumulator as it would stand after a checkpoint at `now`.
pub fn simulated_acc(pool: &RewardPool, now: u64) -> Option<u128> {
    let elapsed = now.saturating_sub(pool.last_checkpoint_ts);
    if elapsed == 0 || pool.total_staked == 0 {
        return Some(pool.acc_reward_per_share);
    }
    let delta = accrual::accumulator_delta(
        elapsed,
        pool.emissions_per_second,
        pool.remaining_emissions,
        pool.total_staked,
    )?;
    pool.acc_reward_per_share.checked_add(delta)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeSnapshot {
    pub amount: u64,
    pub start_ts: u64,
    pub tier: tier::Tier,
    pub penalty_rate_bps: u64,
    pub seconds_to_zero_penalty: u64,
    /// Settled plus unsettled reward as of `now`, before any tier bonus.
    pub pending_reward: u64,
}

pub fn stake_snapshot(
    config: &GlobalConfig,
    pool: &RewardPool,
    record: &StakeRecord,
    now: u64,
) -> Option<StakeSnapshot> {
    let elapsed = now.saturating_sub(record.start_ts);
    let acc = simulated_acc(pool, now)?;
    let unsettled = accrual::pending_reward(record.amount, acc, record.reward_checkpoint)?;
    Some(StakeSnapshot {
        amount: record.amount,
        start_ts: record.start_ts,
        tier: tier::classify(record.amount, &config.tier_thresholds),
        penalty_rate_bps: penalty::penalty_rate_bps(elapsed),
        seconds_to_zero_penalty: PENALTY_PERIOD.saturating_sub(elapsed),
        pending_reward: record.accrued_reward.checked_add(unsettled)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyPreview {
    pub rate_bps: u64,
    pub penalty: u64,
    pub net_amount: u64,
}

/// What an arbitrary withdrawal would cost right now.
pub fn penalty_preview(record: &StakeRecord, amount: u64, now: u64) -> Option<PenaltyPreview> {
    let elapsed = now.saturating_sub(record.start_ts);
    let charged = penalty::penalty_amount(amount, elapsed)?;
    Some(PenaltyPreview {
        rate_bps: penalty::penalty_rate_bps(elapsed),
        penalty: charged,
        net_amount: amount.checked_sub(charged)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimablePreview {
    pub base: u64,
    pub bonus: u64,
    /// Paid total after the remaining-emissions cap.
    pub total: u64,
}

pub fn claimable_preview(
    config: &GlobalConfig,
    pool: &RewardPool,
    record: &StakeRecord,
    now: u64,
) -> Option<ClaimablePreview> {
    let acc = simulated_acc(pool, now)?;
    let unsettled = accrual::pending_reward(record.amount, acc, record.reward_checkpoint)?;
    let base = record.accrued_reward.checked_add(unsettled)?;
    let mult = tier::multiplier_bps(
        tier::classify(record.amount, &config.tier_thresholds),
        &config.tier_multiplier_bps,
    );
    let out = accrual::tiered_claim(base, mult, pool.remaining_emissions)?;
    Some(ClaimablePreview {
        base: out.base_consumed,
        bonus: out.bonus,
        total: out.total,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePreview {
    pub new_amount: u64,
    pub new_start_ts: u64,
    pub new_penalty_rate_bps: u64,
}

fn merge_preview(record: &StakeRecord, added: u64, now: u64) -> Option<MergePreview> {
    let new_start = if record.amount == 0 {
        now
    } else {
        stake::merged_start_ts(record.amount, record.start_ts, added, now)?
    };
    Some(MergePreview {
        new_amount: record.amount.checked_add(added)?,
        new_start_ts: new_start,
        new_penalty_rate_bps: penalty::penalty_rate_bps(now.saturating_sub(new_start)),
    })
}

/// Position shape after compounding today's claimable total.
pub fn compound_preview(
    config: &GlobalConfig,
    pool: &RewardPool,
    record: &StakeRecord,
    now: u64,
) -> Option<MergePreview> {
    let claimable = claimable_preview(config, pool, record, now)?;
    merge_preview(record, claimable.total, now)
}

/// Position shape after topping up by `added`.
pub fn addon_preview(record: &StakeRecord, added: u64, now: u64) -> Option<MergePreview> {
    merge_preview(record, added, now)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalStats {
    pub total_staked: u64,
    pub remaining_emissions: u64,
    pub emissions_per_second: u64,
    pub acc_reward_per_share: u128,
    pub expired_pool_amount: u64,
    pub paused: bool,
}

pub fn global_stats(config: &GlobalConfig, pool: &RewardPool, now: u64) -> Option<GlobalStats> {
    Some(GlobalStats {
        total_staked: pool.total_staked,
        remaining_emissions: pool.remaining_emissions,
        emissions_per_second: pool.emissions_per_second,
        acc_reward_per_share: simulated_acc(pool, now)?,
        expired_pool_amount: pool.expired_pool_amount,
        paused: config.paused,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub window: u8,
    pub unassigned_amount: u64,
    pub expiry_ts: u64,
    pub expired: bool,
    pub seconds_to_expiry: u64,
}

pub fn pool_status(pool: &AllocationPool, now: u64) -> PoolStatus {
    PoolStatus {
        window: pool.window,
        unassigned_amount: pool.unassigned_amount,
        expiry_ts: pool.expiry_ts,
        expired: now >= pool.expiry_ts,
        seconds_to_expiry: pool.expiry_ts.saturating_sub(now),
    }
}

/// `None` means the claim would be accepted; otherwise a human-readable
/// reason for rejection. Proof verification happens client-side against the
/// posted root before this check.
pub fn claim_ineligibility_reason(
    pool: &AllocationPool,
    already_claimed: bool,
    amount: u64,
    proof_valid: bool,
    now: u64,
) -> Option<&'static str> {
    if now >= pool.expiry_ts {
        return Some("allocation window has expired");
    }
    if already_claimed {
        return Some("allocation already claimed for this window");
    }
    if amount == 0 {
        return Some("no allocation for this account in this window");
    }
    if !proof_valid {
        return Some("merkle proof does not verify against the window root");
    }
    if pool.unassigned_amount < amount {
        return Some("allocation pool cannot cover the claimed amount");
    }
    None
}

/// Annualized emission rate relative to the staked total, in basis points.
pub fn annualized_rate_bps(pool: &RewardPool) -> Option<u64> {
    if pool.total_staked == 0 {
        return None;
    }
    let rate = (pool.emissions_per_second as u128)
        .checked_mul(SECONDS_PER_YEAR as u128)?
        .checked_mul(crate::BPS_DENOMINATOR as u128)?
        .checked_div(pool.total_staked as u128)?;
    u64::try_from(rate).ok()
}

/// Seconds until the remaining emission budget runs dry at the current rate.
pub fn emissions_runway_seconds(pool: &RewardPool) -> Option<u64> {
    if pool.emissions_per_second == 0 {
        return None;
    }
    Some(pool.remaining_emissions / pool.emissions_per_second)
}

/// Total supply minus everything still locked in this ledger: staked
/// principal, the unconsumed emission budget, unassigned and expired
/// allocation balances, and pending treasury credits.
pub fn circulating_supply(
    total_supply: u64,
    pool: &RewardPool,
    unassigned_total: u64,
    pending_treasury: u64,
) -> u64 {
    total_supply
        .saturating_sub(pool.total_staked)
        .saturating_sub(pool.remaining_emissions)
        .saturating_sub(pool.expired_pool_amount)
        .saturating_sub(unassigned_total)
        .saturating_sub(pending_treasury)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_PENALTY_RATE_BPS, SCALE};

    fn config() -> GlobalConfig {
        GlobalConfig {
            tier_thresholds: [10_000, 100_000, 1_000_000],
            tier_multiplier_bps: [500, 1_000, 2_000],
            ..Default::default()
        }
    }

    fn pool() -> RewardPool {
        RewardPool {
            total_staked: 1_000_000,
            remaining_emissions: u64::MAX / 2,
            emissions_per_second: 10,
            ..Default::default()
        }
    }

    #[test]
    fn snapshot_reports_decay_and_pending_reward() {
        let record = StakeRecord {
            amount: 1_000_000,
            start_ts: 0,
            ..Default::default()
        };
        let now = PENALTY_PERIOD / 2;
        let snap = stake_snapshot(&config(), &pool(), &record, now).unwrap();
        assert_eq!(snap.penalty_rate_bps, MAX_PENALTY_RATE_BPS / 2);
        assert_eq!(snap.seconds_to_zero_penalty, PENALTY_PERIOD / 2);
        assert_eq!(snap.tier, tier::Tier::Three);
        // Sole staker: pending equals the full emission so far.
        assert_eq!(snap.pending_reward, 10 * now);
    }

    #[test]
    fn penalty_preview_matches_the_decay_rate() {
        let record = StakeRecord {
            amount: 10_000,
            start_ts: 0,
            ..Default::default()
        };
        let p = penalty_preview(&record, 4_000, 0).unwrap();
        assert_eq!(p.rate_bps, MAX_PENALTY_RATE_BPS);
        assert_eq!(p.penalty, 1_000);
        assert_eq!(p.net_amount, 3_000);
    }

    #[test]
    fn compound_preview_merges_the_claim_total() {
        let cfg = config();
        let mut p = pool();
        p.acc_reward_per_share = 2 * SCALE;
        let record = StakeRecord {
            amount: 1_000_000,
            start_ts: 0,
            reward_checkpoint: 0,
            ..Default::default()
        };
        let prev = compound_preview(&cfg, &p, &record, 0).unwrap();
        // base 2_000_000, tier 3 bonus 20%.
        assert_eq!(prev.new_amount, 1_000_000 + 2_400_000);
        assert_eq!(prev.new_start_ts, 0);
    }

    #[test]
    fn runway_and_rate_estimates() {
        let mut p = pool();
        p.remaining_emissions = 1_000;
        p.emissions_per_second = 10;
        assert_eq!(emissions_runway_seconds(&p), Some(100));
        assert_eq!(
            annualized_rate_bps(&p),
            Some(10 * SECONDS_PER_YEAR * 10_000 / 1_000_000)
        );
    }

    #[test]
    fn circulating_supply_nets_out_all_liabilities() {
        let mut p = pool();
        p.total_staked = 100;
        p.remaining_emissions = 50;
        p.expired_pool_amount = 25;
        assert_eq!(circulating_supply(1_000, &p, 30, 20), 775);
    }

    #[test]
    fn ineligibility_reasons_in_precedence_order() {
        let ap = AllocationPool {
            expiry_ts: 100,
            unassigned_amount: 10,
            ..Default::default()
        };
        assert!(claim_ineligibility_reason(&ap, false, 5, true, 100).is_some());
        assert!(claim_ineligibility_reason(&ap, true, 5, true, 0).is_some());
        assert!(claim_ineligibility_reason(&ap, false, 0, true, 0).is_some());
        assert!(claim_ineligibility_reason(&ap, false, 5, false, 0).is_some());
        assert!(claim_ineligibility_reason(&ap, false, 50, true, 0).is_some());
        assert_eq!(claim_ineligibility_reason(&ap, false, 5, true, 0), None);
    }
}
