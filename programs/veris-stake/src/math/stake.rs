//! The time-weighted stake-merge rule.

use crate::error::ErrorCode;
use crate::states::StakeRecord;
use anchor_lang::prelude::*;

/// Weighted-average start time for a merge. The one formula shared by
/// top-ups, gifts, compounding and allocation claims: the unlock clock is
/// pulled forward proportionally to the new contribution's share, never
/// reset outright and never ignored.
pub fn merged_start_ts(
    old_amount: u64,
    old_start_ts: u64,
    added_amount: u64,
    now: u64,
) -> Option<u64> {
    let total = (old_amount as u128).checked_add(added_amount as u128)?;
    if total == 0 {
        return None;
    }
    let weighted = (old_amount as u128)
        .checked_mul(old_start_ts as u128)?
        .checked_add((added_amount as u128).checked_mul(now as u128)?)?;
    Some((weighted / total) as u64)
}

/// Open a dead record or merge into a live one. Settlement must already
/// have happened; this touches only the position fields.
pub fn open_or_merge(record: &mut StakeRecord, owner: Pubkey, amount: u64, now: u64) -> Result<()> {
    if record.is_live() {
        record.start_ts = merged_start_ts(record.amount, record.start_ts, amount, now)
            .ok_or(ErrorCode::MathOverflow)?;
        record.amount = record
            .amount
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
    } else {
        record.owner = owner;
        record.amount = amount;
        record.start_ts = now;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn equal_amounts_average_to_the_arithmetic_mean() {
        assert_eq!(merged_start_ts(500, 1_000, 500, 3_000), Some(2_000));
    }

    #[test]
    fn large_addition_dominates_the_clock() {
        // 1 old unit vs 999 new ones: the merged start lands next to `now`.
        let merged = merged_start_ts(1, 0, 999, 1_000_000).unwrap();
        assert_eq!(merged, 999 * 1_000_000 / 1_000);
    }

    #[test]
    fn truncation_rounds_toward_the_older_start() {
        // (3*10 + 1*21) / 4 = 12.75 -> 12
        assert_eq!(merged_start_ts(3, 10, 1, 21), Some(12));
    }

    quickcheck! {
        fn merged_start_stays_within_the_contributing_range(
            old_amount: u64,
            old_start: u32,
            added: u64,
            now: u32
        ) -> bool {
            let old_amount = old_amount >> 1;
            let added = added >> 1;
            if old_amount == 0 && added == 0 {
                return true;
            }
            let (old_start, now) = (old_start as u64, now as u64);
            let merged = merged_start_ts(old_amount, old_start, added, now).unwrap();
            merged >= old_start.min(now) && merged <= old_start.max(now)
        }
    }
}
