use anchor_lang::prelude::*;

pub const STAKE_RECORD_SEED: &str = "stake_record";

/// One stake position per account. The PDA derivation guarantees at most one
/// record per owner; a record with `amount == 0` is considered dead and may
/// be reopened.
#[account]
#[derive(Default, Debug)]
pub struct StakeRecord {
    pub bump: u8,
    pub owner: Pubkey,
    pub amount: u64,
    /// Weighted-average start of the position; the penalty decay clock.
    pub start_ts: u64,
    /// Accumulator value at the last settlement, scaled by `crate::SCALE`.
    pub reward_checkpoint: u128,
    /// Reward settled but not yet claimed or compounded.
    pub accrued_reward: u64,
}

impl StakeRecord {
    pub const LEN: usize = 8 + 1 + 32 + 8 + 8 + 16 + 8;

    pub fn is_live(&self) -> bool {
        self.amount > 0
    }

    /// Zero every field except the bump. A cleared record is dead until a
    /// future open writes it again.
    pub fn clear(&mut self) {
        self.owner = Pubkey::default();
        self.amount = 0;
        self.start_ts = 0;
        self.reward_checkpoint = 0;
        self.accrued_reward = 0;
    }
}
