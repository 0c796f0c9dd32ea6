use anchor_lang::prelude::*;

pub const REWARD_POOL_SEED: &str = "reward_pool";

/// Global accrual state. `acc_reward_per_share` only ever grows, and it
/// advances exclusively through the checkpoint that every mutating
/// instruction runs first.
#[account]
#[derive(Default, Debug)]
pub struct RewardPool {
    pub bump: u8,
    /// Reward earned per staked base unit, scaled by `crate::SCALE`.
    pub acc_reward_per_share: u128,
    pub last_checkpoint_ts: u64,
    /// Sum of every live stake record's amount.
    pub total_staked: u64,
    /// Unconsumed emission budget. Reduced when rewards are paid or
    /// compounded, topped up by funding and the refill share of penalties.
    pub remaining_emissions: u64,
    pub emissions_per_second: u64,
    /// Balances swept out of expired allocation windows, pending
    /// redistribution through the penalty split.
    pub expired_pool_amount: u64,
}

impl RewardPool {
    pub const LEN: usize = 8 + 1 + 16 + 8 * 5;
}
