use anchor_lang::prelude::*;

pub const GLOBAL_CONFIG_SEED: &str = "global_config";

#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    pub bump: u8,
    pub admin: Pubkey,
    /// Pull-payment recipient for the treasury share of penalties.
    pub treasury: Pubkey,
    pub stake_vault: Pubkey,
    pub min_stake_amount: u64,
    /// Strictly ascending stake-amount thresholds for tiers 1..=3.
    pub tier_thresholds: [u64; 3],
    /// Reward-bonus multipliers for tiers 1..=3, in basis points.
    pub tier_multiplier_bps: [u64; 3],
    pub penalty_burn_bps: u64,
    pub penalty_treasury_bps: u64,
    pub penalty_refill_bps: u64,
    pub paused: bool,
}

impl GlobalConfig {
    pub const LEN: usize = 8 + 1 + 32 * 3 + 8 + 8 * 3 + 8 * 3 + 8 * 3 + 1;
}
