use anchor_lang::prelude::*;

declare_id!("7XDST8WpuVzZpYqaoVsw5pYJ4NEqvFxkyegx4nK34FMP");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("45gVbLLSYYcW254TFoJMXmfupM5dJaFxTLsbny2eqKWx");
}

pub mod veris_mint {
    use anchor_lang::prelude::declare_id;
    declare_id!("9XjXYmL9TLB3FuszEuXCTkjC6a4vHZ5TPWczyNMLKHRg");
}

pub const AUTH_SEED: &str = "stake_and_treasury_auth";
pub const STAKE_VAULT_SEED: &str = "stake_vault";

/// Fixed-point scale of the reward-per-share accumulator.
pub const SCALE: u128 = 1_000_000_000_000_000_000;
/// Basis-point denominator shared by every rate in the program.
pub const BPS_DENOMINATOR: u64 = 10_000;
/// Early-exit penalty decays linearly to zero over this many seconds.
pub const PENALTY_PERIOD: u64 = 90 * 86_400;
/// Penalty rate charged at elapsed = 0, in basis points.
pub const MAX_PENALTY_RATE_BPS: u64 = 2_500;
/// Hard ceiling for the governance-set emissions rate (base units per second).
pub const MAX_EMISSIONS_PER_SECOND: u64 = 100_000_000_000;

/// Allocation window discriminators. The flag value is hashed into every
/// claim leaf, so the two trees can never satisfy each other's proofs.
pub const SIX_MONTH_WINDOW: u8 = 0;
pub const TWELVE_MONTH_WINDOW: u8 = 1;
pub const WINDOW_COUNT: usize = 2;

pub mod error;
pub mod instructions;
pub mod math;
pub mod merkle;
pub mod states;
pub mod utils;
pub mod views;

use instructions::*;

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Veris Stake",
    project_url: "https://veris.fi",
    contacts: "email:security@veris.fi",
    policy: "https://veris.fi/security",
    preferred_languages: "en"
}

#[program]
pub mod veris_stake {

    use super::*;

    pub fn initialise_configs(
        ctx: Context<InitialiseConfigs>,
        admin: Pubkey,
        treasury: Pubkey,
        min_stake_amount: u64,
        emissions_per_second: u64,
        tier_thresholds: [u64; 3],
        tier_multiplier_bps: [u64; 3],
        penalty_burn_bps: u64,
        penalty_treasury_bps: u64,
        penalty_refill_bps: u64,
    ) -> Result<()> {
        instructions::initialise_configs(
            ctx,
            admin,
            treasury,
            min_stake_amount,
            emissions_per_second,
            tier_thresholds,
            tier_multiplier_bps,
            penalty_burn_bps,
            penalty_treasury_bps,
            penalty_refill_bps,
        )
    }

    pub fn initialise_allocation_pool(
        ctx: Context<InitialiseAllocationPool>,
        window: u8,
        merkle_root: [u8; 32],
        expiry_ts: u64,
        amount: u64,
    ) -> Result<()> {
        instructions::initialise_allocation_pool(ctx, window, merkle_root, expiry_ts, amount)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    pub fn gift_stake(ctx: Context<GiftStake>, amount: u64) -> Result<()> {
        instructions::gift_stake(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards(ctx)
    }

    pub fn compound_rewards(ctx: Context<CompoundRewards>) -> Result<()> {
        instructions::compound_rewards(ctx)
    }

    pub fn claim_allocation(
        ctx: Context<ClaimAllocation>,
        six_month_amount: u64,
        six_month_proof: Vec<[u8; 32]>,
        twelve_month_amount: u64,
        twelve_month_proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::claim_allocation(
            ctx,
            six_month_amount,
            six_month_proof,
            twelve_month_amount,
            twelve_month_proof,
        )
    }

    pub fn transfer_stake(ctx: Context<TransferStake>) -> Result<()> {
        instructions::transfer_stake(ctx)
    }

    pub fn expire_pool(ctx: Context<ExpirePool>, window: u8) -> Result<()> {
        instructions::expire_pool(ctx, window)
    }

    pub fn distribute_expired(ctx: Context<DistributeExpired>) -> Result<()> {
        instructions::distribute_expired(ctx)
    }

    pub fn withdraw_treasury(ctx: Context<WithdrawTreasury>) -> Result<()> {
        instructions::withdraw_treasury(ctx)
    }

    pub fn fund_emissions(ctx: Context<FundEmissions>, amount: u64) -> Result<()> {
        instructions::fund_emissions(ctx, amount)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, param: u8, value: u64) -> Result<()> {
        instructions::update_config(ctx, param, value)
    }

    pub fn update_tier_config(
        ctx: Context<UpdateTierConfig>,
        tier_thresholds: [u64; 3],
        tier_multiplier_bps: [u64; 3],
    ) -> Result<()> {
        instructions::update_tier_config(ctx, tier_thresholds, tier_multiplier_bps)
    }

    pub fn update_penalty_split(
        ctx: Context<UpdatePenaltySplit>,
        burn_bps: u64,
        treasury_bps: u64,
        refill_bps: u64,
    ) -> Result<()> {
        instructions::update_penalty_split(ctx, burn_bps, treasury_bps, refill_bps)
    }

    pub fn emergency_withdraw(
        ctx: Context<EmergencyWithdraw>,
        param: u8,
        value: u64,
    ) -> Result<()> {
        instructions::emergency_withdraw(ctx, param, value)
    }
}
