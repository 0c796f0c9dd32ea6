use crate::error::ErrorCode;
use crate::math::tier;
use crate::states::*;
use crate::utils::unix_now;
use crate::{AUTH_SEED, BPS_DENOMINATOR, MAX_EMISSIONS_PER_SECOND, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `initialise_configs`.
///
/// This handler:
/// - Initializes global protocol configuration and the reward pool.
/// - Creates the single program vault that holds staked deposits, the
///   emission budget, allocation liabilities and pending treasury credits.
#[derive(Accounts)]
pub struct InitialiseConfigs<'info> {
    /// Admin signer (must match the program-level admin id).
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Program authority PDA, token authority for the vault.
    ///
    /// CHECK: PDA derivation enforced via seeds. Used only as a Pubkey.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Global configuration account holding protocol parameters.
    #[account(
        init,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = GlobalConfig::LEN
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// Global accrual state.
    #[account(
        init,
        seeds = [REWARD_POOL_SEED.as_bytes()],
        bump,
        payer = owner,
        space = RewardPool::LEN
    )]
    pub reward_pool: Account<'info, RewardPool>,

    /// VRS mint address (fixed, canonical program mint).
    #[account(
        address = crate::veris_mint::id() @ ErrorCode::InvalidVerisMint
    )]
    pub veris_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program-owned vault for all VRS held by the protocol.
    #[account(
        init,
        seeds = [STAKE_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = veris_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program interface (required for vault creation).
    pub token_program: Interface<'info, TokenInterface>,

    /// System program (rent/account creation).
    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
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
    require_keys_neq!(admin, Pubkey::default());
    require_keys_neq!(treasury, Pubkey::default());
    require!(
        tier::thresholds_ascending(&tier_thresholds),
        ErrorCode::InvalidThresholds
    );
    for mult in tier_multiplier_bps {
        require!(mult <= BPS_DENOMINATOR, ErrorCode::RateTooHigh);
    }
    require!(
        penalty_burn_bps <= BPS_DENOMINATOR
            && penalty_treasury_bps <= BPS_DENOMINATOR
            && penalty_refill_bps <= BPS_DENOMINATOR
            && penalty_burn_bps + penalty_treasury_bps + penalty_refill_bps == BPS_DENOMINATOR,
        ErrorCode::InvalidPenaltySplit
    );
    require!(
        emissions_per_second <= MAX_EMISSIONS_PER_SECOND,
        ErrorCode::EmissionsRateTooHigh
    );

    let global_config = &mut ctx.accounts.global_config;
    global_config.bump = ctx.bumps.global_config;
    global_config.admin = admin;
    global_config.treasury = treasury;
    global_config.stake_vault = ctx.accounts.stake_vault.key();
    global_config.min_stake_amount = min_stake_amount;
    global_config.tier_thresholds = tier_thresholds;
    global_config.tier_multiplier_bps = tier_multiplier_bps;
    global_config.penalty_burn_bps = penalty_burn_bps;
    global_config.penalty_treasury_bps = penalty_treasury_bps;
    global_config.penalty_refill_bps = penalty_refill_bps;
    global_config.paused = false;

    let reward_pool = &mut ctx.accounts.reward_pool;
    reward_pool.bump = ctx.bumps.reward_pool;
    reward_pool.acc_reward_per_share = 0;
    reward_pool.last_checkpoint_ts = unix_now()?;
    reward_pool.total_staked = 0;
    reward_pool.remaining_emissions = 0;
    reward_pool.emissions_per_second = emissions_per_second;
    reward_pool.expired_pool_amount = 0;

    emit!(GlobalConfigInitialized {
        admin,
        treasury,
        stake_vault: global_config.stake_vault,
        min_stake_amount,
        emissions_per_second,
        tier_thresholds,
        tier_multiplier_bps,
        penalty_burn_bps,
        penalty_treasury_bps,
        penalty_refill_bps,
    });
    Ok(())
}
