use crate::error::ErrorCode;
use crate::math::{accrual, tier};
use crate::states::*;
use crate::utils::unix_now;
use crate::{BPS_DENOMINATOR, MAX_EMISSIONS_PER_SECOND};
use anchor_lang::prelude::*;

/// Accounts context for the scalar `update_config` instruction.
///
/// Only the stored admin or the program-level admin may call any of the
/// governance handlers in this file.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Authorized signer: must be the stored admin or the hardcoded program admin.
    #[account(
        constraint = (owner.key() == global_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// Checkpointed before any emissions-rate change takes effect.
    #[account(
        mut,
        seeds = [REWARD_POOL_SEED.as_bytes()],
        bump = reward_pool.bump,
    )]
    pub reward_pool: Account<'info, RewardPool>,

    pub system_program: Program<'info, System>,
}

/// Updates selected scalar fields of the global configuration.
///
/// # Param Mapping
/// - `0`: **Admin change** → new admin Pubkey via `remaining_accounts[0]`.
/// - `1`: **emissions_per_second** → capped at `MAX_EMISSIONS_PER_SECOND`.
/// - `2`: **min_stake_amount** → minimum first-open position size.
/// - `3`: **Treasury change** → new treasury Pubkey via `remaining_accounts[0]`.
/// - `4`: **paused** → pause toggle (bool, from nonzero value).
///
/// Any other `param` value returns `ErrorCode::InvalidParam`.
pub fn update_config(ctx: Context<UpdateConfig>, param: u8, value: u64) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    match param {
        // Update admin (requires new admin key from remaining_accounts[0])
        0 => {
            let new_admin = *ctx
                .remaining_accounts
                .iter()
                .next()
                .ok_or(error!(ErrorCode::MissingRemainingAccount))?
                .key;
            require_keys_neq!(new_admin, Pubkey::default());
            global_config.admin = new_admin;
        }
        // Update emissions rate; checkpoint first so the old rate settles.
        1 => {
            require!(
                value <= MAX_EMISSIONS_PER_SECOND,
                ErrorCode::EmissionsRateTooHigh
            );
            let reward_pool = &mut ctx.accounts.reward_pool;
            accrual::checkpoint(reward_pool, unix_now()?)?;
            reward_pool.emissions_per_second = value;
        }
        // Update minimum first-open stake
        2 => {
            global_config.min_stake_amount = value;
        }
        // Update treasury recipient; already-credited balances stay
        // withdrawable under the old key's PDA.
        3 => {
            let new_treasury = *ctx
                .remaining_accounts
                .iter()
                .next()
                .ok_or(error!(ErrorCode::MissingRemainingAccount))?
                .key;
            require_keys_neq!(new_treasury, Pubkey::default());
            global_config.treasury = new_treasury;
        }
        // Toggle paused flag
        4 => {
            global_config.paused = value != 0;
            emit!(PauseToggled {
                paused: global_config.paused,
            });
        }
        // Invalid parameter selector
        _ => return Err(error!(ErrorCode::InvalidParam)),
    }

    emit!(ConfigUpdated {
        admin: global_config.admin,
        treasury: global_config.treasury,
        min_stake_amount: global_config.min_stake_amount,
        emissions_per_second: ctx.accounts.reward_pool.emissions_per_second,
        paused: global_config.paused,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateTierConfig<'info> {
    #[account(
        constraint = (owner.key() == global_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

/// Replace tier thresholds and multipliers in one validated write, so the
/// strictly-ascending invariant can never be broken between two calls.
pub fn update_tier_config(
    ctx: Context<UpdateTierConfig>,
    tier_thresholds: [u64; 3],
    tier_multiplier_bps: [u64; 3],
) -> Result<()> {
    require!(
        tier::thresholds_ascending(&tier_thresholds),
        ErrorCode::InvalidThresholds
    );
    for mult in tier_multiplier_bps {
        require!(mult <= BPS_DENOMINATOR, ErrorCode::RateTooHigh);
    }

    let global_config = &mut ctx.accounts.global_config;
    global_config.tier_thresholds = tier_thresholds;
    global_config.tier_multiplier_bps = tier_multiplier_bps;

    emit!(TierConfigUpdated {
        tier_thresholds,
        tier_multiplier_bps,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdatePenaltySplit<'info> {
    #[account(
        constraint = (owner.key() == global_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

/// Replace the burn/treasury/refill weights; they must sum to exactly the
/// basis-point denominator.
pub fn update_penalty_split(
    ctx: Context<UpdatePenaltySplit>,
    burn_bps: u64,
    treasury_bps: u64,
    refill_bps: u64,
) -> Result<()> {
    require!(
        burn_bps <= BPS_DENOMINATOR
            && treasury_bps <= BPS_DENOMINATOR
            && refill_bps <= BPS_DENOMINATOR
            && burn_bps + treasury_bps + refill_bps == BPS_DENOMINATOR,
        ErrorCode::InvalidPenaltySplit
    );

    let global_config = &mut ctx.accounts.global_config;
    global_config.penalty_burn_bps = burn_bps;
    global_config.penalty_treasury_bps = treasury_bps;
    global_config.penalty_refill_bps = refill_bps;

    emit!(PenaltySplitUpdated {
        burn_bps,
        treasury_bps,
        refill_bps,
    });
    Ok(())
}
