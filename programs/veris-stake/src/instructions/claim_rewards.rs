use crate::error::ErrorCode;
use crate::math::{accrual, tier};
use crate::states::*;
use crate::utils::{transfer_from_pool_vault_to_user, unix_now};
use crate::AUTH_SEED;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Pay out the caller's settled rewards plus their tier bonus.
///
/// Reward math overview:
/// - Global index: `reward_pool.acc_reward_per_share` accumulates VRS per
///   staked base unit, scaled by `SCALE`.
/// - Per-user checkpoint: `stake_record.reward_checkpoint` stores the index
///   at the user's last settlement.
/// - Base = settled `accrued_reward`; bonus = base scaled by the multiplier
///   of the tier the position sits in right now.
/// - If base + bonus exceeds the remaining emission budget the payout is
///   capped and the unconsumed base stays owed on the record.
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        seeds = [REWARD_POOL_SEED.as_bytes()],
        bump = reward_pool.bump,
    )]
    pub reward_pool: Account<'info, RewardPool>,

    #[account(
        mut,
        seeds = [
            STAKE_RECORD_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump = stake_record.bump,
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// Program authority PDA (token authority for vault transfers).
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        address = crate::veris_mint::id() @ ErrorCode::InvalidVerisMint,
        mint::token_program = token_program,
    )]
    pub veris_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.stake_vault @ ErrorCode::InvalidVault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Owner's VRS ATA; created on demand to receive rewards.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = veris_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
    require!(!ctx.accounts.global_config.paused, ErrorCode::Paused);

    let now = unix_now()?;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let stake_record = &mut ctx.accounts.stake_record;
    let config = &ctx.accounts.global_config;

    accrual::checkpoint(reward_pool, now)?;
    accrual::settle(reward_pool, stake_record)?;

    let multiplier_bps = tier::multiplier_bps(
        tier::classify(stake_record.amount, &config.tier_thresholds),
        &config.tier_multiplier_bps,
    );
    let outcome = accrual::tiered_claim(
        stake_record.accrued_reward,
        multiplier_bps,
        reward_pool.remaining_emissions,
    )
    .ok_or(ErrorCode::MathOverflow)?;
    require_gt!(outcome.total, 0, ErrorCode::NoRewardsToClaim);

    stake_record.accrued_reward = outcome.carry;
    reward_pool.remaining_emissions = reward_pool
        .remaining_emissions
        .checked_sub(outcome.total)
        .ok_or(ErrorCode::MathOverflow)?;

    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        outcome.total,
        ctx.accounts.veris_mint.decimals,
        &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    emit!(RewardsClaimed {
        owner: ctx.accounts.owner.key(),
        base: outcome.base_consumed,
        bonus: outcome.bonus,
        total: outcome.total,
    });
    Ok(())
}
