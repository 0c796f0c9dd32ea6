use crate::error::ErrorCode;
use crate::math::{accrual, stake as stake_math};
use crate::states::*;
use crate::utils::{transfer_from_user_to_pool_vault, unix_now};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

#[derive(Accounts)]
pub struct Stake<'info> {
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

    /// Per-owner stake position, created on first use.
    #[account(
        init_if_needed,
        seeds = [
            STAKE_RECORD_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = StakeRecord::LEN
    )]
    pub stake_record: Account<'info, StakeRecord>,

    #[account(
        address = crate::veris_mint::id() @ ErrorCode::InvalidVerisMint,
        mint::token_program = token_program,
    )]
    pub veris_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.stake_vault @ ErrorCode::InvalidVault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = veris_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Opens the caller's position or merges into it with the time-weighted
/// formula.
///
/// Steps:
/// 1) Checkpoint the global index and settle the caller.
/// 2) Open (minimum-size gated) or merge the position.
/// 3) Raise the staked total, then pull the tokens in.
pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(!ctx.accounts.global_config.paused, ErrorCode::Paused);
    require_gt!(amount, 0, ErrorCode::ZeroAmount);

    let now = unix_now()?;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let stake_record = &mut ctx.accounts.stake_record;

    accrual::checkpoint(reward_pool, now)?;
    accrual::settle(reward_pool, stake_record)?;

    if !stake_record.is_live() {
        require!(
            amount >= ctx.accounts.global_config.min_stake_amount,
            ErrorCode::BelowMinimumStake
        );
        stake_record.bump = ctx.bumps.stake_record;
    }
    stake_math::open_or_merge(stake_record, ctx.accounts.owner.key(), amount, now)?;
    reward_pool.total_staked = reward_pool
        .total_staked
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;

    transfer_from_user_to_pool_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.veris_mint.decimals,
    )?;

    emit!(Staked {
        owner: ctx.accounts.owner.key(),
        amount,
        total_amount: stake_record.amount,
        start_ts: stake_record.start_ts,
    });
    Ok(())
}
