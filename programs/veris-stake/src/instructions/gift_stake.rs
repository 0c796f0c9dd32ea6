use crate::error::ErrorCode;
use crate::math::{accrual, stake as stake_math};
use crate::states::*;
use crate::utils::{transfer_from_user_to_pool_vault, unix_now};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// A donor funds a stake position owned by someone else. The beneficiary's
/// record is settled first, then the gift merges in exactly like a top-up.
#[derive(Accounts)]
pub struct GiftStake<'info> {
    #[account(mut)]
    pub donor: Signer<'info>,

    /// Account receiving the staked position.
    ///
    /// CHECK: any account may be gifted to; only its key seeds the record.
    pub beneficiary: UncheckedAccount<'info>,

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
        init_if_needed,
        seeds = [
            STAKE_RECORD_SEED.as_bytes(),
            beneficiary.key().as_ref()
        ],
        bump,
        payer = donor,
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

    /// Donor's VRS account paying for the gift.
    #[account(
        mut,
        token::mint = veris_mint,
        token::authority = donor,
        token::token_program = token_program,
    )]
    pub donor_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

pub fn gift_stake(ctx: Context<GiftStake>, amount: u64) -> Result<()> {
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
    stake_math::open_or_merge(stake_record, ctx.accounts.beneficiary.key(), amount, now)?;
    reward_pool.total_staked = reward_pool
        .total_staked
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;

    transfer_from_user_to_pool_vault(
        ctx.accounts.donor.to_account_info(),
        ctx.accounts.donor_token.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.veris_mint.decimals,
    )?;

    emit!(StakeGifted {
        donor: ctx.accounts.donor.key(),
        beneficiary: ctx.accounts.beneficiary.key(),
        amount,
        total_amount: stake_record.amount,
        start_ts: stake_record.start_ts,
    });
    Ok(())
}
