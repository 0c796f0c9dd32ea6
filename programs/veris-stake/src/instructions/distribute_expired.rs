use crate::error::ErrorCode;
use crate::math::{accrual, penalty};
use crate::states::*;
use crate::utils::{burn_from_pool_vault, unix_now};
use crate::AUTH_SEED;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Route the whole expired-pool accumulator through the penalty split.
/// Permissionless and callable while paused.
#[derive(Accounts)]
pub struct DistributeExpired<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

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

    /// Pull-payment ledger for the configured treasury recipient.
    #[account(
        init_if_needed,
        seeds = [
            TREASURY_BALANCE_SEED.as_bytes(),
            global_config.treasury.as_ref()
        ],
        bump,
        payer = caller,
        space = TreasuryBalance::LEN
    )]
    pub treasury_balance: Account<'info, TreasuryBalance>,

    /// Program authority PDA.
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Mint is mutable: the burn share reduces total supply.
    #[account(
        mut,
        address = crate::veris_mint::id() @ ErrorCode::InvalidVerisMint,
        mint::token_program = token_program,
    )]
    pub veris_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.stake_vault @ ErrorCode::InvalidVault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

pub fn distribute_expired(ctx: Context<DistributeExpired>) -> Result<()> {
    let now = unix_now()?;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let config = &ctx.accounts.global_config;

    accrual::checkpoint(reward_pool, now)?;

    let amount = reward_pool.expired_pool_amount;
    require_gt!(amount, 0, ErrorCode::NothingToDistribute);

    let parts = penalty::split(amount, config.penalty_burn_bps, config.penalty_treasury_bps)
        .ok_or(ErrorCode::MathOverflow)?;
    reward_pool.expired_pool_amount = 0;
    reward_pool.remaining_emissions = reward_pool
        .remaining_emissions
        .checked_add(parts.refill)
        .ok_or(ErrorCode::MathOverflow)?;

    let treasury_balance = &mut ctx.accounts.treasury_balance;
    if treasury_balance.owner == Pubkey::default() {
        treasury_balance.bump = ctx.bumps.treasury_balance;
        treasury_balance.owner = config.treasury;
    }
    treasury_balance.amount = treasury_balance
        .amount
        .checked_add(parts.treasury)
        .ok_or(ErrorCode::MathOverflow)?;

    burn_from_pool_vault(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        parts.burn,
        &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    emit!(ExpiredPoolDistributed { amount });
    emit!(PenaltyDistributed {
        amount,
        burned: parts.burn,
        to_treasury: parts.treasury,
        to_emissions: parts.refill,
    });
    Ok(())
}
