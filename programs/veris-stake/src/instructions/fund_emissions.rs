use crate::error::ErrorCode;
use crate::math::accrual;
use crate::states::*;
use crate::utils::{transfer_from_user_to_pool_vault, unix_now};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Top up the emission budget. Permissionless: anyone may fund rewards.
#[derive(Accounts)]
pub struct FundEmissions<'info> {
    pub funder: Signer<'info>,

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
        address = crate::veris_mint::id() @ ErrorCode::InvalidVerisMint,
        mint::token_program = token_program,
    )]
    pub veris_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.stake_vault @ ErrorCode::InvalidVault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = veris_mint,
        token::authority = funder,
        token::token_program = token_program,
    )]
    pub funder_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn fund_emissions(ctx: Context<FundEmissions>, amount: u64) -> Result<()> {
    require_gt!(amount, 0, ErrorCode::ZeroAmount);

    let now = unix_now()?;
    let reward_pool = &mut ctx.accounts.reward_pool;

    // Checkpoint before the budget grows so past elapsed time is settled at
    // the old budget.
    accrual::checkpoint(reward_pool, now)?;
    reward_pool.remaining_emissions = reward_pool
        .remaining_emissions
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;

    transfer_from_user_to_pool_vault(
        ctx.accounts.funder.to_account_info(),
        ctx.accounts.funder_token.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.veris_mint.decimals,
    )?;

    emit!(EmissionsFunded {
        funder: ctx.accounts.funder.key(),
        amount,
        remaining_emissions: reward_pool.remaining_emissions,
    });
    Ok(())
}
