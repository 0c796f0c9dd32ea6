use crate::error::ErrorCode;
use crate::math::{accrual, penalty};
use crate::states::*;
use crate::utils::{burn_from_pool_vault, transfer_from_pool_vault_to_user, unix_now};
use crate::AUTH_SEED;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Withdraw part or all of a position.
///
/// The early-exit penalty is charged on the withdrawn sub-amount at the
/// position's current decay rate; the remaining balance keeps its start
/// time, so withdrawing never advances or rewinds the decay clock. The
/// penalty is split burn/treasury/refill before any tokens move.
#[derive(Accounts)]
pub struct Withdraw<'info> {
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

    /// Pull-payment ledger for the configured treasury recipient.
    #[account(
        init_if_needed,
        seeds = [
            TREASURY_BALANCE_SEED.as_bytes(),
            global_config.treasury.as_ref()
        ],
        bump,
        payer = owner,
        space = TreasuryBalance::LEN
    )]
    pub treasury_balance: Account<'info, TreasuryBalance>,

    /// Program authority PDA (token authority for vault transfers).
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Mint is mutable: the burn share of the penalty reduces total supply.
    #[account(
        mut,
        address = crate::veris_mint::id() @ ErrorCode::InvalidVerisMint,
        mint::token_program = token_program,
    )]
    pub veris_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.stake_vault @ ErrorCode::InvalidVault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Owner's VRS ATA; created on demand to receive the net amount.
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

pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    require!(!ctx.accounts.global_config.paused, ErrorCode::Paused);
    require_gt!(amount, 0, ErrorCode::ZeroAmount);

    let now = unix_now()?;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let stake_record = &mut ctx.accounts.stake_record;

    require!(stake_record.is_live(), ErrorCode::NoStakeRecord);
    require!(amount <= stake_record.amount, ErrorCode::InsufficientStake);

    accrual::checkpoint(reward_pool, now)?;
    accrual::settle(reward_pool, stake_record)?;

    let elapsed = now.saturating_sub(stake_record.start_ts);
    let charged = penalty::penalty_amount(amount, elapsed).ok_or(ErrorCode::MathOverflow)?;
    let net_amount = amount.checked_sub(charged).ok_or(ErrorCode::MathOverflow)?;

    // Ledger first: debit the position and the staked total.
    stake_record.amount = stake_record
        .amount
        .checked_sub(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    reward_pool.total_staked = reward_pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    let remaining_amount = stake_record.amount;
    if remaining_amount == 0 {
        stake_record.clear();
    }

    let config = &ctx.accounts.global_config;
    let parts = penalty::split(charged, config.penalty_burn_bps, config.penalty_treasury_bps)
        .ok_or(ErrorCode::MathOverflow)?;
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

    // All bookkeeping done; only now touch the token ledger.
    let auth_seeds: &[&[&[u8]]] = &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]];
    burn_from_pool_vault(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        parts.burn,
        auth_seeds,
    )?;
    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        net_amount,
        ctx.accounts.veris_mint.decimals,
        auth_seeds,
    )?;

    emit!(StakeWithdrawn {
        owner: ctx.accounts.owner.key(),
        amount,
        penalty: charged,
        net_amount,
        remaining_amount,
    });
    if charged > 0 {
        emit!(PenaltyDistributed {
            amount: charged,
            burned: parts.burn,
            to_treasury: parts.treasury,
            to_emissions: parts.refill,
        });
    }
    Ok(())
}
