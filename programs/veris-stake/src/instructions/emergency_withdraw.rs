use crate::error::ErrorCode;
use crate::math::accrual;
use crate::states::*;
use crate::utils::{transfer_from_pool_vault_to_user, unix_now};
use crate::AUTH_SEED;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Emergency controls for protocol administrators.
///
/// Two operations, selected by `param`:
/// - `0` → Withdraw `value` from the **emission budget** to the admin's ATA;
///   `remaining_emissions` is debited so accrual can never promise the
///   removed tokens.
/// - `1` → Withdraw from the vault balance **in excess of the staked
///   total**; staked principal can never be pulled this way. `value == 0`
///   withdraws the whole excess.
#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    /// Admin (must match `global_config.admin` or the program admin).
    #[account(
        mut,
        constraint = (owner.key() == global_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
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

    /// Program authority PDA.
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

    /// Admin's VRS ATA (receiver). Created on demand.
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

pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, param: u8, value: u64) -> Result<()> {
    let reward_pool = &mut ctx.accounts.reward_pool;
    let amount = match param {
        0 => {
            require_gt!(value, 0, ErrorCode::ZeroAmount);
            accrual::checkpoint(reward_pool, unix_now()?)?;
            require!(
                reward_pool.remaining_emissions >= value,
                ErrorCode::InsufficientEmissions
            );
            reward_pool.remaining_emissions -= value;
            value
        }
        1 => {
            let vault_balance = ctx.accounts.stake_vault.amount;
            require_gt!(
                vault_balance,
                reward_pool.total_staked,
                ErrorCode::NoExcessBalance
            );
            let excess = vault_balance - reward_pool.total_staked;
            if value == 0 {
                excess
            } else {
                require!(value <= excess, ErrorCode::NoExcessBalance);
                value
            }
        }
        _ => return Err(error!(ErrorCode::InvalidParam)),
    };

    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.veris_mint.decimals,
        &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    emit!(EmergencyWithdrawn { param, amount });
    Ok(())
}
