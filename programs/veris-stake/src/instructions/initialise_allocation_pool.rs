use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{transfer_from_user_to_pool_vault, unix_now};
use crate::{SIX_MONTH_WINDOW, TWELVE_MONTH_WINDOW};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Arms one allocation window with a merkle root, an expiry and its funding.
/// `init` (not `init_if_needed`) makes the operation one-shot per window: a
/// window can never be re-armed or topped up.
#[derive(Accounts)]
#[instruction(window: u8)]
pub struct InitialiseAllocationPool<'info> {
    /// Admin signer (stored admin or the hardcoded program admin).
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
        init,
        seeds = [ALLOCATION_POOL_SEED.as_bytes(), &[window]],
        bump,
        payer = owner,
        space = AllocationPool::LEN
    )]
    pub allocation_pool: Account<'info, AllocationPool>,

    #[account(
        address = crate::veris_mint::id() @ ErrorCode::InvalidVerisMint,
        mint::token_program = token_program,
    )]
    pub veris_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.stake_vault @ ErrorCode::InvalidVault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Admin's VRS account funding the window.
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

pub fn initialise_allocation_pool(
    ctx: Context<InitialiseAllocationPool>,
    window: u8,
    merkle_root: [u8; 32],
    expiry_ts: u64,
    amount: u64,
) -> Result<()> {
    require!(
        window == SIX_MONTH_WINDOW || window == TWELVE_MONTH_WINDOW,
        ErrorCode::InvalidWindow
    );
    require_gt!(amount, 0, ErrorCode::ZeroAmount);
    require!(merkle_root != [0u8; 32], ErrorCode::InvalidMerkleRoot);
    let now = unix_now()?;
    require!(expiry_ts > now, ErrorCode::InvalidExpiry);

    let allocation_pool = &mut ctx.accounts.allocation_pool;
    allocation_pool.bump = ctx.bumps.allocation_pool;
    allocation_pool.window = window;
    allocation_pool.merkle_root = merkle_root;
    allocation_pool.expiry_ts = expiry_ts;
    allocation_pool.unassigned_amount = amount;

    transfer_from_user_to_pool_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.veris_mint.decimals,
    )?;

    emit!(AllocationPoolInitialized {
        window,
        merkle_root,
        expiry_ts,
        amount,
    });
    Ok(())
}
