use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::transfer_from_pool_vault_to_user;
use crate::AUTH_SEED;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Pull a pending treasury balance out to its recipient. Anyone may crank
/// this; the tokens always land in the recipient's ATA. Callable while
/// paused, so a pause never traps already-credited value.
#[derive(Accounts)]
pub struct WithdrawTreasury<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    /// Recipient the pending balance was credited to.
    ///
    /// CHECK: validated against the treasury-balance PDA seeds.
    pub recipient: UncheckedAccount<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        seeds = [
            TREASURY_BALANCE_SEED.as_bytes(),
            recipient.key().as_ref()
        ],
        bump = treasury_balance.bump,
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

    #[account(
        address = crate::veris_mint::id() @ ErrorCode::InvalidVerisMint,
        mint::token_program = token_program,
    )]
    pub veris_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = global_config.stake_vault @ ErrorCode::InvalidVault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Recipient's VRS ATA; created on demand.
    #[account(
        init_if_needed,
        payer = caller,
        associated_token::mint = veris_mint,
        associated_token::authority = recipient,
        associated_token::token_program = token_program,
    )]
    pub recipient_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

pub fn withdraw_treasury(ctx: Context<WithdrawTreasury>) -> Result<()> {
    let treasury_balance = &mut ctx.accounts.treasury_balance;

    let amount = treasury_balance.amount;
    require_gt!(amount, 0, ErrorCode::ZeroTreasuryBalance);
    treasury_balance.amount = 0;

    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.recipient_token.to_account_info(),
        ctx.accounts.veris_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.veris_mint.decimals,
        &[&[AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    emit!(TreasuryWithdrawn {
        recipient: ctx.accounts.recipient.key(),
        amount,
    });
    Ok(())
}
