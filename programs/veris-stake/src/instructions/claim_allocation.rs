use crate::error::ErrorCode;
use crate::math::{accrual, stake as stake_math};
use crate::merkle;
use crate::states::*;
use crate::utils::unix_now;
use crate::{SIX_MONTH_WINDOW, TWELVE_MONTH_WINDOW};
use anchor_lang::prelude::*;

/// Claim merkle-gated allocations from one or both windows and auto-stake
/// the combined amount.
///
/// Each attempted window must pass its own gate: not expired, not previously
/// claimed by this account, a positive amount, a proof that verifies against
/// the window's root, and enough unassigned balance to cover the claim. A
/// window with `amount == 0` is simply not attempted. The call as a whole
/// fails if nothing was claimed.
///
/// The vault was funded when the windows were armed, so no tokens move here;
/// the claimed value merges straight into the caller's stake position.
#[derive(Accounts)]
pub struct ClaimAllocation<'info> {
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

    /// Per-account claim flags; set once, never cleared.
    #[account(
        init_if_needed,
        seeds = [
            CLAIM_STATUS_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = ClaimStatus::LEN
    )]
    pub claim_status: Account<'info, ClaimStatus>,

    #[account(
        mut,
        seeds = [ALLOCATION_POOL_SEED.as_bytes(), &[SIX_MONTH_WINDOW]],
        bump = six_month_pool.bump,
    )]
    pub six_month_pool: Account<'info, AllocationPool>,

    #[account(
        mut,
        seeds = [ALLOCATION_POOL_SEED.as_bytes(), &[TWELVE_MONTH_WINDOW]],
        bump = twelve_month_pool.bump,
    )]
    pub twelve_month_pool: Account<'info, AllocationPool>,

    pub system_program: Program<'info, System>,
}

/// Gate and book one window's claim. The pool decrement and the permanent
/// claim flag are both written before control returns to the caller.
fn claim_window(
    pool: &mut AllocationPool,
    claimed: &mut bool,
    owner: &Pubkey,
    amount: u64,
    proof: &[[u8; 32]],
    now: u64,
) -> Result<()> {
    require!(now < pool.expiry_ts, ErrorCode::WindowExpired);
    require!(!*claimed, ErrorCode::AlreadyClaimed);
    let leaf = merkle::allocation_leaf(owner, amount, pool.window);
    require!(
        merkle::verify(proof, &pool.merkle_root, leaf),
        ErrorCode::ProofInvalid
    );
    require!(
        pool.unassigned_amount >= amount,
        ErrorCode::InsufficientPoolBalance
    );
    pool.unassigned_amount -= amount;
    *claimed = true;
    Ok(())
}

pub fn claim_allocation(
    ctx: Context<ClaimAllocation>,
    six_month_amount: u64,
    six_month_proof: Vec<[u8; 32]>,
    twelve_month_amount: u64,
    twelve_month_proof: Vec<[u8; 32]>,
) -> Result<()> {
    require!(!ctx.accounts.global_config.paused, ErrorCode::Paused);

    let now = unix_now()?;
    let owner = ctx.accounts.owner.key();
    let reward_pool = &mut ctx.accounts.reward_pool;
    let stake_record = &mut ctx.accounts.stake_record;
    let claim_status = &mut ctx.accounts.claim_status;

    accrual::checkpoint(reward_pool, now)?;
    accrual::settle(reward_pool, stake_record)?;

    if claim_status.owner == Pubkey::default() {
        claim_status.bump = ctx.bumps.claim_status;
        claim_status.owner = owner;
    }

    let mut total_claimed: u64 = 0;
    if six_month_amount > 0 {
        claim_window(
            &mut ctx.accounts.six_month_pool,
            &mut claim_status.claimed[SIX_MONTH_WINDOW as usize],
            &owner,
            six_month_amount,
            &six_month_proof,
            now,
        )?;
        total_claimed += six_month_amount;
        emit!(AllocationClaimed {
            owner,
            window: SIX_MONTH_WINDOW,
            amount: six_month_amount,
        });
    }
    if twelve_month_amount > 0 {
        claim_window(
            &mut ctx.accounts.twelve_month_pool,
            &mut claim_status.claimed[TWELVE_MONTH_WINDOW as usize],
            &owner,
            twelve_month_amount,
            &twelve_month_proof,
            now,
        )?;
        total_claimed += twelve_month_amount;
        emit!(AllocationClaimed {
            owner,
            window: TWELVE_MONTH_WINDOW,
            amount: twelve_month_amount,
        });
    }
    require_gt!(total_claimed, 0, ErrorCode::NothingToClaim);

    if !stake_record.is_live() {
        stake_record.bump = ctx.bumps.stake_record;
    }
    stake_math::open_or_merge(stake_record, owner, total_claimed, now)?;
    reward_pool.total_staked = reward_pool
        .total_staked
        .checked_add(total_claimed)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(())
}
