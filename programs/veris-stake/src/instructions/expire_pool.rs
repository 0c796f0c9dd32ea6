use crate::error::ErrorCode;
use crate::math::accrual;
use crate::states::*;
use crate::utils::unix_now;
use anchor_lang::prelude::*;

/// Sweep an expired window's remaining balance into the expired pool.
/// Permissionless and callable while paused. A second call on an already
/// drained window fails rather than silently succeeding.
#[derive(Accounts)]
#[instruction(window: u8)]
pub struct ExpirePool<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [REWARD_POOL_SEED.as_bytes()],
        bump = reward_pool.bump,
    )]
    pub reward_pool: Account<'info, RewardPool>,

    #[account(
        mut,
        seeds = [ALLOCATION_POOL_SEED.as_bytes(), &[window]],
        bump = allocation_pool.bump,
    )]
    pub allocation_pool: Account<'info, AllocationPool>,
}

pub fn expire_pool(ctx: Context<ExpirePool>, window: u8) -> Result<()> {
    let now = unix_now()?;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let allocation_pool = &mut ctx.accounts.allocation_pool;

    require!(now >= allocation_pool.expiry_ts, ErrorCode::WindowNotExpired);
    require_gt!(allocation_pool.unassigned_amount, 0, ErrorCode::PoolEmpty);

    accrual::checkpoint(reward_pool, now)?;

    let amount = allocation_pool.unassigned_amount;
    allocation_pool.unassigned_amount = 0;
    reward_pool.expired_pool_amount = reward_pool
        .expired_pool_amount
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;

    emit!(PoolExpired { window, amount });
    Ok(())
}
