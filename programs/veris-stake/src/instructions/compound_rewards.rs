use crate::error::ErrorCode;
use crate::math::{accrual, stake as stake_math, tier};
use crate::states::*;
use crate::utils::unix_now;
use anchor_lang::prelude::*;

/// Merge the caller's claimable total (base plus tier bonus, capped at the
/// remaining budget) back into their own position instead of paying it out.
/// The vault already holds the emission tokens, so no transfer happens; the
/// value just moves from the emission budget to the staked total.
#[derive(Accounts)]
pub struct CompoundRewards<'info> {
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
}

pub fn compound_rewards(ctx: Context<CompoundRewards>) -> Result<()> {
    require!(!ctx.accounts.global_config.paused, ErrorCode::Paused);

    let now = unix_now()?;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let stake_record = &mut ctx.accounts.stake_record;
    let config = &ctx.accounts.global_config;

    require!(stake_record.is_live(), ErrorCode::NoStakeRecord);

    accrual::checkpoint(reward_pool, now)?;
    accrual::settle(reward_pool, stake_record)?;

    let multiplier_bps = tier::multiplier_bps(
        tier::classify(stake_record.amount, &config.tier_thresholds),
        &config.tier_multiplier_bps,
    );
    let outcome = accrual::tiered_claim(
        stake_record.accrued_reward,
        multiplier_bps,
        reward_pool.remaining_emissions,
    )
    .ok_or(ErrorCode::MathOverflow)?;
    require_gt!(outcome.total, 0, ErrorCode::NoRewardsToClaim);

    stake_record.accrued_reward = outcome.carry;
    reward_pool.remaining_emissions = reward_pool
        .remaining_emissions
        .checked_sub(outcome.total)
        .ok_or(ErrorCode::MathOverflow)?;

    stake_math::open_or_merge(stake_record, ctx.accounts.owner.key(), outcome.total, now)?;
    reward_pool.total_staked = reward_pool
        .total_staked
        .checked_add(outcome.total)
        .ok_or(ErrorCode::MathOverflow)?;

    emit!(RewardsCompounded {
        owner: ctx.accounts.owner.key(),
        total: outcome.total,
        new_amount: stake_record.amount,
        new_start_ts: stake_record.start_ts,
    });
    Ok(())
}
