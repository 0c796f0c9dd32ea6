use crate::error::ErrorCode;
use crate::math::accrual;
use crate::states::*;
use crate::utils::unix_now;
use anchor_lang::prelude::*;

/// Move a whole position (amount, start time, reward checkpoint and settled
/// reward) to another account. The destination must not hold a live record;
/// the source record is destroyed. The staked total is untouched.
#[derive(Accounts)]
pub struct TransferStake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// New owner of the position.
    ///
    /// CHECK: only its key seeds the destination record.
    pub recipient: UncheckedAccount<'info>,

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
        bump = from_record.bump,
    )]
    pub from_record: Account<'info, StakeRecord>,

    #[account(
        init_if_needed,
        seeds = [
            STAKE_RECORD_SEED.as_bytes(),
            recipient.key().as_ref()
        ],
        bump,
        payer = owner,
        space = StakeRecord::LEN
    )]
    pub to_record: Account<'info, StakeRecord>,

    pub system_program: Program<'info, System>,
}

pub fn transfer_stake(ctx: Context<TransferStake>) -> Result<()> {
    let now = unix_now()?;
    let reward_pool = &mut ctx.accounts.reward_pool;
    let from_record = &mut ctx.accounts.from_record;
    let to_record = &mut ctx.accounts.to_record;

    require!(from_record.is_live(), ErrorCode::NoStakeRecord);
    require!(!to_record.is_live(), ErrorCode::RecordAlreadyExists);

    accrual::checkpoint(reward_pool, now)?;
    accrual::settle(reward_pool, from_record)?;

    let amount = from_record.amount;
    to_record.bump = ctx.bumps.to_record;
    to_record.owner = ctx.accounts.recipient.key();
    to_record.amount = amount;
    to_record.start_ts = from_record.start_ts;
    to_record.reward_checkpoint = from_record.reward_checkpoint;
    to_record.accrued_reward = from_record.accrued_reward;
    from_record.clear();

    emit!(StakeTransferred {
        from: ctx.accounts.owner.key(),
        to: to_record.owner,
        amount,
    });
    Ok(())
}
