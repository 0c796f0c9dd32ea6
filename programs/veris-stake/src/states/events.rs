use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track protocol state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the global configuration is initialized.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct GlobalConfigInitialized {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub stake_vault: Pubkey,
    pub min_stake_amount: u64,
    pub emissions_per_second: u64,
    pub tier_thresholds: [u64; 3],
    pub tier_multiplier_bps: [u64; 3],
    pub penalty_burn_bps: u64,
    pub penalty_treasury_bps: u64,
    pub penalty_refill_bps: u64,
}

/// Emitted when an allocation window is armed with a merkle root and funded.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct AllocationPoolInitialized {
    pub window: u8,
    pub merkle_root: [u8; 32],
    pub expiry_ts: u64,
    pub amount: u64,
}

/// Emitted when a stake position is opened or topped up.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Staked {
    pub owner: Pubkey,
    /// Amount added by this call.
    pub amount: u64,
    /// Position size after the merge.
    pub total_amount: u64,
    /// Weighted-average start after the merge.
    pub start_ts: u64,
}

/// Emitted when a donor stakes on behalf of another account.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeGifted {
    pub donor: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub total_amount: u64,
    pub start_ts: u64,
}

/// Emitted on every withdrawal, full or partial.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeWithdrawn {
    pub owner: Pubkey,
    /// Gross amount removed from the position.
    pub amount: u64,
    /// Early-exit penalty charged on the withdrawn sub-amount.
    pub penalty: u64,
    /// Net tokens returned to the owner.
    pub net_amount: u64,
    /// Position size left after the withdrawal.
    pub remaining_amount: u64,
}

/// Emitted whenever a penalty-sized value is routed through the
/// burn/treasury/refill split (withdraw penalties and expired-pool sweeps).
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PenaltyDistributed {
    pub amount: u64,
    pub burned: u64,
    pub to_treasury: u64,
    pub to_emissions: u64,
}

/// Emitted when accrued rewards (plus tier bonus) are paid out.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsClaimed {
    pub owner: Pubkey,
    /// Settled base reward consumed by this claim.
    pub base: u64,
    /// Tier bonus on top of the base.
    pub bonus: u64,
    pub total: u64,
}

/// Emitted when accrued rewards are merged back into the caller's stake.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsCompounded {
    pub owner: Pubkey,
    pub total: u64,
    pub new_amount: u64,
    pub new_start_ts: u64,
}

/// Emitted per window when an allocation claim is accepted.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct AllocationClaimed {
    pub owner: Pubkey,
    pub window: u8,
    pub amount: u64,
}

/// Emitted when a whole stake record moves to a new owner.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeTransferred {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

/// Emitted when an expired window's remaining balance is swept.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolExpired {
    pub window: u8,
    pub amount: u64,
}

/// Emitted when the expired-pool accumulator is redistributed.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct ExpiredPoolDistributed {
    pub amount: u64,
}

/// Emitted when a pending treasury balance is pulled.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct TreasuryWithdrawn {
    pub recipient: Pubkey,
    pub amount: u64,
}

/// Emitted when the emissions budget is topped up.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct EmissionsFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub remaining_emissions: u64,
}

/// Emitted whenever scalar configuration parameters are modified.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub min_stake_amount: u64,
    pub emissions_per_second: u64,
    pub paused: bool,
}

/// Emitted when the pause flag flips.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PauseToggled {
    pub paused: bool,
}

/// Emitted when tier thresholds or multipliers change.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct TierConfigUpdated {
    pub tier_thresholds: [u64; 3],
    pub tier_multiplier_bps: [u64; 3],
}

/// Emitted when the penalty split weights change.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PenaltySplitUpdated {
    pub burn_bps: u64,
    pub treasury_bps: u64,
    pub refill_bps: u64,
}

/// Emitted on admin emergency withdrawals.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct EmergencyWithdrawn {
    pub param: u8,
    pub amount: u64,
}
