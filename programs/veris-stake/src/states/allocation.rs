use anchor_lang::prelude::*;

pub const ALLOCATION_POOL_SEED: &str = "allocation_pool";
pub const CLAIM_STATUS_SEED: &str = "claim_status";
pub const TREASURY_BALANCE_SEED: &str = "treasury_balance";

/// One merkle-gated allocation window. Armed exactly once; `unassigned_amount`
/// only decreases through claims until the window expires and the remainder
/// is swept into the expired pool.
#[account]
#[derive(Default, Debug)]
pub struct AllocationPool {
    pub bump: u8,
    pub window: u8,
    pub merkle_root: [u8; 32],
    pub expiry_ts: u64,
    pub unassigned_amount: u64,
}

impl AllocationPool {
    pub const LEN: usize = 8 + 1 + 1 + 32 + 8 + 8;
}

/// Per-account claim flags, one per window. A flag, once set, is never
/// cleared.
#[account]
#[derive(Default, Debug)]
pub struct ClaimStatus {
    pub bump: u8,
    pub owner: Pubkey,
    pub claimed: [bool; crate::WINDOW_COUNT],
}

impl ClaimStatus {
    pub const LEN: usize = 8 + 1 + 32 + crate::WINDOW_COUNT;
}

/// Pull-payment ledger for a treasury recipient. Crediting never touches the
/// token vault; the recipient withdraws through `withdraw_treasury`.
#[account]
#[derive(Default, Debug)]
pub struct TreasuryBalance {
    pub bump: u8,
    pub owner: Pubkey,
    pub amount: u64,
}

impl TreasuryBalance {
    pub const LEN: usize = 8 + 1 + 32 + 8;
}
