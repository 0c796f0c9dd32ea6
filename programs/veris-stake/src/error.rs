use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Not approved")]
    NotApproved,

    #[msg("Caller is not an authorized admin")]
    InvalidOwner,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Stake amount is below the minimum for opening a position")]
    BelowMinimumStake,

    #[msg("Tier thresholds must be strictly ascending")]
    InvalidThresholds,

    #[msg("Rate exceeds the basis-point denominator")]
    RateTooHigh,

    #[msg("Penalty split must sum to exactly 10000 basis points")]
    InvalidPenaltySplit,

    #[msg("Emissions rate exceeds the fixed ceiling")]
    EmissionsRateTooHigh,

    #[msg("Program is paused")]
    Paused,

    #[msg("No live stake record for this account")]
    NoStakeRecord,

    #[msg("A live stake record already exists at the destination")]
    RecordAlreadyExists,

    #[msg("Withdrawal amount exceeds the staked balance")]
    InsufficientStake,

    #[msg("Allocation already claimed for this window")]
    AlreadyClaimed,

    #[msg("Allocation window has expired")]
    WindowExpired,

    #[msg("Allocation window has not expired yet")]
    WindowNotExpired,

    #[msg("Allocation pool balance is already zero")]
    PoolEmpty,

    #[msg("No allocation was claimed in this call")]
    NothingToClaim,

    #[msg("Expired pool is empty, nothing to distribute")]
    NothingToDistribute,

    #[msg("Allocation pool cannot cover the claimed amount")]
    InsufficientPoolBalance,

    #[msg("Remaining emissions cannot cover the requested amount")]
    InsufficientEmissions,

    #[msg("Vault holds no balance in excess of the staked total")]
    NoExcessBalance,

    #[msg("Pending treasury balance is zero")]
    ZeroTreasuryBalance,

    #[msg("Merkle proof verification failed")]
    ProofInvalid,

    #[msg("No rewards available to claim")]
    NoRewardsToClaim,

    #[msg("Invalid allocation window")]
    InvalidWindow,

    #[msg("Expiry must be in the future")]
    InvalidExpiry,

    #[msg("Merkle root must not be empty")]
    InvalidMerkleRoot,

    #[msg("Invalid timestamp conversion")]
    InvalidTimestamp,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Invalid Veris mint account")]
    InvalidVerisMint,

    #[msg("Invalid treasury account")]
    InvalidTreasury,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Missing remaining account")]
    MissingRemainingAccount,

    #[msg("Invalid parameter provided")]
    InvalidParam,
}
