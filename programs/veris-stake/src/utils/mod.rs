pub mod token;
pub use token::*;

use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Cluster time as an unsigned unix timestamp.
pub fn unix_now() -> Result<u64> {
    let clock = Clock::get()?;
    u64::try_from(clock.unix_timestamp).map_err(|_| error!(ErrorCode::InvalidTimestamp))
}
