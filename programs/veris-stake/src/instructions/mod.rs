pub mod initialise_configs;
pub use initialise_configs::*;

pub mod initialise_allocation_pool;
pub use initialise_allocation_pool::*;

pub mod stake;
pub use stake::*;

pub mod gift_stake;
pub use gift_stake::*;

pub mod withdraw;
pub use withdraw::*;

pub mod claim_rewards;
pub use claim_rewards::*;

pub mod compound_rewards;
pub use compound_rewards::*;

pub mod claim_allocation;
pub use claim_allocation::*;

pub mod transfer_stake;
pub use transfer_stake::*;

pub mod expire_pool;
pub use expire_pool::*;

pub mod distribute_expired;
pub use distribute_expired::*;

pub mod withdraw_treasury;
pub use withdraw_treasury::*;

pub mod fund_emissions;
pub use fund_emissions::*;

pub mod update_configs;
pub use update_configs::*;

pub mod emergency_withdraw;
pub use emergency_withdraw::*;
