use anchor_lang::AccountDeserialize;
use anyhow::Result;
use solana_sdk::{account::Account, pubkey::Pubkey};
use std::time::{SystemTime, UNIX_EPOCH};
use veris_stake::states::{
    ALLOCATION_POOL_SEED, CLAIM_STATUS_SEED, GLOBAL_CONFIG_SEED, REWARD_POOL_SEED,
    STAKE_RECORD_SEED, TREASURY_BALANCE_SEED,
};
use veris_stake::{AUTH_SEED, STAKE_VAULT_SEED};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

/// Wall-clock unix time used by the read-only previews.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn get_authority_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[AUTH_SEED.as_bytes()], program_id).0
}

pub fn get_global_config_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[GLOBAL_CONFIG_SEED.as_bytes()], program_id).0
}

pub fn get_reward_pool_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[REWARD_POOL_SEED.as_bytes()], program_id).0
}

pub fn get_stake_vault_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[STAKE_VAULT_SEED.as_bytes()], program_id).0
}

pub fn get_stake_record_address(program_id: &Pubkey, owner: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[STAKE_RECORD_SEED.as_bytes(), owner.as_ref()], program_id).0
}

pub fn get_claim_status_address(program_id: &Pubkey, owner: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CLAIM_STATUS_SEED.as_bytes(), owner.as_ref()], program_id).0
}

pub fn get_allocation_pool_address(program_id: &Pubkey, window: u8) -> Pubkey {
    Pubkey::find_program_address(&[ALLOCATION_POOL_SEED.as_bytes(), &[window]], program_id).0
}

pub fn get_treasury_balance_address(program_id: &Pubkey, recipient: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[TREASURY_BALANCE_SEED.as_bytes(), recipient.as_ref()],
        program_id,
    )
    .0
}
