use anchor_client::{Client, Cluster};
use anchor_lang::prelude::AccountMeta;
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};
use spl_associated_token_account::get_associated_token_address;
use std::rc::Rc;

use veris_stake::accounts as stake_accounts;
use veris_stake::instruction as stake_instructions;
use veris_stake::veris_mint;

use crate::instructions::utils::{
    get_allocation_pool_address, get_authority_address, get_claim_status_address,
    get_global_config_address, get_reward_pool_address, get_stake_record_address,
    get_stake_vault_address, get_treasury_balance_address,
};

use super::super::{read_keypair_file, ClientConfig};

#[allow(clippy::too_many_arguments)]
pub fn initialise_configs_instr(
    config: &ClientConfig,
    admin: Pubkey,
    treasury: Pubkey,
    min_stake_amount: u64,
    emissions_per_second: u64,
    tier_thresholds: [u64; 3],
    tier_multiplier_bps: [u64; 3],
    penalty_burn_bps: u64,
    penalty_treasury_bps: u64,
    penalty_refill_bps: u64,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::InitialiseConfigs {
            owner: program.payer(),
            authority: get_authority_address(&program.id()),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::InitialiseConfigs {
            admin,
            treasury,
            min_stake_amount,
            emissions_per_second,
            tier_thresholds,
            tier_multiplier_bps,
            penalty_burn_bps,
            penalty_treasury_bps,
            penalty_refill_bps,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn initialise_allocation_pool_instr(
    config: &ClientConfig,
    window: u8,
    merkle_root: [u8; 32],
    expiry_ts: u64,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::InitialiseAllocationPool {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            allocation_pool: get_allocation_pool_address(&program.id(), window),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            owner_token: get_associated_token_address(&program.payer(), &veris_mint::id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::InitialiseAllocationPool {
            window,
            merkle_root,
            expiry_ts,
            amount,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn stake_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::Stake {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            stake_record: get_stake_record_address(&program.id(), &program.payer()),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            owner_token: get_associated_token_address(&program.payer(), &veris_mint::id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::Stake { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn gift_stake_instr(
    config: &ClientConfig,
    beneficiary: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::GiftStake {
            donor: program.payer(),
            beneficiary,
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            stake_record: get_stake_record_address(&program.id(), &beneficiary),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            donor_token: get_associated_token_address(&program.payer(), &veris_mint::id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::GiftStake { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn withdraw_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let global_config = get_global_config_address(&program.id());
    let treasury: veris_stake::states::GlobalConfig = program.account(global_config)?;
    let instructions = program
        .request()
        .accounts(stake_accounts::Withdraw {
            owner: program.payer(),
            global_config,
            reward_pool: get_reward_pool_address(&program.id()),
            stake_record: get_stake_record_address(&program.id(), &program.payer()),
            treasury_balance: get_treasury_balance_address(&program.id(), &treasury.treasury),
            authority: get_authority_address(&program.id()),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            owner_token: get_associated_token_address(&program.payer(), &veris_mint::id()),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::Withdraw { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn claim_rewards_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::ClaimRewards {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            stake_record: get_stake_record_address(&program.id(), &program.payer()),
            authority: get_authority_address(&program.id()),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            owner_token: get_associated_token_address(&program.payer(), &veris_mint::id()),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::ClaimRewards {})
        .instructions()?;
    Ok(instructions)
}

pub fn compound_rewards_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::CompoundRewards {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            stake_record: get_stake_record_address(&program.id(), &program.payer()),
        })
        .args(stake_instructions::CompoundRewards {})
        .instructions()?;
    Ok(instructions)
}

pub fn claim_allocation_instr(
    config: &ClientConfig,
    six_month_amount: u64,
    six_month_proof: Vec<[u8; 32]>,
    twelve_month_amount: u64,
    twelve_month_proof: Vec<[u8; 32]>,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::ClaimAllocation {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            stake_record: get_stake_record_address(&program.id(), &program.payer()),
            claim_status: get_claim_status_address(&program.id(), &program.payer()),
            six_month_pool: get_allocation_pool_address(&program.id(), veris_stake::SIX_MONTH_WINDOW),
            twelve_month_pool: get_allocation_pool_address(
                &program.id(),
                veris_stake::TWELVE_MONTH_WINDOW,
            ),
            system_program: system_program::id(),
        })
        .args(stake_instructions::ClaimAllocation {
            six_month_amount,
            six_month_proof,
            twelve_month_amount,
            twelve_month_proof,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn transfer_stake_instr(config: &ClientConfig, recipient: Pubkey) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::TransferStake {
            owner: program.payer(),
            recipient,
            reward_pool: get_reward_pool_address(&program.id()),
            from_record: get_stake_record_address(&program.id(), &program.payer()),
            to_record: get_stake_record_address(&program.id(), &recipient),
            system_program: system_program::id(),
        })
        .args(stake_instructions::TransferStake {})
        .instructions()?;
    Ok(instructions)
}

pub fn expire_pool_instr(config: &ClientConfig, window: u8) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::ExpirePool {
            caller: program.payer(),
            reward_pool: get_reward_pool_address(&program.id()),
            allocation_pool: get_allocation_pool_address(&program.id(), window),
        })
        .args(stake_instructions::ExpirePool { window })
        .instructions()?;
    Ok(instructions)
}

pub fn distribute_expired_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let global_config = get_global_config_address(&program.id());
    let cfg: veris_stake::states::GlobalConfig = program.account(global_config)?;
    let instructions = program
        .request()
        .accounts(stake_accounts::DistributeExpired {
            caller: program.payer(),
            global_config,
            reward_pool: get_reward_pool_address(&program.id()),
            treasury_balance: get_treasury_balance_address(&program.id(), &cfg.treasury),
            authority: get_authority_address(&program.id()),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::DistributeExpired {})
        .instructions()?;
    Ok(instructions)
}

pub fn withdraw_treasury_instr(
    config: &ClientConfig,
    recipient: Pubkey,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::WithdrawTreasury {
            caller: program.payer(),
            recipient,
            global_config: get_global_config_address(&program.id()),
            treasury_balance: get_treasury_balance_address(&program.id(), &recipient),
            authority: get_authority_address(&program.id()),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            recipient_token: get_associated_token_address(&recipient, &veris_mint::id()),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::WithdrawTreasury {})
        .instructions()?;
    Ok(instructions)
}

pub fn fund_emissions_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::FundEmissions {
            funder: program.payer(),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            funder_token: get_associated_token_address(&program.payer(), &veris_mint::id()),
            token_program: spl_token::id(),
        })
        .args(stake_instructions::FundEmissions { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn update_config_instr(
    config: &ClientConfig,
    param: u8,
    value: u64,
    new_key: Option<Pubkey>,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let mut request = program
        .request()
        .accounts(stake_accounts::UpdateConfig {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            system_program: system_program::id(),
        })
        .args(stake_instructions::UpdateConfig { param, value });
    // Admin and treasury rotations carry the new key as a remaining account.
    if let Some(key) = new_key {
        request = request.accounts(AccountMeta::new_readonly(key, false));
    }
    let instructions = request.instructions()?;
    Ok(instructions)
}

pub fn update_tier_config_instr(
    config: &ClientConfig,
    tier_thresholds: [u64; 3],
    tier_multiplier_bps: [u64; 3],
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::UpdateTierConfig {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
        })
        .args(stake_instructions::UpdateTierConfig {
            tier_thresholds,
            tier_multiplier_bps,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn update_penalty_split_instr(
    config: &ClientConfig,
    burn_bps: u64,
    treasury_bps: u64,
    refill_bps: u64,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::UpdatePenaltySplit {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
        })
        .args(stake_instructions::UpdatePenaltySplit {
            burn_bps,
            treasury_bps,
            refill_bps,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn emergency_withdraw_instr(
    config: &ClientConfig,
    param: u8,
    value: u64,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.admin_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.veris_stake_program)?;

    let instructions = program
        .request()
        .accounts(stake_accounts::EmergencyWithdraw {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            reward_pool: get_reward_pool_address(&program.id()),
            authority: get_authority_address(&program.id()),
            veris_mint: veris_mint::id(),
            stake_vault: get_stake_vault_address(&program.id()),
            owner_token: get_associated_token_address(&program.payer(), &veris_mint::id()),
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        })
        .args(stake_instructions::EmergencyWithdraw { param, value })
        .instructions()?;
    Ok(instructions)
}
