#![allow(dead_code)]
use anyhow::{format_err, Result};
use clap::Parser;
use configparser::ini::Ini;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::str::FromStr;

mod instructions;
use instructions::merkle_tree;
use instructions::rpc::*;
use instructions::stake_instructions::*;
use instructions::utils::*;

use veris_stake::states::{AllocationPool, ClaimStatus, GlobalConfig, RewardPool, StakeRecord, TreasuryBalance};
use veris_stake::{merkle, views};

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    veris_stake_program: Pubkey,
}

fn load_cfg(client_config: &String) -> Result<ClientConfig> {
    let mut config = Ini::new();
    let _map = config.load(client_config).unwrap();
    let http_url = config.get("Global", "http_url").unwrap();
    if http_url.is_empty() {
        panic!("http_url must not be empty");
    }
    let ws_url = config.get("Global", "ws_url").unwrap();
    if ws_url.is_empty() {
        panic!("ws_url must not be empty");
    }
    let payer_path = config.get("Global", "payer_path").unwrap();
    if payer_path.is_empty() {
        panic!("payer_path must not be empty");
    }
    let admin_path = config.get("Global", "admin_path").unwrap();
    if admin_path.is_empty() {
        panic!("admin_path must not be empty");
    }

    let veris_stake_program_str = config.get("Global", "veris_stake_program").unwrap();
    if veris_stake_program_str.is_empty() {
        panic!("veris_stake_program must not be empty");
    }
    let veris_stake_program = Pubkey::from_str(&veris_stake_program_str).unwrap();

    Ok(ClientConfig {
        http_url,
        ws_url,
        payer_path,
        admin_path,
        veris_stake_program,
    })
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: VerisStakeCommands,
}

#[derive(Debug, Parser)]
pub enum VerisStakeCommands {
    InitialiseConfigs {
        #[arg(long)]
        admin: Pubkey,
        #[arg(long)]
        treasury: Pubkey,
        #[arg(long)]
        min_stake_amount: u64,
        #[arg(long)]
        emissions_per_second: u64,
        #[arg(long, num_args = 3)]
        tier_thresholds: Vec<u64>,
        #[arg(long, num_args = 3)]
        tier_multiplier_bps: Vec<u64>,
        #[arg(long)]
        penalty_burn_bps: u64,
        #[arg(long)]
        penalty_treasury_bps: u64,
        #[arg(long)]
        penalty_refill_bps: u64,
    },
    /// Arm an allocation window from a generated tree file.
    InitialiseAllocationPool {
        #[arg(long)]
        window: u8,
        #[arg(long)]
        tree_path: String,
        #[arg(long)]
        expiry_ts: u64,
    },
    /// Build the merkle tree for a window from an `owner,amount` CSV.
    BuildAllocationTree {
        #[arg(long)]
        window: u8,
        #[arg(long)]
        csv_path: String,
        #[arg(long)]
        out_path: String,
    },
    Stake {
        #[arg(long)]
        amount: u64,
    },
    GiftStake {
        #[arg(long)]
        beneficiary: Pubkey,
        #[arg(long)]
        amount: u64,
    },
    Withdraw {
        #[arg(long)]
        amount: u64,
    },
    ClaimRewards {},
    CompoundRewards {},
    /// Claim one or both windows using proofs from the generated tree file.
    ClaimAllocation {
        #[arg(long)]
        six_month_tree: Option<String>,
        #[arg(long)]
        twelve_month_tree: Option<String>,
    },
    TransferStake {
        #[arg(long)]
        recipient: Pubkey,
    },
    ExpirePool {
        #[arg(long)]
        window: u8,
    },
    DistributeExpired {},
    WithdrawTreasury {
        #[arg(long)]
        recipient: Pubkey,
    },
    FundEmissions {
        #[arg(long)]
        amount: u64,
    },
    UpdateConfig {
        #[arg(long)]
        param: u8,
        #[arg(long)]
        value: u64,
        #[arg(long)]
        new_key: Option<Pubkey>,
    },
    UpdateTierConfig {
        #[arg(long, num_args = 3)]
        tier_thresholds: Vec<u64>,
        #[arg(long, num_args = 3)]
        tier_multiplier_bps: Vec<u64>,
    },
    UpdatePenaltySplit {
        #[arg(long)]
        burn_bps: u64,
        #[arg(long)]
        treasury_bps: u64,
        #[arg(long)]
        refill_bps: u64,
    },
    EmergencyWithdraw {
        #[arg(long)]
        param: u8,
        #[arg(long)]
        value: u64,
    },
    // ── Read-only reporting ────────────────────────────────────────────────
    StakeSnapshot {
        #[arg(long)]
        owner: Pubkey,
    },
    PenaltyPreview {
        #[arg(long)]
        owner: Pubkey,
        #[arg(long)]
        amount: u64,
    },
    ClaimablePreview {
        #[arg(long)]
        owner: Pubkey,
    },
    CompoundPreview {
        #[arg(long)]
        owner: Pubkey,
    },
    AddonPreview {
        #[arg(long)]
        owner: Pubkey,
        #[arg(long)]
        amount: u64,
    },
    GlobalStats {},
    PoolStatus {
        #[arg(long)]
        window: u8,
    },
    ClaimEligibility {
        #[arg(long)]
        owner: Pubkey,
        #[arg(long)]
        window: u8,
        #[arg(long)]
        tree_path: String,
    },
    CirculatingSupply {},
}

/// Pull this owner's (amount, proof) out of a generated tree file.
fn load_claim(tree_path: &str, owner: &Pubkey) -> Result<(u64, Vec<[u8; 32]>)> {
    let raw = std::fs::read_to_string(tree_path)?;
    let tree: serde_json::Value = serde_json::from_str(&raw)?;
    let claims = tree["claims"]
        .as_array()
        .ok_or_else(|| format_err!("malformed tree file: no claims"))?;
    for claim in claims {
        if claim["owner"].as_str() == Some(owner.to_string().as_str()) {
            let amount = claim["amount"]
                .as_u64()
                .ok_or_else(|| format_err!("malformed tree file: bad amount"))?;
            let nodes: Vec<String> = claim["proof"]
                .as_array()
                .ok_or_else(|| format_err!("malformed tree file: bad proof"))?
                .iter()
                .filter_map(|n| n.as_str().map(String::from))
                .collect();
            return Ok((amount, merkle_tree::decode_proof(&nodes)?));
        }
    }
    Err(format_err!("owner {} not present in {}", owner, tree_path))
}

fn tree_root(tree_path: &str) -> Result<[u8; 32]> {
    let raw = std::fs::read_to_string(tree_path)?;
    let tree: serde_json::Value = serde_json::from_str(&raw)?;
    let root = hex::decode(
        tree["root"]
            .as_str()
            .ok_or_else(|| format_err!("malformed tree file: no root"))?,
    )?;
    <[u8; 32]>::try_from(root.as_slice()).map_err(|_| format_err!("root must be 32 bytes"))
}

fn fixed3(values: &[u64]) -> Result<[u64; 3]> {
    <[u64; 3]>::try_from(values.to_vec()).map_err(|_| format_err!("expected exactly 3 values"))
}

fn send_and_print(
    rpc_client: &RpcClient,
    payer: &Keypair,
    instructions: Vec<solana_sdk::instruction::Instruction>,
) -> Result<()> {
    let signers = vec![payer];
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn = Transaction::new_signed_with_payer(
        &instructions,
        Some(&payer.pubkey()),
        &signers,
        recent_hash,
    );
    let signature = send_txn(rpc_client, &txn, true)?;
    println!("{}", signature);
    Ok(())
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let pool_config = load_cfg(&client_config.to_string()).unwrap();
    // cluster params.
    let payer = read_keypair_file(&pool_config.payer_path)?;
    let admin = read_keypair_file(&pool_config.admin_path)?;
    // solana rpc client
    let rpc_client = RpcClient::new(pool_config.http_url.to_string());
    let program_id = pool_config.veris_stake_program;

    let opts = Opts::parse();
    match opts.command {
        VerisStakeCommands::InitialiseConfigs {
            admin: new_admin,
            treasury,
            min_stake_amount,
            emissions_per_second,
            tier_thresholds,
            tier_multiplier_bps,
            penalty_burn_bps,
            penalty_treasury_bps,
            penalty_refill_bps,
        } => {
            let instructions = initialise_configs_instr(
                &pool_config,
                new_admin,
                treasury,
                min_stake_amount,
                emissions_per_second,
                fixed3(&tier_thresholds)?,
                fixed3(&tier_multiplier_bps)?,
                penalty_burn_bps,
                penalty_treasury_bps,
                penalty_refill_bps,
            )?;
            send_and_print(&rpc_client, &admin, instructions)?;
        }
        VerisStakeCommands::InitialiseAllocationPool {
            window,
            tree_path,
            expiry_ts,
        } => {
            let raw = std::fs::read_to_string(&tree_path)?;
            let tree: serde_json::Value = serde_json::from_str(&raw)?;
            let amount = tree["total"]
                .as_u64()
                .ok_or_else(|| format_err!("malformed tree file: no total"))?;
            let instructions = initialise_allocation_pool_instr(
                &pool_config,
                window,
                tree_root(&tree_path)?,
                expiry_ts,
                amount,
            )?;
            send_and_print(&rpc_client, &admin, instructions)?;
        }
        VerisStakeCommands::BuildAllocationTree {
            window,
            csv_path,
            out_path,
        } => {
            let csv = std::fs::read_to_string(&csv_path)?;
            let entries = merkle_tree::parse_allocations(&csv)?;
            let out = merkle_tree::tree_to_json(&entries, window);
            std::fs::write(&out_path, serde_json::to_string_pretty(&out)?)?;
            println!("root: {}", out.root);
            println!("claims: {} total: {}", out.claims.len(), out.total);
        }
        VerisStakeCommands::Stake { amount } => {
            let instructions = stake_instr(&pool_config, amount)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::GiftStake {
            beneficiary,
            amount,
        } => {
            let instructions = gift_stake_instr(&pool_config, beneficiary, amount)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::Withdraw { amount } => {
            let instructions = withdraw_instr(&pool_config, amount)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::ClaimRewards {} => {
            let instructions = claim_rewards_instr(&pool_config)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::CompoundRewards {} => {
            let instructions = compound_rewards_instr(&pool_config)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::ClaimAllocation {
            six_month_tree,
            twelve_month_tree,
        } => {
            let owner = payer.pubkey();
            let (six_amount, six_proof) = match six_month_tree {
                Some(path) => load_claim(&path, &owner)?,
                None => (0, Vec::new()),
            };
            let (twelve_amount, twelve_proof) = match twelve_month_tree {
                Some(path) => load_claim(&path, &owner)?,
                None => (0, Vec::new()),
            };
            let instructions = claim_allocation_instr(
                &pool_config,
                six_amount,
                six_proof,
                twelve_amount,
                twelve_proof,
            )?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::TransferStake { recipient } => {
            let instructions = transfer_stake_instr(&pool_config, recipient)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::ExpirePool { window } => {
            let instructions = expire_pool_instr(&pool_config, window)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::DistributeExpired {} => {
            let instructions = distribute_expired_instr(&pool_config)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::WithdrawTreasury { recipient } => {
            let instructions = withdraw_treasury_instr(&pool_config, recipient)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::FundEmissions { amount } => {
            let instructions = fund_emissions_instr(&pool_config, amount)?;
            send_and_print(&rpc_client, &payer, instructions)?;
        }
        VerisStakeCommands::UpdateConfig {
            param,
            value,
            new_key,
        } => {
            let instructions = update_config_instr(&pool_config, param, value, new_key)?;
            send_and_print(&rpc_client, &admin, instructions)?;
        }
        VerisStakeCommands::UpdateTierConfig {
            tier_thresholds,
            tier_multiplier_bps,
        } => {
            let instructions = update_tier_config_instr(
                &pool_config,
                fixed3(&tier_thresholds)?,
                fixed3(&tier_multiplier_bps)?,
            )?;
            send_and_print(&rpc_client, &admin, instructions)?;
        }
        VerisStakeCommands::UpdatePenaltySplit {
            burn_bps,
            treasury_bps,
            refill_bps,
        } => {
            let instructions =
                update_penalty_split_instr(&pool_config, burn_bps, treasury_bps, refill_bps)?;
            send_and_print(&rpc_client, &admin, instructions)?;
        }
        VerisStakeCommands::EmergencyWithdraw { param, value } => {
            let instructions = emergency_withdraw_instr(&pool_config, param, value)?;
            send_and_print(&rpc_client, &admin, instructions)?;
        }
        VerisStakeCommands::StakeSnapshot { owner } => {
            let config: GlobalConfig = deserialize_anchor_account(
                &rpc_client.get_account(&get_global_config_address(&program_id))?,
            )?;
            let pool: RewardPool = deserialize_anchor_account(
                &rpc_client.get_account(&get_reward_pool_address(&program_id))?,
            )?;
            let record: StakeRecord = deserialize_anchor_account(
                &rpc_client.get_account(&get_stake_record_address(&program_id, &owner))?,
            )?;
            let snap = views::stake_snapshot(&config, &pool, &record, unix_now())
                .ok_or_else(|| format_err!("snapshot computation overflowed"))?;
            println!("amount:                 {}", snap.amount);
            println!("start_ts:               {}", snap.start_ts);
            println!("tier:                   {:?}", snap.tier);
            println!("penalty_rate_bps:       {}", snap.penalty_rate_bps);
            println!("seconds_to_zero_penalty:{}", snap.seconds_to_zero_penalty);
            println!("pending_reward:         {}", snap.pending_reward);
        }
        VerisStakeCommands::PenaltyPreview { owner, amount } => {
            let record: StakeRecord = deserialize_anchor_account(
                &rpc_client.get_account(&get_stake_record_address(&program_id, &owner))?,
            )?;
            let preview = views::penalty_preview(&record, amount, unix_now())
                .ok_or_else(|| format_err!("penalty preview overflowed"))?;
            println!("rate_bps:   {}", preview.rate_bps);
            println!("penalty:    {}", preview.penalty);
            println!("net_amount: {}", preview.net_amount);
        }
        VerisStakeCommands::ClaimablePreview { owner } => {
            let config: GlobalConfig = deserialize_anchor_account(
                &rpc_client.get_account(&get_global_config_address(&program_id))?,
            )?;
            let pool: RewardPool = deserialize_anchor_account(
                &rpc_client.get_account(&get_reward_pool_address(&program_id))?,
            )?;
            let record: StakeRecord = deserialize_anchor_account(
                &rpc_client.get_account(&get_stake_record_address(&program_id, &owner))?,
            )?;
            let preview = views::claimable_preview(&config, &pool, &record, unix_now())
                .ok_or_else(|| format_err!("claimable preview overflowed"))?;
            println!("base:  {}", preview.base);
            println!("bonus: {}", preview.bonus);
            println!("total: {}", preview.total);
        }
        VerisStakeCommands::CompoundPreview { owner } => {
            let config: GlobalConfig = deserialize_anchor_account(
                &rpc_client.get_account(&get_global_config_address(&program_id))?,
            )?;
            let pool: RewardPool = deserialize_anchor_account(
                &rpc_client.get_account(&get_reward_pool_address(&program_id))?,
            )?;
            let record: StakeRecord = deserialize_anchor_account(
                &rpc_client.get_account(&get_stake_record_address(&program_id, &owner))?,
            )?;
            let preview = views::compound_preview(&config, &pool, &record, unix_now())
                .ok_or_else(|| format_err!("compound preview overflowed"))?;
            println!("new_amount:          {}", preview.new_amount);
            println!("new_start_ts:        {}", preview.new_start_ts);
            println!("new_penalty_rate_bps:{}", preview.new_penalty_rate_bps);
        }
        VerisStakeCommands::AddonPreview { owner, amount } => {
            let record: StakeRecord = deserialize_anchor_account(
                &rpc_client.get_account(&get_stake_record_address(&program_id, &owner))?,
            )?;
            let preview = views::addon_preview(&record, amount, unix_now())
                .ok_or_else(|| format_err!("add-on preview overflowed"))?;
            println!("new_amount:          {}", preview.new_amount);
            println!("new_start_ts:        {}", preview.new_start_ts);
            println!("new_penalty_rate_bps:{}", preview.new_penalty_rate_bps);
        }
        VerisStakeCommands::GlobalStats {} => {
            let config: GlobalConfig = deserialize_anchor_account(
                &rpc_client.get_account(&get_global_config_address(&program_id))?,
            )?;
            let pool: RewardPool = deserialize_anchor_account(
                &rpc_client.get_account(&get_reward_pool_address(&program_id))?,
            )?;
            let stats = views::global_stats(&config, &pool, unix_now())
                .ok_or_else(|| format_err!("stats computation overflowed"))?;
            println!("total_staked:         {}", stats.total_staked);
            println!("remaining_emissions:  {}", stats.remaining_emissions);
            println!("emissions_per_second: {}", stats.emissions_per_second);
            println!("acc_reward_per_share: {}", stats.acc_reward_per_share);
            println!("expired_pool_amount:  {}", stats.expired_pool_amount);
            println!("paused:               {}", stats.paused);
            match views::annualized_rate_bps(&pool) {
                Some(bps) => println!("annualized_rate_bps:  {}", bps),
                None => println!("annualized_rate_bps:  n/a (nothing staked)"),
            }
            match views::emissions_runway_seconds(&pool) {
                Some(secs) => println!("emissions_runway_s:   {}", secs),
                None => println!("emissions_runway_s:   n/a (emissions stopped)"),
            }
        }
        VerisStakeCommands::PoolStatus { window } => {
            let pool: AllocationPool = deserialize_anchor_account(
                &rpc_client.get_account(&get_allocation_pool_address(&program_id, window))?,
            )?;
            let status = views::pool_status(&pool, unix_now());
            println!("window:            {}", status.window);
            println!("unassigned_amount: {}", status.unassigned_amount);
            println!("expiry_ts:         {}", status.expiry_ts);
            println!("expired:           {}", status.expired);
            println!("seconds_to_expiry: {}", status.seconds_to_expiry);
        }
        VerisStakeCommands::ClaimEligibility {
            owner,
            window,
            tree_path,
        } => {
            let pool: AllocationPool = deserialize_anchor_account(
                &rpc_client.get_account(&get_allocation_pool_address(&program_id, window))?,
            )?;
            let already_claimed = rpc_client
                .get_account(&get_claim_status_address(&program_id, &owner))
                .ok()
                .and_then(|acct| deserialize_anchor_account::<ClaimStatus>(&acct).ok())
                .and_then(|status| status.claimed.get(window as usize).copied())
                .unwrap_or(false);
            let (amount, proof) = load_claim(&tree_path, &owner).unwrap_or((0, Vec::new()));
            let leaf = merkle::allocation_leaf(&owner, amount, window);
            let proof_valid = merkle::verify(&proof, &pool.merkle_root, leaf);
            match views::claim_ineligibility_reason(
                &pool,
                already_claimed,
                amount,
                proof_valid,
                unix_now(),
            ) {
                Some(reason) => println!("ineligible: {}", reason),
                None => println!("eligible: {} may claim {} from window {}", owner, amount, window),
            }
        }
        VerisStakeCommands::CirculatingSupply {} => {
            let pool: RewardPool = deserialize_anchor_account(
                &rpc_client.get_account(&get_reward_pool_address(&program_id))?,
            )?;
            let mut unassigned_total = 0u64;
            for window in [veris_stake::SIX_MONTH_WINDOW, veris_stake::TWELVE_MONTH_WINDOW] {
                if let Ok(acct) =
                    rpc_client.get_account(&get_allocation_pool_address(&program_id, window))
                {
                    let alloc: AllocationPool = deserialize_anchor_account(&acct)?;
                    unassigned_total += alloc.unassigned_amount;
                }
            }
            let config: GlobalConfig = deserialize_anchor_account(
                &rpc_client.get_account(&get_global_config_address(&program_id))?,
            )?;
            let pending_treasury = rpc_client
                .get_account(&get_treasury_balance_address(&program_id, &config.treasury))
                .ok()
                .and_then(|acct| deserialize_anchor_account::<TreasuryBalance>(&acct).ok())
                .map(|balance| balance.amount)
                .unwrap_or(0);
            let supply = rpc_client
                .get_token_supply(&veris_stake::veris_mint::id())?
                .amount
                .parse::<u64>()?;
            println!(
                "circulating_supply: {}",
                views::circulating_supply(supply, &pool, unassigned_total, pending_treasury)
            );
        }
    }
    Ok(())
}
