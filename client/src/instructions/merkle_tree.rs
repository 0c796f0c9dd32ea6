//! Off-chain allocation tree builder.
//!
//! Mirrors the on-chain verifier: double-hashed leaves over
//! `(owner, amount, window)` and sorted-pair interior nodes, so a root and
//! proofs produced here verify against `veris_stake::merkle`.

use anyhow::{format_err, Result};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use veris_stake::merkle::{allocation_leaf, hash_pair};

#[derive(Debug, Clone)]
pub struct AllocationEntry {
    pub owner: Pubkey,
    pub amount: u64,
}

/// Parse `owner,amount` lines. Blank lines and `#` comments are skipped.
pub fn parse_allocations(csv: &str) -> Result<Vec<AllocationEntry>> {
    let mut entries = Vec::new();
    for (lineno, line) in csv.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (owner, amount) = line
            .split_once(',')
            .ok_or_else(|| format_err!("line {}: expected owner,amount", lineno + 1))?;
        entries.push(AllocationEntry {
            owner: Pubkey::from_str(owner.trim())?,
            amount: amount.trim().parse()?,
        });
    }
    if entries.is_empty() {
        return Err(format_err!("no allocation entries found"));
    }
    Ok(entries)
}

/// Root plus one proof per entry, in input order.
pub fn build_tree(entries: &[AllocationEntry], window: u8) -> ([u8; 32], Vec<Vec<[u8; 32]>>) {
    let leaves: Vec<[u8; 32]> = entries
        .iter()
        .map(|e| allocation_leaf(&e.owner, e.amount, window))
        .collect();

    // Each level pairs adjacent nodes, duplicating a trailing odd node.
    let mut levels: Vec<Vec<[u8; 32]>> = vec![leaves];
    while levels.last().unwrap().len() > 1 {
        let prev = levels.last().unwrap();
        let mut next = Vec::with_capacity(prev.len().div_ceil(2));
        for pair in prev.chunks(2) {
            let right = if pair.len() == 2 { &pair[1] } else { &pair[0] };
            next.push(hash_pair(&pair[0], right));
        }
        levels.push(next);
    }
    let root = levels.last().unwrap()[0];

    let proofs = (0..entries.len())
        .map(|mut index| {
            let mut proof = Vec::new();
            for level in &levels[..levels.len() - 1] {
                let sibling = if index % 2 == 0 {
                    // Odd tail duplicates itself as its own sibling.
                    *level.get(index + 1).unwrap_or(&level[index])
                } else {
                    level[index - 1]
                };
                proof.push(sibling);
                index /= 2;
            }
            proof
        })
        .collect();

    (root, proofs)
}

#[derive(Serialize)]
pub struct ClaimProofOut {
    pub owner: String,
    pub amount: u64,
    pub proof: Vec<String>,
}

#[derive(Serialize)]
pub struct TreeOut {
    pub window: u8,
    pub root: String,
    pub total: u64,
    pub claims: Vec<ClaimProofOut>,
}

pub fn tree_to_json(entries: &[AllocationEntry], window: u8) -> TreeOut {
    let (root, proofs) = build_tree(entries, window);
    TreeOut {
        window,
        root: hex::encode(root),
        total: entries.iter().map(|e| e.amount).sum(),
        claims: entries
            .iter()
            .zip(proofs)
            .map(|(e, proof)| ClaimProofOut {
                owner: e.owner.to_string(),
                amount: e.amount,
                proof: proof.iter().map(hex::encode).collect(),
            })
            .collect(),
    }
}

/// Decode a hex proof list as emitted in `TreeOut`.
pub fn decode_proof(nodes: &[String]) -> Result<Vec<[u8; 32]>> {
    nodes
        .iter()
        .map(|s| {
            let bytes = hex::decode(s)?;
            <[u8; 32]>::try_from(bytes.as_slice())
                .map_err(|_| format_err!("proof node must be 32 bytes"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use veris_stake::merkle;

    fn entries(n: u8) -> Vec<AllocationEntry> {
        (0..n)
            .map(|i| AllocationEntry {
                owner: Pubkey::new_from_array([i + 1; 32]),
                amount: 1_000 * (i as u64 + 1),
            })
            .collect()
    }

    #[test]
    fn every_proof_verifies_against_the_root() {
        for n in [1u8, 2, 3, 5, 8] {
            let list = entries(n);
            let (root, proofs) = build_tree(&list, 1);
            for (e, proof) in list.iter().zip(&proofs) {
                let leaf = merkle::allocation_leaf(&e.owner, e.amount, 1);
                assert!(merkle::verify(proof, &root, leaf), "n = {}", n);
            }
        }
    }

    #[test]
    fn proofs_do_not_cross_windows() {
        let list = entries(4);
        let (root, proofs) = build_tree(&list, 0);
        let wrong = merkle::allocation_leaf(&list[0].owner, list[0].amount, 1);
        assert!(!merkle::verify(&proofs[0], &root, wrong));
    }

    #[test]
    fn csv_parsing_skips_comments() {
        let csv = "# allocations\n\
                   11111111111111111111111111111111,500\n\
                   \n";
        let parsed = parse_allocations(csv).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].amount, 500);
    }
}
