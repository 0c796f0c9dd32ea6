//! Merkle proof verification for allocation claims.
//!
//! Leaves commit to `(owner, amount, window)` and are double-hashed: the
//! inner hash binds the claim data, the outer hash domain-separates leaves
//! from interior nodes so a proof node can never be replayed as a leaf.
//! Interior nodes hash their children in sorted order, so proofs carry no
//! left/right flags.

use anchor_lang::solana_program::keccak;
use anchor_lang::solana_program::pubkey::Pubkey;

/// Leaf hash for one allocation entry. The window flag is part of the
/// preimage, so the two windows' trees can never satisfy each other's
/// proofs.
pub fn allocation_leaf(owner: &Pubkey, amount: u64, window: u8) -> [u8; 32] {
    let inner = keccak::hashv(&[owner.as_ref(), &amount.to_le_bytes(), &[window]]);
    keccak::hashv(&[&inner.0]).0
}

/// Sorted-pair interior node hash.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        keccak::hashv(&[a, b]).0
    } else {
        keccak::hashv(&[b, a]).0
    }
}

/// Walk the proof from `leaf` up to the root and compare.
pub fn verify(proof: &[[u8; 32]], root: &[u8; 32], leaf: [u8; 32]) -> bool {
    let mut computed = leaf;
    for node in proof {
        computed = hash_pair(&computed, node);
    }
    computed == *root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves() -> Vec<[u8; 32]> {
        (0u8..4)
            .map(|i| allocation_leaf(&Pubkey::new_from_array([i; 32]), 1_000 * (i as u64 + 1), 0))
            .collect()
    }

    /// Root of a fixed four-leaf tree plus the proof for `index`.
    fn root_and_proof(index: usize) -> ([u8; 32], Vec<[u8; 32]>) {
        let l = leaves();
        let n01 = hash_pair(&l[0], &l[1]);
        let n23 = hash_pair(&l[2], &l[3]);
        let root = hash_pair(&n01, &n23);
        let proof = match index {
            0 => vec![l[1], n23],
            1 => vec![l[0], n23],
            2 => vec![l[3], n01],
            3 => vec![l[2], n01],
            _ => unreachable!(),
        };
        (root, proof)
    }

    #[test]
    fn valid_proofs_verify_for_every_leaf() {
        let l = leaves();
        for i in 0..4 {
            let (root, proof) = root_and_proof(i);
            assert!(verify(&proof, &root, l[i]));
        }
    }

    #[test]
    fn tampered_amount_fails() {
        let (root, proof) = root_and_proof(0);
        let forged = allocation_leaf(&Pubkey::new_from_array([0; 32]), 999_999, 0);
        assert!(!verify(&proof, &root, forged));
    }

    #[test]
    fn tampered_proof_node_fails() {
        let l = leaves();
        let (root, mut proof) = root_and_proof(0);
        proof[0][7] ^= 1;
        assert!(!verify(&proof, &root, l[0]));
    }

    #[test]
    fn window_flag_separates_the_trees() {
        let owner = Pubkey::new_from_array([9; 32]);
        assert_ne!(
            allocation_leaf(&owner, 5_000, 0),
            allocation_leaf(&owner, 5_000, 1)
        );
    }

    #[test]
    fn interior_nodes_never_collide_with_claim_leaves() {
        // A forged claim would have to find (owner, amount, window) whose
        // double hash equals an interior node; the single-hashed nodes live
        // in a separate domain.
        let l = leaves();
        let n01 = hash_pair(&l[0], &l[1]);
        assert_ne!(
            n01,
            allocation_leaf(&Pubkey::new_from_array([0; 32]), 1_000, 0)
        );
    }

    #[test]
    fn pair_hash_is_order_independent() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn random_proof_chains_fold_to_their_root() {
        use rand::Rng;
        let mut rng = rand::rng();
        for _ in 0..32 {
            let leaf: [u8; 32] = rng.random();
            let proof: Vec<[u8; 32]> = (0..rng.random_range(0..10)).map(|_| rng.random()).collect();
            let root = proof.iter().fold(leaf, |acc, node| hash_pair(&acc, node));
            assert!(verify(&proof, &root, leaf));
            if !proof.is_empty() {
                let mut bad = proof.clone();
                bad[0][0] ^= 0xff;
                assert!(!verify(&bad, &root, leaf));
            }
        }
    }
}
