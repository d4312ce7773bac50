// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Binary packing of the transaction envelope.
//!
//! The node expects the transaction as its canonical packed form: a fixed
//! header, varuint-prefixed action list, and empty extension list. Action
//! payloads arrive here already serialized (the node's `abi_json_to_bin`
//! endpoint does that against the contract's ABI).

use sha2::{Digest, Sha256};

/// Transaction header fields that bound validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxHeader {
    /// POSIX seconds after which the transaction is no longer includable.
    pub expiration: u32,
    /// Low 16 bits of the reference block number (TaPoS).
    pub ref_block_num: u16,
    /// Prefix taken from the reference block id (TaPoS).
    pub ref_block_prefix: u32,
}

/// An action with every name resolved to its packed form and the payload
/// already serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAction {
    pub account: u64,
    pub name: u64,
    /// (actor, permission) pairs.
    pub authorization: Vec<(u64, u64)>,
    pub data: Vec<u8>,
}

fn push_varuint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Pack a transaction into the chain's wire format.
pub fn pack_transaction(header: &TxHeader, actions: &[RawAction]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&header.expiration.to_le_bytes());
    buf.extend_from_slice(&header.ref_block_num.to_le_bytes());
    buf.extend_from_slice(&header.ref_block_prefix.to_le_bytes());
    push_varuint(&mut buf, 0); // max_net_usage_words
    buf.push(0); // max_cpu_usage_ms
    push_varuint(&mut buf, 0); // delay_sec
    push_varuint(&mut buf, 0); // context_free_actions
    push_varuint(&mut buf, actions.len() as u64);
    for action in actions {
        buf.extend_from_slice(&action.account.to_le_bytes());
        buf.extend_from_slice(&action.name.to_le_bytes());
        push_varuint(&mut buf, action.authorization.len() as u64);
        for (actor, permission) in &action.authorization {
            buf.extend_from_slice(&actor.to_le_bytes());
            buf.extend_from_slice(&permission.to_le_bytes());
        }
        push_varuint(&mut buf, action.data.len() as u64);
        buf.extend_from_slice(&action.data);
    }
    push_varuint(&mut buf, 0); // transaction_extensions
    buf
}

/// Digest a packed transaction for signing.
///
/// The chain signs over `chain_id || packed_trx || 32 zero bytes` (the zero
/// block stands in for the hash of the empty context-free data).
pub fn signing_digest(chain_id: &[u8], packed_trx: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(chain_id);
    hasher.update(packed_trx);
    hasher.update([0u8; 32]);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varuint(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        push_varuint(&mut buf, value);
        buf
    }

    #[test]
    fn varuint_encoding_matches_known_vectors() {
        assert_eq!(varuint(0), vec![0x00]);
        assert_eq!(varuint(1), vec![0x01]);
        assert_eq!(varuint(127), vec![0x7f]);
        assert_eq!(varuint(128), vec![0x80, 0x01]);
        assert_eq!(varuint(300), vec![0xac, 0x02]);
    }

    #[test]
    fn packs_empty_transaction_header() {
        let header = TxHeader {
            expiration: 0x0102_0304,
            ref_block_num: 0x1122,
            ref_block_prefix: 0xaabb_ccdd,
        };
        let packed = pack_transaction(&header, &[]);
        assert_eq!(
            hex::encode(packed),
            // expiration, ref_block_num, ref_block_prefix (all LE), then the
            // six zero varuint/byte fields for limits and empty lists.
            "040302012211ddccbbaa000000000000"
        );
    }

    #[test]
    fn packs_single_action_transaction() {
        let header = TxHeader {
            expiration: 1,
            ref_block_num: 2,
            ref_block_prefix: 3,
        };
        let action = RawAction {
            account: 0x0a,
            name: 0x0b,
            authorization: vec![(0x0c, 0x0d)],
            data: vec![0xde, 0xad],
        };
        let packed = pack_transaction(&header, &[action]);
        let expected = concat!(
            "01000000",         // expiration
            "0200",             // ref_block_num
            "03000000",         // ref_block_prefix
            "00", "00", "00",   // net words, cpu ms, delay
            "00",               // context-free actions
            "01",               // one action
            "0a00000000000000", // account
            "0b00000000000000", // name
            "01",               // one authorization
            "0c00000000000000", // actor
            "0d00000000000000", // permission
            "02", "dead",       // data
            "00",               // extensions
        );
        assert_eq!(hex::encode(packed), expected);
    }

    #[test]
    fn signing_digest_is_deterministic_and_domain_separated() {
        let chain_id = [7u8; 32];
        let trx = vec![1, 2, 3];
        let a = signing_digest(&chain_id, &trx);
        let b = signing_digest(&chain_id, &trx);
        assert_eq!(a, b);
        assert_ne!(a, signing_digest(&[8u8; 32], &trx));
        assert_ne!(a, signing_digest(&chain_id, &[1, 2]));
    }
}
