// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Base-32 account-name encoding used by the chain's wire format.
//!
//! Account, action, and permission names are packed into a `u64`: up to
//! twelve characters of five bits each plus a four-bit thirteenth character,
//! drawn from the alphabet `.12345a-z`.

/// Symbol table indexed by the packed five-bit value.
const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// A name that cannot be represented in the chain's base-32 alphabet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid on-chain name `{0}`")]
pub struct InvalidName(pub String);

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'.' => Some(0),
        _ => None,
    }
}

/// Encode a textual name into its packed `u64` form.
pub fn name_to_u64(name: &str) -> Result<u64, InvalidName> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > 13 {
        return Err(InvalidName(name.to_string()));
    }

    let mut value: u64 = 0;
    for (i, &c) in bytes.iter().enumerate() {
        let sym = char_to_symbol(c).ok_or_else(|| InvalidName(name.to_string()))?;
        if i < 12 {
            value |= (sym & 0x1f) << (64 - 5 * (i + 1));
        } else {
            // The thirteenth character only has four bits of room.
            if sym > 0x0f {
                return Err(InvalidName(name.to_string()));
            }
            value |= sym;
        }
    }
    Ok(value)
}

/// Decode a packed `u64` back into its textual form.
pub fn u64_to_name(value: u64) -> String {
    let mut chars = [b'.'; 13];
    let mut tmp = value;
    for i in 0..13 {
        let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
        chars[12 - i] = CHARMAP[(tmp & mask) as usize];
        tmp >>= shift;
    }
    String::from_utf8_lossy(&chars)
        .trim_end_matches('.')
        .to_string()
}
