// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! K1 key handling and canonical transaction signatures.
//!
//! The service holds a single secp256k1 key loaded once at startup. Signing
//! goes through the [`SignDigest`] seam so the broadcaster can be exercised
//! without key material or network access.

use k256::ecdsa::hazmat::SignPrimitive;
use k256::ecdsa::{RecoveryId, Signature, SigningKey};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Errors raised while loading the key or producing a signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningError {
    #[error("no signing key configured")]
    MissingKey,
    #[error("invalid private key: {0}")]
    InvalidKey(String),
    #[error("signing failed: {0}")]
    Signature(String),
}

/// Capability to sign a 32-byte transaction digest.
pub trait SignDigest: Send + Sync {
    /// Produce a `SIG_K1_…` signature string over the digest.
    fn sign_digest(&self, digest: &[u8; 32]) -> Result<String, SigningError>;
}

/// Stand-in used when no key is configured: every broadcast fails cleanly
/// instead of the process refusing to start.
pub struct UnconfiguredSigner;

impl SignDigest for UnconfiguredSigner {
    fn sign_digest(&self, _digest: &[u8; 32]) -> Result<String, SigningError> {
        Err(SigningError::MissingKey)
    }
}

/// The service's secp256k1 signing key.
pub struct K1Key {
    key: SigningKey,
}

// The scalar must never appear in logs or panics.
impl std::fmt::Debug for K1Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("K1Key(..)")
    }
}

impl K1Key {
    /// Parse a legacy WIF private key (base58check with a `0x80` version
    /// byte and a double-sha256 checksum).
    pub fn from_wif(wif: &str) -> Result<Self, SigningError> {
        let raw = bs58::decode(wif)
            .into_vec()
            .map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        if raw.len() != 37 {
            return Err(SigningError::InvalidKey("unexpected length".into()));
        }
        let (payload, checksum) = raw.split_at(33);
        let digest = Sha256::digest(Sha256::digest(payload));
        if digest[..4] != *checksum {
            return Err(SigningError::InvalidKey("checksum mismatch".into()));
        }
        if payload[0] != 0x80 {
            return Err(SigningError::InvalidKey("unexpected version byte".into()));
        }
        let key = SigningKey::from_slice(&payload[1..])
            .map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        Ok(Self { key })
    }
}

impl SignDigest for K1Key {
    fn sign_digest(&self, digest: &[u8; 32]) -> Result<String, SigningError> {
        let scalar = *self.key.as_nonzero_scalar();
        let verifying = self.key.verifying_key();
        let z = k256::FieldBytes::from(*digest);

        // RFC 6979 with an attempt counter as extra entropy until the
        // signature satisfies the chain's canonical form. The first attempt
        // uses plain RFC 6979, so most signatures stay fully deterministic.
        for attempt in 0u32..=100 {
            let extra = attempt.to_be_bytes();
            let ad: &[u8] = if attempt == 0 { &[] } else { &extra };
            let (sig, _) = scalar
                .try_sign_prehashed_rfc6979::<Sha256>(&z, ad)
                .map_err(|e| SigningError::Signature(e.to_string()))?;
            let sig: Signature = sig.normalize_s().unwrap_or(sig);
            if !is_canonical(&sig.to_bytes()) {
                continue;
            }
            let recovery = RecoveryId::trial_recovery_from_prehash(verifying, digest, &sig)
                .map_err(|e| SigningError::Signature(e.to_string()))?;
            return Ok(encode_signature(&sig, recovery));
        }
        Err(SigningError::Signature(
            "no canonical signature found".into(),
        ))
    }
}

/// Canonical form required by the chain: neither component may have its
/// high bit set nor start with a zero byte followed by a clear high bit.
fn is_canonical(sig: &[u8]) -> bool {
    sig[0] & 0x80 == 0
        && !(sig[0] == 0 && sig[1] & 0x80 == 0)
        && sig[32] & 0x80 == 0
        && !(sig[32] == 0 && sig[33] & 0x80 == 0)
}

/// Render a compact recoverable signature as `SIG_K1_<base58>` with the
/// ripemd160 suffix checksum over the bytes plus the curve tag.
fn encode_signature(sig: &Signature, recovery: RecoveryId) -> String {
    let mut compact = [0u8; 65];
    compact[0] = 27 + 4 + recovery.to_byte();
    compact[1..].copy_from_slice(&sig.to_bytes());

    let mut hasher = Ripemd160::new();
    hasher.update(compact);
    hasher.update(b"K1");
    let checksum = hasher.finalize();

    let mut out = Vec::with_capacity(69);
    out.extend_from_slice(&compact);
    out.extend_from_slice(&checksum[..4]);
    format!("SIG_K1_{}", bs58::encode(out).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::VerifyingKey;

    /// Build a WIF string for a raw 32-byte secret.
    fn wif_for(secret: [u8; 32]) -> String {
        let mut payload = Vec::with_capacity(37);
        payload.push(0x80);
        payload.extend_from_slice(&secret);
        let checksum = Sha256::digest(Sha256::digest(&payload));
        payload.extend_from_slice(&checksum[..4]);
        bs58::encode(payload).into_string()
    }

    fn test_secret() -> [u8; 32] {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        secret
    }

    #[test]
    fn parses_well_formed_wif() {
        let key = K1Key::from_wif(&wif_for(test_secret()));
        assert!(key.is_ok());
    }

    #[test]
    fn rejects_corrupted_wif() {
        let mut wif = wif_for(test_secret());
        // Flip a character to break the checksum.
        let tail = if wif.ends_with('2') { '3' } else { '2' };
        wif.pop();
        wif.push(tail);
        assert!(matches!(
            K1Key::from_wif(&wif),
            Err(SigningError::InvalidKey(_))
        ));
    }

    #[test]
    fn rejects_wrong_version_byte() {
        let mut payload = vec![0x42];
        payload.extend_from_slice(&test_secret());
        let checksum = Sha256::digest(Sha256::digest(&payload));
        payload.extend_from_slice(&checksum[..4]);
        let wif = bs58::encode(payload).into_string();
        assert!(matches!(
            K1Key::from_wif(&wif),
            Err(SigningError::InvalidKey(reason)) if reason == "unexpected version byte"
        ));
    }

    #[test]
    fn signature_is_canonical_and_recovers_signer() {
        let key = K1Key::from_wif(&wif_for(test_secret())).unwrap();
        let digest = [0x5au8; 32];
        let sig = key.sign_digest(&digest).unwrap();
        assert!(sig.starts_with("SIG_K1_"));

        let decoded = bs58::decode(&sig["SIG_K1_".len()..]).into_vec().unwrap();
        assert_eq!(decoded.len(), 69);
        let (compact, checksum) = decoded.split_at(65);

        let mut hasher = Ripemd160::new();
        hasher.update(compact);
        hasher.update(b"K1");
        assert_eq!(&hasher.finalize()[..4], checksum);

        assert!(is_canonical(&compact[1..]));

        let recovery = RecoveryId::from_byte(compact[0] - 27 - 4).unwrap();
        let signature = Signature::from_slice(&compact[1..]).unwrap();
        let recovered =
            VerifyingKey::recover_from_prehash(&digest, &signature, recovery).unwrap();
        assert_eq!(&recovered, key.key.verifying_key());
    }

    #[test]
    fn unconfigured_signer_always_fails() {
        let err = UnconfiguredSigner.sign_digest(&[0u8; 32]).unwrap_err();
        assert_eq!(err, SigningError::MissingKey);
    }
}
