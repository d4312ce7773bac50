// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Transaction assembly, signing, and broadcast.
//!
//! The [`Transactor`] is the single place where signing happens: it anchors
//! the transaction to a recent reference block, packs the envelope, signs
//! the digest through the configured [`SignDigest`] capability, and submits
//! the result. Each call produces at most one independent transaction; no
//! retries, batching, or queuing.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::client::{EosRpc, RpcError};
use super::name::{name_to_u64, InvalidName};
use super::serialize::{pack_transaction, signing_digest, RawAction, TxHeader};
use super::signing::{SignDigest, SigningError};
use super::types::{Action, ExpirationPolicy};

/// Failure taxonomy for a broadcast attempt. Callers surface a generic
/// failure; the variant tells operators whether a retry could help.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The request could not form a valid transaction; never retryable.
    #[error("{0}")]
    Validation(String),
    /// The node accepted the request and refused it; permanent for this
    /// transaction.
    #[error("chain rejected the transaction: {0}")]
    ChainRejected(String),
    /// The node could not be reached or answered garbage; possibly
    /// transient.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The node did not answer within the client deadline; the transaction
    /// may or may not have been received.
    #[error("chain node timed out")]
    Timeout,
    #[error(transparent)]
    Signing(#[from] SigningError),
}

impl From<RpcError> for ChainError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Timeout => ChainError::Timeout,
            RpcError::Transport(msg) => ChainError::Transport(msg),
            RpcError::Rejected(msg) => ChainError::ChainRejected(msg),
            RpcError::InvalidResponse(msg) => ChainError::Transport(msg),
        }
    }
}

impl From<InvalidName> for ChainError {
    fn from(err: InvalidName) -> Self {
        ChainError::Validation(err.to_string())
    }
}

/// Signs and broadcasts transactions with a bounded validity window.
pub struct Transactor {
    rpc: Arc<EosRpc>,
    signer: Arc<dyn SignDigest>,
    policy: ExpirationPolicy,
}

impl Transactor {
    pub fn new(rpc: Arc<EosRpc>, signer: Arc<dyn SignDigest>, policy: ExpirationPolicy) -> Self {
        Self {
            rpc,
            signer,
            policy,
        }
    }

    pub fn policy(&self) -> ExpirationPolicy {
        self.policy
    }

    /// Assemble, sign, and broadcast a transaction; returns its id.
    pub async fn transact(&self, actions: Vec<Action>) -> Result<String, ChainError> {
        if actions.is_empty() {
            return Err(ChainError::Validation(
                "transaction must contain at least one action".into(),
            ));
        }

        let info = self.rpc.get_info().await?;
        let chain_id = hex::decode(&info.chain_id)
            .map_err(|e| ChainError::Transport(format!("bad chain id: {e}")))?;
        if chain_id.len() != 32 {
            return Err(ChainError::Transport("bad chain id length".into()));
        }

        let ref_num = info.head_block_num.saturating_sub(self.policy.blocks_behind);
        let block = self.rpc.get_block(ref_num).await?;
        let header = TxHeader {
            expiration: expiration_after(&block.timestamp, self.policy.expire_seconds)?,
            ref_block_num: (block.block_num & 0xffff) as u16,
            ref_block_prefix: block.ref_block_prefix,
        };

        let mut raw_actions = Vec::with_capacity(actions.len());
        for action in &actions {
            let data = self
                .rpc
                .abi_json_to_bin(&action.account, &action.name, &action.data)
                .await?;
            let authorization = action
                .authorization
                .iter()
                .map(|auth| Ok((name_to_u64(&auth.actor)?, name_to_u64(&auth.permission)?)))
                .collect::<Result<Vec<_>, InvalidName>>()?;
            raw_actions.push(RawAction {
                account: name_to_u64(&action.account)?,
                name: name_to_u64(&action.name)?,
                authorization,
                data,
            });
        }

        let packed = pack_transaction(&header, &raw_actions);
        let digest = signing_digest(&chain_id, &packed);
        let signature = self.signer.sign_digest(&digest)?;

        let tx_id = self.rpc.push_transaction(&[signature], &packed).await?;
        tracing::info!(%tx_id, actions = actions.len(), "transaction broadcast");
        Ok(tx_id)
    }
}

/// Expiration anchored to the reference block's time, not the local clock,
/// so a skewed gateway clock cannot silently widen the window.
fn expiration_after(block_timestamp: &str, expire_seconds: u32) -> Result<u32, ChainError> {
    let anchor = NaiveDateTime::parse_from_str(block_timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| ChainError::Transport(format!("unparseable block timestamp: {e}")))?;
    let expires = anchor.and_utc().timestamp() + i64::from(expire_seconds);
    u32::try_from(expires).map_err(|_| ChainError::Transport("expiration out of range".into()))
}
