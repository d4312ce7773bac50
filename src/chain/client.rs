// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! JSON-RPC client for the chain node.
//!
//! One client is built at startup and shared by every request handler; it is
//! read-only after construction so no locking is needed.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use super::types::TableQuery;

/// Outcome taxonomy for node calls, so callers can tell a node-side
/// rejection from a transport problem or a stalled connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("request to chain node timed out")]
    Timeout,
    #[error("transport failure talking to chain node: {0}")]
    Transport(String),
    #[error("chain node rejected the request: {0}")]
    Rejected(String),
    #[error("unexpected response from chain node: {0}")]
    InvalidResponse(String),
}

/// Subset of `get_info` the gateway needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    /// Hex-encoded 32-byte chain id, mixed into every signing digest.
    pub chain_id: String,
    pub head_block_num: u32,
}

/// Subset of `get_block` used to anchor a transaction (TaPoS).
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRef {
    pub block_num: u32,
    pub ref_block_prefix: u32,
    /// Block time, UTC without zone suffix (e.g. `2026-08-23T12:00:00.500`).
    pub timestamp: String,
}

/// HTTP client for the node's `/v1/chain` API.
pub struct EosRpc {
    http: Client,
    base_url: String,
}

impl EosRpc {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RpcError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(&self, path: &str, body: &Value) -> Result<Value, RpcError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify_reqwest)?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(classify_reqwest)
        } else {
            let text = response.text().await.unwrap_or_default();
            let payload: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
            Err(RpcError::Rejected(chain_error_summary(status, &payload)))
        }
    }

    /// Current chain state needed to assemble a transaction.
    pub async fn get_info(&self) -> Result<ChainInfo, RpcError> {
        let payload = self.call("/v1/chain/get_info", &json!({})).await?;
        serde_json::from_value(payload).map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }

    /// Reference data for the given block number.
    pub async fn get_block(&self, block_num: u32) -> Result<BlockRef, RpcError> {
        let payload = self
            .call("/v1/chain/get_block", &json!({ "block_num_or_id": block_num }))
            .await?;
        serde_json::from_value(payload).map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }

    /// Forward a table lookup verbatim and relay the node's payload
    /// untouched.
    pub async fn get_table_rows(&self, query: &TableQuery) -> Result<Value, RpcError> {
        let body = serde_json::to_value(query)
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;
        self.call("/v1/chain/get_table_rows", &body).await
    }

    /// Serialize an action payload against the contract's ABI, node-side.
    pub async fn abi_json_to_bin(
        &self,
        code: &str,
        action: &str,
        args: &Value,
    ) -> Result<Vec<u8>, RpcError> {
        let payload = self
            .call(
                "/v1/chain/abi_json_to_bin",
                &json!({ "code": code, "action": action, "args": args }),
            )
            .await?;
        let binargs = payload
            .get("binargs")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::InvalidResponse("missing binargs".into()))?;
        hex::decode(binargs).map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }

    /// Broadcast a signed packed transaction; returns the transaction id.
    pub async fn push_transaction(
        &self,
        signatures: &[String],
        packed_trx: &[u8],
    ) -> Result<String, RpcError> {
        let payload = self
            .call(
                "/v1/chain/push_transaction",
                &json!({
                    "signatures": signatures,
                    "compression": "none",
                    "packed_context_free_data": "",
                    "packed_trx": hex::encode(packed_trx),
                }),
            )
            .await?;
        payload
            .get("transaction_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RpcError::InvalidResponse("missing transaction_id".into()))
    }
}

fn classify_reqwest(err: reqwest::Error) -> RpcError {
    if err.is_timeout() {
        RpcError::Timeout
    } else {
        RpcError::Transport(err.to_string())
    }
}

/// Pull the most useful line out of a node error body without relaying the
/// whole payload to callers.
fn chain_error_summary(status: StatusCode, payload: &Value) -> String {
    payload
        .pointer("/error/what")
        .and_then(Value::as_str)
        .or_else(|| payload.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let rpc = EosRpc::new("http://127.0.0.1:8888/", Duration::from_secs(1)).unwrap();
        assert_eq!(rpc.base_url(), "http://127.0.0.1:8888");
    }

    #[test]
    fn summarizes_structured_chain_errors() {
        let payload = json!({
            "code": 500,
            "message": "Internal Service Error",
            "error": {
                "code": 3050003,
                "name": "eosio_assert_message_exception",
                "what": "eosio_assert_message assertion failure",
                "details": []
            }
        });
        let summary = chain_error_summary(StatusCode::INTERNAL_SERVER_ERROR, &payload);
        assert_eq!(summary, "eosio_assert_message assertion failure");
    }

    #[test]
    fn falls_back_to_status_for_opaque_errors() {
        let summary = chain_error_summary(StatusCode::BAD_GATEWAY, &Value::Null);
        assert_eq!(summary, "HTTP 502 Bad Gateway");
    }

    #[tokio::test]
    async fn unreachable_node_reports_transport_error() {
        // Port 9 is the discard port; nothing listens there.
        let rpc = EosRpc::new("http://127.0.0.1:9", Duration::from_millis(250)).unwrap();
        let err = rpc.get_info().await.unwrap_err();
        assert!(matches!(err, RpcError::Transport(_) | RpcError::Timeout));
    }
}
