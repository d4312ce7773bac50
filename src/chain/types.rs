// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Chain types shared across the gateway.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// An (actor, permission) pair establishing who authorizes an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionLevel {
    pub actor: String,
    pub permission: String,
}

impl PermissionLevel {
    /// The `active` permission of the given actor.
    pub fn active(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            permission: "active".to_string(),
        }
    }
}

/// A single state-mutating instruction submitted to the ledger.
///
/// The `data` payload is kept as JSON; its schema is enforced by the chain
/// when the target contract executes, not locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Action {
    /// Contract account the action targets.
    pub account: String,
    /// Action name within the contract.
    pub name: String,
    pub authorization: Vec<PermissionLevel>,
    #[schema(value_type = Object)]
    pub data: Value,
}

/// Read-only state lookup against a contract's table.
///
/// All seven fields are mandatory with no defaults; they are forwarded to
/// the node verbatim, so the field types document intent rather than being
/// coerced locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableQuery {
    /// Whether rows are returned as JSON rather than packed binary.
    #[schema(value_type = bool)]
    pub json: Value,
    /// Contract whose table is read.
    #[schema(value_type = String)]
    pub code: Value,
    /// Account that owns the data.
    #[schema(value_type = String)]
    pub scope: Value,
    /// Table name.
    #[schema(value_type = String)]
    pub table: Value,
    /// Maximum number of rows returned.
    #[schema(value_type = i64)]
    pub limit: Value,
    /// Return rows in reverse order.
    #[schema(value_type = bool)]
    pub reverse: Value,
    /// Include the RAM payer of each row.
    #[schema(value_type = bool)]
    pub show_payer: Value,
}

impl TableQuery {
    /// Extract the seven fields from a request body whose presence has
    /// already been validated. Values are carried over untouched.
    pub fn from_body(body: &Value) -> Self {
        let get = |key: &str| body.get(key).cloned().unwrap_or(Value::Null);
        Self {
            json: get("json"),
            code: get("code"),
            scope: get("scope"),
            table: get("table"),
            limit: get("limit"),
            reverse: get("reverse"),
            show_payer: get("show_payer"),
        }
    }
}

/// Structured directive carried in a token-transfer memo.
///
/// The receiving contract parses these out of the memo text; rendering them
/// from a typed value keeps the tag format in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferMemo {
    /// Battle limit for a newly generated character.
    BattleLimit(String),
    /// Life top-up for an existing ghost.
    AddLife(String),
}

impl fmt::Display for TransferMemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMemo::BattleLimit(limit) => write!(f, "BTTL_LMT={limit}"),
            TransferMemo::AddLife(ghost_id) => write!(f, "ADD_LIFE={ghost_id}"),
        }
    }
}

/// Bounds applied to a configured expiration policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid expiration policy: {0}")]
pub struct InvalidPolicy(String);

/// Validity window applied to every broadcast transaction.
///
/// `blocks_behind` anchors the reference block to a recent,
/// probabilistically-final block; `expire_seconds` bounds how long the
/// transaction stays eligible for inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    pub blocks_behind: u32,
    pub expire_seconds: u32,
}

impl ExpirationPolicy {
    /// Longest validity window the gateway will accept.
    pub const MAX_EXPIRE_SECONDS: u32 = 3600;

    pub fn new(blocks_behind: u32, expire_seconds: u32) -> Result<Self, InvalidPolicy> {
        if blocks_behind == 0 {
            return Err(InvalidPolicy("blocks_behind must be at least 1".into()));
        }
        if expire_seconds == 0 || expire_seconds > Self::MAX_EXPIRE_SECONDS {
            return Err(InvalidPolicy(format!(
                "expire_seconds must be within 1..={}",
                Self::MAX_EXPIRE_SECONDS
            )));
        }
        Ok(Self {
            blocks_behind,
            expire_seconds,
        })
    }
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self {
            blocks_behind: 3,
            expire_seconds: 30,
        }
    }
}
