// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Chain integration module.
//!
//! This module provides functionality for:
//! - Querying contract state tables through the node RPC
//! - Building game actions (character generation, life top-ups,
//!   eliminations, battle results)
//! - Transaction packing, K1 signing, and broadcast with a bounded
//!   validity window

pub mod actions;
pub mod client;
pub mod name;
pub mod serialize;
pub mod signing;
pub mod transactions;
pub mod types;

pub use client::{EosRpc, RpcError};
pub use signing::{K1Key, SignDigest, SigningError, UnconfiguredSigner};
pub use transactions::{ChainError, Transactor};
pub use types::*;
