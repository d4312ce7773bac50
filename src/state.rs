// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

use std::sync::Arc;

use crate::chain::{client::EosRpc, transactions::Transactor};

/// Process-wide handles shared by every request handler.
///
/// Everything here is read-only after startup, so concurrent handlers can
/// clone freely without locking.
#[derive(Clone)]
pub struct AppState {
    pub rpc: Arc<EosRpc>,
    pub transactor: Arc<Transactor>,
    /// Account name of the deployed game contract.
    pub contract: String,
    /// Whether a signing key was configured at startup; broadcasts fail
    /// until one is.
    pub key_loaded: bool,
}
