// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! GhostQuest Gateway - EOS transaction gateway for the game backend.
//!
//! The service exposes HTTP endpoints that query chain state tables and
//! submit signed on-chain actions for gameplay economy events. A single K1
//! key loaded at startup signs every transaction; each request produces at
//! most one independent transaction with a bounded validity window.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `chain` - Node RPC client, action builders, signing, broadcast
//! - `config` - Environment configuration
//! - `error` - Uniform response envelope

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod state;
