// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and never
//! rotated at runtime.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `EOS_PRIVATE_KEY` | WIF signing key; broadcasts fail if unset | unset |
//! | `EOS_GQ_CONTRACT_NAME` | Account of the deployed game contract | empty |
//! | `EOS_PROTOCOL` | Chain node protocol | `http` |
//! | `EOS_HOST` | Chain node host | `127.0.0.1` |
//! | `EOS_PORT` | Chain node port | `8888` |
//! | `EOS_RPC_TIMEOUT_SECS` | Client-side deadline per node call | `30` |
//! | `TAPOS_BLOCKS_BEHIND` | Reference block distance from head | `3` |
//! | `TX_EXPIRE_SECONDS` | Transaction validity window | `30` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::fmt;
use std::time::Duration;

use crate::chain::types::{ExpirationPolicy, InvalidPolicy};

pub const EOS_PRIVATE_KEY_ENV: &str = "EOS_PRIVATE_KEY";
pub const EOS_CONTRACT_ENV: &str = "EOS_GQ_CONTRACT_NAME";
pub const EOS_PROTOCOL_ENV: &str = "EOS_PROTOCOL";
pub const EOS_HOST_ENV: &str = "EOS_HOST";
pub const EOS_PORT_ENV: &str = "EOS_PORT";
pub const RPC_TIMEOUT_ENV: &str = "EOS_RPC_TIMEOUT_SECS";
pub const BLOCKS_BEHIND_ENV: &str = "TAPOS_BLOCKS_BEHIND";
pub const EXPIRE_SECONDS_ENV: &str = "TX_EXPIRE_SECONDS";
pub const BIND_HOST_ENV: &str = "HOST";
pub const BIND_PORT_ENV: &str = "PORT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error(transparent)]
    Policy(#[from] InvalidPolicy),
}

#[derive(Clone)]
pub struct Config {
    /// WIF signing key. `None` leaves the gateway able to serve reads while
    /// every broadcast fails.
    pub private_key: Option<String>,
    pub contract: String,
    pub rpc_url: String,
    pub rpc_timeout: Duration,
    pub expiration: ExpirationPolicy,
    pub bind_host: String,
    pub bind_port: u16,
}

// Redacts the signing key.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("contract", &self.contract)
            .field("rpc_url", &self.rpc_url)
            .field("rpc_timeout", &self.rpc_timeout)
            .field("expiration", &self.expiration)
            .field("bind_host", &self.bind_host)
            .field("bind_port", &self.bind_port)
            .finish()
    }
}

fn parsed_var<T: std::str::FromStr>(
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let protocol = env::var(EOS_PROTOCOL_ENV).unwrap_or_else(|_| "http".to_string());
        let host = env::var(EOS_HOST_ENV).unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var(EOS_PORT_ENV).unwrap_or_else(|_| "8888".to_string());

        let expiration = ExpirationPolicy::new(
            parsed_var(BLOCKS_BEHIND_ENV, 3u32)?,
            parsed_var(EXPIRE_SECONDS_ENV, 30u32)?,
        )?;

        Ok(Self {
            private_key: env::var(EOS_PRIVATE_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty()),
            contract: env::var(EOS_CONTRACT_ENV).unwrap_or_default(),
            rpc_url: format!("{protocol}://{host}:{port}"),
            rpc_timeout: Duration::from_secs(parsed_var(RPC_TIMEOUT_ENV, 30u64)?),
            expiration,
            bind_host: env::var(BIND_HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string()),
            bind_port: parsed_var(BIND_PORT_ENV, 8080u16)?,
        })
    }
}
