// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

use std::net::SocketAddr;
use std::sync::Arc;

use ghostquest_gateway::api::router;
use ghostquest_gateway::chain::client::EosRpc;
use ghostquest_gateway::chain::signing::{K1Key, SignDigest, UnconfiguredSigner};
use ghostquest_gateway::chain::transactions::Transactor;
use ghostquest_gateway::config::Config;
use ghostquest_gateway::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env().expect("invalid configuration");

    let rpc = Arc::new(
        EosRpc::new(&config.rpc_url, config.rpc_timeout).expect("failed to build RPC client"),
    );

    let key_loaded = config.private_key.is_some();
    let signer: Arc<dyn SignDigest> = match &config.private_key {
        Some(wif) => Arc::new(K1Key::from_wif(wif).expect("invalid EOS_PRIVATE_KEY")),
        None => {
            tracing::warn!("EOS_PRIVATE_KEY not set; broadcasts will fail until configured");
            Arc::new(UnconfiguredSigner)
        }
    };

    let transactor = Arc::new(Transactor::new(rpc.clone(), signer, config.expiration));

    let state = AppState {
        rpc,
        transactor,
        contract: config.contract.clone(),
        key_loaded,
    };
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_host, config.bind_port)
        .parse()
        .expect("failed to parse bind address");

    tracing::info!(%addr, node = %config.rpc_url, "ghostquest gateway listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
