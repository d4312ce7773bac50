// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Game economy endpoints.
//!
//! Every operation validates parameter presence, builds exactly one chain
//! action, and hands it to the transactor. Chain-side rules (account
//! existence, balances, authority) are enforced by the chain itself; a
//! rejection there surfaces as a generic broadcast failure.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    api::params::{param_to_string, require_params},
    chain::{actions, types::Action},
    error::{ApiError, Envelope},
    state::AppState,
};

async fn submit(state: &AppState, action: Action) -> Result<String, ApiError> {
    state
        .transactor
        .transact(vec![action])
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "transaction broadcast failed");
            ApiError::internal()
        })
}

/// Generate a character funded by the player's transfer.
#[utoipa::path(
    post,
    path = "/v1/ghostquest/character",
    tag = "GhostQuest",
    responses(
        (status = 200, description = "Transaction broadcast", body = Envelope),
        (status = 400, description = "Missing required field", body = Envelope),
        (status = 500, description = "Broadcast failure", body = Envelope)
    )
)]
pub async fn generate_character(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Envelope>, ApiError> {
    require_params(&body, &["username", "amount", "battleLimit"])
        .map_err(ApiError::bad_request)?;

    let username = param_to_string(&body["username"]);
    let amount = param_to_string(&body["amount"]);
    let battle_limit = param_to_string(&body["battleLimit"]);

    let action = actions::generate_character(&username, &amount, &battle_limit);
    let tx_id = submit(&state, action).await?;
    Ok(Json(Envelope::success(json!({ "transaction_id": tx_id }))))
}

/// Top up a ghost's life at the fixed price of one EOS.
#[utoipa::path(
    post,
    path = "/v1/ghostquest/life",
    tag = "GhostQuest",
    responses(
        (status = 200, description = "Transaction broadcast", body = Envelope),
        (status = 400, description = "Missing required field", body = Envelope),
        (status = 500, description = "Broadcast failure", body = Envelope)
    )
)]
pub async fn add_life(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Envelope>, ApiError> {
    require_params(&body, &["username", "ghost_id"]).map_err(ApiError::bad_request)?;

    let username = param_to_string(&body["username"]);
    let ghost_id = param_to_string(&body["ghost_id"]);

    let action = actions::add_life(&username, &ghost_id);
    let tx_id = submit(&state, action).await?;
    Ok(Json(Envelope::success(json!({ "transaction_id": tx_id }))))
}

/// Eliminate a ghost; a game-server-driven event under the service
/// identity.
#[utoipa::path(
    post,
    path = "/v1/ghostquest/eliminate",
    tag = "GhostQuest",
    responses(
        (status = 200, description = "Transaction broadcast", body = Envelope),
        (status = 400, description = "Missing required field", body = Envelope),
        (status = 500, description = "Broadcast failure", body = Envelope)
    )
)]
pub async fn eliminate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Envelope>, ApiError> {
    require_params(&body, &["username", "ghost_id"]).map_err(ApiError::bad_request)?;

    let action = actions::eliminate(
        &state.contract,
        body["username"].clone(),
        body["ghost_id"].clone(),
    );
    let tx_id = submit(&state, action).await?;
    Ok(Json(Envelope::success(json!({ "transaction": tx_id }))))
}

/// Record the outcome of a battle under the service identity.
#[utoipa::path(
    post,
    path = "/v1/ghostquest/battle",
    tag = "GhostQuest",
    responses(
        (status = 200, description = "Transaction broadcast", body = Envelope),
        (status = 400, description = "Missing required field", body = Envelope),
        (status = 500, description = "Broadcast failure", body = Envelope)
    )
)]
pub async fn battle_result(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Envelope>, ApiError> {
    require_params(&body, &["gameid", "winner", "loser"]).map_err(ApiError::bad_request)?;

    let action = actions::battle_result(
        &state.contract,
        body["gameid"].clone(),
        body["winner"].clone(),
        body["loser"].clone(),
    );
    let tx_id = submit(&state, action).await?;
    Ok(Json(Envelope::success(json!({ "transaction": tx_id }))))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::*;
    use crate::chain::client::EosRpc;
    use crate::chain::signing::UnconfiguredSigner;
    use crate::chain::transactions::Transactor;
    use crate::chain::types::ExpirationPolicy;

    /// State whose node is unreachable: validation failures never touch the
    /// network, and anything that proceeds to broadcast fails fast.
    fn offline_state() -> AppState {
        let rpc = Arc::new(EosRpc::new("http://127.0.0.1:9", Duration::from_millis(250)).unwrap());
        let transactor = Arc::new(Transactor::new(
            rpc.clone(),
            Arc::new(UnconfiguredSigner),
            ExpirationPolicy::default(),
        ));
        AppState {
            rpc,
            transactor,
            contract: "gqgamecontra".to_string(),
            key_loaded: false,
        }
    }

    #[tokio::test]
    async fn generate_character_rejects_missing_fields() {
        let err = generate_character(State(offline_state()), Json(json!({"username": "alice"})))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Parameters required: username, amount, battleLimit");
    }

    #[tokio::test]
    async fn add_life_rejects_missing_fields() {
        let err = add_life(State(offline_state()), Json(json!({"ghost_id": "g1"})))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Parameters required: username, ghost_id");
    }

    #[tokio::test]
    async fn eliminate_rejects_missing_fields() {
        let err = eliminate(State(offline_state()), Json(json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Parameters required: username, ghost_id");
    }

    #[tokio::test]
    async fn battle_result_rejects_missing_fields() {
        let err = battle_result(State(offline_state()), Json(json!({"gameid": 1, "winner": "a"})))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Parameters required: gameid, winner, loser");
    }

    #[tokio::test]
    async fn falsy_values_proceed_to_broadcast() {
        // amount 0 and battleLimit 0 are present, so the request reaches the
        // (unreachable) node and fails as a broadcast, not as validation.
        let body = json!({"username": "alice", "amount": 0, "battleLimit": 0});
        let err = generate_character(State(offline_state()), Json(body))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal Server Error");
    }

    #[tokio::test]
    async fn broadcast_failure_maps_to_generic_internal_error() {
        let body = json!({"username": "alice", "ghost_id": "g1"});
        let err = add_life(State(offline_state()), Json(body)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal Server Error");
    }
}
