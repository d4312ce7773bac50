// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Table-row query pass-through endpoint.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    api::params::require_params,
    chain::types::TableQuery,
    error::{ApiError, Envelope},
    state::AppState,
};

const REQUIRED: &[&str] = &[
    "json",
    "code",
    "scope",
    "table",
    "limit",
    "reverse",
    "show_payer",
];

/// Read rows from a contract's state table.
///
/// The seven query fields are forwarded to the node verbatim and the node's
/// payload is relayed untouched under `data.table`.
#[utoipa::path(
    post,
    path = "/v1/chain/table-rows",
    tag = "Chain",
    request_body = TableQuery,
    responses(
        (status = 200, description = "Rows returned by the node", body = Envelope),
        (status = 400, description = "Missing required field", body = Envelope),
        (status = 500, description = "Node-side failure", body = Envelope)
    )
)]
pub async fn get_table_rows(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Envelope>, ApiError> {
    require_params(&body, REQUIRED).map_err(ApiError::bad_request)?;

    let query = TableQuery::from_body(&body);
    match state.rpc.get_table_rows(&query).await {
        Ok(rows) => Ok(Json(Envelope::success(json!({ "table": rows })))),
        Err(err) => {
            tracing::error!(error = %err, "table row query failed");
            Err(ApiError::internal())
        }
    }
}
