// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    chain::types::{Action, PermissionLevel, TableQuery},
    error::Envelope,
    state::AppState,
};

pub mod game;
pub mod health;
pub mod params;
pub mod table;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/chain/table-rows", post(table::get_table_rows))
        .route("/ghostquest/character", post(game::generate_character))
        .route("/ghostquest/life", post(game::add_life))
        .route("/ghostquest/eliminate", post(game::eliminate))
        .route("/ghostquest/battle", post(game::battle_result));

    Router::new()
        .nest("/v1", v1_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        table::get_table_rows,
        game::generate_character,
        game::add_life,
        game::eliminate,
        game::battle_result,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            Envelope,
            TableQuery,
            Action,
            PermissionLevel,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Chain", description = "State table queries"),
        (name = "GhostQuest", description = "Game economy transactions"),
        (name = "Health", description = "Probes")
    )
)]
struct ApiDoc;
