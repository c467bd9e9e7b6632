// HTTP trigger API: the game server calls these routes to invite the AI
// into a game.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::metrics;
use crate::session::registry::SessionRegistry;
use crate::session::runner::{spawn_session, SessionRequest};
use crate::session::GameKind;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionRegistry,
}

/// Query string sent with a game invitation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    pub requested_game_type: String,
    pub game_id: String,
}

// ── Error helper ──────────────────────────────────────────────────────

fn json_error(status: StatusCode, msg: &str) -> impl IntoResponse {
    (status, Json(json!({ "error": msg })))
}

// ── Router ────────────────────────────────────────────────────────────

pub fn router(config: Arc<Config>, sessions: SessionRegistry) -> Router {
    let state = AppState { config, sessions };

    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health_check))
        .route("/tictactoe", get(connect_tictactoe))
        .route("/tictactoeextended", get(connect_tictactoe_extended))
        .route("/soccer", get(connect_soccer))
        .route("/sessions", get(list_sessions))
        .route("/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn greeting() -> &'static str {
    "Greetings from Aimachine AI!"
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "aimachine",
        "active_sessions": state.sessions.count(),
    }))
}

async fn connect_tictactoe(
    State(state): State<AppState>,
    params: Result<Query<ConnectParams>, QueryRejection>,
) -> impl IntoResponse {
    connect(state, GameKind::TicTacToe, params)
}

async fn connect_tictactoe_extended(
    State(state): State<AppState>,
    params: Result<Query<ConnectParams>, QueryRejection>,
) -> impl IntoResponse {
    connect(state, GameKind::TicTacToeExtended, params)
}

async fn connect_soccer(
    State(state): State<AppState>,
    params: Result<Query<ConnectParams>, QueryRejection>,
) -> impl IntoResponse {
    connect(state, GameKind::Soccer, params)
}

fn connect(
    state: AppState,
    kind: GameKind,
    params: Result<Query<ConnectParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(e) => {
            tracing::warn!("Rejected {} invitation: {e}", kind.label());
            return json_error(
                StatusCode::BAD_REQUEST,
                "requestedGameType and gameId are required",
            )
            .into_response();
        }
    };
    if params.game_id.trim().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "gameId must not be empty").into_response();
    }

    tracing::info!(
        "Joining {} game {} as {}",
        kind.label(),
        params.game_id,
        params.requested_game_type
    );
    let request = SessionRequest {
        kind,
        game_type: params.requested_game_type,
        game_id: params.game_id,
    };
    spawn_session(state.config.clone(), state.sessions.clone(), request);

    (StatusCode::CREATED, "AI client created").into_response()
}

async fn list_sessions(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!(state.sessions.list()))
}

async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}
