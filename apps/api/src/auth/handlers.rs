use axum::{extract::State, Json};

use crate::auth::AuthState;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<AuthState> {
    Json(state.auth.current())
}

/// POST /api/v1/session/login
pub async fn handle_login(State(state): State<AppState>) -> Result<Json<AuthState>, AppError> {
    state.auth.login().await?;
    Ok(Json(state.auth.current()))
}

/// POST /api/v1/session/logout
pub async fn handle_logout(State(state): State<AppState>) -> Result<Json<AuthState>, AppError> {
    state.auth.logout().await?;
    Ok(Json(state.auth.current()))
}
