use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::timestamp::Timestamp;
use crate::models::token::Token;
use crate::models::workspace::Workspace;
use crate::AppState;

// ── Request / Response DTOs ──────────────────────────────────

/// Absent fields are accepted and stored as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTokenRequest {
    pub name: String,
}

/// Token as listed under a workspace. Includes the secret.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenView {
    pub id: String,
    pub name: String,
    pub token: String,
    pub created_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

impl From<Token> for TokenView {
    fn from(t: Token) -> Self {
        Self {
            id: t.id,
            name: t.name,
            token: t.secret,
            created_at: t.created_at,
            revoked_at: t.revoked_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkspaceDetail {
    pub workspace: Workspace,
    pub tokens: Vec<TokenView>,
}

/// Response to token creation. The secret is deliberately left out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenResponse {
    pub id: String,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeResponse {
    pub id: String,
    pub revoked: bool,
    pub revoked_at: Option<Timestamp>,
}

// ── Workspace Handlers ───────────────────────────────────────

/// GET /api/workspaces
pub async fn list_workspaces(State(state): State<Arc<AppState>>) -> Json<Vec<Workspace>> {
    Json(state.workspaces.list())
}

/// GET /api/workspaces/:id — the workspace and its active tokens
pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkspaceDetail>, AppError> {
    let workspace = state.workspaces.get(&id).ok_or_else(|| {
        tracing::debug!(workspace_id = %id, "get_workspace: not found");
        AppError::WorkspaceNotFound
    })?;

    let tokens = state
        .tokens
        .list_active(&id)
        .into_iter()
        .map(TokenView::from)
        .collect();

    Ok(Json(WorkspaceDetail { workspace, tokens }))
}

/// POST /api/workspaces
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WorkspaceRequest>,
) -> Result<(StatusCode, Json<Workspace>), AppError> {
    let workspace = state
        .workspaces
        .create(&payload.title, &payload.description)?;

    Ok((StatusCode::CREATED, Json(workspace)))
}

/// PUT /api/workspaces/:id
pub async fn update_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<WorkspaceRequest>,
) -> Result<Json<Workspace>, AppError> {
    state
        .workspaces
        .update(&id, &payload.title, &payload.description)?
        .map(Json)
        .ok_or(AppError::WorkspaceNotFound)
}

// ── Token Handlers ───────────────────────────────────────────

/// POST /api/workspaces/:id/tokens
///
/// The workspace id is not checked; tokens may be issued for ids that do
/// not exist.
pub async fn create_token(
    State(state): State<Arc<AppState>>,
    Path(workspace_id): Path<String>,
    Json(payload): Json<CreateTokenRequest>,
) -> Result<(StatusCode, Json<CreateTokenResponse>), AppError> {
    let token = state.tokens.create(&workspace_id, &payload.name)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTokenResponse {
            id: token.id,
            name: token.name,
            created_at: token.created_at,
        }),
    ))
}

/// PATCH /api/tokens/:id/revoke
pub async fn revoke_token(
    State(state): State<Arc<AppState>>,
    Path(token_id): Path<String>,
) -> Result<Json<RevokeResponse>, AppError> {
    let token = state
        .tokens
        .revoke(&token_id)?
        .ok_or(AppError::TokenNotFound)?;

    Ok(Json(RevokeResponse {
        id: token.id,
        revoked: true,
        revoked_at: token.revoked_at,
    }))
}
