//! Login and logout. These are the only routes reachable without a session.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::session::{session_id_from_headers, SessionStore};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login — accepts an HTML form post or a JSON body.
///
/// Unknown users and wrong passwords are reported as different 401s. On
/// success the client gets a session cookie and a redirect.
pub async fn login(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Response, Response> {
    let LoginRequest { username, password } = read_credentials(req).await?;

    let user = state.users.find(&username).ok_or_else(|| {
        tracing::warn!(%username, "login: user not found");
        AppError::UserNotFound.into_response()
    })?;

    let hash = user.password_hash;
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.into()).into_response())?;

    match verified {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(%username, "login: invalid password");
            return Err(AppError::InvalidCredentials.into_response());
        }
        Err(e) => {
            tracing::warn!(%username, "login: stored hash unusable: {}", e);
            return Err(AppError::InvalidCredentials.into_response());
        }
    }

    let session_id = state.sessions.create(&username);
    tracing::info!(%username, "login: session established");

    Ok((
        [(header::SET_COOKIE, state.sessions.cookie_header(&session_id))],
        Redirect::to(&state.config.login_redirect),
    )
        .into_response())
}

/// POST /logout — ends the current session, if any, and clears the cookie.
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(id) = session_id_from_headers(&headers) {
        state.sessions.destroy(&id);
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, SessionStore::clear_cookie_header())],
    )
}

async fn read_credentials(req: Request) -> Result<LoginRequest, Response> {
    let is_json = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);

    if is_json {
        let Json(body) = Json::<LoginRequest>::from_request(req, &())
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(body)
    } else {
        let Form(body) = Form::<LoginRequest>::from_request(req, &())
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(body)
    }
}
