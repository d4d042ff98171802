//! Handlers for the magic-link authentication flow.
//!
//! Sign-in is passwordless: the client posts an email address, the server
//! stores a hashed short-lived login token and emails a verification link.
//! Verifying the link consumes the token exactly once and mints a
//! long-lived session whose opaque token authenticates later requests.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tasklane_core::error::CoreError;
use tasklane_db::models::user::User;
use tasklane_db::repositories::{LoginTokenRepo, SessionRepo, UserRepo};

use crate::auth::{hash_token, new_token};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/magic-link`.
#[derive(Debug, Deserialize)]
pub struct MagicLinkRequest {
    pub email: String,
}

/// Request body for `POST /auth/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// Response for a successful verification: the session token plus the
/// signed-in user.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: tasklane_core::types::Timestamp,
    pub user: User,
}

/// POST /api/v1/auth/magic-link
///
/// Always answers 202 on success so the endpoint does not reveal whether
/// an email address is already registered.
pub async fn request_magic_link(
    State(state): State<AppState>,
    Json(input): Json<MagicLinkRequest>,
) -> AppResult<StatusCode> {
    let email = input.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "a valid email address is required".into(),
        )));
    }

    let user = UserRepo::create_or_get(&state.pool, &email).await?;

    let (token, token_hash) = new_token();
    let expires_at = Utc::now() + Duration::minutes(state.config.magic_link_expiry_mins);
    LoginTokenRepo::create(&state.pool, user.id, &token_hash, expires_at).await?;

    let link = format!("{}/auth/verify?token={token}", state.config.app_base_url);

    match &state.mailer {
        Some(mailer) => {
            // Delivery happens off the request path; a transport failure
            // is logged, not surfaced, since the caller already got 202.
            let mailer = std::sync::Arc::clone(mailer);
            tokio::spawn(async move {
                if let Err(e) = mailer.send_magic_link(&email, &link).await {
                    tracing::error!(error = %e, "Failed to send sign-in email");
                }
            });
        }
        None => {
            tracing::info!(email = %email, link = %link,
                "SMTP not configured, logging sign-in link");
        }
    }

    Ok(StatusCode::ACCEPTED)
}

/// POST /api/v1/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<DataResponse<SessionResponse>>> {
    let login = LoginTokenRepo::consume(&state.pool, &hash_token(&input.token))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired sign-in link".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, login.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: login.user_id,
        }))?;

    let (token, token_hash) = new_token();
    let expires_at = Utc::now() + Duration::days(state.config.session_expiry_days);
    let session = SessionRepo::create(&state.pool, user.id, &token_hash, expires_at).await?;

    tracing::info!(user_id = user.id, "User signed in via magic link");

    Ok(Json(DataResponse {
        data: SessionResponse {
            token,
            expires_at: session.expires_at,
            user,
        },
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/auth/logout
///
/// Revokes exactly the session whose token authenticated this request.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_by_hash(&state.pool, &user.token_hash).await?;
    Ok(StatusCode::NO_CONTENT)
}
