//! Handlers for Google sign-in, logout, and the current user.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use glucolog_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::google::GoogleClient;
use crate::auth::jwt::{generate_access_token, generate_state_token, validate_state_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LoginUrlResponse {
    pub authorization_url: String,
}

/// Query parameters Google appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user declines consent.
    pub error: Option<String>,
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/auth/google/login
///
/// Returns the Google consent URL with a fresh signed `state`.
pub async fn google_login(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<LoginUrlResponse>>> {
    let google = google_client(&state)?;

    let csrf_state = generate_state_token(&state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("State token generation error: {e}")))?;
    let authorization_url = google.config().authorization_url(&csrf_state)?;

    Ok(Json(DataResponse {
        data: LoginUrlResponse { authorization_url },
    }))
}

/// GET /api/v1/auth/google/callback?code=&state=
///
/// Completes the Google flow and issues a session token for the user's email.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<Json<AuthResponse>> {
    let google = google_client(&state)?;

    if let Some(error) = params.error {
        return Err(AppError::Core(CoreError::Unauthorized(format!(
            "Google sign-in was not completed: {error}"
        ))));
    }

    let csrf_state = params
        .state
        .ok_or_else(|| AppError::BadRequest("Missing state parameter".into()))?;
    validate_state_token(&csrf_state, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired sign-in state".into(),
        ))
    })?;

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing code parameter".into()))?;

    let email = google.authenticate(&code).await?;

    let access_token = generate_access_token(&email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(email = %email, "Session issued");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo { email },
    }))
}

/// POST /api/v1/auth/logout
///
/// Session tokens are stateless; the client discards its token. Returns 204.
pub async fn logout(auth_user: AuthUser) -> StatusCode {
    tracing::info!(email = %auth_user.email, "User signed out");
    StatusCode::NO_CONTENT
}

/// GET /api/v1/me
pub async fn me(auth_user: AuthUser) -> Json<DataResponse<UserInfo>> {
    Json(DataResponse {
        data: UserInfo {
            email: auth_user.email,
        },
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn google_client(state: &AppState) -> AppResult<&GoogleClient> {
    state.google.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Configuration(
            "Google sign-in is not configured. Set GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REDIRECT_URI"
                .into(),
        ))
    })
}
