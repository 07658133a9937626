//! Session-based authentication extractors for Axum handlers.
//!
//! The session token is accepted either as a `Bearer` Authorization header
//! or as the `token` cookie set at login (the dashboard uses the cookie).
//! Both extractors resolve the account row, so handlers receive a live
//! identity rather than raw token claims.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use ecoloop_core::error::CoreError;
use ecoloop_core::types::DbId;
use ecoloop_db::repositories::{RecyclerRepo, TransporterRepo};

use crate::auth::jwt::{validate_token, Claims};
use crate::auth::{ROLE_RECYCLER, ROLE_TRANSPORTER, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated recycler resolved from the session token.
///
/// Use this as an extractor parameter in any handler that requires a
/// recycler session:
///
/// ```ignore
/// async fn my_handler(recycler: AuthRecycler) -> AppResult<Json<()>> {
///     tracing::info!(recycler_id = recycler.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthRecycler {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// Authenticated transporter resolved from the session token.
#[derive(Debug, Clone)]
pub struct AuthTransporter {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthRecycler {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_for_role(parts, state, ROLE_RECYCLER)?;

        let recycler = RecyclerRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
            })?;

        Ok(AuthRecycler {
            id: recycler.id,
            name: recycler.name,
            email: recycler.email,
        })
    }
}

impl FromRequestParts<AppState> for AuthTransporter {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = claims_for_role(parts, state, ROLE_TRANSPORTER)?;

        let transporter = TransporterRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
            })?;

        Ok(AuthTransporter {
            id: transporter.id,
            name: transporter.name,
            email: transporter.email,
        })
    }
}

/// Extract and validate the session token, requiring the given role.
fn claims_for_role(parts: &Parts, state: &AppState, role: &str) -> Result<Claims, AppError> {
    let token = token_from_parts(parts).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Missing session token. Provide a Bearer token or log in.".into(),
        ))
    })?;

    let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    if claims.role != role {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "This endpoint requires a {role} session"
        ))));
    }

    Ok(claims)
}

/// Pull the session token from the Authorization header or the session cookie.
fn token_from_parts(parts: &Parts) -> Option<String> {
    if let Some(header) = parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        if let Some(token) = header.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    let cookies = parts.headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix(SESSION_COOKIE)?
            .strip_prefix('=')
            .map(|v| v.to_string())
    })
}
