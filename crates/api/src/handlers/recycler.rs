//! Handlers for the `/recycler` resource: account lifecycle, profile,
//! wallet, claim history, and the QR scan endpoint.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ecoloop_core::error::CoreError;
use ecoloop_core::types::DbId;
use ecoloop_db::models::collection::Collection;
use ecoloop_db::models::recycler::{CreateRecycler, Recycler, UpdateRecyclerProfile};
use ecoloop_db::repositories::{CollectionRepo, RecyclerRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{clear_session_cookie, session_cookie, ROLE_RECYCLER};
use crate::claim::{self, ClaimActor, ClaimSummary};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthRecycler;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /recycler/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "zipCode is required"))]
    pub zip_code: String,
}

/// Request body for `POST /recycler/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub recycler: Recycler,
}

/// Request body for `POST /recycler/scan`.
///
/// The field is optional so a missing id surfaces as the same 400 as an
/// empty one, rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    pub scanned_transporter_id: Option<String>,
}

/// Response body for `GET /recycler/wallet`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub wallet_balance: f64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/recycler/register
///
/// Create a recycler account and start a session.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if RecyclerRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Recycler with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let recycler = RecyclerRepo::create(
        &state.pool,
        &CreateRecycler {
            name: input.name,
            email: input.email,
            password_hash,
            address: input.address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
        },
    )
    .await?;

    tracing::info!(recycler_id = recycler.id, "registered new recycler");

    let (token, cookie) = issue_session(&state, &recycler)?;
    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Recycler registered successfully".to_string(),
            token,
            recycler,
        }),
    ))
}

/// POST /api/recycler/login
///
/// Authenticate with email + password and start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let recycler = RecyclerRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &recycler.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let (token, cookie) = issue_session(&state, &recycler)?;
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Login successful".to_string(),
            token,
            recycler,
        }),
    ))
}

/// POST /api/recycler/logout
///
/// Clear the session cookie.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({ "message": "Logout successful" })),
    )
}

/// GET /api/recycler/me
///
/// Return the authenticated recycler's full profile.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthRecycler,
) -> AppResult<Json<Recycler>> {
    let recycler = find_recycler(&state, auth.id).await?;
    Ok(Json(recycler))
}

/// PUT /api/recycler/profile
///
/// Partially update the authenticated recycler's profile.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthRecycler,
    Json(input): Json<UpdateRecyclerProfile>,
) -> AppResult<Json<serde_json::Value>> {
    let updated = RecyclerRepo::update_profile(&state.pool, auth.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recycler",
            id: auth.id,
        }))?;

    tracing::info!(recycler_id = updated.id, "profile updated");

    Ok(Json(serde_json::json!({
        "message": "Profile updated successfully",
        "recycler": updated,
    })))
}

/// GET /api/recycler/wallet
///
/// Return the authenticated recycler's wallet balance.
pub async fn wallet(
    State(state): State<AppState>,
    auth: AuthRecycler,
) -> AppResult<Json<WalletResponse>> {
    let recycler = find_recycler(&state, auth.id).await?;
    Ok(Json(WalletResponse {
        wallet_balance: recycler.wallet_balance,
    }))
}

/// GET /api/recycler/collections
///
/// List the collections this recycler has claimed, newest first.
pub async fn collections(
    State(state): State<AppState>,
    auth: AuthRecycler,
) -> AppResult<Json<Vec<Collection>>> {
    let items = CollectionRepo::list_for_recycler(&state.pool, auth.id).await?;
    Ok(Json(items))
}

/// POST /api/recycler/scan
///
/// Claim all eligible collections from the scanned transporter.
pub async fn scan(
    State(state): State<AppState>,
    auth: AuthRecycler,
    Json(input): Json<ScanRequest>,
) -> AppResult<Json<ClaimSummary>> {
    let actor = ClaimActor {
        id: auth.id,
        name: auth.name,
    };
    let scanned = input.scanned_transporter_id.unwrap_or_default();
    let summary = claim::claim_collections(&state.pool, &actor, &scanned).await?;
    Ok(Json(summary))
}

// ── Private helpers ──────────────────────────────────────────────────────

/// Generate a session token and matching Set-Cookie value.
fn issue_session(state: &AppState, recycler: &Recycler) -> Result<(String, String), AppError> {
    let token = generate_token(recycler.id, ROLE_RECYCLER, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(&token, state.config.jwt.token_expiry_secs());
    Ok((token, cookie))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

async fn find_recycler(state: &AppState, id: DbId) -> Result<Recycler, AppError> {
    RecyclerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recycler",
            id,
        }))
}
