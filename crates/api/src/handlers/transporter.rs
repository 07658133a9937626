//! Handlers for the `/transporter` resource: account lifecycle, the QR
//! payload recyclers scan, and pickup recording.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ecoloop_core::error::CoreError;
use ecoloop_core::waste::WasteBreakdown;
use ecoloop_db::models::collection::{Collection, CreateCollection};
use ecoloop_db::models::status::CollectionStatus;
use ecoloop_db::models::transporter::{CreateTransporter, Transporter};
use ecoloop_db::repositories::{CollectionRepo, TransporterRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{clear_session_cookie, session_cookie, ROLE_TRANSPORTER};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthTransporter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /transporter/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub phone: Option<String>,
}

/// Request body for `POST /transporter/login`.
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
    pub transporter: Transporter,
}

/// Response body for `GET /transporter/qr`.
///
/// The payload is the string a recycler's scanner submits back to
/// `POST /recycler/scan`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResponse {
    pub qr_payload: String,
}

/// Request body for `POST /transporter/collections`: record a pickup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCollectionRequest {
    /// Total recorded mass of the pickup, in kilograms.
    pub weight: f64,
    /// Per-category breakdown; absent categories default to zero. Not
    /// reconciled against `weight`.
    #[serde(default)]
    pub waste_types: WasteBreakdown,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/transporter/register
///
/// Create a transporter account and start a session.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if TransporterRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Transporter with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let transporter = TransporterRepo::create(
        &state.pool,
        &CreateTransporter {
            name: input.name,
            email: input.email,
            password_hash,
            phone: input.phone,
        },
    )
    .await?;

    tracing::info!(transporter_id = transporter.id, "registered new transporter");

    let (token, cookie) = issue_session(&state, &transporter)?;
    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Transporter registered successfully".to_string(),
            token,
            transporter,
        }),
    ))
}

/// POST /api/transporter/login
///
/// Authenticate with email + password and start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let transporter = TransporterRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &transporter.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let (token, cookie) = issue_session(&state, &transporter)?;
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "Login successful".to_string(),
            token,
            transporter,
        }),
    ))
}

/// POST /api/transporter/logout
///
/// Clear the session cookie.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({ "message": "Logout successful" })),
    )
}

/// GET /api/transporter/me
///
/// Return the authenticated transporter's profile.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthTransporter,
) -> AppResult<Json<Transporter>> {
    let transporter = TransporterRepo::find_by_id(&state.pool, auth.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Transporter",
            id: auth.id,
        }))?;
    Ok(Json(transporter))
}

/// GET /api/transporter/qr
///
/// Return the QR payload identifying this transporter to scanners.
pub async fn qr(auth: AuthTransporter) -> Json<QrResponse> {
    Json(QrResponse {
        qr_payload: auth.id.to_string(),
    })
}

/// POST /api/transporter/collections
///
/// Record a completed pickup. The collection is created in `Collected`
/// status, making it immediately claimable by recyclers.
pub async fn record_collection(
    State(state): State<AppState>,
    auth: AuthTransporter,
    Json(input): Json<RecordCollectionRequest>,
) -> AppResult<impl IntoResponse> {
    if !input.weight.is_finite() || input.weight < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "weight must be a non-negative number".into(),
        )));
    }
    if !input.waste_types.is_valid() {
        return Err(AppError::Core(CoreError::Validation(
            "waste type weights must be non-negative".into(),
        )));
    }

    let collection = CollectionRepo::create(
        &state.pool,
        &CreateCollection {
            transporter_id: auth.id,
            status: CollectionStatus::Collected,
            weight: input.weight,
            breakdown: input.waste_types,
        },
    )
    .await?;

    tracing::info!(
        transporter_id = auth.id,
        collection_id = collection.id,
        weight = collection.weight,
        "recorded pickup"
    );

    Ok((StatusCode::CREATED, Json(collection)))
}

/// GET /api/transporter/collections
///
/// List all collections recorded by this transporter, newest first.
pub async fn collections(
    State(state): State<AppState>,
    auth: AuthTransporter,
) -> AppResult<Json<Vec<Collection>>> {
    let items = CollectionRepo::list_for_transporter(&state.pool, auth.id).await?;
    Ok(Json(items))
}

// ── Private helpers ──────────────────────────────────────────────────────

/// Generate a session token and matching Set-Cookie value.
fn issue_session(
    state: &AppState,
    transporter: &Transporter,
) -> Result<(String, String), AppError> {
    let token = generate_token(transporter.id, ROLE_TRANSPORTER, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(&token, state.config.jwt.token_expiry_secs());
    Ok((token, cookie))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}
