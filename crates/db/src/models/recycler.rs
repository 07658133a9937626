//! Recycler entity model and DTOs.

use ecoloop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `recyclers` table.
///
/// `password_hash` is never serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recycler {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub wallet_balance: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new recycler. The password is hashed upstream.
#[derive(Debug, Clone)]
pub struct CreateRecycler {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// DTO for partial profile updates. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecyclerProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}
