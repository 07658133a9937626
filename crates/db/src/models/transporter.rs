//! Transporter entity model and DTOs.

use ecoloop_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `transporters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transporter {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new transporter. The password is hashed upstream.
#[derive(Debug, Clone)]
pub struct CreateTransporter {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
}
