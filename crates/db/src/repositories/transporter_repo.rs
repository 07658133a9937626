//! Repository for the `transporters` table.

use ecoloop_core::types::DbId;
use sqlx::PgPool;

use crate::models::transporter::{CreateTransporter, Transporter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, phone, created_at, updated_at";

/// Provides CRUD operations for transporters.
pub struct TransporterRepo;

impl TransporterRepo {
    /// Insert a new transporter, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransporter,
    ) -> Result<Transporter, sqlx::Error> {
        let query = format!(
            "INSERT INTO transporters (name, email, password_hash, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transporter>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a transporter by internal ID.
    ///
    /// This is the registry lookup backing QR-code validation: a scanned
    /// identifier that does not resolve here is treated as an invalid code.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transporter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transporters WHERE id = $1");
        sqlx::query_as::<_, Transporter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a transporter by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Transporter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transporters WHERE email = $1");
        sqlx::query_as::<_, Transporter>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
