//! Repository for the `recyclers` table.

use ecoloop_core::types::DbId;
use sqlx::PgPool;

use crate::models::recycler::{CreateRecycler, Recycler, UpdateRecyclerProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, address, city, state, \
                       zip_code, wallet_balance, created_at, updated_at";

/// Provides CRUD operations for recyclers.
pub struct RecyclerRepo;

impl RecyclerRepo {
    /// Insert a new recycler, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRecycler) -> Result<Recycler, sqlx::Error> {
        let query = format!(
            "INSERT INTO recyclers (name, email, password_hash, address, city, state, zip_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recycler>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .fetch_one(pool)
            .await
    }

    /// Find a recycler by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recycler>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recyclers WHERE id = $1");
        sqlx::query_as::<_, Recycler>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a recycler by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Recycler>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recyclers WHERE email = $1");
        sqlx::query_as::<_, Recycler>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRecyclerProfile,
    ) -> Result<Option<Recycler>, sqlx::Error> {
        let query = format!(
            "UPDATE recyclers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                address = COALESCE($4, address),
                city = COALESCE($5, city),
                state = COALESCE($6, state),
                zip_code = COALESCE($7, zip_code)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recycler>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip_code)
            .fetch_optional(pool)
            .await
    }
}
