//! Repository for the `collections` table.
//!
//! Besides plain CRUD this provides the two operations backing the claim
//! workflow: `find_eligible` (candidate selection) and `claim_batch` (the
//! guarded, atomic multi-row ownership transfer).

use ecoloop_core::types::DbId;
use sqlx::PgPool;

use crate::models::collection::{Collection, CreateCollection};
use crate::models::status::CollectionStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, transporter_id, recycler_id, status_id, weight, \
                       wet_weight, dry_weight, hazardous_weight, \
                       claimed_at, created_at, updated_at";

/// Provides storage operations for waste collections.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Insert a new collection record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCollection,
    ) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections \
                 (transporter_id, status_id, weight, wet_weight, dry_weight, hazardous_weight)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(input.transporter_id)
            .bind(input.status.id())
            .bind(input.weight)
            .bind(input.breakdown.wet)
            .bind(input.breakdown.dry)
            .bind(input.breakdown.hazardous)
            .fetch_one(pool)
            .await
    }

    /// Find a collection by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collections WHERE id = $1");
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Select all collections claimable from the given transporter: picked
    /// up (`Collected`) and not yet assigned to any recycler.
    ///
    /// This is candidate selection only, not a lock; the same predicate is
    /// re-checked inside [`Self::claim_batch`].
    pub async fn find_eligible(
        pool: &PgPool,
        transporter_id: DbId,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections
             WHERE transporter_id = $1 AND status_id = $2 AND recycler_id IS NULL
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(transporter_id)
            .bind(CollectionStatus::Collected.id())
            .fetch_all(pool)
            .await
    }

    /// Atomically assign `recycler_id` on every listed collection that is
    /// still unclaimed and in `Collected` status, moving it to `Claimed`.
    ///
    /// The unclaimed guard is re-checked inside this single UPDATE, so two
    /// racing claims over overlapping id sets partition the rows: each row
    /// is won by exactly one caller. Returns the rows actually claimed by
    /// this call, which may be fewer than `ids` under contention.
    pub async fn claim_batch(
        pool: &PgPool,
        ids: &[DbId],
        recycler_id: DbId,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections
             SET recycler_id = $1, status_id = $2, claimed_at = NOW()
             WHERE id = ANY($3) AND recycler_id IS NULL AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(recycler_id)
            .bind(CollectionStatus::Claimed.id())
            .bind(ids)
            .bind(CollectionStatus::Collected.id())
            .fetch_all(pool)
            .await
    }

    /// List collections claimed by the given recycler, newest first.
    pub async fn list_for_recycler(
        pool: &PgPool,
        recycler_id: DbId,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections
             WHERE recycler_id = $1
             ORDER BY claimed_at DESC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(recycler_id)
            .fetch_all(pool)
            .await
    }

    /// List all collections recorded by the given transporter, newest first.
    pub async fn list_for_transporter(
        pool: &PgPool,
        transporter_id: DbId,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections
             WHERE transporter_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(transporter_id)
            .fetch_all(pool)
            .await
    }

    /// Move a claimed collection to `Processed`.
    ///
    /// Guarded on the current status so the transition stays forward-only.
    /// Returns `None` if the row does not exist or is not in `Claimed`.
    pub async fn mark_processed(
        pool: &PgPool,
        id: DbId,
        recycler_id: DbId,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections
             SET status_id = $1
             WHERE id = $2 AND recycler_id = $3 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(CollectionStatus::Processed.id())
            .bind(id)
            .bind(recycler_id)
            .bind(CollectionStatus::Claimed.id())
            .fetch_optional(pool)
            .await
    }
}
