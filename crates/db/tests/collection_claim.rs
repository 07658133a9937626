//! Repository-level tests for the collection claim workflow: eligibility
//! filtering, the guarded atomic batch claim, and the forward-only
//! processed transition.

use assert_matches::assert_matches;
use ecoloop_core::waste::WasteBreakdown;
use sqlx::PgPool;

use ecoloop_db::models::collection::CreateCollection;
use ecoloop_db::models::recycler::CreateRecycler;
use ecoloop_db::models::status::CollectionStatus;
use ecoloop_db::models::transporter::CreateTransporter;
use ecoloop_db::repositories::{CollectionRepo, RecyclerRepo, TransporterRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_recycler(email: &str) -> CreateRecycler {
    CreateRecycler {
        name: "Test Recycler".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$test".to_string(),
        address: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62704".to_string(),
    }
}

fn new_transporter(email: &str) -> CreateTransporter {
    CreateTransporter {
        name: "Test Transporter".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$test".to_string(),
        phone: None,
    }
}

fn new_collection(transporter_id: i64, status: CollectionStatus, weight: f64) -> CreateCollection {
    CreateCollection {
        transporter_id,
        status,
        weight,
        breakdown: WasteBreakdown::new(weight, 0.0, 0.0),
    }
}

// ---------------------------------------------------------------------------
// Test: find_eligible applies the full eligibility filter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_eligible_filters(pool: PgPool) {
    let t1 = TransporterRepo::create(&pool, &new_transporter("t1@example.com"))
        .await
        .unwrap();
    let t2 = TransporterRepo::create(&pool, &new_transporter("t2@example.com"))
        .await
        .unwrap();
    let recycler = RecyclerRepo::create(&pool, &new_recycler("r@example.com"))
        .await
        .unwrap();

    // Eligible: collected, unclaimed, right transporter.
    let eligible = CollectionRepo::create(
        &pool,
        &new_collection(t1.id, CollectionStatus::Collected, 10.0),
    )
    .await
    .unwrap();
    // Not eligible: still pending pickup.
    CollectionRepo::create(&pool, &new_collection(t1.id, CollectionStatus::Pending, 3.0))
        .await
        .unwrap();
    // Not eligible: different transporter.
    CollectionRepo::create(
        &pool,
        &new_collection(t2.id, CollectionStatus::Collected, 4.0),
    )
    .await
    .unwrap();
    // Not eligible: already claimed.
    let claimed = CollectionRepo::create(
        &pool,
        &new_collection(t1.id, CollectionStatus::Collected, 5.0),
    )
    .await
    .unwrap();
    CollectionRepo::claim_batch(&pool, &[claimed.id], recycler.id)
        .await
        .unwrap();

    let found = CollectionRepo::find_eligible(&pool, t1.id).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, eligible.id);
}

// ---------------------------------------------------------------------------
// Test: claim_batch assigns ownership and advances status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_batch_assigns_ownership(pool: PgPool) {
    let transporter = TransporterRepo::create(&pool, &new_transporter("t@example.com"))
        .await
        .unwrap();
    let recycler = RecyclerRepo::create(&pool, &new_recycler("r@example.com"))
        .await
        .unwrap();

    let mut ids = Vec::new();
    for weight in [10.0, 5.0, 2.5] {
        let c = CollectionRepo::create(
            &pool,
            &new_collection(transporter.id, CollectionStatus::Collected, weight),
        )
        .await
        .unwrap();
        ids.push(c.id);
    }

    let claimed = CollectionRepo::claim_batch(&pool, &ids, recycler.id)
        .await
        .unwrap();
    assert_eq!(claimed.len(), 3);
    for c in &claimed {
        assert_eq!(c.recycler_id, Some(recycler.id));
        assert_eq!(c.status_id, CollectionStatus::Claimed.id());
        assert!(c.claimed_at.is_some());
    }

    // Total weight over the claimed set.
    let total: f64 = claimed.iter().map(|c| c.weight).sum();
    assert_eq!(total, 17.5);
}

// ---------------------------------------------------------------------------
// Test: a claimed collection is never claimed again (exclusivity)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_batch_never_overwrites(pool: PgPool) {
    let transporter = TransporterRepo::create(&pool, &new_transporter("t@example.com"))
        .await
        .unwrap();
    let r1 = RecyclerRepo::create(&pool, &new_recycler("r1@example.com"))
        .await
        .unwrap();
    let r2 = RecyclerRepo::create(&pool, &new_recycler("r2@example.com"))
        .await
        .unwrap();

    let c = CollectionRepo::create(
        &pool,
        &new_collection(transporter.id, CollectionStatus::Collected, 7.0),
    )
    .await
    .unwrap();

    let first = CollectionRepo::claim_batch(&pool, &[c.id], r1.id).await.unwrap();
    assert_eq!(first.len(), 1);

    // A second claim over the same id must win nothing and change nothing.
    let second = CollectionRepo::claim_batch(&pool, &[c.id], r2.id).await.unwrap();
    assert!(second.is_empty());

    let row = CollectionRepo::find_by_id(&pool, c.id).await.unwrap().unwrap();
    assert_eq!(row.recycler_id, Some(r1.id));
}

// ---------------------------------------------------------------------------
// Test: overlapping batches partition the rows between claimers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overlapping_batches_partition(pool: PgPool) {
    let transporter = TransporterRepo::create(&pool, &new_transporter("t@example.com"))
        .await
        .unwrap();
    let r1 = RecyclerRepo::create(&pool, &new_recycler("r1@example.com"))
        .await
        .unwrap();
    let r2 = RecyclerRepo::create(&pool, &new_recycler("r2@example.com"))
        .await
        .unwrap();

    let a = CollectionRepo::create(
        &pool,
        &new_collection(transporter.id, CollectionStatus::Collected, 1.0),
    )
    .await
    .unwrap();
    let b = CollectionRepo::create(
        &pool,
        &new_collection(transporter.id, CollectionStatus::Collected, 2.0),
    )
    .await
    .unwrap();

    // r1 wins `a`; r2 then claims an overlapping batch and gets only `b`.
    let first = CollectionRepo::claim_batch(&pool, &[a.id], r1.id).await.unwrap();
    assert_eq!(first.len(), 1);

    let second = CollectionRepo::claim_batch(&pool, &[a.id, b.id], r2.id)
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, b.id);
    assert_eq!(second[0].recycler_id, Some(r2.id));
}

// ---------------------------------------------------------------------------
// Test: once everything is claimed, a repeat claim finds nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_claim_is_noop(pool: PgPool) {
    let transporter = TransporterRepo::create(&pool, &new_transporter("t@example.com"))
        .await
        .unwrap();
    let recycler = RecyclerRepo::create(&pool, &new_recycler("r@example.com"))
        .await
        .unwrap();

    let c = CollectionRepo::create(
        &pool,
        &new_collection(transporter.id, CollectionStatus::Collected, 9.0),
    )
    .await
    .unwrap();
    CollectionRepo::claim_batch(&pool, &[c.id], recycler.id)
        .await
        .unwrap();

    let remaining = CollectionRepo::find_eligible(&pool, transporter.id)
        .await
        .unwrap();
    assert!(remaining.is_empty(), "no eligible collections should remain");
}

// ---------------------------------------------------------------------------
// Test: mark_processed only moves Claimed rows forward
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_processed_forward_only(pool: PgPool) {
    let transporter = TransporterRepo::create(&pool, &new_transporter("t@example.com"))
        .await
        .unwrap();
    let recycler = RecyclerRepo::create(&pool, &new_recycler("r@example.com"))
        .await
        .unwrap();

    let c = CollectionRepo::create(
        &pool,
        &new_collection(transporter.id, CollectionStatus::Collected, 3.0),
    )
    .await
    .unwrap();

    // Not yet claimed: cannot be processed.
    let result = CollectionRepo::mark_processed(&pool, c.id, recycler.id)
        .await
        .unwrap();
    assert_matches!(result, None);

    CollectionRepo::claim_batch(&pool, &[c.id], recycler.id)
        .await
        .unwrap();

    let processed = CollectionRepo::mark_processed(&pool, c.id, recycler.id)
        .await
        .unwrap()
        .expect("claimed collection should be processable");
    assert_eq!(processed.status_id, CollectionStatus::Processed.id());

    // Processing is terminal; a second call finds nothing in Claimed.
    let again = CollectionRepo::mark_processed(&pool, c.id, recycler.id)
        .await
        .unwrap();
    assert_matches!(again, None);
}
