use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    ecoloop_db::health_check(&pool).await.unwrap();

    // The status lookup table must carry the four seeded lifecycle states.
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM collection_statuses")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 4, "collection_statuses should have 4 seed rows");

    let names: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM collection_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    let names: Vec<&str> = names.iter().map(|(n,)| n.as_str()).collect();
    assert_eq!(names, ["Pending", "Collected", "Claimed", "Processed"]);
}

/// Negative weights must be rejected by the schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_weight_rejected(pool: PgPool) {
    let transporter: (i64,) = sqlx::query_as(
        "INSERT INTO transporters (name, email, password_hash) \
         VALUES ('T', 't@example.com', 'x') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let result = sqlx::query(
        "INSERT INTO collections (transporter_id, status_id, weight) VALUES ($1, 2, -1.0)",
    )
    .bind(transporter.0)
    .execute(&pool)
    .await;
    assert!(result.is_err(), "negative weight should violate the check constraint");
}
