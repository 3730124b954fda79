//! Database migration tests

use sqlx::Row;

#[tokio::test]
async fn test_migrations_create_schema() {
    let db = require_db!();

    // Running again is a no-op
    crate::common::run_migrations(db.pool())
        .await
        .expect("Migrations should be idempotent");

    for table in ["users", "blog_posts", "comments", "likes", "saves", "shares", "views", "predictions", "payments"] {
        let row = sqlx::query("SELECT to_regclass($1) IS NOT NULL AS present")
            .bind(format!("public.{}", table))
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert!(row.get::<bool, _>("present"), "table {} is missing", table);
    }
}
