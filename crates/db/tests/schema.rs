use sqlx::PgPool;

/// Connect, migrate, and verify the seeded roles.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_seeds_roles(pool: PgPool) {
    clubhouse_db::health_check(&pool).await.unwrap();

    let roles = clubhouse_db::repositories::RoleRepo::list(&pool).await.unwrap();
    let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["admin", "editor"]);
}

/// Every unique constraint must carry the `uq_` prefix so the API can map
/// violations to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_are_prefixed(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT constraint_name
         FROM information_schema.table_constraints
         WHERE table_schema = 'public' AND constraint_type = 'UNIQUE'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "Unique constraint {name} should start with uq_");
    }
}

/// Every table must have timestamptz `created_at` / `updated_at`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name IN ('created_at', 'updated_at')
               AND data_type = 'timestamp with time zone'",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count.0, 2, "Table {table} should have created_at and updated_at");
    }
}
