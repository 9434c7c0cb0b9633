use anyhow::Result;
use casefile::migrate;
use sqlx::Row;

#[path = "util.rs"]
mod util;

#[tokio::test]
async fn apply_is_idempotent() -> Result<()> {
    let pool = util::memory_pool().await?;
    // util already applied once; a second pass only skips.
    migrate::apply_migrations(&pool).await?;

    let tables: Vec<String> = sqlx::query(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .fetch_all(&pool)
    .await?
    .iter()
    .map(|row| row.get::<String, _>("name"))
    .collect();

    for expected in ["appointment", "client", "document", "documentation"] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {expected}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn bookkeeping_row_is_written_once() -> Result<()> {
    let pool = util::memory_pool().await?;
    migrate::apply_migrations(&pool).await?;

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations WHERE version = ?")
            .bind("202601121000_initial.sql")
            .fetch_one(&pool)
            .await?;
    assert_eq!(count, 1);
    Ok(())
}

#[tokio::test]
async fn edited_applied_migration_is_refused() -> Result<()> {
    let pool = util::memory_pool().await?;

    sqlx::query("UPDATE schema_migrations SET checksum = 'tampered'")
        .execute(&pool)
        .await?;

    let err = migrate::apply_migrations(&pool)
        .await
        .expect_err("checksum mismatch must refuse to proceed");
    assert!(err.to_string().contains("edited after application"));
    Ok(())
}

#[tokio::test]
async fn open_store_applies_pragmas_on_disk() -> Result<()> {
    let scratch = tempfile::tempdir()?;
    let db_path = scratch.path().join("data").join("casefile.sqlite3");

    let pool = casefile::db::open_store(&db_path).await?;
    migrate::apply_migrations(&pool).await?;

    let (journal_mode,): (String,) = sqlx::query_as("PRAGMA journal_mode;")
        .fetch_one(&pool)
        .await?;
    assert!(journal_mode.eq_ignore_ascii_case("wal"));

    let (fks,): (i64,) = sqlx::query_as("PRAGMA foreign_keys;").fetch_one(&pool).await?;
    assert_eq!(fks, 1);

    assert!(db_path.exists());
    Ok(())
}
