//! Tests for database initialization

use tunedeck_common::db::init_database;

#[tokio::test]
async fn creates_database_when_missing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("fresh").join("tunedeck.db");
    assert!(!db_path.exists());

    let pool = init_database(&db_path).await.expect("init database");
    assert!(db_path.exists(), "database file was not created");

    drop(pool);
}

#[tokio::test]
async fn opens_existing_database() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("tunedeck.db");

    let pool1 = init_database(&db_path).await.expect("first init");
    drop(pool1);

    // Second open must succeed and leave data intact
    let pool2 = init_database(&db_path).await.expect("second init");
    drop(pool2);
}

#[tokio::test]
async fn schema_tables_exist() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pool = init_database(&dir.path().join("tunedeck.db"))
        .await
        .expect("init database");

    for table in ["users", "musics", "playlists", "playlist_entries", "favorites"] {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .expect("query sqlite_master");
        assert_eq!(count, 1, "missing table {}", table);
    }
}

#[tokio::test]
async fn init_is_idempotent_across_reopen() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("tunedeck.db");

    let pool = init_database(&db_path).await.expect("first init");
    sqlx::query("INSERT INTO playlists (user_id, name) VALUES ('u1', 'Road Trip')")
        .execute(&pool)
        .await
        .expect("insert playlist");
    drop(pool);

    let pool = init_database(&db_path).await.expect("second init");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlists")
        .fetch_one(&pool)
        .await
        .expect("count playlists");
    assert_eq!(count, 1);
}
