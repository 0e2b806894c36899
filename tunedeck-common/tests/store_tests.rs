//! Store operation tests against temporary SQLite databases
//!
//! Covers the catalog/playlist/favorites invariants: upsert idempotency,
//! junction uniqueness, ordering, ownership checks, and delete behavior.

use sqlx::SqlitePool;
use tempfile::TempDir;
use tunedeck_common::db::models::VideoSelection;
use tunedeck_common::db::{favorites, init_database, music, playlists, users};
use tunedeck_common::Error;

async fn setup_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pool = init_database(&dir.path().join("test.db"))
        .await
        .expect("init database");
    (pool, dir)
}

fn track(video_id: &str, title: &str) -> VideoSelection {
    VideoSelection {
        video_id: video_id.to_string(),
        title: title.to_string(),
        channel_title: Some("Test Channel".to_string()),
        thumbnail_url: Some("https://img.example/thumb.jpg".to_string()),
        source_url: Some(format!("https://www.youtube.com/watch?v={}", video_id)),
    }
}

// ============================================================================
// Music catalog
// ============================================================================

#[tokio::test]
async fn music_upsert_is_idempotent() {
    let (pool, _dir) = setup_pool().await;

    let first = music::upsert_for_user(&pool, "u1", &track("abc123", "Song A"))
        .await
        .unwrap();
    let second = music::upsert_for_user(&pool, "u1", &track("abc123", "Song A (remaster)"))
        .await
        .unwrap();

    // Same row, stable id, metadata refreshed
    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Song A (remaster)");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM musics")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn music_upsert_keeps_favorite_flag() {
    let (pool, _dir) = setup_pool().await;

    music::upsert_for_user(&pool, "u1", &track("abc123", "Song A"))
        .await
        .unwrap();
    assert!(music::toggle_favorite(&pool, "u1", "abc123").await.unwrap());

    let row = music::upsert_for_user(&pool, "u1", &track("abc123", "Song A"))
        .await
        .unwrap();
    assert!(row.is_fav);
}

#[tokio::test]
async fn music_rows_are_per_user() {
    let (pool, _dir) = setup_pool().await;

    let a = music::upsert_for_user(&pool, "u1", &track("abc123", "Song A"))
        .await
        .unwrap();
    let b = music::upsert_for_user(&pool, "u2", &track("abc123", "Song A"))
        .await
        .unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn music_toggle_unknown_video_is_not_found() {
    let (pool, _dir) = setup_pool().await;

    let err = music::toggle_favorite(&pool, "u1", "missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn music_history_is_limited_and_newest_first() {
    let (pool, _dir) = setup_pool().await;

    for i in 0..6 {
        music::upsert_for_user(&pool, "u1", &track(&format!("v{}", i), &format!("Song {}", i)))
            .await
            .unwrap();
    }

    let history = music::list_search_history(&pool, "u1", 5).await.unwrap();
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].video_id, "v5");
    assert_eq!(history[4].video_id, "v1");
}

#[tokio::test]
async fn music_favorites_lists_only_flagged_rows() {
    let (pool, _dir) = setup_pool().await;

    music::upsert_for_user(&pool, "u1", &track("v1", "Song 1"))
        .await
        .unwrap();
    music::upsert_for_user(&pool, "u1", &track("v2", "Song 2"))
        .await
        .unwrap();
    music::toggle_favorite(&pool, "u1", "v2").await.unwrap();

    let favorites = music::list_favorites(&pool, "u1").await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].video_id, "v2");
}

// ============================================================================
// Playlists
// ============================================================================

#[tokio::test]
async fn playlist_create_requires_owner_and_name() {
    let (pool, _dir) = setup_pool().await;

    let err = playlists::create(&pool, "u1", "  ", None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = playlists::create(&pool, "", "Road Trip", None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn playlist_add_track_rejects_duplicates() {
    let (pool, _dir) = setup_pool().await;

    let playlist = playlists::create(&pool, "u1", "Road Trip", None, false)
        .await
        .unwrap();
    let id = playlist.playlist.id;

    let updated = playlists::add_track(&pool, id, Some("u1"), &track("abc123", "Song A"))
        .await
        .unwrap();
    assert_eq!(updated.tracks.len(), 1);

    let err = playlists::add_track(&pool, id, Some("u1"), &track("abc123", "Song A"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM playlist_entries WHERE playlist_id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn playlist_tracks_keep_insertion_order_and_readd_goes_last() {
    let (pool, _dir) = setup_pool().await;

    let playlist = playlists::create(&pool, "u1", "Road Trip", None, false)
        .await
        .unwrap();
    let id = playlist.playlist.id;

    for (video_id, title) in [("a", "Song A"), ("b", "Song B"), ("c", "Song C")] {
        playlists::add_track(&pool, id, Some("u1"), &track(video_id, title))
            .await
            .unwrap();
    }

    let updated = playlists::remove_track(&pool, id, Some("u1"), "b").await.unwrap();
    assert_eq!(updated.tracks.len(), 2);

    // Membership is restored, but at the end rather than the old position
    let updated = playlists::add_track(&pool, id, Some("u1"), &track("b", "Song B"))
        .await
        .unwrap();
    let order: Vec<&str> = updated.tracks.iter().map(|t| t.video_id.as_str()).collect();
    assert_eq!(order, vec!["a", "c", "b"]);
    assert!(updated.tracks[2].order_index > updated.tracks[1].order_index);
}

#[tokio::test]
async fn playlist_mutations_enforce_ownership() {
    let (pool, _dir) = setup_pool().await;

    let playlist = playlists::create(&pool, "u1", "Road Trip", None, false)
        .await
        .unwrap();
    let id = playlist.playlist.id;

    let err = playlists::add_track(&pool, id, Some("u2"), &track("abc123", "Song A"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = playlists::delete(&pool, id, Some("u2")).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    // Anonymous callers pass the guard
    playlists::add_track(&pool, id, None, &track("abc123", "Song A"))
        .await
        .unwrap();
}

#[tokio::test]
async fn playlist_add_track_unknown_playlist_is_not_found() {
    let (pool, _dir) = setup_pool().await;

    let err = playlists::add_track(&pool, 999, Some("u1"), &track("abc123", "Song A"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn playlist_remove_track_not_in_playlist_is_not_found() {
    let (pool, _dir) = setup_pool().await;

    let playlist = playlists::create(&pool, "u1", "Road Trip", None, false)
        .await
        .unwrap();
    let id = playlist.playlist.id;

    // No catalog row at all for this video
    let err = playlists::remove_track(&pool, id, Some("u1"), "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    // Catalog row exists but the junction row does not
    music::upsert_for_user(&pool, "u1", &track("abc123", "Song A"))
        .await
        .unwrap();
    let err = playlists::remove_track(&pool, id, Some("u1"), "abc123")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn playlist_favorites_subset() {
    let (pool, _dir) = setup_pool().await;

    playlists::create(&pool, "u1", "Road Trip", None, false)
        .await
        .unwrap();
    let flagged = playlists::create(&pool, "u1", "Workout", None, false)
        .await
        .unwrap();

    let updated = playlists::toggle_favorite(&pool, flagged.playlist.id, Some("u1"))
        .await
        .unwrap();
    assert!(updated.playlist.is_fav);

    let favorites = playlists::list_favorites(&pool, "u1").await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].playlist.name, "Workout");

    let all = playlists::list_for_user(&pool, "u1").await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn playlist_delete_drops_entries_but_keeps_musics() {
    let (pool, _dir) = setup_pool().await;

    let playlist = playlists::create(&pool, "u1", "Road Trip", None, false)
        .await
        .unwrap();
    let id = playlist.playlist.id;
    playlists::add_track(&pool, id, Some("u1"), &track("abc123", "Song A"))
        .await
        .unwrap();

    playlists::delete(&pool, id, Some("u1")).await.unwrap();

    let entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_entries")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(entries, 0);

    // The catalog row survives as history even when orphaned
    let musics: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM musics")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(musics, 1);

    let err = playlists::delete(&pool, id, Some("u1")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn favorites_are_unique_per_user_and_video() {
    let (pool, _dir) = setup_pool().await;

    favorites::add(&pool, "u1", &track("xyz", "Song X")).await.unwrap();
    let err = favorites::add(&pool, "u1", &track("xyz", "Song X"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    // A different user may bookmark the same video
    favorites::add(&pool, "u2", &track("xyz", "Song X")).await.unwrap();

    let list = favorites::list_for_user(&pool, "u1").await.unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn favorites_list_is_newest_first() {
    let (pool, _dir) = setup_pool().await;

    favorites::add(&pool, "u1", &track("v1", "Song 1")).await.unwrap();
    favorites::add(&pool, "u1", &track("v2", "Song 2")).await.unwrap();

    let list = favorites::list_for_user(&pool, "u1").await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].video_id, "v2");
}

#[tokio::test]
async fn favorites_remove_enforces_ownership() {
    let (pool, _dir) = setup_pool().await;

    let favorite = favorites::add(&pool, "u1", &track("xyz", "Song X"))
        .await
        .unwrap();

    let err = favorites::remove(&pool, favorite.id, Some("u2")).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    favorites::remove(&pool, favorite.id, Some("u1")).await.unwrap();

    let err = favorites::remove(&pool, favorite.id, Some("u1")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn user_upsert_never_blanks_known_fields() {
    let (pool, _dir) = setup_pool().await;

    users::upsert_user(&pool, "u1", Some("User One"), Some("u1@example.com"))
        .await
        .unwrap();
    // A later credential without profile claims keeps the stored values
    users::upsert_user(&pool, "u1", None, None).await.unwrap();

    let user = users::load_user(&pool, "u1").await.unwrap().unwrap();
    assert_eq!(user.display_name.as_deref(), Some("User One"));
    assert_eq!(user.email.as_deref(), Some("u1@example.com"));
}
