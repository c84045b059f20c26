use chrono::Duration;
use hafiz_core::model::{JuzId, ProgressState, Stage, ThemeMode};
use hafiz_core::time::fixed_now;
use storage::repository::{BlobStore, PROGRESS_KEY, ProgressRepository, ThemeRepository};
use storage::sqlite::SqliteRepository;
use storage::Storage;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn id(n: u8) -> JuzId {
    JuzId::new(n).unwrap()
}

#[tokio::test]
async fn sqlite_roundtrip_persists_progress_and_history() {
    let repo = connect("memdb_progress_roundtrip").await;

    let mut state = ProgressState::zero();
    for i in 0..23_u8 {
        let at = fixed_now() + Duration::minutes(i64::from(i));
        state.record_progress(id(i % 30 + 1), Stage::Complete, at);
    }
    state.record_progress(id(2), Stage::NotStarted, fixed_now() + Duration::hours(1));

    repo.save_progress(&state).await.unwrap();
    let loaded = repo.load_progress().await.unwrap().expect("saved state");

    assert_eq!(loaded, state);
    assert_eq!(loaded.history().len(), 20);
    assert_eq!(loaded.last_active(), id(2));
}

#[tokio::test]
async fn sqlite_upsert_replaces_previous_snapshot() {
    let repo = connect("memdb_progress_upsert").await;

    let mut state = ProgressState::zero();
    state.record_progress(id(1), Stage::Started, fixed_now());
    repo.save_progress(&state).await.unwrap();

    state.record_progress(id(1), Stage::Quarter, fixed_now());
    repo.save_progress(&state).await.unwrap();

    let loaded = repo.load_progress().await.unwrap().unwrap();
    assert_eq!(loaded.stage_of(id(1)), Stage::Quarter);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_blobs")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn sqlite_theme_and_clear() {
    let repo = connect("memdb_theme_clear").await;

    repo.save_theme(ThemeMode::Dark).await.unwrap();
    repo.save_progress(&ProgressState::zero()).await.unwrap();
    assert_eq!(repo.load_theme().await.unwrap(), Some(ThemeMode::Dark));

    repo.remove_blob(PROGRESS_KEY).await.unwrap();
    assert!(repo.load_progress().await.unwrap().is_none());
    assert_eq!(repo.load_theme().await.unwrap(), Some(ThemeMode::Dark));

    repo.clear_blobs().await.unwrap();
    assert!(repo.load_theme().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");

    let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(versions, 1);
}

#[tokio::test]
async fn storage_sqlite_wires_all_repositories() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage_wiring?mode=memory&cache=shared")
        .await
        .expect("storage");

    let mut state = ProgressState::zero();
    state.record_progress(id(30), Stage::Complete, fixed_now());
    storage.progress.save_progress(&state).await.unwrap();
    storage.theme.save_theme(ThemeMode::Light).await.unwrap();

    assert!(storage.blobs.get_blob(PROGRESS_KEY).await.unwrap().is_some());
    assert_eq!(
        storage.progress.load_progress().await.unwrap().unwrap(),
        state
    );
}
