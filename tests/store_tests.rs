use letterbox::db::{ContactStore, NewContactMessage};
use letterbox::error::LetterboxError;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

fn temp_database(tag: &str) -> (PathBuf, String) {
    let mut hasher = DefaultHasher::new();
    SystemTime::now().hash(&mut hasher);
    let db_file_name = format!(
        "test_letterbox_{tag}_{}_{}.sqlite",
        std::process::id(),
        hasher.finish()
    );
    let db_path = std::env::temp_dir().join(db_file_name);
    let database_url = format!("sqlite:{}", db_path.to_str().unwrap());
    (db_path, database_url)
}

async fn cleanup(db_path: &Path) {
    let wal_path = PathBuf::from(format!("{}-wal", db_path.to_string_lossy()));
    let shm_path = PathBuf::from(format!("{}-shm", db_path.to_string_lossy()));
    let _ = fs::remove_file(&wal_path).await;
    let _ = fs::remove_file(&shm_path).await;
    let _ = fs::remove_file(db_path).await;
}

fn new_message(name: &str, message: &str) -> NewContactMessage {
    NewContactMessage::new(
        Some(name.to_string()),
        Some(format!("{}@example.com", name.to_lowercase())),
        Some("555-0100".to_string()),
        Some(message.to_string()),
    )
    .unwrap()
}

#[tokio::test]
async fn store_round_trip_baseline() {
    let (db_path, database_url) = temp_database("round_trip");
    let store = ContactStore::connect(&database_url, false).await.unwrap();

    // 1. Fresh store lists empty.
    let all = store.list_all().await.unwrap();
    assert!(all.is_empty(), "expected no messages initially");

    // 2. Create one message; id and created_at are store-assigned.
    let stored = store.create(new_message("Ada", "Hello")).await.unwrap();
    assert!(stored.id > 0, "expected a valid id after creation");
    assert_eq!(stored.name, "Ada");
    assert_eq!(stored.email, "ada@example.com");
    assert_eq!(stored.mobile, "555-0100");
    assert_eq!(stored.message, "Hello");

    // 3. Listing returns the identical row.
    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1, "expected one message after creation");
    assert_eq!(all[0], stored);

    // 4. get_by_id returns the same row.
    let fetched = store.get_by_id(stored.id).await.unwrap();
    assert_eq!(fetched, stored);

    store.close().await;
    cleanup(&db_path).await;
}

#[tokio::test]
async fn list_is_newest_first() {
    let (db_path, database_url) = temp_database("ordering");
    let store = ContactStore::connect(&database_url, false).await.unwrap();

    let r1 = store.create(new_message("R1", "first")).await.unwrap();
    let r2 = store.create(new_message("R2", "second")).await.unwrap();
    let r3 = store.create(new_message("R3", "third")).await.unwrap();
    assert!(r1.id < r2.id && r2.id < r3.id);

    let all = store.list_all().await.unwrap();
    assert_eq!(all, vec![r3, r2, r1]);

    store.close().await;
    cleanup(&db_path).await;
}

#[tokio::test]
async fn get_by_unknown_id_is_not_found() {
    let (db_path, database_url) = temp_database("not_found");
    let store = ContactStore::connect(&database_url, false).await.unwrap();

    let err = store.get_by_id(999_999).await.unwrap_err();
    assert!(matches!(err, LetterboxError::NotFound { id: 999_999 }));

    store.close().await;
    cleanup(&db_path).await;
}

#[tokio::test]
async fn recreate_flag_controls_recovery_from_a_corrupt_file() {
    let (db_path, database_url) = temp_database("recreate");

    // Plant a file that is not a SQLite database.
    fs::write(&db_path, b"definitely not a sqlite database")
        .await
        .unwrap();

    // Default behavior: the init failure propagates.
    let result = ContactStore::connect(&database_url, false).await;
    assert!(
        result.is_err(),
        "expected init failure against a corrupt file"
    );

    // Opt-in recovery: the file is discarded and the store comes up empty
    // and usable.
    let store = ContactStore::connect(&database_url, true).await.unwrap();
    let all = store.list_all().await.unwrap();
    assert!(all.is_empty(), "expected a fresh store after recovery");

    let stored = store
        .create(new_message("Ada", "post-recovery"))
        .await
        .unwrap();
    assert_eq!(store.get_by_id(stored.id).await.unwrap(), stored);

    store.close().await;
    cleanup(&db_path).await;
}
