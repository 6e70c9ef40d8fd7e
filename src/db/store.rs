use crate::db::models::{ContactMessage, NewContactMessage};
use crate::db::schema::SQLITE_INIT;
use crate::error::LetterboxError;
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use tracing::{info, warn};

/// SQLite-backed store for contact messages.
///
/// Cheap to clone (wraps a pool handle). Built once at startup, shared
/// through the router state, closed on shutdown.
#[derive(Debug, Clone)]
pub struct ContactStore {
    pool: SqlitePool,
}

impl ContactStore {
    /// Opens the database and applies the schema.
    ///
    /// With `recreate_on_init_failure` set and a file-backed URL, a failed
    /// open or schema init deletes the database file (plus WAL sidecars) and
    /// retries once on a fresh one. That path discards every stored message;
    /// it exists for local deployments with a stale or corrupt file and
    /// stays off unless explicitly enabled.
    pub async fn connect(
        database_url: &str,
        recreate_on_init_failure: bool,
    ) -> Result<Self, LetterboxError> {
        match Self::open_and_init(database_url).await {
            Ok(store) => Ok(store),
            Err(err) => {
                if !recreate_on_init_failure {
                    return Err(err);
                }
                let Some(db_file) = sqlite_file_path(database_url) else {
                    return Err(err);
                };
                warn!(
                    error = %err,
                    file = %db_file.display(),
                    "store init failed; recreate_on_init_failure is set, discarding the database file and starting over"
                );
                remove_store_files(&db_file)?;
                Self::open_and_init(database_url).await
            }
        }
    }

    async fn open_and_init(database_url: &str) -> Result<Self, LetterboxError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_opts)
            .await?;

        apply_schema(&pool).await?;

        info!("contact store initialized");
        Ok(Self { pool })
    }

    /// Inserts a new message, assigning `id` and `created_at`, and returns
    /// the row as stored. Runs in an explicit transaction; on failure the
    /// transaction drops uncommitted before the error is returned.
    pub async fn create(&self, new: NewContactMessage) -> Result<ContactMessage, LetterboxError> {
        // Fixed-width microseconds keep lexicographic order of the TEXT
        // column identical to chronological order.
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let mut tx = self.pool.begin().await?;
        let stored = sqlx::query_as::<_, ContactMessage>(
            r#"
        INSERT INTO contact (name, email, mobile, message, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, email, mobile, message, created_at
        "#,
        )
        .bind(new.name())
        .bind(new.email())
        .bind(new.mobile())
        .bind(new.message())
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(stored)
    }

    /// All messages, newest first. `id` breaks ties between same-instant
    /// inserts so the order is deterministic.
    pub async fn list_all(&self) -> Result<Vec<ContactMessage>, LetterboxError> {
        let rows = sqlx::query_as::<_, ContactMessage>(
            r#"
        SELECT id, name, email, mobile, message, created_at
        FROM contact
        ORDER BY created_at DESC, id DESC
        "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ContactMessage, LetterboxError> {
        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
        SELECT id, name, email, mobile, message, created_at
        FROM contact
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(LetterboxError::NotFound { id })
    }

    /// Closes the pool. Open on startup, close on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), LetterboxError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

/// Filesystem path behind a file-backed SQLite URL; `None` for in-memory
/// databases and non-SQLite URLs.
fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = if let Some(rest) = database_url.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = database_url.strip_prefix("sqlite:") {
        rest
    } else if database_url.contains("://") {
        return None;
    } else {
        database_url
    };

    let path = match rest.split_once('?') {
        Some((path, _)) => path,
        None => rest,
    };
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

fn remove_store_files(db_file: &Path) -> Result<(), LetterboxError> {
    for path in [
        db_file.to_path_buf(),
        sidecar(db_file, "-wal"),
        sidecar(db_file, "-shm"),
    ] {
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn sidecar(db_file: &Path, suffix: &str) -> PathBuf {
    let mut name = db_file.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
