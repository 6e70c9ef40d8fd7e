//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `contact` table (one row per submitted message, append-only)
/// - `idx_contact_created_at` backing the newest-first listing
///
/// SQLite ignores VARCHAR length limits; they are declared to keep the DDL
/// portable to servers that enforce them.
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Contact messages
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS contact (
    id INTEGER PRIMARY KEY NOT NULL,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(120) NOT NULL,
    mobile VARCHAR(20) NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_contact_created_at ON contact(created_at);
"#;
