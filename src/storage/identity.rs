use rusqlite::{Connection, OptionalExtension, Result as SqlResult, params};
use std::path::Path;

const IDENTITY_DB_PATH: &str = "data/identity.db";

/// Persisted local identity: a single durable user id, written at login,
/// read once at startup, cleared at logout.
pub struct IdentityStore {
    conn: Connection,
}

impl IdentityStore {
    /// Open the store at its fixed default location.
    pub fn open_default() -> SqlResult<Self> {
        Self::with_path(IDENTITY_DB_PATH)
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> SqlResult<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> SqlResult<()> {
        // Single-row table
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS identity (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                user_id TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )",
            [],
        )?;
        Ok(())
    }

    pub fn load(&self) -> SqlResult<Option<String>> {
        self.conn
            .query_row("SELECT user_id FROM identity WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
    }

    /// Save the identity (replace if one exists, keeping the original
    /// creation time).
    pub fn save(&self, user_id: &str) -> SqlResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO identity (id, user_id, created_at)
             VALUES (1, ?1, COALESCE((SELECT created_at FROM identity WHERE id = 1), strftime('%s', 'now')))",
            params![user_id],
        )?;
        Ok(())
    }

    pub fn clear(&self) -> SqlResult<()> {
        self.conn.execute("DELETE FROM identity", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = IdentityStore::in_memory().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = IdentityStore::in_memory().unwrap();
        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn save_replaces_existing_identity() {
        let store = IdentityStore::in_memory().unwrap();
        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap(), Some("second".to_string()));
    }

    #[test]
    fn clear_removes_identity() {
        let store = IdentityStore::in_memory().unwrap();
        store.save("abc123").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
