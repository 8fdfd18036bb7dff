use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension};

use crate::db::Storage;
use crate::error::Result;

/// Persistent key-value store backed by SQLite. Values are JSON arrays,
/// one per record collection, mirroring the device-local layout.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// Ephemeral database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "journal_mode", "WAL").ok();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        log::info!("SQLite store ready");
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }
}

impl Storage for SqliteStore {
    fn read_key(&self, key: &str) -> Result<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| crate::error::JournalError::Database(e.to_string()))?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_key(&self, key: &str, value: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| crate::error::JournalError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?, ?, strftime('%s', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Side, Trade};
    use chrono::NaiveDate;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn make_trade(id: &str, user_id: &str, pl: f64) -> Trade {
        Trade {
            id: id.to_string(),
            user_id: user_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            asset: "XAUUSD".to_string(),
            side: Side::Buy,
            lot_size: 0.5,
            profit_loss: pl,
            notes: String::new(),
            setup: None,
            rules_followed: true,
            r_multiple: None,
            stop_loss: None,
            session: None,
            auto_flags: Vec::new(),
        }
    }

    #[test]
    fn test_upsert_and_list_trades() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_trade(&make_trade("t1", "u1", 100.0)).unwrap();
        store.upsert_trade(&make_trade("t2", "u1", -50.0)).unwrap();
        store.upsert_trade(&make_trade("t3", "u2", 25.0)).unwrap();

        let trades = store.list_trades("u1").unwrap();
        assert_eq!(trades.len(), 2);
        assert!(trades.iter().all(|t| t.user_id == "u1"));
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_trade(&make_trade("t1", "u1", 100.0)).unwrap();
        store.upsert_trade(&make_trade("t1", "u1", 250.0)).unwrap();

        let trades = store.list_trades("u1").unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].profit_loss, 250.0);
    }

    #[test]
    fn test_bulk_delete_returns_removed_count() {
        let store = SqliteStore::open_in_memory().unwrap();
        for i in 0..4 {
            store
                .upsert_trade(&make_trade(&format!("t{}", i), "u1", 10.0))
                .unwrap();
        }
        let removed = store
            .delete_trades("u1", &["t0".to_string(), "t2".to_string(), "missing".to_string()])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.list_trades("u1").unwrap().len(), 2);
    }

    #[test]
    fn test_delete_scoped_to_owner() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_trade(&make_trade("t1", "u1", 10.0)).unwrap();
        let removed = store.delete_trades("u2", &["t1".to_string()]).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(store.list_trades("u1").unwrap().len(), 1);
    }

    #[test]
    fn test_persists_across_reopen() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteStore::open(path).unwrap();
            store.upsert_trade(&make_trade("t1", "u1", 100.0)).unwrap();
        }

        let store = SqliteStore::open(path).unwrap();
        assert_eq!(store.list_trades("u1").unwrap().len(), 1);
    }

    #[test]
    fn test_user_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut user = crate::models::User::new(
            "u1".to_string(),
            "trader@example.com".to_string(),
            "Trader".to_string(),
        );
        store.upsert_user(&user).unwrap();

        user.xp = 500;
        store.upsert_user(&user).unwrap();

        let loaded = store.get_user("u1").unwrap().unwrap();
        assert_eq!(loaded.xp, 500);
        assert_eq!(store.list_users().unwrap().len(), 1);
    }
}
