//! Layout of the `kv` table and its version stamp.
//!
//! # Invariants
//! - The layout version lives in `PRAGMA user_version`.
//! - Files stamped with a newer version are refused, never rewritten.
//! - Version 0 means a fresh file; the table is created and stamped in one
//!   transaction.

use super::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;
use std::time::Duration;

/// Layout version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const KV_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Creates the `kv` table on fresh files and checks the stamp on old ones.
pub(super) fn prepare(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(KV_TABLE_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    info!("event=kv_schema module=store status=ok from={found} to={SCHEMA_VERSION}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{prepare, SCHEMA_VERSION};
    use crate::store::StoreError;
    use rusqlite::Connection;

    fn version(conn: &Connection) -> u32 {
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn prepare_twice_keeps_stamp() {
        let mut conn = Connection::open_in_memory().unwrap();
        prepare(&mut conn).unwrap();
        prepare(&mut conn).unwrap();
        assert_eq!(version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn newer_stamp_is_refused() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 7;").unwrap();
        let err = prepare(&mut conn).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedSchemaVersion { found: 7, .. }
        ));
    }
}
