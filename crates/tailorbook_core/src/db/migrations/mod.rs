//! Schema history of the shop database.
//!
//! Each step is a numbered SQL file. The number of the last applied step is
//! kept in `PRAGMA user_version`, so a fresh file, an up-to-date file and a
//! file from an older build all go through [`apply_migrations`].

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

// Append only; versions start at 1 and increase by one.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "init_collections",
    sql: include_str!("0001_init.sql"),
}];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// All pending steps commit together or not at all. A database that is
/// already current is left alone.
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the file is ahead of this build.
/// - [`DbError::Sqlite`] when a step fails; the file keeps its old version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = read_schema_version(conn)?;
    let pending = pending_after(found)?;
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        stamp_schema_version(&tx, step.version)?;
        info!(
            "event=db_migrate module=db status=ok from={found} version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;
    Ok(())
}

fn pending_after(found: u32) -> DbResult<&'static [Migration]> {
    let latest = latest_version();
    if found > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }
    let applied = MIGRATIONS
        .iter()
        .take_while(|migration| migration.version <= found)
        .count();
    Ok(&MIGRATIONS[applied..])
}

fn read_schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

fn stamp_schema_version(tx: &Transaction<'_>, version: u32) -> DbResult<()> {
    tx.pragma_update(None, "user_version", version)?;
    Ok(())
}
