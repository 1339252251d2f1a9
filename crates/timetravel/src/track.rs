//! Tracking lifecycle: bookkeeping table, enable, disable, status.

use duckdb::{params, Connection, OptionalExt};
use serde::Serialize;
use tracing::warn;

use crate::error::TtError;
use crate::ident::quote_ident;

pub(crate) fn history_table(table: &str) -> String {
    format!("_stps_history_{}", table)
}

fn index_name(table: &str) -> String {
    format!("_stps_tt_idx_{}", table)
}

/// One row of the bookkeeping table.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedTable {
    pub table_name: String,
    pub pk_column: String,
    pub current_version: i64,
    pub created_at: String,
}

/// The bookkeeping table is created lazily on first enable; everything else
/// treats its absence as "nothing tracked".
fn meta_exists(conn: &Connection) -> Result<bool, TtError> {
    let row: Option<i32> = conn
        .query_row(
            "SELECT 1 FROM information_schema.tables WHERE table_name = '_stps_tt_tables'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(row.is_some())
}

pub(crate) fn tracked_table(
    conn: &Connection,
    table: &str,
) -> Result<Option<TrackedTable>, TtError> {
    if !meta_exists(conn)? {
        return Ok(None);
    }
    // Unquoted identifiers resolve case-insensitively in the engine, so the
    // lookup does too.
    let row = conn
        .query_row(
            "SELECT table_name, pk_column, current_version, CAST(created_at AS VARCHAR) \
             FROM \"_stps_tt_tables\" WHERE lower(table_name) = lower(?)",
            params![table],
            |r| {
                Ok(TrackedTable {
                    table_name: r.get(0)?,
                    pk_column: r.get(1)?,
                    current_version: r.get(2)?,
                    created_at: r.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

/// Enumerates the bookkeeping table.
pub fn status(conn: &Connection) -> Result<Vec<TrackedTable>, TtError> {
    if !meta_exists(conn)? {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare(
        "SELECT table_name, pk_column, current_version, CAST(created_at AS VARCHAR) \
         FROM \"_stps_tt_tables\" ORDER BY table_name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(TrackedTable {
            table_name: r.get(0)?,
            pk_column: r.get(1)?,
            current_version: r.get(2)?,
            created_at: r.get(3)?,
        })
    })?;
    Ok(rows.filter_map(Result::ok).collect())
}

/// Column names and declared types of a table, in ordinal order.
pub(crate) fn user_columns(
    conn: &Connection,
    table: &str,
) -> Result<Vec<(String, String)>, TtError> {
    let mut stmt = conn.prepare(
        "SELECT column_name, data_type FROM information_schema.columns \
         WHERE table_name = ? \
           AND table_schema NOT IN ('information_schema', 'pg_catalog') \
         ORDER BY ordinal_position",
    )?;
    let rows = stmt.query_map(params![table], |r| Ok((r.get(0)?, r.get(1)?)))?;
    Ok(rows.filter_map(Result::ok).collect())
}

/// Atomic bump and point read; correctness relies on the engine's
/// per-statement atomicity, not on locks held here.
pub(crate) fn bump_version(conn: &Connection, table: &str) -> Result<i64, TtError> {
    conn.execute(
        "UPDATE \"_stps_tt_tables\" SET current_version = current_version + 1 \
         WHERE table_name = ?",
        params![table],
    )?;
    let version = conn.query_row(
        "SELECT current_version FROM \"_stps_tt_tables\" WHERE table_name = ?",
        params![table],
        |r| r.get(0),
    )?;
    Ok(version)
}

/// Starts tracking a table. Creates the history table mirroring all user
/// columns plus the metadata columns, registers the bookkeeping row and
/// snapshots every existing row at version 0, all in one transaction. The
/// secondary index is created after commit; its failure is non-fatal.
pub fn enable(conn: &Connection, table: &str, pk_column: &str) -> Result<String, TtError> {
    if pk_column.contains(',') {
        return Err(TtError::CompositeKey(pk_column.to_string()));
    }
    // Binder errors on a LIMIT 0 probe double as the existence check.
    conn.prepare(&format!("SELECT * FROM {} LIMIT 0", quote_ident(table)))
        .map_err(|_| TtError::NoSuchTable(table.to_string()))?;

    let pk_known: Option<i32> = conn
        .query_row(
            "SELECT 1 FROM information_schema.columns \
             WHERE table_name = ? AND column_name = ? \
               AND table_schema NOT IN ('information_schema', 'pg_catalog')",
            params![table, pk_column],
            |r| r.get(0),
        )
        .optional()?;
    if pk_known.is_none() {
        return Err(TtError::NoSuchColumn {
            table: table.to_string(),
            column: pk_column.to_string(),
        });
    }

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"_stps_tt_tables\" (\
         table_name VARCHAR, pk_column VARCHAR, current_version BIGINT, created_at TIMESTAMP)",
    )?;
    if tracked_table(conn, table)?.is_some() {
        return Err(TtError::AlreadyTracked(table.to_string()));
    }

    let columns = user_columns(conn, table)?;
    let history = quote_ident(&history_table(table));
    let mut ddl = format!("CREATE TABLE {} (", history);
    for (i, (name, ty)) in columns.iter().enumerate() {
        if i > 0 {
            ddl.push_str(", ");
        }
        ddl.push_str(&quote_ident(name));
        ddl.push(' ');
        ddl.push_str(ty);
    }
    ddl.push_str(
        ", \"_tt_version\" BIGINT, \"_tt_operation\" VARCHAR, \
         \"_tt_timestamp\" TIMESTAMP, \"_tt_pk_value\" VARCHAR)",
    );

    let col_list = columns
        .iter()
        .map(|(n, _)| quote_ident(n))
        .collect::<Vec<_>>()
        .join(", ");
    let snapshot = format!(
        "INSERT INTO {} SELECT {}, 0, 'INSERT', current_timestamp, CAST({} AS VARCHAR) FROM {}",
        history,
        col_list,
        quote_ident(pk_column),
        quote_ident(table)
    );

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&ddl)?;
    tx.execute(
        "INSERT INTO \"_stps_tt_tables\" VALUES (?, ?, 0, current_timestamp)",
        params![table, pk_column],
    )?;
    tx.execute(&snapshot, [])?;
    tx.commit()?;

    let idx = format!(
        "CREATE INDEX {} ON {} (\"_tt_pk_value\", \"_tt_version\")",
        quote_ident(&index_name(table)),
        history
    );
    if let Err(e) = conn.execute_batch(&idx) {
        warn!(table = %table, "history index not created: {e}");
    }

    Ok(format!(
        "Time travel enabled for table '{}' with primary key '{}'",
        table, pk_column
    ))
}

/// Stops tracking a table: drops its history and removes the bookkeeping
/// row. User data is untouched.
pub fn disable(conn: &Connection, table: &str) -> Result<String, TtError> {
    let Some(tracked) = tracked_table(conn, table)? else {
        return Err(TtError::NotTracked(table.to_string()));
    };
    let history = quote_ident(&history_table(&tracked.table_name));
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", history))?;
    tx.execute(
        "DELETE FROM \"_stps_tt_tables\" WHERE table_name = ?",
        params![tracked.table_name],
    )?;
    tx.commit()?;
    Ok(format!(
        "Time travel disabled for table '{}'",
        tracked.table_name
    ))
}
