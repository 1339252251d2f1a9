//! Lazy capture: versions are assigned when a change is observed, history
//! rows are written when the change's post-state is first visible.

use duckdb::Connection;
use tracing::warn;

use crate::classify::{statement_head, StatementHead};
use crate::error::TtError;
use crate::ident::quote_ident;
use crate::track::{bump_version, history_table, tracked_table, user_columns};

/// Per-session capture state. Owned next to the `Connection`; ordering
/// guarantees are scoped to one session.
#[derive(Debug, Default)]
pub struct SessionState {
    capturing: bool,
    pending: Option<PendingCapture>,
}

#[derive(Debug)]
struct PendingCapture {
    table: String,
    pk_column: String,
    version: i64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a change has been observed whose post-state is not yet in
    /// the history table.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Begin-of-statement event. Call once before executing any user statement.
///
/// A capture left pending by the previous statement is flushed first; by now
/// that statement's effects are visible. If the new statement is DML against
/// a tracked table, a version is assigned and a fresh capture becomes
/// pending. Never fails: capture problems are logged and the user statement
/// proceeds untouched.
pub fn observe_statement(conn: &Connection, state: &mut SessionState, sql: &str) {
    if state.capturing {
        return;
    }
    state.capturing = true;
    flush_pending(conn, state);
    if let StatementHead::Dml { target } = statement_head(sql) {
        match begin_capture(conn, &target) {
            Ok(pending) => state.pending = pending,
            Err(e) => warn!(table = %target, "change will not be captured: {e}"),
        }
    }
    state.capturing = false;
}

/// Flushes any pending capture so temporal reads see settled history.
pub fn settle(conn: &Connection, state: &mut SessionState) {
    if state.capturing {
        return;
    }
    state.capturing = true;
    flush_pending(conn, state);
    state.capturing = false;
}

fn flush_pending(conn: &Connection, state: &mut SessionState) {
    if let Some(pending) = state.pending.take() {
        if let Err(e) = flush_capture(conn, &pending) {
            warn!(
                table = %pending.table,
                version = pending.version,
                "history capture lost: {e}"
            );
        }
    }
}

fn begin_capture(conn: &Connection, target: &str) -> Result<Option<PendingCapture>, TtError> {
    // Engine bookkeeping and history tables are never themselves captured.
    if target.starts_with("_stps_") {
        return Ok(None);
    }
    let Some(tracked) = tracked_table(conn, target)? else {
        return Ok(None);
    };
    let version = bump_version(conn, &tracked.table_name)?;
    Ok(Some(PendingCapture {
        table: tracked.table_name,
        pk_column: tracked.pk_column,
        version,
    }))
}

/// Reconciles history with the table's current contents at the pending
/// version: one SNAPSHOT row per live row, then a DELETE tombstone for every
/// primary key whose latest history row is not already a DELETE and which no
/// longer appears in the table.
fn flush_capture(conn: &Connection, pending: &PendingCapture) -> Result<(), TtError> {
    let columns = user_columns(conn, &pending.table)?;
    let col_list = columns
        .iter()
        .map(|(n, _)| quote_ident(n))
        .collect::<Vec<_>>()
        .join(", ");
    let history = quote_ident(&history_table(&pending.table));
    let table = quote_ident(&pending.table);
    let pk = quote_ident(&pending.pk_column);
    let version = pending.version;

    let snapshot = format!(
        "INSERT INTO {} SELECT {}, {}, 'SNAPSHOT', current_timestamp, CAST({} AS VARCHAR) FROM {}",
        history, col_list, version, pk, table
    );
    conn.execute(&snapshot, [])?;

    let tombstones = format!(
        r#"
        INSERT INTO {history}
        SELECT {cols}, {version}, 'DELETE', current_timestamp, "_tt_pk_value"
          FROM (
            SELECT *,
                   ROW_NUMBER() OVER (PARTITION BY "_tt_pk_value" ORDER BY "_tt_version" DESC) AS rn
              FROM {history}
             WHERE "_tt_version" < {version}
          ) h
         WHERE rn = 1
           AND "_tt_operation" <> 'DELETE'
           AND NOT EXISTS (SELECT 1 FROM {table} t WHERE CAST(t.{pk} AS VARCHAR) = h."_tt_pk_value")
        "#,
        history = history,
        cols = col_list,
        version = version,
        table = table,
        pk = pk
    );
    conn.execute(&tombstones, [])?;
    Ok(())
}
