//! Temporal reads over history tables: state at a version or instant, the
//! full change log, and version-to-version diffs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use duckdb::types::Value;
use duckdb::Connection;
use serde::Serialize;

use crate::error::TtError;
use crate::ident::{quote_ident, quote_literal};
use crate::track::{history_table, tracked_table, user_columns};

/// Point in history: an explicit version or a wall-clock instant.
#[derive(Debug, Clone, Copy)]
pub enum TimePoint {
    Version(i64),
    AsOf(DateTime<Utc>),
}

/// Materialized result of a temporal read, user columns only.
#[derive(Debug, Clone)]
pub struct Grid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// One history row with its column diffs against the previous row for the
/// same primary key.
#[derive(Debug, Clone)]
pub struct LogRow {
    pub version: i64,
    pub operation: String,
    pub timestamp: String,
    pub pk_value: String,
    pub values: Vec<Value>,
    pub changes: Vec<ChangeEntry>,
}

/// One row of a version-to-version diff.
#[derive(Debug, Clone)]
pub struct DiffRow {
    pub pk_value: String,
    pub change_type: String,
    pub values: Vec<Value>,
    pub changes: Vec<ChangeEntry>,
}

/// A single column difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    pub column: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Reconstructs the table's contents as of `point`.
pub fn rows_at(conn: &Connection, table: &str, point: TimePoint) -> Result<Grid, TtError> {
    let tracked =
        tracked_table(conn, table)?.ok_or_else(|| TtError::NotTracked(table.to_string()))?;
    let names = history_user_columns(conn, &tracked.table_name)?;
    let rows = state_at(conn, &tracked.table_name, &names, point)?;
    Ok(Grid {
        columns: names,
        rows: rows.into_iter().map(|(_, values)| values).collect(),
    })
}

/// Full history of a tracked table, oldest first, with per-row diffs.
pub fn log(conn: &Connection, table: &str) -> Result<Vec<LogRow>, TtError> {
    let tracked =
        tracked_table(conn, table)?.ok_or_else(|| TtError::NotTracked(table.to_string()))?;
    let names = history_user_columns(conn, &tracked.table_name)?;
    let history = quote_ident(&history_table(&tracked.table_name));
    let col_list = names
        .iter()
        .map(|n| quote_ident(n))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT \"_tt_version\", \"_tt_operation\", CAST(\"_tt_timestamp\" AS VARCHAR), \
         \"_tt_pk_value\", {} FROM {} ORDER BY \"_tt_version\", \"_tt_pk_value\"",
        col_list, history
    );
    let mut stmt = conn.prepare(&sql)?;
    let n = names.len();
    let raw = stmt.query_map([], move |r| {
        Ok(LogRow {
            version: r.get(0)?,
            operation: r.get(1)?,
            timestamp: r.get(2)?,
            pk_value: r.get(3)?,
            values: (0..n)
                .map(|i| r.get::<_, Value>(i + 4))
                .collect::<Result<_, _>>()?,
            changes: Vec::new(),
        })
    })?;
    let mut rows: Vec<LogRow> = raw.filter_map(Result::ok).collect();

    let mut last: HashMap<String, Vec<Value>> = HashMap::new();
    for row in &mut rows {
        if let Some(prev) = last.get(&row.pk_value) {
            row.changes = column_diffs(&names, prev, &row.values);
        }
        last.insert(row.pk_value.clone(), row.values.clone());
    }
    Ok(rows)
}

/// Row-level differences between two reconstructed states, ordered by
/// primary key. Unchanged rows are omitted.
pub fn diff(
    conn: &Connection,
    table: &str,
    from_version: i64,
    to_version: i64,
) -> Result<Vec<DiffRow>, TtError> {
    let tracked =
        tracked_table(conn, table)?.ok_or_else(|| TtError::NotTracked(table.to_string()))?;
    let names = history_user_columns(conn, &tracked.table_name)?;
    let before = state_at(conn, &tracked.table_name, &names, TimePoint::Version(from_version))?;
    let after = state_at(conn, &tracked.table_name, &names, TimePoint::Version(to_version))?;

    let mut before: HashMap<String, Vec<Value>> = before.into_iter().collect();
    let mut out = Vec::new();
    for (pk, values) in after {
        match before.remove(&pk) {
            None => out.push(DiffRow {
                pk_value: pk,
                change_type: "INSERT".to_string(),
                values,
                changes: Vec::new(),
            }),
            Some(prev) => {
                if prev != values {
                    let changes = column_diffs(&names, &prev, &values);
                    out.push(DiffRow {
                        pk_value: pk,
                        change_type: "UPDATE".to_string(),
                        values,
                        changes,
                    });
                }
            }
        }
    }
    for (pk, values) in before {
        out.push(DiffRow {
            pk_value: pk,
            change_type: "DELETE".to_string(),
            values,
            changes: Vec::new(),
        });
    }
    out.sort_by(|a, b| a.pk_value.cmp(&b.pk_value));
    Ok(out)
}

/// User columns as recorded in the history table. Reading the schema from
/// history keeps temporal reads working even after the live table is altered
/// or dropped.
fn history_user_columns(conn: &Connection, table: &str) -> Result<Vec<String>, TtError> {
    let all = user_columns(conn, &history_table(table))?;
    Ok(all
        .into_iter()
        .map(|(n, _)| n)
        .filter(|n| !n.starts_with("_tt_"))
        .collect())
}

/// Latest non-DELETE row per primary key within the window, keyed by
/// `_tt_pk_value`.
fn state_at(
    conn: &Connection,
    table: &str,
    columns: &[String],
    point: TimePoint,
) -> Result<Vec<(String, Vec<Value>)>, TtError> {
    let history = quote_ident(&history_table(table));
    let col_list = columns
        .iter()
        .map(|n| quote_ident(n))
        .collect::<Vec<_>>()
        .join(", ");
    let window = match point {
        TimePoint::Version(v) => format!("\"_tt_version\" <= {}", v),
        TimePoint::AsOf(ts) => format!(
            "\"_tt_timestamp\" <= TIMESTAMP {}",
            quote_literal(&ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string())
        ),
    };
    let sql = format!(
        r#"
        SELECT "_tt_pk_value", {cols}
          FROM (
            SELECT *,
                   ROW_NUMBER() OVER (PARTITION BY "_tt_pk_value" ORDER BY "_tt_version" DESC) AS rn
              FROM {history}
             WHERE {window}
          ) h
         WHERE rn = 1 AND "_tt_operation" <> 'DELETE'
         ORDER BY "_tt_pk_value"
        "#,
        cols = col_list,
        history = history,
        window = window
    );
    let mut stmt = conn.prepare(&sql)?;
    let n = columns.len();
    let rows = stmt.query_map([], move |r| {
        let pk: String = r.get(0)?;
        let mut values = Vec::with_capacity(n);
        for i in 0..n {
            values.push(r.get::<_, Value>(i + 1)?);
        }
        Ok((pk, values))
    })?;
    Ok(rows.filter_map(Result::ok).collect())
}

fn column_diffs(names: &[String], from: &[Value], to: &[Value]) -> Vec<ChangeEntry> {
    names
        .iter()
        .zip(from.iter().zip(to.iter()))
        .filter(|(_, (f, t))| f != t)
        .map(|(name, (f, t))| ChangeEntry {
            column: name.clone(),
            from: display_value(f),
            to: display_value(t),
        })
        .collect()
}

/// Plain-text rendering for diff output; `None` for SQL NULL.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Boolean(b) => Some(b.to_string()),
        Value::TinyInt(v) => Some(v.to_string()),
        Value::SmallInt(v) => Some(v.to_string()),
        Value::Int(v) => Some(v.to_string()),
        Value::BigInt(v) => Some(v.to_string()),
        Value::HugeInt(v) => Some(v.to_string()),
        Value::UTinyInt(v) => Some(v.to_string()),
        Value::USmallInt(v) => Some(v.to_string()),
        Value::UInt(v) => Some(v.to_string()),
        Value::UBigInt(v) => Some(v.to_string()),
        Value::Float(v) => Some(v.to_string()),
        Value::Double(v) => Some(v.to_string()),
        Value::Text(s) => Some(s.clone()),
        other => Some(format!("{:?}", other)),
    }
}
