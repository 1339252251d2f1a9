//! Table-level time travel for DuckDB.
//!
//! Tracks per-table change history through lazy reconciliation:
//!
//! - `track`: enable/disable/status and the bookkeeping table
//! - `capture`: per-session observation protocol and deferred flush
//! - `query`: temporal reads (state as of a point, change log, diffs)
//!
//! The engine never intercepts execution. Callers route every statement
//! through [`observe_statement`] before running it and call [`settle`]
//! before temporal reads; a statement's history rows are written when the
//! next statement (or a settle) makes its post-state observable.

mod classify;
mod ident;

pub mod capture;
pub mod error;
pub mod query;
pub mod track;

pub use capture::{observe_statement, settle, SessionState};
pub use error::TtError;
pub use query::{diff, log, rows_at, ChangeEntry, DiffRow, Grid, LogRow, TimePoint};
pub use track::{disable, enable, status, TrackedTable};
