//! German bank-data tooling over DuckDB.
//!
//! Ties the workspace crates together behind one session type:
//!
//! - account validation (`kontocheck`) and the routing-number lookup table
//!   (`blz-lut`) behind the scalar surface in [`surface`] and the IBAN path
//!   in [`iban`]
//! - table-level time travel (`timetravel`) wired to the session's
//!   connection, with every statement routed through the capture protocol
//!
//! [`Stps`] owns the connection, the per-session capture state and the
//! lookup-table store. Statements must go through [`Stps::run`] or
//! [`Stps::query_map`] for history capture to observe them; the `tt_*`
//! methods settle pending captures before reading history.

pub mod iban;
pub mod surface;

use std::path::Path;

use duckdb::Connection;
use thiserror::Error;
use timetravel::SessionState;

pub use blz_lut::{LutError, LutStore};
pub use kontocheck::{validate, CheckResult};
pub use timetravel::{
    ChangeEntry, DiffRow, Grid, LogRow, TimePoint, TrackedTable, TtError,
};

#[derive(Debug, Error)]
pub enum StpsError {
    #[error("duckdb: {0}")]
    Duck(#[from] duckdb::Error),
    #[error(transparent)]
    TimeTravel(#[from] TtError),
}

/// One engine session: a connection, its capture state, and the
/// lookup-table store shared by the validation surface.
pub struct Stps {
    conn: Connection,
    state: SessionState,
    lut: LutStore,
}

impl Stps {
    /// In-memory session with environment-derived lookup-table settings.
    pub fn open_in_memory() -> Result<Self, StpsError> {
        Ok(Self::with_store(
            Connection::open_in_memory()?,
            LutStore::from_env(),
        ))
    }

    /// Session on a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StpsError> {
        Ok(Self::with_store(Connection::open(path)?, LutStore::from_env()))
    }

    /// Wires an existing connection to an explicit store. Tests use this to
    /// keep the process environment out of play.
    pub fn with_store(conn: Connection, lut: LutStore) -> Self {
        Self {
            conn,
            state: SessionState::new(),
            lut,
        }
    }

    pub fn lut(&self) -> &LutStore {
        &self.lut
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Executes one statement through the capture protocol. Returns the
    /// changed row count.
    pub fn run(&mut self, sql: &str) -> Result<usize, StpsError> {
        timetravel::observe_statement(&self.conn, &mut self.state, sql);
        Ok(self.conn.execute(sql, [])?)
    }

    /// Runs a read through the capture protocol, materializing rows with
    /// `f`.
    pub fn query_map<T>(
        &mut self,
        sql: &str,
        f: impl FnMut(&duckdb::Row<'_>) -> duckdb::Result<T>,
    ) -> Result<Vec<T>, StpsError> {
        timetravel::observe_statement(&self.conn, &mut self.state, sql);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], f)?;
        Ok(rows.filter_map(Result::ok).collect())
    }

    /// Starts history tracking; any pending capture settles first so the
    /// version-0 snapshot reflects the statement that preceded it.
    pub fn tt_enable(&mut self, table: &str, pk_column: &str) -> Result<String, StpsError> {
        timetravel::settle(&self.conn, &mut self.state);
        Ok(timetravel::enable(&self.conn, table, pk_column)?)
    }

    pub fn tt_disable(&mut self, table: &str) -> Result<String, StpsError> {
        timetravel::settle(&self.conn, &mut self.state);
        Ok(timetravel::disable(&self.conn, table)?)
    }

    pub fn tt_status(&mut self) -> Result<Vec<TrackedTable>, StpsError> {
        timetravel::settle(&self.conn, &mut self.state);
        Ok(timetravel::status(&self.conn)?)
    }

    /// The tracked table's contents as of a version or instant.
    pub fn tt_at(&mut self, table: &str, point: TimePoint) -> Result<Grid, StpsError> {
        timetravel::settle(&self.conn, &mut self.state);
        Ok(timetravel::rows_at(&self.conn, table, point)?)
    }

    pub fn tt_log(&mut self, table: &str) -> Result<Vec<LogRow>, StpsError> {
        timetravel::settle(&self.conn, &mut self.state);
        Ok(timetravel::log(&self.conn, table)?)
    }

    pub fn tt_diff(
        &mut self,
        table: &str,
        from_version: i64,
        to_version: i64,
    ) -> Result<Vec<DiffRow>, StpsError> {
        timetravel::settle(&self.conn, &mut self.state);
        Ok(timetravel::diff(&self.conn, table, from_version, to_version)?)
    }

    /// Validation with the routing number picking the method via the
    /// session's lookup table.
    pub fn validate_account_for_blz(&self, account: &str, blz: &str) -> CheckResult {
        surface::validate_account_for_blz(&self.lut, account, blz)
    }

    /// Standard IBAN validation including the German deep check.
    pub fn is_valid_iban(&self, iban: &str) -> bool {
        iban::validate_iban(&self.lut, iban)
    }
}
