use thiserror::Error;

/// Errors surfaced by the time-travel engine.
///
/// Precondition failures name the offending table so operators can act on the
/// message alone; engine SQL failures pass the driver error through.
#[derive(Debug, Error)]
pub enum TtError {
    #[error("duckdb: {0}")]
    Duck(#[from] duckdb::Error),
    #[error("table '{0}' does not exist")]
    NoSuchTable(String),
    #[error("column '{column}' does not exist in table '{table}'")]
    NoSuchColumn { table: String, column: String },
    #[error("table '{0}' is already tracked for time travel")]
    AlreadyTracked(String),
    #[error("table '{0}' is not tracked for time travel")]
    NotTracked(String),
    #[error("composite primary keys are not supported, got '{0}'")]
    CompositeKey(String),
}
