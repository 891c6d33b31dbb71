//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by domain:
//! - `valuations.rs` - Valuation records keyed by token
//! - `price_history.rs` - Per-property price-change ledger

mod price_history;
mod valuations;

pub use price_history::{PriceHistorySummary, RecordChangeError};
pub use valuations::{ContactDetails, ValuationRecord};

use crate::domain::Decimal;
use sqlx::sqlite::SqlitePool;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("corrupt {column} value: {value}")]
    Corrupt { column: &'static str, value: String },
    #[error("background task failed: {0}")]
    Task(String),
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Decimals are stored as canonical TEXT to keep them lossless.
fn parse_decimal(column: &'static str, value: &str) -> Result<Decimal, RepoError> {
    Decimal::from_str(value).map_err(|_| RepoError::Corrupt {
        column,
        value: value.to_string(),
    })
}

fn parse_millis(
    column: &'static str,
    ms: i64,
) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    chrono::DateTime::from_timestamp_millis(ms).ok_or(RepoError::Corrupt {
        column,
        value: ms.to_string(),
    })
}
