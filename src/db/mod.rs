//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and migrations
//! - SQLite pragma configuration
//! - Repository layer for valuations and the price-history ledger

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::{ContactDetails, PriceHistorySummary, RecordChangeError, RepoError, Repository, ValuationRecord};
