//! Domain types for property valuation and the price-history ledger.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper
//! - The valuation request and its enumerations
//! - The evaluation result contract (coefficients, clauses, recommendations)
//! - Price-change arithmetic shared with the listing ledger

pub mod decimal;
pub mod price_history;
pub mod request;
pub mod result;

pub use decimal::Decimal;
pub use price_history::{
    ChangeType, NewPriceChange, PriceChange, PriceHistoryEntry, PriceHistoryError,
};
pub use request::{Condition, DealType, PropertyCategory, ValuationRequest};
pub use result::{
    AppliedCoefficient, CoefficientKind, EvaluationResult, MarketClause, Priority,
    Recommendation, RecommendationType, Season,
};
