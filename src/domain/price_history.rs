//! Price-history ledger entries for listed properties.

use super::Decimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Increase => "increase",
            ChangeType::Decrease => "decrease",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "increase" => Some(ChangeType::Increase),
            "decrease" => Some(ChangeType::Decrease),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceHistoryError {
    #[error("new price must differ from the current price {0}")]
    UnchangedPrice(Decimal),
    #[error("new price must be positive, got {0}")]
    NonPositivePrice(Decimal),
}

/// Delta arithmetic between two listing prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub old_price: Option<Decimal>,
    pub new_price: Decimal,
    pub delta: Decimal,
    pub delta_percent: Decimal,
    pub change_type: ChangeType,
}

impl PriceChange {
    /// Compute the change from `old_price` to `new_price`.
    ///
    /// A missing old price is the first price on record: zero delta,
    /// classified as an increase.
    pub fn compute(old_price: Option<Decimal>, new_price: Decimal) -> Result<Self, PriceHistoryError> {
        if !new_price.is_positive() {
            return Err(PriceHistoryError::NonPositivePrice(new_price));
        }

        let Some(old) = old_price else {
            return Ok(Self {
                old_price: None,
                new_price,
                delta: Decimal::zero(),
                delta_percent: Decimal::zero(),
                change_type: ChangeType::Increase,
            });
        };

        if old == new_price {
            return Err(PriceHistoryError::UnchangedPrice(old));
        }

        let delta = new_price - old;
        let delta_percent = if old.is_positive() {
            (delta / old * Decimal::hundred()).round_dp(2)
        } else {
            Decimal::zero()
        };
        let change_type = if delta.is_negative() {
            ChangeType::Decrease
        } else {
            ChangeType::Increase
        };

        Ok(Self {
            old_price: Some(old),
            new_price,
            delta,
            delta_percent,
            change_type,
        })
    }

    /// A move of five percent or more in either direction.
    pub fn is_significant(&self) -> bool {
        self.delta_percent.abs() >= Decimal::from(5i64)
    }
}

/// A ledger row: the price change plus who made it and when it applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryEntry {
    pub id: i64,
    pub property_id: i64,
    #[serde(flatten)]
    pub change: PriceChange,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub changed_by: Option<String>,
    pub auto_generated: bool,
    pub effective_date: DateTime<Utc>,
}

/// Input for appending a change to a property's ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPriceChange {
    pub property_id: i64,
    pub old_price: Option<Decimal>,
    pub new_price: Decimal,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub changed_by: Option<String>,
    pub effective_date: Option<DateTime<Utc>>,
}
