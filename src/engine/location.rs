//! Location classification from free-text addresses.

use super::market::LocationKeywords;
use crate::domain::Decimal;
use serde::{Deserialize, Serialize};

/// Location tier with its fixed price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationTier {
    Premium,
    AboveAverage,
    Good,
    BelowAverage,
    Neutral,
}

impl LocationTier {
    pub fn multiplier(&self) -> Decimal {
        match self {
            LocationTier::Premium => Decimal::from_parts(150, 2),
            LocationTier::AboveAverage => Decimal::from_parts(125, 2),
            LocationTier::Good => Decimal::from_parts(110, 2),
            LocationTier::BelowAverage => Decimal::from_parts(95, 2),
            LocationTier::Neutral => Decimal::one(),
        }
    }
}

/// Maps an address to a location tier.
///
/// Implementations may use keyword lists, geocoded districts, or anything
/// else; the pipeline only sees the tier.
pub trait LocationClassifier: Send + Sync {
    fn classify(&self, address: &str) -> LocationTier;
}

/// Case-insensitive substring matching against per-tier keyword lists.
///
/// Tiers are checked from premium down; the first match wins.
#[derive(Debug, Clone)]
pub struct KeywordLocationClassifier {
    tiers: Vec<(LocationTier, Vec<String>)>,
}

impl KeywordLocationClassifier {
    pub fn new(keywords: &LocationKeywords) -> Self {
        let lower = |list: &[String]| list.iter().map(|k| k.to_lowercase()).collect::<Vec<_>>();
        Self {
            tiers: vec![
                (LocationTier::Premium, lower(&keywords.premium)),
                (LocationTier::AboveAverage, lower(&keywords.above_average)),
                (LocationTier::Good, lower(&keywords.good)),
                (LocationTier::BelowAverage, lower(&keywords.below_average)),
            ],
        }
    }
}

impl Default for KeywordLocationClassifier {
    fn default() -> Self {
        Self::new(&LocationKeywords::default())
    }
}

impl LocationClassifier for KeywordLocationClassifier {
    fn classify(&self, address: &str) -> LocationTier {
        let address = address.to_lowercase();
        self.tiers
            .iter()
            .find(|(_, words)| {
                words
                    .iter()
                    .any(|w| !w.is_empty() && address.contains(w.as_str()))
            })
            .map(|(tier, _)| *tier)
            .unwrap_or(LocationTier::Neutral)
    }
}
