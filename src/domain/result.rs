//! Evaluation result: the engine's stable output contract.
//!
//! Field names are serialized in camelCase and are read verbatim by the
//! report renderer and by anything that loads a stored valuation.

use super::{Decimal, DealType};
use serde::{Deserialize, Serialize};

/// Which evaluation dimension a coefficient adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientKind {
    Location,
    Condition,
    Floor,
    Amenities,
}

/// One multiplicative adjustment applied to the running price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoefficient {
    pub name: CoefficientKind,
    pub multiplier: Decimal,
    pub percent_impact: Decimal,
}

impl AppliedCoefficient {
    pub fn new(name: CoefficientKind, multiplier: Decimal) -> Self {
        Self {
            name,
            multiplier,
            percent_impact: ((multiplier - Decimal::one()) * Decimal::hundred()).round_dp(2),
        }
    }
}

/// Seasonal demand band, keyed by calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    HighDemand,
    Summer,
    Winter,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            3 | 4 | 5 | 9 | 10 => Season::HighDemand,
            6..=8 => Season::Summer,
            _ => Season::Winter,
        }
    }
}

/// A structured market-analysis clause; text is produced by a `Locale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "clause", content = "value", rename_all = "snake_case")]
pub enum MarketClause {
    Opening(Option<DealType>),
    PremiumLocation,
    DevelopingLocation,
    ExcellentCondition,
    RenovationReflected,
    SpaciousRooms,
    Season(Season),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Renovation,
    Staging,
    Photography,
    Documents,
    Marketing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub potential_gain: Option<Decimal>,
}

/// Output of a single evaluation. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub base_price_per_sqm: Decimal,
    pub base_price: Decimal,
    pub coefficients: Vec<AppliedCoefficient>,
    pub estimated_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub confidence_level: u8,
    pub market_analysis: String,
    pub analysis_clauses: Vec<MarketClause>,
    pub recommendations: Vec<Recommendation>,
}

impl EvaluationResult {
    pub fn coefficient(&self, kind: CoefficientKind) -> Option<&AppliedCoefficient> {
        self.coefficients.iter().find(|c| c.name == kind)
    }

    pub fn recommendation(&self, kind: RecommendationType) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.kind == kind)
    }
}
