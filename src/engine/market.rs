//! Market tables: the data the valuation engine is parameterized by.
//!
//! Defaults carry the built-in market averages. Deployments for another
//! region load a JSON override with the same shape.

use crate::domain::{Condition, Decimal, PropertyCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketTablesError {
    #[error("cannot read market tables file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid market tables file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Keyword fragments per location tier, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationKeywords {
    pub premium: Vec<String>,
    pub above_average: Vec<String>,
    pub good: Vec<String>,
    pub below_average: Vec<String>,
}

impl Default for LocationKeywords {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            premium: words(&["центр", "арбат", "патриаршие", "остоженка", "пресня"]),
            above_average: words(&["хамовники", "замоскворечье", "якиманка", "тверская"]),
            good: words(&["сокол", "аэропорт", "крылатское", "строгино"]),
            below_average: words(&["бирюлево", "марьино", "братеево", "капотня"]),
        }
    }
}

/// Multipliers per condition class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionMultipliers {
    pub excellent: Decimal,
    pub good: Decimal,
    pub satisfactory: Decimal,
    pub needs_repair: Decimal,
}

impl Default for ConditionMultipliers {
    fn default() -> Self {
        Self {
            excellent: Decimal::from_parts(115, 2),
            good: Decimal::from_parts(105, 2),
            satisfactory: Decimal::from_parts(95, 2),
            needs_repair: Decimal::from_parts(80, 2),
        }
    }
}

impl ConditionMultipliers {
    /// Multiplier for a condition; unknown or missing is neutral.
    pub fn for_condition(&self, condition: Option<Condition>) -> Decimal {
        match condition {
            Some(Condition::Excellent | Condition::Designer) => self.excellent,
            Some(Condition::Good) => self.good,
            Some(Condition::Satisfactory) => self.satisfactory,
            Some(Condition::NeedsRepair) => self.needs_repair,
            Some(Condition::Unknown) | None => Decimal::one(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTables {
    pub base_price_per_sqm: BTreeMap<PropertyCategory, Decimal>,
    pub fallback_price_per_sqm: Decimal,
    pub location_keywords: LocationKeywords,
    pub condition_multipliers: ConditionMultipliers,
    pub amenity_bonuses: BTreeMap<String, Decimal>,
    pub amenity_bonus_cap: Decimal,
}

impl Default for MarketTables {
    fn default() -> Self {
        let base_price_per_sqm = [
            (PropertyCategory::Apartment, 250_000),
            (PropertyCategory::House, 180_000),
            (PropertyCategory::Townhouse, 200_000),
            (PropertyCategory::Land, 50_000),
            (PropertyCategory::Commercial, 300_000),
            (PropertyCategory::Garage, 80_000),
        ]
        .into_iter()
        .map(|(cat, price)| (cat, Decimal::from(price as i64)))
        .collect();

        let amenity_bonuses = [
            ("parking", 5),
            ("balcony", 3),
            ("furniture", 4),
            ("elevator", 2),
            ("security", 2),
            ("concierge", 2),
            ("gym", 3),
            ("pool", 3),
        ]
        .into_iter()
        .map(|(tag, pct)| (tag.to_string(), Decimal::from_parts(pct, 2)))
        .collect();

        Self {
            base_price_per_sqm,
            fallback_price_per_sqm: Decimal::from(200_000i64),
            location_keywords: LocationKeywords::default(),
            condition_multipliers: ConditionMultipliers::default(),
            amenity_bonuses,
            amenity_bonus_cap: Decimal::from_parts(20, 2),
        }
    }
}

impl MarketTables {
    /// Load tables from a JSON file with the same shape as the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MarketTablesError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| MarketTablesError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| MarketTablesError::Parse {
            path: display,
            source,
        })
    }

    /// Per-sqm baseline for a category, falling back for unmapped ones.
    pub fn price_per_sqm(&self, category: PropertyCategory) -> Decimal {
        self.base_price_per_sqm
            .get(&category)
            .copied()
            .unwrap_or(self.fallback_price_per_sqm)
    }

    pub fn amenity_bonus(&self, tag: &str) -> Decimal {
        self.amenity_bonuses
            .get(tag)
            .copied()
            .unwrap_or_else(Decimal::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_base_prices() {
        let tables = MarketTables::default();
        assert_eq!(
            tables.price_per_sqm(PropertyCategory::Apartment),
            Decimal::from(250_000i64)
        );
        assert_eq!(
            tables.price_per_sqm(PropertyCategory::Garage),
            Decimal::from(80_000i64)
        );
        assert_eq!(
            tables.price_per_sqm(PropertyCategory::Other),
            Decimal::from(200_000i64)
        );
    }

    #[test]
    fn test_condition_multipliers() {
        let m = ConditionMultipliers::default();
        assert_eq!(m.for_condition(Some(Condition::Designer)), m.excellent);
        assert_eq!(m.for_condition(Some(Condition::NeedsRepair)), Decimal::from_parts(80, 2));
        assert_eq!(m.for_condition(Some(Condition::Unknown)), Decimal::one());
        assert_eq!(m.for_condition(None), Decimal::one());
    }

    #[test]
    fn test_unknown_amenity_is_zero() {
        let tables = MarketTables::default();
        assert_eq!(tables.amenity_bonus("sauna"), Decimal::zero());
        assert_eq!(tables.amenity_bonus("parking"), Decimal::from_parts(5, 2));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let mut tables = MarketTables::default();
        tables.fallback_price_per_sqm = Decimal::from(150_000i64);
        tables.location_keywords.premium = vec!["downtown".to_string()];

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&tables).unwrap().as_bytes())
            .unwrap();

        let loaded = MarketTables::from_json_file(file.path()).unwrap();
        assert_eq!(loaded.fallback_price_per_sqm, Decimal::from(150_000i64));
        assert_eq!(loaded.location_keywords.premium, vec!["downtown".to_string()]);
        assert_eq!(
            loaded.price_per_sqm(PropertyCategory::Land),
            Decimal::from(50_000i64)
        );
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = MarketTables::from_json_file("/nonexistent/tables.json").unwrap_err();
        assert!(matches!(err, MarketTablesError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let err = MarketTables::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, MarketTablesError::Parse { .. }));
    }
}
