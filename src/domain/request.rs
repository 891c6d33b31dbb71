//! Valuation request: the immutable input to the engine.

use super::Decimal;
use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Property category used for the per-sqm baseline lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Apartment,
    House,
    Townhouse,
    Land,
    Commercial,
    Garage,
    /// Any category without a dedicated baseline (e.g. `room`).
    #[serde(other)]
    Other,
}

impl PropertyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Apartment => "apartment",
            PropertyCategory::House => "house",
            PropertyCategory::Townhouse => "townhouse",
            PropertyCategory::Land => "land",
            PropertyCategory::Commercial => "commercial",
            PropertyCategory::Garage => "garage",
            PropertyCategory::Other => "other",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deal type: sale or rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealType {
    Sale,
    Rent,
}

/// Physical condition of the property.
///
/// Renovation-style aliases are accepted on input and folded into the
/// matching condition class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[serde(alias = "needs_renovation")]
    NeedsRepair,
    #[serde(alias = "average", alias = "cosmetic_renovation")]
    Satisfactory,
    #[serde(alias = "modern_renovation")]
    Good,
    #[serde(alias = "euro_renovation")]
    Excellent,
    Designer,
    #[serde(other)]
    Unknown,
}

/// A valuation request as submitted by the user.
///
/// Required fields are modelled as `Option` so that the validator, not the
/// deserializer, decides what a malformed request is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    #[serde(default, deserialize_with = "blank_category_as_none")]
    pub property_category: Option<PropertyCategory>,
    #[serde(default)]
    pub deal_type: Option<DealType>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub area_sqm: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_floors: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metro_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metro_distance_minutes: Option<u32>,
}

/// A blank category is a missing one; unknown names still map to `Other`.
fn blank_category_as_none<'de, D>(deserializer: D) -> Result<Option<PropertyCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => {
            let de: StrDeserializer<'_, D::Error> = name.into_deserializer();
            PropertyCategory::deserialize(de).map(Some)
        }
    }
}

impl ValuationRequest {
    /// Start a request with the three fields every valuation needs.
    pub fn new(category: PropertyCategory, address: impl Into<String>, area_sqm: Decimal) -> Self {
        Self {
            property_category: Some(category),
            address: address.into(),
            area_sqm,
            ..Default::default()
        }
    }

    pub fn with_deal_type(mut self, deal_type: DealType) -> Self {
        self.deal_type = Some(deal_type);
        self
    }

    pub fn with_rooms(mut self, rooms: u32) -> Self {
        self.rooms = Some(rooms);
        self
    }

    pub fn with_floor(mut self, floor: i32, total_floors: i32) -> Self {
        self.floor = Some(floor);
        self.total_floors = Some(total_floors);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_year_built(mut self, year: i32) -> Self {
        self.year_built = Some(year);
        self
    }

    pub fn with_metro(mut self, station: impl Into<String>, minutes: Option<u32>) -> Self {
        self.metro_station = Some(station.into());
        self.metro_distance_minutes = minutes;
        self
    }

    /// Floor and total floors, only when both are known.
    pub fn floor_position(&self) -> Option<(i32, i32)> {
        match (self.floor, self.total_floors) {
            (Some(floor), Some(total)) => Some((floor, total)),
            _ => None,
        }
    }

    pub fn has_metro_station(&self) -> bool {
        self.metro_station
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }
}
