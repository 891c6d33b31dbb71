//! Condition, floor, and amenity coefficients.

use super::market::MarketTables;
use crate::domain::Decimal;
use std::collections::BTreeSet;

/// Floor-position multiplier.
///
/// Rules are checked in order and the first match wins: ground floor of a
/// multi-storey building, then top floor, then the middle band.
pub fn floor_multiplier(floor: i32, total_floors: i32) -> Decimal {
    if floor == 1 && total_floors > 1 {
        return Decimal::from_parts(92, 2);
    }

    if floor == total_floors {
        if total_floors <= 5 {
            return Decimal::from_parts(108, 2);
        }
        if total_floors > 16 {
            return Decimal::from_parts(95, 2);
        }
        return Decimal::one();
    }

    let (band_start, band_end) = middle_band(total_floors);
    if (band_start..=band_end).contains(&i64::from(floor)) {
        return Decimal::from_parts(103, 2);
    }

    Decimal::one()
}

/// Inclusive middle band: `max(total / 4, 3)` to `ceil(total * 3 / 4)`.
///
/// Widened to i64 so any positive `i32` height is valid.
pub fn middle_band(total_floors: i32) -> (i64, i64) {
    let total = i64::from(total_floors);
    let start = (total / 4).max(3);
    let end = (total * 3 + 3) / 4;
    (start, end)
}

/// Amenity multiplier: sum of per-tag bonuses, capped.
pub fn amenities_multiplier(amenities: &BTreeSet<String>, tables: &MarketTables) -> Decimal {
    let tags: BTreeSet<String> = amenities.iter().map(|t| t.trim().to_lowercase()).collect();
    let bonus: Decimal = tags.iter().map(|tag| tables.amenity_bonus(tag)).sum();
    Decimal::one() + bonus.min(tables.amenity_bonus_cap)
}
