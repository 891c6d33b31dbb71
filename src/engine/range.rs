//! Price band and confidence scoring.

use crate::domain::{Decimal, ValuationRequest};

const BASE_CONFIDENCE: u8 = 70;
const MAX_CONFIDENCE: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub estimated: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

/// Point estimate with a ±10% band, each rounded to the nearest 1000.
///
/// None when the upper bound is not representable.
pub fn price_range(adjusted_price: Decimal) -> Option<PriceRange> {
    let max = adjusted_price.checked_mul(Decimal::from_parts(110, 2))?;
    Some(PriceRange {
        estimated: adjusted_price.round_to_thousand(),
        min: (adjusted_price * Decimal::from_parts(90, 2)).round_to_thousand(),
        max: max.round_to_thousand(),
    })
}

/// Confidence from data completeness. Never decreases as fields are added.
pub fn confidence_level(request: &ValuationRequest) -> u8 {
    let mut confidence = BASE_CONFIDENCE;
    if request.floor.is_some() {
        confidence += 10;
    }
    if !request.amenities.is_empty() {
        confidence += 10;
    }
    if request.year_built.is_some() {
        confidence += 5;
    }
    if request.has_metro_station() {
        confidence += 5;
    }
    confidence.min(MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PropertyCategory;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn bare() -> ValuationRequest {
        ValuationRequest::new(PropertyCategory::House, "Бирюлево", Decimal::from(100i64))
    }

    #[test]
    fn test_price_range_rounding() {
        let range = price_range(d("23986125")).unwrap();
        assert_eq!(range.estimated, d("23986000"));
        assert_eq!(range.min, d("21588000"));
        assert_eq!(range.max, d("26385000"));
    }

    #[test]
    fn test_price_range_ordering() {
        for raw in ["1", "499", "1500", "987654.321", "13680000", "250000000.5"] {
            let r = price_range(d(raw)).unwrap();
            assert!(r.min <= r.estimated, "min > estimated for {}", raw);
            assert!(r.estimated <= r.max, "estimated > max for {}", raw);
        }
    }

    #[test]
    fn test_price_range_unrepresentable_upper_bound() {
        assert!(price_range(d("79000000000000000000000000000")).is_none());
    }

    #[test]
    fn test_confidence_base() {
        assert_eq!(confidence_level(&bare()), 70);
    }

    #[test]
    fn test_confidence_each_field_adds() {
        assert_eq!(confidence_level(&bare().with_floor(2, 9)), 80);
        assert_eq!(confidence_level(&bare().with_amenities(["gym"])), 80);
        assert_eq!(confidence_level(&bare().with_year_built(1985)), 75);
        assert_eq!(confidence_level(&bare().with_metro("Сокол", Some(7))), 75);
    }

    #[test]
    fn test_confidence_capped() {
        let full = bare()
            .with_floor(2, 9)
            .with_amenities(["gym"])
            .with_year_built(1985)
            .with_metro("Сокол", None);
        assert_eq!(confidence_level(&full), 95);
    }

    #[test]
    fn test_confidence_monotonic() {
        let requests = [
            bare(),
            bare().with_floor(2, 9),
            bare().with_floor(2, 9).with_amenities(["pool"]),
            bare().with_floor(2, 9).with_amenities(["pool"]).with_year_built(2001),
            bare()
                .with_floor(2, 9)
                .with_amenities(["pool"])
                .with_year_built(2001)
                .with_metro("Марьино", Some(3)),
        ];
        let levels: Vec<u8> = requests.iter().map(confidence_level).collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]), "{:?}", levels);
        assert!(levels.iter().all(|&l| l <= 95));
    }
}
