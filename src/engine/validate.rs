//! Input validation gate for valuation requests.

use crate::domain::ValuationRequest;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("valuation request is missing")]
    MissingRequest,
    #[error("area must be positive")]
    NonPositiveArea,
    #[error("property category is required")]
    MissingCategory,
    #[error("address must not be blank")]
    BlankAddress,
    #[error("floor must be positive")]
    NonPositiveFloor,
    #[error("total floors must be positive")]
    NonPositiveTotalFloors,
    #[error("floor {floor} is above total floors {total_floors}")]
    FloorAboveTotal { floor: i32, total_floors: i32 },
    #[error("rooms must be positive")]
    NonPositiveRooms,
    #[error("area is too large to price")]
    PriceOutOfRange,
}

impl InvalidInput {
    /// Request field the failure refers to, for field-level messages.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            InvalidInput::MissingRequest => None,
            InvalidInput::NonPositiveArea | InvalidInput::PriceOutOfRange => Some("areaSqm"),
            InvalidInput::MissingCategory => Some("propertyCategory"),
            InvalidInput::BlankAddress => Some("address"),
            InvalidInput::NonPositiveFloor | InvalidInput::FloorAboveTotal { .. } => Some("floor"),
            InvalidInput::NonPositiveTotalFloors => Some("totalFloors"),
            InvalidInput::NonPositiveRooms => Some("rooms"),
        }
    }
}

/// Check a request before any computation. Downstream stages rely on a
/// positive area and a present category.
pub fn validate_request(
    request: Option<&ValuationRequest>,
) -> Result<&ValuationRequest, InvalidInput> {
    let request = request.ok_or(InvalidInput::MissingRequest)?;

    if !request.area_sqm.is_positive() {
        return Err(InvalidInput::NonPositiveArea);
    }
    if request.property_category.is_none() {
        return Err(InvalidInput::MissingCategory);
    }
    if request.address.trim().is_empty() {
        return Err(InvalidInput::BlankAddress);
    }
    if matches!(request.floor, Some(f) if f <= 0) {
        return Err(InvalidInput::NonPositiveFloor);
    }
    if matches!(request.total_floors, Some(t) if t <= 0) {
        return Err(InvalidInput::NonPositiveTotalFloors);
    }
    if let Some((floor, total_floors)) = request.floor_position() {
        if floor > total_floors {
            return Err(InvalidInput::FloorAboveTotal {
                floor,
                total_floors,
            });
        }
    }
    if request.rooms == Some(0) {
        return Err(InvalidInput::NonPositiveRooms);
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decimal, PropertyCategory};

    fn valid() -> ValuationRequest {
        ValuationRequest::new(PropertyCategory::Apartment, "ул. Арбат, 10", Decimal::from(50i64))
    }

    #[test]
    fn test_valid_request_passes() {
        let req = valid();
        assert!(validate_request(Some(&req)).is_ok());
    }

    #[test]
    fn test_missing_request() {
        assert_eq!(validate_request(None), Err(InvalidInput::MissingRequest));
    }

    #[test]
    fn test_zero_and_negative_area() {
        let mut req = valid();
        req.area_sqm = Decimal::zero();
        assert_eq!(validate_request(Some(&req)), Err(InvalidInput::NonPositiveArea));
        req.area_sqm = Decimal::from(-5i64);
        assert_eq!(validate_request(Some(&req)), Err(InvalidInput::NonPositiveArea));
    }

    #[test]
    fn test_missing_category() {
        let mut req = valid();
        req.property_category = None;
        assert_eq!(validate_request(Some(&req)), Err(InvalidInput::MissingCategory));
    }

    #[test]
    fn test_blank_address() {
        let mut req = valid();
        req.address = "   ".to_string();
        assert_eq!(validate_request(Some(&req)), Err(InvalidInput::BlankAddress));
    }

    #[test]
    fn test_floor_above_total() {
        let req = valid().with_floor(11, 10);
        assert_eq!(
            validate_request(Some(&req)),
            Err(InvalidInput::FloorAboveTotal {
                floor: 11,
                total_floors: 10
            })
        );
    }

    #[test]
    fn test_non_positive_floor_values() {
        let req = valid().with_floor(0, 10);
        assert_eq!(validate_request(Some(&req)), Err(InvalidInput::NonPositiveFloor));
        let mut req = valid();
        req.total_floors = Some(-1);
        assert_eq!(
            validate_request(Some(&req)),
            Err(InvalidInput::NonPositiveTotalFloors)
        );
    }

    #[test]
    fn test_zero_rooms() {
        let req = valid().with_rooms(0);
        assert_eq!(validate_request(Some(&req)), Err(InvalidInput::NonPositiveRooms));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(InvalidInput::NonPositiveArea.field(), Some("areaSqm"));
        assert_eq!(InvalidInput::MissingRequest.field(), None);
    }
}
