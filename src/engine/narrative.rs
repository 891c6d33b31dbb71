//! Market-analysis and recommendation decisions.
//!
//! Only the decisions live here. Text comes from `render::Locale`.

use crate::domain::{Decimal, MarketClause, Priority, RecommendationType, Season, ValuationRequest};
use chrono::{Datelike, NaiveDate};

/// Coefficients the narrative rules look at.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeInputs {
    pub location: Decimal,
    pub condition: Decimal,
    pub adjusted_price: Decimal,
}

/// Recommendation decision before localization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedRecommendation {
    pub kind: RecommendationType,
    pub priority: Priority,
    pub potential_gain: Option<Decimal>,
}

const SPACIOUS_ROOM_SQM: i64 = 25;
const STAGING_AMENITY_THRESHOLD: usize = 3;

pub fn analysis_clauses(
    request: &ValuationRequest,
    inputs: &NarrativeInputs,
    today: NaiveDate,
) -> Vec<MarketClause> {
    let mut clauses = vec![MarketClause::Opening(request.deal_type)];

    if inputs.location > Decimal::from_parts(110, 2) {
        clauses.push(MarketClause::PremiumLocation);
    } else if inputs.location < Decimal::from_parts(95, 2) {
        clauses.push(MarketClause::DevelopingLocation);
    }

    if inputs.condition > Decimal::from_parts(105, 2) {
        clauses.push(MarketClause::ExcellentCondition);
    } else if inputs.condition < Decimal::from_parts(90, 2) {
        clauses.push(MarketClause::RenovationReflected);
    }

    if let Some(rooms) = request.rooms.filter(|&r| r > 0) {
        if request.area_sqm / Decimal::from(rooms) > Decimal::from(SPACIOUS_ROOM_SQM) {
            clauses.push(MarketClause::SpaciousRooms);
        }
    }

    clauses.push(MarketClause::Season(Season::from_month(today.month())));
    clauses
}

pub fn planned_recommendations(
    request: &ValuationRequest,
    inputs: &NarrativeInputs,
) -> Vec<PlannedRecommendation> {
    let mut plan = Vec::with_capacity(5);

    if inputs.condition < Decimal::from_parts(95, 2) {
        plan.push(PlannedRecommendation {
            kind: RecommendationType::Renovation,
            priority: Priority::High,
            potential_gain: Some(
                (inputs.adjusted_price * Decimal::from_parts(125, 3)).round_to_thousand(),
            ),
        });
    }

    if request.amenities.len() < STAGING_AMENITY_THRESHOLD {
        plan.push(PlannedRecommendation {
            kind: RecommendationType::Staging,
            priority: Priority::Medium,
            potential_gain: None,
        });
    }

    for (kind, priority) in [
        (RecommendationType::Photography, Priority::High),
        (RecommendationType::Documents, Priority::High),
        (RecommendationType::Marketing, Priority::Medium),
    ] {
        plan.push(PlannedRecommendation {
            kind,
            priority,
            potential_gain: None,
        });
    }

    plan
}
