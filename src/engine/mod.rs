//! Pure valuation engine.
//!
//! Stages run in a fixed order: validate, base price, coefficients
//! (location, condition, floor, amenities), range and confidence, then
//! narrative. The engine keeps no state between calls; the only ambient
//! input is the date used for the seasonal clause. `evaluate` reads it at
//! the engine's UTC offset and `evaluate_on` takes it explicitly.

pub mod coefficients;
pub mod location;
pub mod market;
pub mod narrative;
pub mod range;
pub mod validate;

pub use location::{KeywordLocationClassifier, LocationClassifier, LocationTier};
pub use market::{MarketTables, MarketTablesError};
pub use validate::{validate_request, InvalidInput};

use crate::domain::{
    AppliedCoefficient, CoefficientKind, EvaluationResult, Recommendation, ValuationRequest,
};
use crate::render::Locale;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use narrative::NarrativeInputs;
use std::sync::Arc;
use tracing::debug;

/// Property valuation engine configured with market tables and a
/// location classifier. Cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct ValuationEngine {
    tables: Arc<MarketTables>,
    classifier: Arc<dyn LocationClassifier>,
    locale: Locale,
    utc_offset: FixedOffset,
}

/// Moscow time, where the market tables and narrative calendar apply.
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 3 * 3600;

pub fn default_utc_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

impl std::fmt::Debug for ValuationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuationEngine")
            .field("tables", &self.tables)
            .field("locale", &self.locale)
            .field("utc_offset", &self.utc_offset)
            .finish_non_exhaustive()
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(MarketTables::default())
    }
}

impl ValuationEngine {
    /// Engine with keyword location matching built from the tables.
    pub fn new(tables: MarketTables) -> Self {
        let classifier = Arc::new(KeywordLocationClassifier::new(&tables.location_keywords));
        Self {
            tables: Arc::new(tables),
            classifier,
            locale: Locale::default(),
            utc_offset: default_utc_offset(),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn LocationClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Offset whose local calendar date drives the seasonal clause.
    pub fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    pub fn tables(&self) -> &MarketTables {
        &self.tables
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Evaluate using today's date in the engine's time zone.
    pub fn evaluate(&self, request: &ValuationRequest) -> Result<EvaluationResult, InvalidInput> {
        self.evaluate_on(request, self.local_date())
    }

    /// Current calendar date at the configured offset.
    pub fn local_date(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }

    /// Evaluate as of `today`. Identical inputs give identical results.
    pub fn evaluate_on(
        &self,
        request: &ValuationRequest,
        today: NaiveDate,
    ) -> Result<EvaluationResult, InvalidInput> {
        let request = validate_request(Some(request))?;
        let category = request
            .property_category
            .ok_or(InvalidInput::MissingCategory)?;

        let base_price_per_sqm = self.tables.price_per_sqm(category);
        let base_price = base_price_per_sqm
            .checked_mul(request.area_sqm)
            .ok_or(InvalidInput::PriceOutOfRange)?;

        let location = self.classifier.classify(&request.address).multiplier();
        let condition = self
            .tables
            .condition_multipliers
            .for_condition(request.condition);

        let mut applied = vec![
            AppliedCoefficient::new(CoefficientKind::Location, location),
            AppliedCoefficient::new(CoefficientKind::Condition, condition),
        ];
        if let Some((floor, total_floors)) = request.floor_position() {
            applied.push(AppliedCoefficient::new(
                CoefficientKind::Floor,
                coefficients::floor_multiplier(floor, total_floors),
            ));
        }
        if !request.amenities.is_empty() {
            applied.push(AppliedCoefficient::new(
                CoefficientKind::Amenities,
                coefficients::amenities_multiplier(&request.amenities, &self.tables),
            ));
        }

        let adjusted_price = applied
            .iter()
            .try_fold(base_price, |price, c| price.checked_mul(c.multiplier))
            .ok_or(InvalidInput::PriceOutOfRange)?;

        let band = range::price_range(adjusted_price).ok_or(InvalidInput::PriceOutOfRange)?;
        let confidence_level = range::confidence_level(request);

        let inputs = NarrativeInputs {
            location,
            condition,
            adjusted_price,
        };
        let analysis_clauses = narrative::analysis_clauses(request, &inputs, today);
        let market_analysis = self.locale.market_analysis(&analysis_clauses);
        let recommendations = narrative::planned_recommendations(request, &inputs)
            .into_iter()
            .map(|plan| {
                let (title, description) = self.locale.recommendation(plan.kind);
                Recommendation {
                    kind: plan.kind,
                    priority: plan.priority,
                    title: title.to_string(),
                    description: description.to_string(),
                    potential_gain: plan.potential_gain,
                }
            })
            .collect();

        debug!(
            category = %category,
            estimated_price = %band.estimated,
            confidence_level,
            "valuation computed"
        );

        Ok(EvaluationResult {
            base_price_per_sqm,
            base_price,
            coefficients: applied,
            estimated_price: band.estimated,
            min_price: band.min,
            max_price: band.max,
            confidence_level,
            market_analysis,
            analysis_clauses,
            recommendations,
        })
    }
}

/// Shorthand for the default engine.
pub fn evaluate(request: &ValuationRequest) -> Result<EvaluationResult, InvalidInput> {
    ValuationEngine::default().evaluate(request)
}
