use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::db::PriceHistorySummary;
use crate::domain::{Decimal, NewPriceChange, PriceHistoryEntry};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChangeBody {
    pub old_price: Option<Decimal>,
    pub new_price: Decimal,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub changed_by: Option<String>,
    pub effective_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryResponse {
    pub property_id: i64,
    pub entries: Vec<PriceHistoryEntry>,
    pub summary: PriceHistorySummary,
}

#[derive(Debug, Deserialize)]
pub struct PriceAtQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAtResponse {
    pub property_id: i64,
    pub date: NaiveDate,
    pub price: Decimal,
}

pub async fn create_price_change(
    Path(property_id): Path<i64>,
    State(state): State<AppState>,
    Json(body): Json<PriceChangeBody>,
) -> Result<(StatusCode, Json<PriceHistoryEntry>), AppError> {
    let entry = state
        .repo
        .record_price_change(&NewPriceChange {
            property_id,
            old_price: body.old_price,
            new_price: body.new_price,
            reason: body.reason,
            notes: body.notes,
            changed_by: body.changed_by,
            effective_date: body.effective_date,
        })
        .await?;

    info!(
        property_id,
        change_type = entry.change.change_type.as_str(),
        significant = entry.change.is_significant(),
        "price change recorded"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_price_history(
    Path(property_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PriceHistoryResponse>, AppError> {
    let entries = state.repo.query_price_history(property_id).await?;
    let summary = state.repo.price_history_summary(property_id).await?;

    Ok(Json(PriceHistoryResponse {
        property_id,
        entries,
        summary,
    }))
}

pub async fn get_price_at(
    Path(property_id): Path<i64>,
    Query(params): Query<PriceAtQuery>,
    State(state): State<AppState>,
) -> Result<Json<PriceAtResponse>, AppError> {
    let price = state
        .repo
        .price_at_date(property_id, params.date)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "no price for property {} on {}",
                property_id, params.date
            ))
        })?;

    Ok(Json(PriceAtResponse {
        property_id,
        date: params.date,
        price,
    }))
}
