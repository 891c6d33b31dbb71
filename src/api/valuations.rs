use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::db::{ContactDetails, ValuationRecord};
use crate::domain::{EvaluationResult, ValuationRequest};
use crate::engine::validate_request;
use crate::error::AppError;
use crate::notify::{self, ValuationNotice};
use crate::render::{render_text_report, Locale};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateValuationBody {
    #[serde(flatten)]
    pub request: ValuationRequest,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateValuationResponse {
    pub token: String,
    pub result: EvaluationResult,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub locale: Option<String>,
}

/// Evaluate a request and persist it under a new token.
///
/// Invalid input is rejected before anything is stored.
pub async fn create_valuation(
    State(state): State<AppState>,
    Json(body): Json<Option<CreateValuationBody>>,
) -> Result<(StatusCode, Json<CreateValuationResponse>), AppError> {
    let (request, contact) = match body {
        Some(body) => (
            Some(body.request),
            ContactDetails {
                email: non_blank(body.email),
                name: non_blank(body.name),
            },
        ),
        None => (None, ContactDetails::default()),
    };
    let request = validate_request(request.as_ref())?;
    if let Some(email) = &contact.email {
        if !is_valid_email(email) {
            return Err(AppError::Unprocessable {
                message: format!("email {:?} is not a valid address", email),
                field: Some("email"),
            });
        }
    }

    let result = state.engine.evaluate(request)?;
    let record = state
        .repo
        .insert_valuation(request, &result, &contact)
        .await?;

    info!(
        token = %record.token,
        estimated_price = %result.estimated_price,
        "valuation stored"
    );

    if let Some(email) = &contact.email {
        notify::dispatch(
            state.notifier.clone(),
            ValuationNotice {
                token: record.token.clone(),
                email: email.clone(),
                name: contact.name.clone(),
                address: request.address.clone(),
                estimated_price: result.estimated_price,
                min_price: result.min_price,
                max_price: result.max_price,
                confidence_level: result.confidence_level,
            },
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateValuationResponse {
            token: record.token,
            result,
        }),
    ))
}

pub async fn get_valuation(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ValuationRecord>, AppError> {
    let record = load(&state, &token).await?;
    Ok(Json(record))
}

/// Plain-text report; `?locale=en|ru` overrides the configured locale.
pub async fn get_valuation_report(
    Path(token): Path<String>,
    Query(params): Query<ReportQuery>,
    State(state): State<AppState>,
) -> Result<String, AppError> {
    let locale = match params.locale.as_deref() {
        None | Some("") => state.engine.locale(),
        Some(raw) => raw.parse::<Locale>().map_err(AppError::BadRequest)?,
    };
    let record = load(&state, &token).await?;
    Ok(render_text_report(&record.result, locale))
}

async fn load(state: &AppState, token: &str) -> Result<ValuationRecord, AppError> {
    state
        .repo
        .get_valuation(token)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("valuation {}", token)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `local@domain` in the shape of the HTML5 / mailto address grammar:
/// a non-empty local part of atext characters and dots, and dot-separated
/// domain labels of up to 63 alphanumerics or inner hyphens.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));
    local_ok && !domain.is_empty() && domain.split('.').all(is_domain_label)
}

fn is_domain_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= 63
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_flattens_request_fields() {
        let body: CreateValuationBody = serde_json::from_str(
            r#"{"propertyCategory":"apartment","address":"ул. Тверская, 1","areaSqm":50,"email":"a@b.c"}"#,
        )
        .unwrap();
        assert_eq!(body.request.address, "ул. Тверская, 1");
        assert_eq!(body.email.as_deref(), Some("a@b.c"));
        assert!(body.name.is_none());
    }

    #[test]
    fn test_email_format() {
        for ok in ["owner@example.com", "a.b+tag@mail.ru", "x@localhost", "o'neil@a-b.c"] {
            assert!(is_valid_email(ok), "{}", ok);
        }
        for bad in [
            "not-an-email",
            "@example.com",
            "owner@",
            "owner@@example.com",
            "owner@-example.com",
            "owner@example..com",
            "own er@example.com",
            "владелец@пример.рф",
        ] {
            assert!(!is_valid_email(bad), "{}", bad);
        }
    }

    #[test]
    fn test_non_blank_drops_whitespace() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
