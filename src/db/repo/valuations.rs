use super::{parse_millis, RepoError, Repository};
use crate::domain::{EvaluationResult, ValuationRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

/// Optional contact details captured with a valuation submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// A persisted valuation: the raw request and its serialized result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRecord {
    pub token: String,
    pub request: ValuationRequest,
    pub result: EvaluationResult,
    #[serde(skip)]
    pub contact: ContactDetails,
    pub created_at: DateTime<Utc>,
}

fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Repository {
    // =========================================================================
    // Valuation operations
    // =========================================================================

    /// Store a completed valuation under a freshly generated token.
    ///
    /// # Errors
    /// Returns an error if serialization or the insert fails.
    pub async fn insert_valuation(
        &self,
        request: &ValuationRequest,
        result: &EvaluationResult,
        contact: &ContactDetails,
    ) -> Result<ValuationRecord, RepoError> {
        let token = generate_token();
        let created_at = Utc::now();
        let category = request
            .property_category
            .map(|c| c.as_str())
            .unwrap_or("other");

        sqlx::query(
            r#"
            INSERT INTO valuations (
                token, property_category, address, request_json, result_json,
                estimated_price, min_price, max_price, confidence_level,
                email, name, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&token)
        .bind(category)
        .bind(&request.address)
        .bind(serde_json::to_string(request)?)
        .bind(serde_json::to_string(result)?)
        .bind(result.estimated_price.to_canonical_string())
        .bind(result.min_price.to_canonical_string())
        .bind(result.max_price.to_canonical_string())
        .bind(result.confidence_level as i64)
        .bind(contact.email.as_deref())
        .bind(contact.name.as_deref())
        .bind(created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(ValuationRecord {
            token,
            request: request.clone(),
            result: result.clone(),
            contact: contact.clone(),
            created_at: parse_millis("created_at", created_at.timestamp_millis())?,
        })
    }

    /// Load a valuation by token.
    ///
    /// Returns None if no valuation has this token.
    pub async fn get_valuation(&self, token: &str) -> Result<Option<ValuationRecord>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT token, request_json, result_json, email, name, created_at
            FROM valuations
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let request_json: String = row.get("request_json");
        let result_json: String = row.get("result_json");
        let created_at: i64 = row.get("created_at");

        Ok(Some(ValuationRecord {
            token: row.get("token"),
            request: serde_json::from_str(&request_json)?,
            result: serde_json::from_str(&result_json)?,
            contact: ContactDetails {
                email: row.get("email"),
                name: row.get("name"),
            },
            created_at: parse_millis("created_at", created_at)?,
        }))
    }

    /// Number of stored valuations.
    pub async fn count_valuations(&self) -> Result<i64, RepoError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM valuations")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}
