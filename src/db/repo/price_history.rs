use super::{parse_decimal, parse_millis, RepoError, Repository};
use crate::domain::{
    ChangeType, Decimal, NewPriceChange, PriceChange, PriceHistoryEntry, PriceHistoryError,
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool, SqliteRow};
use sqlx::{Executor, Row};

/// Average movement across a property's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistorySummary {
    pub change_count: i64,
    pub average_change: Decimal,
    pub average_change_percent: Decimal,
}

/// Either a rejected change or a storage failure.
#[derive(Debug, thiserror::Error)]
pub enum RecordChangeError {
    #[error(transparent)]
    Rejected(#[from] PriceHistoryError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, property_id, old_price, new_price, delta, delta_percent, change_type,
           reason, notes, changed_by, auto_generated, effective_date
    FROM price_history
"#;

fn entry_from_row(row: &SqliteRow) -> Result<PriceHistoryEntry, RepoError> {
    let old_price: Option<String> = row.get("old_price");
    let new_price: String = row.get("new_price");
    let delta: String = row.get("delta");
    let delta_percent: String = row.get("delta_percent");
    let change_type: String = row.get("change_type");
    let auto_generated: i64 = row.get("auto_generated");
    let effective_date: i64 = row.get("effective_date");

    let change_type = ChangeType::parse(&change_type).ok_or(RepoError::Corrupt {
        column: "change_type",
        value: change_type.clone(),
    })?;

    Ok(PriceHistoryEntry {
        id: row.get("id"),
        property_id: row.get("property_id"),
        change: PriceChange {
            old_price: old_price
                .as_deref()
                .map(|s| parse_decimal("old_price", s))
                .transpose()?,
            new_price: parse_decimal("new_price", &new_price)?,
            delta: parse_decimal("delta", &delta)?,
            delta_percent: parse_decimal("delta_percent", &delta_percent)?,
            change_type,
        },
        reason: row.get("reason"),
        notes: row.get("notes"),
        changed_by: row.get("changed_by"),
        auto_generated: auto_generated != 0,
        effective_date: parse_millis("effective_date", effective_date)?,
    })
}

async fn record_in_transaction(
    pool: &SqlitePool,
    new_change: &NewPriceChange,
) -> Result<PriceHistoryEntry, RecordChangeError> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
    sqlx::query("BEGIN IMMEDIATE")
        .execute(&mut *conn)
        .await
        .map_err(RepoError::from)?;

    let result = insert_chained(&mut *conn, new_change).await;

    let end = if result.is_ok() { "COMMIT" } else { "ROLLBACK" };
    if let Err(e) = sqlx::query(end).execute(&mut *conn).await {
        // Closing the connection discards any transaction state left behind.
        drop(conn.detach());
        return Err(RepoError::from(e).into());
    }
    result
}

async fn insert_chained(
    conn: &mut SqliteConnection,
    new_change: &NewPriceChange,
) -> Result<PriceHistoryEntry, RecordChangeError> {
    let old_price = match new_change.old_price {
        Some(price) => Some(price),
        None => price_as_of(&mut *conn, new_change.property_id, i64::MAX).await?,
    };
    let change = PriceChange::compute(old_price, new_change.new_price)?;

    // Taken under the write lock so default dates follow insertion order.
    let effective_date = new_change.effective_date.unwrap_or_else(Utc::now);
    let auto_generated = new_change.changed_by.is_none();

    let result = sqlx::query(
        r#"
        INSERT INTO price_history (
            property_id, old_price, new_price, delta, delta_percent, change_type,
            reason, notes, changed_by, auto_generated, effective_date, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new_change.property_id)
    .bind(change.old_price.map(|d| d.to_canonical_string()))
    .bind(change.new_price.to_canonical_string())
    .bind(change.delta.to_canonical_string())
    .bind(change.delta_percent.to_canonical_string())
    .bind(change.change_type.as_str())
    .bind(new_change.reason.as_deref())
    .bind(new_change.notes.as_deref())
    .bind(new_change.changed_by.as_deref())
    .bind(auto_generated as i64)
    .bind(effective_date.timestamp_millis())
    .bind(Utc::now().timestamp_millis())
    .execute(&mut *conn)
    .await
    .map_err(RepoError::from)?;

    Ok(PriceHistoryEntry {
        id: result.last_insert_rowid(),
        property_id: new_change.property_id,
        change,
        reason: new_change.reason.clone(),
        notes: new_change.notes.clone(),
        changed_by: new_change.changed_by.clone(),
        auto_generated,
        effective_date: parse_millis("effective_date", effective_date.timestamp_millis())?,
    })
}

/// Latest `new_price` effective at or before `at_ms`.
async fn price_as_of<'e, E>(
    executor: E,
    property_id: i64,
    at_ms: i64,
) -> Result<Option<Decimal>, RepoError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(
        r#"
        SELECT new_price
        FROM price_history
        WHERE property_id = ? AND effective_date <= ?
        ORDER BY effective_date DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(property_id)
    .bind(at_ms)
    .fetch_optional(executor)
    .await?;

    row.map(|r| {
        let price: String = r.get("new_price");
        parse_decimal("new_price", &price)
    })
    .transpose()
}

impl Repository {
    // =========================================================================
    // Price history operations
    // =========================================================================

    /// Append a price change to a property's ledger.
    ///
    /// When `old_price` is not given the latest recorded price is used, so
    /// consecutive changes chain without the caller tracking state. The
    /// lookup and the insert share one `BEGIN IMMEDIATE` transaction, so
    /// concurrent writers to a property each chain from the previous one.
    ///
    /// # Errors
    /// Returns `Rejected` for an unchanged or non-positive price.
    pub async fn record_price_change(
        &self,
        new_change: &NewPriceChange,
    ) -> Result<PriceHistoryEntry, RecordChangeError> {
        let pool = self.pool.clone();
        let new_change = new_change.clone();
        // Detached so a dropped caller cannot strand a pooled connection
        // inside an open transaction.
        tokio::spawn(async move { record_in_transaction(&pool, &new_change).await })
            .await
            .map_err(|e| RepoError::Task(e.to_string()))?
    }

    /// Ledger for a property, most recent first.
    pub async fn query_price_history(
        &self,
        property_id: i64,
    ) -> Result<Vec<PriceHistoryEntry>, RepoError> {
        let rows = sqlx::query(&format!(
            "{} WHERE property_id = ? ORDER BY effective_date DESC, id DESC",
            SELECT_COLUMNS
        ))
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(entry_from_row).collect()
    }

    /// Most recent recorded price for a property.
    pub async fn latest_price(&self, property_id: i64) -> Result<Option<Decimal>, RepoError> {
        price_as_of(&self.pool, property_id, i64::MAX).await
    }

    /// Price in effect on `date`: the latest change effective on or before
    /// the end of that day (UTC).
    pub async fn price_at_date(
        &self,
        property_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, RepoError> {
        let cutoff = date
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).timestamp_millis())
            .unwrap_or(i64::MAX);
        price_as_of(&self.pool, property_id, cutoff - 1).await
    }

    /// Average delta and delta percent; zero for an empty ledger.
    ///
    /// Aggregated in Rust rather than with SQL AVG, which would go through
    /// REAL and lose precision.
    pub async fn price_history_summary(
        &self,
        property_id: i64,
    ) -> Result<PriceHistorySummary, RepoError> {
        let rows = sqlx::query(
            "SELECT delta, delta_percent FROM price_history WHERE property_id = ? ORDER BY id ASC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        let mut total_change = Decimal::zero();
        let mut total_percent = Decimal::zero();
        for row in &rows {
            let delta: String = row.get("delta");
            let percent: String = row.get("delta_percent");
            total_change = total_change + parse_decimal("delta", &delta)?;
            total_percent = total_percent + parse_decimal("delta_percent", &percent)?;
        }

        let count = rows.len() as i64;
        if count == 0 {
            return Ok(PriceHistorySummary {
                change_count: 0,
                average_change: Decimal::zero(),
                average_change_percent: Decimal::zero(),
            });
        }

        let n = Decimal::from(count);
        Ok(PriceHistorySummary {
            change_count: count,
            average_change: (total_change / n).round_dp(2),
            average_change_percent: (total_percent / n).round_dp(2),
        })
    }
}
