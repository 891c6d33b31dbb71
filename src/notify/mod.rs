//! Downstream notifications sent after a valuation is stored.
//!
//! Delivery runs in the background and never affects the valuation
//! response; failures are logged.

use crate::domain::Decimal;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub mod mock;
pub mod webhook;

pub use mock::RecordingNotifier;
pub use webhook::WebhookNotifier;

/// What downstream consumers (mailer, CRM) get about a completed valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationNotice {
    pub token: String,
    pub email: String,
    pub name: Option<String>,
    pub address: String,
    pub estimated_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub confidence_level: u8,
}

#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
}

#[async_trait]
pub trait Notifier: Send + Sync + fmt::Debug {
    async fn valuation_completed(&self, notice: &ValuationNotice) -> Result<(), NotifyError>;
}

/// Notifier used when no webhook is configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn valuation_completed(&self, notice: &ValuationNotice) -> Result<(), NotifyError> {
        info!(
            token = %notice.token,
            estimated_price = %notice.estimated_price,
            "valuation completed notification (no webhook configured)"
        );
        Ok(())
    }
}

/// Deliver a notice on a background task.
pub fn dispatch(notifier: Arc<dyn Notifier>, notice: ValuationNotice) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = notifier.valuation_completed(&notice).await {
            warn!(token = %notice.token, error = %e, "valuation notification failed");
        }
    })
}
