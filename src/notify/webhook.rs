//! Webhook notifier: POSTs the notice as JSON with retry/backoff.

use super::{Notifier, NotifyError, ValuationNotice};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
    max_elapsed: Duration,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
            max_elapsed: Duration::from_secs(60),
        }
    }

    /// Cap total retry time.
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn valuation_completed(&self, notice: &ValuationNotice) -> Result<(), NotifyError> {
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.max_elapsed),
            ..Default::default()
        };

        retry(backoff, || async {
            debug!(url = %self.url, token = %notice.token, "posting valuation notice");
            let response = self
                .client
                .post(&self.url)
                .json(notice)
                .send()
                .await
                .map_err(|e| backoff::Error::transient(NotifyError::Network(e.to_string())))?;

            let status = response.status();
            if status == 429 || status.is_server_error() {
                return Err(backoff::Error::transient(NotifyError::Http {
                    status: status.as_u16(),
                    message: "Retryable response".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(NotifyError::Http {
                    status: status.as_u16(),
                    message: "Webhook rejected notice".to_string(),
                }));
            }
            Ok(())
        })
        .await
    }
}
