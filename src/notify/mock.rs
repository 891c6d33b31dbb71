//! In-memory notifier for tests.

use super::{Notifier, NotifyError, ValuationNotice};
use async_trait::async_trait;
use std::sync::Mutex;

/// Records delivered notices; can be set to fail every delivery.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<ValuationNotice>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn delivered(&self) -> Vec<ValuationNotice> {
        self.delivered
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn valuation_completed(&self, notice: &ValuationNotice) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Network("recording notifier set to fail".to_string()));
        }
        if let Ok(mut delivered) = self.delivered.lock() {
            delivered.push(notice.clone());
        }
        Ok(())
    }
}
