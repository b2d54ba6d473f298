//! Status - ユーザーへの結果表示
//!
//! 最後に報告されたメッセージだけを保持します（履歴なし）。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::SessionError;
use crate::ports::{Clock, SystemClock};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
    pub at: DateTime<Utc>,
}

pub struct StatusReporter {
    latest: Option<Status>,
    clock: Arc<dyn Clock>,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            latest: None,
            clock,
        }
    }

    /// Last write wins.
    pub fn report(&mut self, text: impl Into<String>, is_error: bool) {
        let text = text.into();
        if is_error {
            warn!(status = %text, "status");
        } else {
            info!(status = %text, "status");
        }
        self.latest = Some(Status {
            text,
            is_error,
            at: self.clock.now(),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.report(text, false);
    }

    pub fn error(&mut self, err: &SessionError) {
        self.report(err.to_string(), true);
    }

    pub fn latest(&self) -> Option<&Status> {
        self.latest.as_ref()
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}
