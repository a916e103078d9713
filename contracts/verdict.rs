//! Health verdict produced by a single probe

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{STATUS_DOWN, STATUS_UP};

/// Normalized outcome of one probe attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthVerdict {
    /// Whether an HTTP response was received at all
    pub transport_succeeded: bool,

    /// Observed status code, 0 if no response was received
    pub http_status_code: u16,

    /// Status decoded from the body, empty if undecodable
    pub reported_status: String,

    /// Transport or decode diagnostic, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// When the probe completed
    pub checked_at: DateTime<Local>,
}

impl HealthVerdict {
    /// Verdict for a response whose body decoded to `reported_status`
    pub fn responded(http_status_code: u16, reported_status: impl Into<String>) -> Self {
        Self {
            transport_succeeded: true,
            http_status_code,
            reported_status: reported_status.into(),
            detail: None,
            checked_at: Local::now(),
        }
    }

    /// Verdict for a non-200 response; the status is synthesized as `DOWN`
    pub fn bad_status(http_status_code: u16) -> Self {
        Self::responded(http_status_code, STATUS_DOWN)
    }

    /// Verdict for a 200 response whose body could not be decoded
    pub fn undecodable(http_status_code: u16, error: impl Into<String>) -> Self {
        Self::responded(http_status_code, String::new()).with_detail(error)
    }

    /// Verdict for a probe that never got a response
    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            transport_succeeded: false,
            http_status_code: 0,
            reported_status: String::new(),
            detail: Some(error.into()),
            checked_at: Local::now(),
        }
    }

    /// Attach a diagnostic
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// True only for a 200 response reporting `UP`
    pub fn is_healthy(&self) -> bool {
        self.transport_succeeded && self.http_status_code == 200 && self.reported_status == STATUS_UP
    }

    /// Compare two verdicts ignoring when they were taken
    pub fn same_outcome(&self, other: &HealthVerdict) -> bool {
        self.transport_succeeded == other.transport_succeeded
            && self.http_status_code == other.http_status_code
            && self.reported_status == other.reported_status
            && self.detail == other.detail
    }
}
