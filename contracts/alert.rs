//! Alert message layout
//!
//! A headline plus titled fields, mirroring a chat attachment.

use serde::{Deserialize, Serialize};

use super::HealthVerdict;

/// Fixed headline for every alert
pub const ALERT_HEADLINE: &str = ":scream: Server is down :scream:";

/// Timestamp format used in the check time field
pub const CHECK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A titled value inside an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertField {
    pub title: String,
    pub value: String,
    /// Rendered side by side with neighbouring short fields
    pub short: bool,
}

impl AlertField {
    pub fn new(title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short,
        }
    }
}

/// Structured notification sent to the messaging channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    /// Text shown above the fields
    pub headline: String,

    /// Ordered fields
    pub fields: Vec<AlertField>,
}

impl AlertMessage {
    /// Build the alert for an unhealthy verdict
    pub fn from_verdict(verdict: &HealthVerdict, target_url: &str) -> Self {
        let mut fields = vec![
            AlertField::new(
                "Checked at",
                verdict.checked_at.format(CHECK_TIME_FORMAT).to_string(),
                false,
            ),
            AlertField::new("Target", target_url, false),
            AlertField::new(
                "Health response status",
                verdict.http_status_code.to_string(),
                true,
            ),
            AlertField::new("Health status", verdict.reported_status.clone(), true),
        ];

        if let Some(ref detail) = verdict.detail {
            fields.push(AlertField::new("Probe error", detail.clone(), false));
        }

        Self {
            headline: ALERT_HEADLINE.to_string(),
            fields,
        }
    }

    /// Look up a field value by title
    pub fn field(&self, title: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.title == title)
            .map(|f| f.value.as_str())
    }
}
