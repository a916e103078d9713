//! Health Notifier Contracts
//!
//! Data exchanged between the prober, the dispatcher and the messaging
//! collaborator.

mod alert;
mod verdict;

pub use alert::*;
pub use verdict::*;

use serde::{Deserialize, Serialize};

/// Status string a target must report to be considered healthy
pub const STATUS_UP: &str = "UP";

/// Status synthesized when the target answers with a non-200 code
pub const STATUS_DOWN: &str = "DOWN";

/// JSON body returned by the health endpoint
///
/// Only the `status` field is recognized; anything else in the payload
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPayload {
    /// Reported status, `"UP"` when healthy
    pub status: String,
}

/// Receipt returned by the messaging collaborator after delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Channel the message landed in
    pub channel_id: String,

    /// Collaborator-assigned message timestamp
    pub timestamp: String,
}

impl DeliveryReceipt {
    /// Create a receipt
    pub fn new(channel_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            timestamp: timestamp.into(),
        }
    }
}
