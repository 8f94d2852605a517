// src/pipeline/outcome.rs

//! Results of the best-effort side effects.

use crate::error::DeliveryError;

/// Result of one optional outbound step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not configured, or not needed for this event
    Skipped,
    /// The endpoint accepted the request
    Delivered { status: u16 },
    /// The endpoint failed; recovered locally
    Failed(DeliveryError),
}

impl StepOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, StepOutcome::Delivered { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

impl From<Result<u16, DeliveryError>> for StepOutcome {
    fn from(result: Result<u16, DeliveryError>) -> Self {
        match result {
            Ok(status) => StepOutcome::Delivered { status },
            Err(err) => StepOutcome::Failed(err),
        }
    }
}
