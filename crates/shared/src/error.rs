use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::messages;

/// Required text inputs of the availability form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Time,
    Date,
}

/// Input problems that stop an availability check before the business rule runs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("missing {0:?} value")]
    MissingField(Field),
    #[error("invalid party size: {0:?}")]
    InvalidPartySize(String),
}

impl ValidationError {
    /// Text shown in the error panel. Every validation failure shares it.
    pub fn user_message(&self) -> &'static str {
        messages::INVALID_INPUT
    }
}

/// Why a well-formed request cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    #[error("weekend slot at or after the late cutoff")]
    LateWeekendSlot,
    #[error("party larger than the maximum table size")]
    PartyTooLarge,
}

impl UnavailableReason {
    pub fn user_message(&self) -> &'static str {
        messages::NO_AVAILABILITY
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown element id: {0}")]
pub struct ParseElementError(pub String);
