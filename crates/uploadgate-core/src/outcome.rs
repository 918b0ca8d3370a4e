//! Validation outcome type
//!
//! Every public check in uploadgate returns exactly one `ValidationOutcome`.
//! The code mirrors HTTP semantics so API handlers can surface it directly:
//! 200 accepted, 400 rejected (policy violation), 500 internal fault.

use serde::{Deserialize, Serialize};

pub const CODE_SUCCESS: u16 = 200;
pub const CODE_REJECTED: u16 = 400;
pub const CODE_INTERNAL_FAULT: u16 = 500;

/// Generic message for internal faults. Deliberately vague so internal
/// details never leak to clients.
pub const INTERNAL_FAULT_MESSAGE: &str = "Aw! something wrong here!";

/// Result of a validation check: a status code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub code: u16,
    pub message: String,
}

impl ValidationOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            code: CODE_REJECTED,
            message: message.into(),
        }
    }

    pub fn internal_fault() -> Self {
        Self {
            code: CODE_INTERNAL_FAULT,
            message: INTERNAL_FAULT_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}
