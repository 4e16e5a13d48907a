//! One-shot status messages handed from a mutating request to the next rendered screen.

use serde::{Deserialize, Serialize};

/// Outcome of the last mutating action. Both keys serialize, absent ones as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flash {
    pub success: Option<String>,
    /// Reserved: no write path populates it yet, but it is carried and rendered end to end.
    pub error: Option<String>,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}
