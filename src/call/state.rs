//! Call state machine — a call is either idle or live.

use serde::{Deserialize, Serialize};

/// Lifecycle of a simulated call.
///
/// Inactive → Active on dial; Active → Inactive on outcome tagging or reset.
/// Every call ends back in Inactive, so a new dial always starts clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    Inactive,
    Active,
}

impl CallState {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: CallState) -> bool {
        use CallState::*;
        matches!((self, target), (Inactive, Active) | (Active, Inactive))
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl Default for CallState {
    fn default() -> Self {
        Self::Inactive
    }
}

impl std::fmt::Display for CallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
        };
        write!(f, "{s}")
    }
}
