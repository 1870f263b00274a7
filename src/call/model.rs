//! Call data model — transcript messages, outcomes, and completed calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// A scripted line spoken by the simulated agent.
    Agent,
    /// A reply typed or spoken by the user playing the customer.
    Prospect,
    /// A system marker such as "call dialed".
    Note,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Agent => "agent",
            Self::Prospect => "prospect",
            Self::Note => "note",
        };
        write!(f, "{s}")
    }
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl CallMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Agent, content)
    }

    pub fn prospect(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Prospect, content)
    }

    pub fn note(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Note, content)
    }

    /// Whitespace-separated token count.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Number of agent lines already delivered in a transcript.
pub fn agent_turns(transcript: &[CallMessage]) -> usize {
    transcript
        .iter()
        .filter(|m| m.role == MessageRole::Agent)
        .count()
}

/// Total words spoken by `role` across a transcript.
pub fn words_by_role(transcript: &[CallMessage], role: MessageRole) -> usize {
    transcript
        .iter()
        .filter(|m| m.role == role)
        .map(CallMessage::word_count)
        .sum()
}

/// How a rehearsed call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallOutcome {
    /// Deal won.
    Success,
    /// Prospect wants another touchpoint.
    FollowUp,
    /// Deal lost.
    Lost,
}

impl CallOutcome {
    /// Button label in the simulator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Won",
            Self::FollowUp => "Follow Up",
            Self::Lost => "Lost",
        }
    }
}

impl std::fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::FollowUp => "follow-up",
            Self::Lost => "lost",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for CallOutcome {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" | "won" | "win" => Ok(Self::Success),
            "follow-up" | "follow" | "followup" => Ok(Self::FollowUp),
            "lost" | "lose" => Ok(Self::Lost),
            other => Err(CatalogError::UnknownOutcome(other.to_string())),
        }
    }
}

/// A finished call: frozen transcript plus the outcome it was tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedCall {
    pub transcript: Vec<CallMessage>,
    pub outcome: CallOutcome,
    pub completed_at: DateTime<Utc>,
}

impl CompletedCall {
    pub fn new(transcript: Vec<CallMessage>, outcome: CallOutcome) -> Self {
        Self {
            transcript,
            outcome,
            completed_at: Utc::now(),
        }
    }

    /// Number of transcript entries, notes included.
    pub fn exchanges(&self) -> usize {
        self.transcript.len()
    }
}
