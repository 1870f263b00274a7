//! Simulated calls — transcript model, the call flow engine, and the
//! history of completed calls.

pub mod engine;
pub mod history;
pub mod model;
pub mod state;

pub use engine::{CallEngine, CallEvent, CallSnapshot, CaptureOutcome, ReplyOutcome};
pub use history::{CallHistory, HistoryEvent};
pub use model::{CallMessage, CallOutcome, CompletedCall, MessageRole};
pub use state::CallState;
