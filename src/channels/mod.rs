//! Channel abstraction for studio I/O.

pub mod cli;

use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::Stream;

use crate::call::{CallMessage, CompletedCall};
use crate::error::ChannelError;

pub use cli::CliChannel;

/// One line of user input.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub channel: String,
    pub content: String,
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(channel: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            content: content.into(),
            received_at: Utc::now(),
        }
    }
}

pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// Asynchronous updates pushed to the channel while a call runs.
#[derive(Debug, Clone)]
pub enum StatusUpdate {
    /// A transcript entry was appended.
    Transcript(CallMessage),
    /// A call was tagged and recorded.
    CallEnded(CompletedCall),
    /// Free-form status line.
    Status(String),
}

#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Begin reading input.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Reply to one input line.
    async fn respond(&self, msg: &IncomingMessage, content: &str) -> Result<(), ChannelError>;

    async fn send_status(&self, status: StatusUpdate) -> Result<(), ChannelError>;
}
