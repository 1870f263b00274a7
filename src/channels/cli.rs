//! CLI channel — stdin/stderr REPL for running practice calls locally.

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::call::MessageRole;
use crate::channels::{Channel, IncomingMessage, MessageStream, StatusUpdate};
use crate::error::ChannelError;
use crate::studio::render;

/// Reads lines from stdin, prints replies to stdout and call updates to
/// stderr.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            eprint!("> ");

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            eprint!("> ");
                            continue;
                        }
                        if tx.send(IncomingMessage::new("cli", line)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn respond(&self, _msg: &IncomingMessage, content: &str) -> Result<(), ChannelError> {
        if !content.is_empty() {
            let mut out = tokio::io::stdout();
            out.write_all(format!("\n{}\n\n", content).as_bytes()).await?;
            out.flush().await?;
        }
        eprint!("> ");
        Ok(())
    }

    async fn send_status(&self, status: StatusUpdate) -> Result<(), ChannelError> {
        match status {
            // the reply line was typed by the user, no need to echo it
            StatusUpdate::Transcript(message) if message.role == MessageRole::Prospect => {}
            StatusUpdate::Transcript(message) => {
                eprintln!("\r{}", render::message_line(&message));
                if message.role == MessageRole::Agent {
                    eprint!("> ");
                }
            }
            StatusUpdate::CallEnded(call) => {
                eprintln!("✅ Logged as {}", call.outcome.label());
            }
            StatusUpdate::Status(msg) => eprintln!("ℹ️  {}", msg),
        }
        Ok(())
    }
}
