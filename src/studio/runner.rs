//! Main studio loop — reads channel input, dispatches commands, and relays
//! call events back to the channel.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::broadcast::error::RecvError;

use crate::call::CallEvent;
use crate::channels::{Channel, StatusUpdate};
use crate::error::Result;

use super::command::CommandParser;
use super::session::{SessionReply, StudioSession};

/// Run the studio until the user quits, the input ends, or Ctrl+C.
pub async fn run(mut session: StudioSession, channel: Arc<dyn Channel>) -> Result<()> {
    let mut message_stream = channel.start().await?;

    let mut events = session.engine().subscribe();
    let relay_channel = Arc::clone(&channel);
    let relay_handle = tokio::spawn(async move {
        loop {
            let update = match events.recv().await {
                Ok(CallEvent::Message(message)) => StatusUpdate::Transcript(message),
                Ok(CallEvent::Ended(call)) => StatusUpdate::CallEnded(call),
                Ok(CallEvent::Reset) => continue,
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Call event relay lagged");
                    StatusUpdate::Status(format!("{n} call updates skipped"))
                }
                Err(RecvError::Closed) => break,
            };
            if let Err(e) = relay_channel.send_status(update).await {
                tracing::warn!("Failed to relay call event: {}", e);
            }
        }
    });

    tracing::info!(channel = channel.name(), "Studio ready");

    loop {
        let message = tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, shutting down...");
                break;
            }
            msg = message_stream.next() => {
                match msg {
                    Some(m) => m,
                    None => {
                        tracing::info!("Input ended, shutting down...");
                        break;
                    }
                }
            }
        };

        let command = CommandParser::parse(&message.content);
        tracing::debug!(
            channel = %message.channel,
            received_at = %message.received_at,
            ?command,
            "Command parsed"
        );

        match session.handle(command).await {
            SessionReply::Text(text) => channel.respond(&message, &text).await?,
            SessionReply::Silent => channel.respond(&message, "").await?,
            SessionReply::Quit => {
                tracing::info!("Quit command received, exiting...");
                break;
            }
        }
    }

    // leave no timers running past the loop
    session.engine().reset().await;
    relay_handle.abort();
    Ok(())
}
