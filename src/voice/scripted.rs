//! Scripted voice — replays prepared utterances as captured speech.
//!
//! Useful for demos and for driving the simulator without a microphone.
//! Everything "spoken" to it is kept so callers can inspect playback.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::VoiceError;

use super::VoiceAdapter;

pub struct ScriptedVoice {
    utterances: Mutex<VecDeque<String>>,
    spoken: Mutex<Vec<String>>,
    capture_delay: Duration,
    stops: AtomicUsize,
}

impl ScriptedVoice {
    pub fn new<I, S>(utterances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            utterances: Mutex::new(utterances.into_iter().map(Into::into).collect()),
            spoken: Mutex::new(Vec::new()),
            capture_delay: Duration::ZERO,
            stops: AtomicUsize::new(0),
        }
    }

    /// Simulate capture latency before each utterance resolves.
    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = delay;
        self
    }

    /// Everything passed to `speak`, in order.
    pub async fn spoken(&self) -> Vec<String> {
        self.spoken.lock().await.clone()
    }

    /// How many times `stop` was called.
    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoiceAdapter for ScriptedVoice {
    fn name(&self) -> &str {
        "scripted"
    }

    fn supports_listening(&self) -> bool {
        true
    }

    fn supports_speaking(&self) -> bool {
        true
    }

    async fn speak(&self, text: &str) -> Result<(), VoiceError> {
        self.spoken.lock().await.push(text.to_string());
        Ok(())
    }

    async fn listen(&self) -> String {
        if !self.capture_delay.is_zero() {
            tokio::time::sleep(self.capture_delay).await;
        }
        // exhausted script behaves like a failed capture
        self.utterances.lock().await.pop_front().unwrap_or_default()
    }

    async fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}
