//! Voice I/O — speech playback and capture behind a single adapter trait.
//!
//! The engine never depends on a voice being present. Adapters report what
//! they can do; missing capabilities degrade to silence and empty captures.

pub mod console;
pub mod scripted;

use async_trait::async_trait;

use crate::error::VoiceError;

pub use console::ConsoleVoice;
pub use scripted::ScriptedVoice;

/// Speech-to-text and text-to-speech seam.
#[async_trait]
pub trait VoiceAdapter: Send + Sync {
    /// Adapter name for logs.
    fn name(&self) -> &str;

    fn supports_listening(&self) -> bool;

    fn supports_speaking(&self) -> bool;

    /// Play `text` as speech. Callers treat this as fire-and-forget.
    async fn speak(&self, text: &str) -> Result<(), VoiceError>;

    /// Capture one utterance. Resolves to an empty string on failure or
    /// when capture is unsupported.
    async fn listen(&self) -> String;

    /// Cancel any in-flight capture. Best effort.
    async fn stop(&self);
}

/// Adapter with no voice capabilities at all.
#[derive(Debug, Default)]
pub struct SilentVoice;

impl SilentVoice {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VoiceAdapter for SilentVoice {
    fn name(&self) -> &str {
        "silent"
    }

    fn supports_listening(&self) -> bool {
        false
    }

    fn supports_speaking(&self) -> bool {
        false
    }

    async fn speak(&self, _text: &str) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported("speaking"))
    }

    async fn listen(&self) -> String {
        String::new()
    }

    async fn stop(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn silent_voice_degrades() {
        let voice = SilentVoice::new();
        assert!(!voice.supports_listening());
        assert!(!voice.supports_speaking());
        assert!(voice.speak("hello").await.is_err());
        assert_eq!(voice.listen().await, "");
    }
}
