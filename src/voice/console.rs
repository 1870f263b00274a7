//! Console voice — "speaks" agent lines by echoing them to stderr.

use async_trait::async_trait;

use crate::error::VoiceError;

use super::VoiceAdapter;

/// Terminal stand-in for speech synthesis. Cannot listen.
#[derive(Debug, Default)]
pub struct ConsoleVoice;

impl ConsoleVoice {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VoiceAdapter for ConsoleVoice {
    fn name(&self) -> &str {
        "console"
    }

    fn supports_listening(&self) -> bool {
        false
    }

    fn supports_speaking(&self) -> bool {
        true
    }

    async fn speak(&self, text: &str) -> Result<(), VoiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        eprintln!("🔊 {}", text);
        Ok(())
    }

    async fn listen(&self) -> String {
        String::new()
    }

    async fn stop(&self) {}
}
