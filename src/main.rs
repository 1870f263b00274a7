use std::sync::Arc;

use call_studio::channels::CliChannel;
use call_studio::config::{StudioConfig, VoiceMode};
use call_studio::studio::{self, StudioSession};
use call_studio::voice::{ConsoleVoice, SilentVoice, VoiceAdapter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = StudioConfig::from_env()?;

    let voice: Arc<dyn VoiceAdapter> = match config.voice {
        VoiceMode::Console => Arc::new(ConsoleVoice::new()),
        VoiceMode::Off => Arc::new(SilentVoice::new()),
    };

    let session = StudioSession::new(&config, Arc::clone(&voice));

    eprintln!("📞 Call Studio v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Campaign: {}", session.summary());
    eprintln!("   Voice: {}", voice.name());
    eprintln!("   Reply delay: {}ms", config.reply_delay.as_millis());
    eprintln!("   /start to dial, type to answer as the customer. /help for commands.\n");

    studio::run(session, Arc::new(CliChannel::new())).await?;

    eprintln!("👋 Bye");
    Ok(())
}
