//! Configuration types.

use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::script::{ProductId, ToneId};

/// Default pause before the agent answers a prospect reply.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(600);

/// Which voice adapter the studio wires into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceMode {
    /// Agent lines are echoed to stderr as speech.
    Console,
    /// No speech playback or capture.
    Off,
}

impl std::str::FromStr for VoiceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" | "on" => Ok(Self::Console),
            "off" | "none" | "silent" => Ok(Self::Off),
            other => Err(ConfigError::InvalidValue {
                key: "CALL_STUDIO_VOICE".into(),
                message: format!("expected 'console' or 'off', got '{other}'"),
            }),
        }
    }
}

/// Studio configuration.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Pause before a scheduled agent line is emitted.
    pub reply_delay: Duration,
    /// Product selected when the studio opens.
    pub product: ProductId,
    /// Tone selected when the studio opens.
    pub tone: ToneId,
    /// Voice adapter selection.
    pub voice: VoiceMode,
    /// How many calls the recent-calls panel shows.
    pub recent_calls: usize,
    /// How many objection categories the insights panel shows.
    pub top_objections: usize,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            product: ProductId::default(),
            tone: ToneId::default(),
            voice: VoiceMode::Console,
            recent_calls: 3,
            top_objections: 3,
        }
    }
}

impl StudioConfig {
    /// Build configuration from `CALL_STUDIO_*` environment variables.
    ///
    /// Numbers that fail to parse fall back to their defaults; unknown
    /// product, tone, or voice identifiers are rejected.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    /// Same as [`from_env`](Self::from_env) with an injectable source.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> std::result::Result<Self, ConfigError> {
        let defaults = Self::default();

        let reply_delay = lookup("CALL_STUDIO_REPLY_DELAY_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.reply_delay);

        let product = match lookup("CALL_STUDIO_PRODUCT") {
            Some(raw) => raw.parse::<ProductId>().map_err(|e| ConfigError::InvalidValue {
                key: "CALL_STUDIO_PRODUCT".into(),
                message: format!("{e}"),
            })?,
            None => defaults.product,
        };

        let tone = match lookup("CALL_STUDIO_TONE") {
            Some(raw) => raw.parse::<ToneId>().map_err(|e| ConfigError::InvalidValue {
                key: "CALL_STUDIO_TONE".into(),
                message: format!("{e}"),
            })?,
            None => defaults.tone,
        };

        let voice = match lookup("CALL_STUDIO_VOICE") {
            Some(raw) => raw.parse::<VoiceMode>()?,
            None => defaults.voice,
        };

        let recent_calls = lookup("CALL_STUDIO_RECENT_CALLS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.recent_calls);

        let top_objections = lookup("CALL_STUDIO_TOP_OBJECTIONS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.top_objections);

        Ok(Self {
            reply_delay,
            product,
            tone,
            voice,
            recent_calls,
            top_objections,
        })
    }
}
