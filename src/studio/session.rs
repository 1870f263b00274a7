//! Studio session — the product/tone selection, the call engine, and the
//! analytics views, tied together behind one command handler.

use std::sync::Arc;

use tracing::info;

use crate::analytics::{self, CallStats, RecentCall, StatsOptions};
use crate::call::{CallEngine, CallHistory, CaptureOutcome, ReplyOutcome};
use crate::config::StudioConfig;
use crate::script::{
    Persona, ProductId, Script, ScriptStage, ToneId, derive_script, simulator_summary,
};
use crate::voice::VoiceAdapter;

use super::command::StudioCommand;
use super::render;

/// What the presentation layer should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    /// Show this text.
    Text(String),
    /// Nothing to show; transcript events carry the result.
    Silent,
    /// Leave the studio.
    Quit,
}

pub struct StudioSession {
    product: ProductId,
    tone: ToneId,
    engine: CallEngine,
    options: StatsOptions,
}

impl StudioSession {
    pub fn new(config: &StudioConfig, voice: Arc<dyn VoiceAdapter>) -> Self {
        Self::with_history(config, voice, CallHistory::new())
    }

    pub fn with_history(
        config: &StudioConfig,
        voice: Arc<dyn VoiceAdapter>,
        history: Arc<CallHistory>,
    ) -> Self {
        let script = derive_script(config.product, config.tone);
        Self {
            product: config.product,
            tone: config.tone,
            engine: CallEngine::new(script, voice, history, config.reply_delay),
            options: StatsOptions {
                top_objections: config.top_objections,
                recent_calls: config.recent_calls,
            },
        }
    }

    pub fn engine(&self) -> &CallEngine {
        &self.engine
    }

    pub fn product(&self) -> ProductId {
        self.product
    }

    pub fn tone(&self) -> ToneId {
        self.tone
    }

    /// Switch product. Re-derives the script, dropping manual edits.
    pub async fn select_product(&mut self, product: ProductId) -> Script {
        self.product = product;
        self.rederive().await
    }

    /// Switch tone. Re-derives the script, dropping manual edits.
    pub async fn select_tone(&mut self, tone: ToneId) -> Script {
        self.tone = tone;
        self.rederive().await
    }

    async fn rederive(&self) -> Script {
        let script = derive_script(self.product, self.tone);
        self.engine.replace_script(script.clone()).await;
        info!(product = %self.product, tone = %self.tone, "Script derived");
        script
    }

    pub async fn edit_script(&self, stage: ScriptStage, text: impl Into<String>) {
        self.engine.edit_script(stage, text).await;
    }

    pub fn persona(&self) -> Persona {
        Persona::derive(self.product, self.tone)
    }

    pub fn summary(&self) -> String {
        simulator_summary(self.product, self.tone)
    }

    pub async fn stats(&self) -> CallStats {
        let calls = self.engine.history().snapshot().await;
        analytics::compute(&calls, &self.options)
    }

    pub async fn recent_calls(&self) -> Vec<RecentCall> {
        let calls = self.engine.history().snapshot().await;
        analytics::recent_calls(&calls, self.options.recent_calls)
    }

    /// Every completed call as pretty JSON.
    pub async fn export_history(&self) -> Result<String, serde_json::Error> {
        let calls = self.engine.history().snapshot().await;
        serde_json::to_string_pretty(&calls)
    }

    /// Execute one command.
    pub async fn handle(&mut self, command: StudioCommand) -> SessionReply {
        match command {
            StudioCommand::Start => {
                if self.engine.start_call().await {
                    SessionReply::Silent
                } else {
                    SessionReply::Text(
                        "A call is already live. Tag it with /won, /follow, /lost or /reset."
                            .into(),
                    )
                }
            }
            StudioCommand::End(outcome) => match self.engine.end_call(outcome).await {
                Some(call) => SessionReply::Text(format!(
                    "📞 Call ended · {} exchanges · Outcome {}",
                    call.exchanges(),
                    call.outcome.label()
                )),
                None => SessionReply::Text("No live call to end.".into()),
            },
            StudioCommand::Reset => {
                self.engine.reset().await;
                SessionReply::Text("Session reset.".into())
            }
            StudioCommand::Reply(text) => {
                let outcome = self.engine.submit_reply(&text).await;
                if outcome == ReplyOutcome::Ignored && !self.engine.state().await.is_active() {
                    SessionReply::Text("No live call. Type /start to dial.".into())
                } else {
                    SessionReply::Silent
                }
            }
            StudioCommand::Voice => match self.engine.capture_voice().await {
                CaptureOutcome::Unsupported => {
                    SessionReply::Text("Voice capture is not available, type your reply.".into())
                }
                CaptureOutcome::Inactive => {
                    SessionReply::Text("No live call. Type /start to dial.".into())
                }
                CaptureOutcome::Empty => SessionReply::Text("Didn't catch that.".into()),
                CaptureOutcome::Discarded { .. } | CaptureOutcome::Replied(_) => {
                    SessionReply::Silent
                }
            },
            StudioCommand::Product(product) => {
                let script = self.select_product(product).await;
                SessionReply::Text(format!(
                    "Product set to {}.\n{}",
                    product.label(),
                    render::script(&script)
                ))
            }
            StudioCommand::Tone(tone) => {
                let script = self.select_tone(tone).await;
                SessionReply::Text(format!(
                    "Tone set to {}.\n{}",
                    tone.label(),
                    render::script(&script)
                ))
            }
            StudioCommand::Edit { stage, text } => {
                self.edit_script(stage, text).await;
                SessionReply::Text(format!("{} updated.", stage.label()))
            }
            StudioCommand::Script => {
                SessionReply::Text(render::script(&self.engine.script().await))
            }
            StudioCommand::Persona => SessionReply::Text(render::persona(&self.persona())),
            StudioCommand::Transcript => SessionReply::Text(render::transcript(
                &self.engine.snapshot().await,
                &self.summary(),
            )),
            StudioCommand::Stats => {
                let stats = self.stats().await;
                let recent = self.recent_calls().await;
                SessionReply::Text(render::stats(&stats, &recent))
            }
            StudioCommand::Export => match self.export_history().await {
                Ok(json) => SessionReply::Text(json),
                Err(e) => SessionReply::Text(format!("Export failed: {e}")),
            },
            StudioCommand::Help => SessionReply::Text(render::HELP.into()),
            StudioCommand::Quit => SessionReply::Quit,
            StudioCommand::Invalid { reason, .. } => SessionReply::Text(format!("⚠️  {reason}")),
        }
    }
}
