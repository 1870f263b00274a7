//! Call flow engine — runs one simulated call at a time.
//!
//! The engine owns the active script and the live transcript. Which agent
//! line comes next is never stored: it is looked up from the script's call
//! flow using the number of agent messages already in the transcript.
//!
//! Agent answers to prospect replies are delayed by a short "thinking"
//! pause. The delay runs as a spawned task tracked by a ticket; ending,
//! resetting, or restarting the call drops the ticket and aborts the task,
//! and a task that wakes with a stale ticket does nothing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::script::{CallFlow, Script, ScriptStage};
use crate::voice::VoiceAdapter;

use super::history::CallHistory;
use super::model::{CallMessage, CallOutcome, CompletedCall, MessageRole, agent_turns};
use super::state::CallState;

/// Spoken when the script has no opener line.
pub const FALLBACK_GREETING: &str = "Hello, this is your Wishfin advisor. How can I help today?";
/// Note appended when a call is dialed.
pub const DIALED_NOTE: &str = "Outbound call dialed...";
/// Note appended when a reply arrives after the last scripted line.
pub const SCRIPT_COMPLETE_NOTE: &str = "Script complete — wrap the call.";

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Events published as the call progresses.
#[derive(Debug, Clone)]
pub enum CallEvent {
    /// A transcript entry was appended.
    Message(CallMessage),
    /// The call was tagged and handed to the history.
    Ended(CompletedCall),
    /// The session was cleared.
    Reset,
}

/// What happened to a prospect reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Blank text, or no live call.
    Ignored,
    /// Reply recorded; an agent line will follow after the delay.
    AgentScheduled,
    /// Reply recorded; the script has no lines left.
    ScriptComplete,
}

/// What happened to a voice capture request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The voice adapter cannot listen.
    Unsupported,
    /// No call is live.
    Inactive,
    /// Capture produced no text.
    Empty,
    /// The call ended or was reset while listening; the text was dropped.
    Discarded { text: String },
    /// The captured text was submitted as a prospect reply.
    Replied(ReplyOutcome),
}

/// Point-in-time view of the engine for rendering.
#[derive(Debug, Clone)]
pub struct CallSnapshot {
    pub state: CallState,
    pub transcript: Vec<CallMessage>,
    pub outcome: Option<CallOutcome>,
    pub completion_percent: u8,
    pub agent_line_pending: bool,
}

/// The single outstanding delayed agent line.
struct PendingLine {
    ticket: u64,
    handle: JoinHandle<()>,
}

struct EngineInner {
    state: CallState,
    script: Script,
    transcript: Vec<CallMessage>,
    outcome: Option<CallOutcome>,
    pending: Option<PendingLine>,
    next_ticket: u64,
    /// Bumped on every start, end, and reset. Voice captures that started
    /// under an older epoch are dropped.
    epoch: u64,
}

impl EngineInner {
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            debug!(ticket = pending.ticket, "Pending agent line cancelled");
        }
    }

    /// Move to `target` if the state machine allows it.
    fn transition_to(&mut self, target: CallState) -> bool {
        if !self.state.can_transition_to(target) {
            return false;
        }
        debug!(from = %self.state, to = %target, "Call state changed");
        self.state = target;
        true
    }
}

/// Drives the simulated conversation.
#[derive(Clone)]
pub struct CallEngine {
    inner: Arc<Mutex<EngineInner>>,
    voice: Arc<dyn VoiceAdapter>,
    history: Arc<CallHistory>,
    events: broadcast::Sender<CallEvent>,
    reply_delay: Duration,
}

impl CallEngine {
    pub fn new(
        script: Script,
        voice: Arc<dyn VoiceAdapter>,
        history: Arc<CallHistory>,
        reply_delay: Duration,
    ) -> Self {
        let (events, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(EngineInner {
                state: CallState::default(),
                script,
                transcript: Vec::new(),
                outcome: None,
                pending: None,
                next_ticket: 0,
                epoch: 0,
            })),
            voice,
            history,
            events,
            reply_delay,
        }
    }

    /// Subscribe to transcript and lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.events.subscribe()
    }

    pub fn history(&self) -> &Arc<CallHistory> {
        &self.history
    }

    pub fn voice(&self) -> &Arc<dyn VoiceAdapter> {
        &self.voice
    }

    // ── Script ──────────────────────────────────────────────────────────

    pub async fn script(&self) -> Script {
        self.inner.lock().await.script.clone()
    }

    /// Swap in a whole new script (product or tone change).
    pub async fn replace_script(&self, script: Script) {
        self.inner.lock().await.script = script;
        debug!("Script replaced");
    }

    /// Patch one stage of the script (designer edit).
    pub async fn edit_script(&self, stage: ScriptStage, text: impl Into<String>) {
        self.inner.lock().await.script.set_field(stage, text);
        debug!(%stage, "Script stage edited");
    }

    // ── Views ───────────────────────────────────────────────────────────

    pub async fn state(&self) -> CallState {
        self.inner.lock().await.state
    }

    pub async fn transcript(&self) -> Vec<CallMessage> {
        self.inner.lock().await.transcript.clone()
    }

    /// Outcome tagged on the most recent call, cleared by start and reset.
    pub async fn last_outcome(&self) -> Option<CallOutcome> {
        self.inner.lock().await.outcome
    }

    pub async fn completion_percent(&self) -> u8 {
        let inner = self.inner.lock().await;
        CallFlow::from_script(&inner.script).completion_percent(agent_turns(&inner.transcript))
    }

    pub async fn has_pending_line(&self) -> bool {
        self.inner.lock().await.pending.is_some()
    }

    pub async fn snapshot(&self) -> CallSnapshot {
        let inner = self.inner.lock().await;
        CallSnapshot {
            state: inner.state,
            transcript: inner.transcript.clone(),
            outcome: inner.outcome,
            completion_percent: CallFlow::from_script(&inner.script)
                .completion_percent(agent_turns(&inner.transcript)),
            agent_line_pending: inner.pending.is_some(),
        }
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Dial a new call. Returns `false` if a call is already live.
    ///
    /// Clears the previous transcript, notes the dial, and speaks the first
    /// opener line (or the fallback greeting when the opener is empty).
    pub async fn start_call(&self) -> bool {
        {
            let mut inner = self.inner.lock().await;
            if !inner.transition_to(CallState::Active) {
                debug!("Start ignored, call already active");
                return false;
            }

            inner.cancel_pending();
            inner.epoch += 1;
            inner.transcript.clear();
            inner.outcome = None;

            let opener = CallFlow::from_script(&inner.script)
                .opener
                .first()
                .cloned()
                .unwrap_or_else(|| FALLBACK_GREETING.to_string());

            self.append(&mut inner, CallMessage::note(DIALED_NOTE));
            self.append(&mut inner, CallMessage::agent(opener));

            info!(epoch = inner.epoch, "Call started");
        }

        // a capture left over from an earlier call must not land in this one
        self.voice.stop().await;
        true
    }

    /// Record a prospect reply and line up the agent's answer.
    pub async fn submit_reply(&self, text: &str) -> ReplyOutcome {
        let mut inner = self.inner.lock().await;
        self.submit_locked(&mut inner, text)
    }

    /// Tag the live call with an outcome and hand it to the history.
    ///
    /// Returns `None` when no call is live.
    pub async fn end_call(&self, outcome: CallOutcome) -> Option<CompletedCall> {
        let completed = {
            let mut inner = self.inner.lock().await;
            if !inner.transition_to(CallState::Inactive) {
                debug!(%outcome, "End ignored, no active call");
                return None;
            }

            inner.cancel_pending();
            inner.epoch += 1;
            inner.outcome = Some(outcome);

            CompletedCall::new(inner.transcript.clone(), outcome)
        };

        self.voice.stop().await;

        info!(
            %outcome,
            exchanges = completed.exchanges(),
            "Call ended"
        );

        self.history.record(completed.clone()).await;
        let _ = self.events.send(CallEvent::Ended(completed.clone()));

        Some(completed)
    }

    /// Drop the current call entirely. Safe to call at any time.
    pub async fn reset(&self) {
        let was_active = {
            let mut inner = self.inner.lock().await;
            inner.cancel_pending();
            inner.epoch += 1;
            // idle reset still clears a leftover transcript
            let was_active = inner.transition_to(CallState::Inactive);
            inner.transcript.clear();
            inner.outcome = None;
            was_active
        };

        self.voice.stop().await;

        if was_active {
            info!("Call reset");
        } else {
            debug!("Reset on idle session");
        }

        let _ = self.events.send(CallEvent::Reset);
    }

    /// Capture one utterance from the voice adapter and submit it as a
    /// prospect reply.
    ///
    /// The engine lock is not held while listening. If the call ends or is
    /// reset before the capture resolves, the captured text is dropped.
    pub async fn capture_voice(&self) -> CaptureOutcome {
        if !self.voice.supports_listening() {
            return CaptureOutcome::Unsupported;
        }

        let epoch = {
            let inner = self.inner.lock().await;
            if !inner.state.is_active() {
                return CaptureOutcome::Inactive;
            }
            inner.epoch
        };

        debug!(voice = self.voice.name(), "Listening for prospect reply");
        let text = self.voice.listen().await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch || !inner.state.is_active() {
            debug!("Voice capture discarded, session moved on");
            return CaptureOutcome::Discarded { text };
        }
        if text.trim().is_empty() {
            return CaptureOutcome::Empty;
        }

        CaptureOutcome::Replied(self.submit_locked(&mut inner, &text))
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn submit_locked(&self, inner: &mut EngineInner, text: &str) -> ReplyOutcome {
        let text = text.trim();
        if text.is_empty() {
            return ReplyOutcome::Ignored;
        }
        if !inner.state.is_active() {
            debug!("Reply ignored, no active call");
            return ReplyOutcome::Ignored;
        }

        self.append(inner, CallMessage::prospect(text));

        let flow = CallFlow::from_script(&inner.script);
        if flow.next_line(agent_turns(&inner.transcript)).is_some() {
            self.schedule_line(inner);
            ReplyOutcome::AgentScheduled
        } else {
            inner.cancel_pending();
            self.append(inner, CallMessage::note(SCRIPT_COMPLETE_NOTE));
            ReplyOutcome::ScriptComplete
        }
    }

    /// Schedule the next agent line. Any line already pending is replaced,
    /// so at most one is ever outstanding.
    fn schedule_line(&self, inner: &mut EngineInner) {
        inner.cancel_pending();

        let ticket = inner.next_ticket;
        inner.next_ticket += 1;

        let engine = self.clone();
        let delay = self.reply_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.fire_pending(ticket).await;
        });

        inner.pending = Some(PendingLine { ticket, handle });
        debug!(ticket, delay_ms = delay.as_millis() as u64, "Agent line scheduled");
    }

    /// Emit the delayed agent line, resolved against the transcript as it
    /// stands now.
    async fn fire_pending(&self, ticket: u64) {
        let mut inner = self.inner.lock().await;

        match inner.pending.as_ref() {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                debug!(ticket, "Stale agent line dropped");
                return;
            }
        }
        inner.pending = None;

        if !inner.state.is_active() {
            return;
        }

        let next = CallFlow::from_script(&inner.script)
            .next_line(agent_turns(&inner.transcript))
            .map(str::to_string);

        match next {
            Some(line) => self.append(&mut inner, CallMessage::agent(line)),
            // script was shortened while the line was pending
            None => self.append(&mut inner, CallMessage::note(SCRIPT_COMPLETE_NOTE)),
        }
    }

    fn append(&self, inner: &mut EngineInner, message: CallMessage) {
        debug!(role = %message.role, "Transcript entry appended");

        if message.role == MessageRole::Agent {
            self.speak(message.content.clone());
        }

        inner.transcript.push(message.clone());
        // ok if no presentation layer is listening
        let _ = self.events.send(CallEvent::Message(message));
    }

    /// Fire-and-forget speech playback.
    fn speak(&self, text: String) {
        if !self.voice.supports_speaking() {
            return;
        }
        let voice = Arc::clone(&self.voice);
        tokio::spawn(async move {
            if let Err(e) = voice.speak(&text).await {
                debug!(error = %e, "Speech playback failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::{ScriptedVoice, SilentVoice};

    const DELAY: Duration = Duration::from_millis(600);

    fn script() -> Script {
        Script::new(
            "Hi there. Is now a good time?",
            "What amount are you looking for?",
            "We have three offers",
            "Shall we book a callback?",
        )
    }

    fn engine_with(script: Script, voice: Arc<dyn VoiceAdapter>) -> CallEngine {
        CallEngine::new(script, voice, CallHistory::new(), DELAY)
    }

    fn engine() -> CallEngine {
        engine_with(script(), Arc::new(SilentVoice::new()))
    }

    async fn wait(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Let spawned fire-and-forget tasks run.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn roles(transcript: &[CallMessage]) -> Vec<MessageRole> {
        transcript.iter().map(|m| m.role).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn start_notes_dial_then_opens() {
        let engine = engine();
        assert!(engine.start_call().await);

        let transcript = engine.transcript().await;
        assert_eq!(roles(&transcript), vec![MessageRole::Note, MessageRole::Agent]);
        assert_eq!(transcript[0].content, DIALED_NOTE);
        assert_eq!(transcript[1].content, "Hi there");
        assert_eq!(engine.state().await, CallState::Active);
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_active_is_noop() {
        let engine = engine();
        assert!(engine.start_call().await);
        engine.submit_reply("hello").await;
        assert!(!engine.start_call().await);
        assert_eq!(engine.transcript().await.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_script_uses_fallback_greeting() {
        let engine = engine_with(Script::default(), Arc::new(SilentVoice::new()));
        engine.start_call().await;
        wait(2_000).await;

        let transcript = engine.transcript().await;
        assert_eq!(agent_turns(&transcript), 1);
        assert_eq!(transcript[1].content, FALLBACK_GREETING);
        assert!(!engine.has_pending_line().await);

        // first reply finds nothing left to say
        assert_eq!(engine.submit_reply("hi").await, ReplyOutcome::ScriptComplete);
        assert_eq!(agent_turns(&engine.transcript().await), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_is_answered_after_delay() {
        let engine = engine();
        engine.start_call().await;

        assert_eq!(
            engine.submit_reply("  Sure, go ahead  ").await,
            ReplyOutcome::AgentScheduled
        );
        let transcript = engine.transcript().await;
        assert_eq!(transcript.last().unwrap().role, MessageRole::Prospect);
        assert_eq!(transcript.last().unwrap().content, "Sure, go ahead");

        wait(599).await;
        assert_eq!(agent_turns(&engine.transcript().await), 1);

        wait(2).await;
        let transcript = engine.transcript().await;
        assert_eq!(agent_turns(&transcript), 2);
        assert_eq!(transcript.last().unwrap().content, "Is now a good time?");
        assert!(!engine.has_pending_line().await);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_reply_appends_nothing() {
        let engine = engine();
        engine.start_call().await;
        assert_eq!(engine.submit_reply("   \n\t").await, ReplyOutcome::Ignored);
        assert_eq!(engine.transcript().await.len(), 2);
        assert!(!engine.has_pending_line().await);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_without_call_is_ignored() {
        let engine = engine();
        assert_eq!(engine.submit_reply("hello?").await, ReplyOutcome::Ignored);
        assert!(engine.transcript().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn walks_every_stage_then_completes() {
        let engine = engine();
        engine.start_call().await;

        let expected = [
            "Is now a good time?",
            "What amount are you looking for?",
            "We have three offers",
            "Shall we book a callback?",
        ];
        for line in expected {
            assert_eq!(engine.submit_reply("ok").await, ReplyOutcome::AgentScheduled);
            wait(700).await;
            assert_eq!(engine.transcript().await.last().unwrap().content, line);
        }
        assert_eq!(engine.completion_percent().await, 100);

        for _ in 0..2 {
            assert_eq!(engine.submit_reply("ok").await, ReplyOutcome::ScriptComplete);
            let transcript = engine.transcript().await;
            assert_eq!(transcript.last().unwrap().content, SCRIPT_COMPLETE_NOTE);
            assert_eq!(agent_turns(&transcript), 5);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_replies_yields_one_agent_line() {
        let engine = engine();
        engine.start_call().await;

        engine.submit_reply("one").await;
        wait(300).await;
        engine.submit_reply("two").await;
        wait(300).await;
        // first timer would have fired here
        assert_eq!(agent_turns(&engine.transcript().await), 1);

        wait(400).await;
        let transcript = engine.transcript().await;
        assert_eq!(agent_turns(&transcript), 2);
        assert_eq!(transcript.last().unwrap().content, "Is now a good time?");
    }

    #[tokio::test(start_paused = true)]
    async fn ending_cancels_pending_line() {
        let engine = engine();
        engine.start_call().await;
        engine.submit_reply("tell me more").await;

        let completed = engine.end_call(CallOutcome::FollowUp).await.unwrap();
        wait(2_000).await;

        assert_eq!(completed.outcome, CallOutcome::FollowUp);
        assert_eq!(completed.transcript.len(), 3);
        assert_eq!(engine.transcript().await.len(), 3);
        assert_eq!(engine.state().await, CallState::Inactive);
        assert_eq!(engine.last_outcome().await, Some(CallOutcome::FollowUp));
        assert_eq!(engine.history().len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ending_idle_call_is_noop() {
        let engine = engine();
        assert!(engine.end_call(CallOutcome::Lost).await.is_none());
        assert!(engine.history().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_discards_call_and_restart_is_fresh() {
        let engine = engine();
        engine.start_call().await;
        engine.submit_reply("hmm").await;
        engine.reset().await;
        wait(2_000).await;

        assert!(engine.transcript().await.is_empty());
        assert_eq!(engine.state().await, CallState::Inactive);
        assert!(engine.history().is_empty().await);

        engine.start_call().await;
        let transcript = engine.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].content, "Hi there");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_is_idempotent() {
        let engine = engine();
        engine.reset().await;
        engine.reset().await;
        assert_eq!(engine.state().await, CallState::Inactive);
        assert_eq!(engine.last_outcome().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_line_uses_script_at_fire_time() {
        let engine = engine();
        engine.start_call().await;
        engine.submit_reply("yes").await;
        engine.edit_script(ScriptStage::Opener, "Hi there. Edited line").await;

        wait(700).await;
        assert_eq!(engine.transcript().await.last().unwrap().content, "Edited line");
    }

    #[tokio::test(start_paused = true)]
    async fn agent_lines_are_spoken() {
        let voice = Arc::new(ScriptedVoice::new(Vec::<String>::new()));
        let engine = engine_with(script(), voice.clone());
        engine.start_call().await;
        engine.submit_reply("go on").await;
        wait(700).await;
        settle().await;

        assert_eq!(voice.spoken().await, vec!["Hi there", "Is now a good time?"]);
    }

    /// Claims it can speak, fails every playback.
    struct BrokenSpeaker;

    #[async_trait::async_trait]
    impl VoiceAdapter for BrokenSpeaker {
        fn name(&self) -> &str {
            "broken"
        }
        fn supports_listening(&self) -> bool {
            false
        }
        fn supports_speaking(&self) -> bool {
            true
        }
        async fn speak(&self, _text: &str) -> Result<(), crate::error::VoiceError> {
            Err(crate::error::VoiceError::Unsupported("speaker unplugged"))
        }
        async fn listen(&self) -> String {
            String::new()
        }
        async fn stop(&self) {}
    }

    #[tokio::test(start_paused = true)]
    async fn failed_playback_does_not_stop_the_call() {
        let engine = engine_with(Script::new("A", "", "", ""), Arc::new(BrokenSpeaker));
        assert!(engine.start_call().await);
        settle().await;

        assert_eq!(engine.submit_reply("x").await, ReplyOutcome::ScriptComplete);
        settle().await;

        let transcript = engine.transcript().await;
        assert_eq!(
            roles(&transcript),
            vec![
                MessageRole::Note,
                MessageRole::Agent,
                MessageRole::Prospect,
                MessageRole::Note
            ]
        );
        assert_eq!(transcript[1].content, "A");
        assert_eq!(transcript[3].content, SCRIPT_COMPLETE_NOTE);
        assert_eq!(engine.state().await, CallState::Active);
        assert!(engine.end_call(CallOutcome::Lost).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn ended_call_moves_back_to_inactive_once() {
        let engine = engine();
        engine.start_call().await;
        assert!(engine.end_call(CallOutcome::Success).await.is_some());
        assert_eq!(engine.state().await, CallState::Inactive);
        // Inactive → Inactive is refused, so a second end records nothing
        assert!(engine.end_call(CallOutcome::Lost).await.is_none());
        assert_eq!(engine.history().len().await, 1);
        assert!(engine.start_call().await);
    }

    #[tokio::test(start_paused = true)]
    async fn voice_capture_submits_reply() {
        let voice = Arc::new(ScriptedVoice::new(["I need to compare rates"]));
        let engine = engine_with(script(), voice);
        engine.start_call().await;

        assert_eq!(
            engine.capture_voice().await,
            CaptureOutcome::Replied(ReplyOutcome::AgentScheduled)
        );
        let transcript = engine.transcript().await;
        assert_eq!(transcript.last().unwrap().content, "I need to compare rates");
    }

    #[tokio::test(start_paused = true)]
    async fn voice_capture_after_reset_is_discarded() {
        let voice = Arc::new(
            ScriptedVoice::new(["late answer"]).with_capture_delay(Duration::from_secs(1)),
        );
        let engine = engine_with(script(), voice.clone());
        engine.start_call().await;

        let capture = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.capture_voice().await })
        };
        wait(500).await;
        engine.reset().await;
        engine.start_call().await;

        let outcome = capture.await.unwrap();
        assert_eq!(
            outcome,
            CaptureOutcome::Discarded {
                text: "late answer".into()
            }
        );
        assert_eq!(engine.transcript().await.len(), 2);
        assert!(voice.stop_count() >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn voice_capture_degrades() {
        let engine = engine();
        engine.start_call().await;
        assert_eq!(engine.capture_voice().await, CaptureOutcome::Unsupported);

        let voice = Arc::new(ScriptedVoice::new(Vec::<String>::new()));
        let engine = engine_with(script(), voice);
        assert_eq!(engine.capture_voice().await, CaptureOutcome::Inactive);
        engine.start_call().await;
        assert_eq!(engine.capture_voice().await, CaptureOutcome::Empty);
        assert_eq!(engine.transcript().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn events_follow_transcript() {
        let engine = engine();
        let mut rx = engine.subscribe();
        engine.start_call().await;
        engine.end_call(CallOutcome::Success).await;

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(match event {
                CallEvent::Message(m) => m.role.to_string(),
                CallEvent::Ended(_) => "ended".to_string(),
                CallEvent::Reset => "reset".to_string(),
            });
        }
        assert_eq!(kinds, vec!["note", "agent", "ended"]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_opener_skips_by_count() {
        // the fallback greeting counts as an agent turn
        let engine = engine_with(
            Script::new("", "Question one. Question two", "", ""),
            Arc::new(SilentVoice::new()),
        );
        engine.start_call().await;
        assert_eq!(engine.transcript().await[1].content, FALLBACK_GREETING);

        engine.submit_reply("ok").await;
        wait(700).await;
        assert_eq!(engine.transcript().await.last().unwrap().content, "Question two");
    }
}
