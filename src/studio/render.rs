//! Text panels for the terminal presentation layer.

use crate::analytics::{CallStats, RecentCall};
use crate::call::{CallMessage, CallSnapshot, MessageRole};
use crate::script::{Persona, QUICK_PROMPTS, Script, ScriptStage};

pub const HELP: &str = "\
Commands:
  /start                 dial a new practice call
  <text>                 reply as the customer
  /voice                 capture the reply through the voice adapter
  /won /follow /lost     tag the outcome and end the call
  /end <outcome>         same, with outcome success|follow-up|lost
  /reset                 drop the current call
  /product <id>          home-loan | credit-card | mutual-funds
  /tone <id>             consultative | energetic | concise
  /edit <stage> <text>   rewrite opener | discovery | pitch | closing
  /script /persona       show the script or persona card
  /transcript            show the current call transcript
  /stats                 performance insights across calls
  /export                call history as JSON
  /quit";

/// One transcript entry as a chat line.
pub fn message_line(message: &CallMessage) -> String {
    match message.role {
        MessageRole::Agent => format!("🎧 Agent: {}", message.content),
        MessageRole::Prospect => format!("🙋 You: {}", message.content),
        MessageRole::Note => format!("· {} ·", message.content.to_uppercase()),
    }
}

pub fn transcript(snapshot: &CallSnapshot, summary: &str) -> String {
    let mut parts = vec![format!(
        "{} · Completion {}% · {}",
        summary, snapshot.completion_percent, snapshot.state
    )];
    if snapshot.transcript.is_empty() {
        parts.push(
            "Start the call to hear the agent deliver your pitch. Speak or type to play the role of the customer."
                .to_string(),
        );
    }
    parts.extend(snapshot.transcript.iter().map(message_line));
    if let Some(outcome) = snapshot.outcome {
        parts.push(format!("Outcome: {}", outcome.label()));
    }
    parts.join("\n")
}

pub fn script(script: &Script) -> String {
    let mut parts = vec!["# Script Designer".to_string()];
    for stage in ScriptStage::ALL {
        parts.push(format!("## {} ({})", stage.label(), stage));
        let text = script.field(stage);
        parts.push(if text.trim().is_empty() {
            "(empty)".to_string()
        } else {
            text.to_string()
        });
    }
    parts.join("\n")
}

pub fn persona(persona: &Persona) -> String {
    let mut parts = vec![
        format!("# Agent Persona [{}]", persona.tone),
        format!("- Voice Identity: {}, {}", persona.name, persona.role),
        format!("- Campaign Focus: {}", persona.campaign),
        format!("- Talk Track: {}", persona.talk_track),
        "Prompts:".to_string(),
    ];
    parts.extend(QUICK_PROMPTS.iter().map(|p| format!("  • {p}")));
    parts.join("\n")
}

pub fn stats(stats: &CallStats, recent: &[RecentCall]) -> String {
    let mut parts = vec![
        "# Performance Insights".to_string(),
        format!("Conversion Rate  {}%", stats.conversion_rate),
        format!("Won Deals        {}", stats.conversions),
        format!("Follow Ups       {}", stats.follow_ups),
        format!("Call Talk Ratio  {}%", stats.avg_talk_ratio_display()),
        "## Top Objections".to_string(),
    ];

    if stats.top_objections.is_empty() {
        parts.push("No objection trends yet. Run more scenarios to capture insights.".to_string());
    } else {
        parts.extend(stats.top_objections.iter().map(|o| format!("- {o}")));
    }

    parts.push("## Recent Calls".to_string());
    if recent.is_empty() {
        parts.push(
            "You have not logged any practice calls yet. Play through a scenario to view a recap."
                .to_string(),
        );
    }
    for call in recent {
        parts.push(format!(
            "- {} · {} exchanges · Outcome {}",
            call.completed_at.format("%H:%M"),
            call.exchanges,
            call.outcome
        ));
    }

    parts.join("\n")
}
