//! Studio commands — parses a line of user input into an intent.
//!
//! Slash commands drive the studio; anything else is the customer's reply
//! in the simulated call.

use crate::call::CallOutcome;
use crate::script::{ProductId, ScriptStage, ToneId};

/// A user intent from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioCommand {
    /// Dial a new call.
    Start,
    /// Tag the live call and end it.
    End(CallOutcome),
    /// Drop the current call.
    Reset,
    /// Capture the next reply through the voice adapter.
    Voice,
    /// Switch product; re-derives the script.
    Product(ProductId),
    /// Switch tone; re-derives the script.
    Tone(ToneId),
    /// Replace one stage of the script.
    Edit { stage: ScriptStage, text: String },
    /// Show the current script.
    Script,
    /// Show the agent persona card.
    Persona,
    /// Show the transcript of the current or last call.
    Transcript,
    /// Show call analytics.
    Stats,
    /// Dump the call history as JSON.
    Export,
    Help,
    Quit,
    /// Customer reply in the live call.
    Reply(String),
    /// A slash command that could not be understood.
    Invalid { input: String, reason: String },
}

/// Parses user input into `StudioCommand`s.
pub struct CommandParser;

impl CommandParser {
    pub fn parse(content: &str) -> StudioCommand {
        let trimmed = content.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "/start" | "/dial" | "/call" => StudioCommand::Start,
            "/reset" | "/hangup" => StudioCommand::Reset,
            "/voice" | "/listen" => StudioCommand::Voice,
            "/script" => StudioCommand::Script,
            "/persona" => StudioCommand::Persona,
            "/transcript" | "/log" => StudioCommand::Transcript,
            "/stats" | "/insights" => StudioCommand::Stats,
            "/export" => StudioCommand::Export,
            "/help" | "/?" => StudioCommand::Help,
            "/quit" | "/exit" => StudioCommand::Quit,

            // outcome shortcuts mirror the simulator buttons
            "/won" | "/win" => StudioCommand::End(CallOutcome::Success),
            "/follow" | "/follow-up" => StudioCommand::End(CallOutcome::FollowUp),
            "/lost" => StudioCommand::End(CallOutcome::Lost),

            _ => parse_complex(content, trimmed),
        }
    }
}

/// Parameterized commands, then fall back to a prospect reply.
fn parse_complex(content: &str, trimmed: &str) -> StudioCommand {
    if !trimmed.starts_with('/') {
        return StudioCommand::Reply(content.to_string());
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let invalid = |reason: String| StudioCommand::Invalid {
        input: trimmed.to_string(),
        reason,
    };

    match command.as_str() {
        "/end" => {
            if rest.is_empty() {
                return invalid("usage: /end <won|follow-up|lost>".into());
            }
            match rest.parse::<CallOutcome>() {
                Ok(outcome) => StudioCommand::End(outcome),
                Err(e) => invalid(e.to_string()),
            }
        }
        "/product" => match rest.parse::<ProductId>() {
            Ok(product) => StudioCommand::Product(product),
            Err(e) => invalid(e.to_string()),
        },
        "/tone" => match rest.parse::<ToneId>() {
            Ok(tone) => StudioCommand::Tone(tone),
            Err(e) => invalid(e.to_string()),
        },
        "/edit" => parse_edit(rest).unwrap_or_else(|| {
            invalid("usage: /edit <opener|discovery|pitch|closing> <text>".into())
        }),
        _ => invalid(format!("unknown command {command}, try /help")),
    }
}

/// `/edit <stage> <text>`. Literal `\n` in the text becomes a line break.
fn parse_edit(rest: &str) -> Option<StudioCommand> {
    let (stage, text) = match rest.split_once(char::is_whitespace) {
        Some((stage, text)) => (stage, text.trim()),
        None => (rest, ""),
    };
    let stage = stage.parse::<ScriptStage>().ok()?;
    Some(StudioCommand::Edit {
        stage,
        text: text.replace("\\n", "\n"),
    })
}
