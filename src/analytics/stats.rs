//! Call statistics — derived from the full call history on demand.
//!
//! Nothing here is stored or updated incrementally. Every figure is
//! recomputed from the list of completed calls, which keeps the numbers
//! consistent with the history by construction.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::call::model::{CallOutcome, CompletedCall, MessageRole, words_by_role};

use super::objections::{ObjectionClassifier, top_objections};

/// Knobs for the insights panel.
#[derive(Debug, Clone)]
pub struct StatsOptions {
    /// How many objection categories to report.
    pub top_objections: usize,
    /// How many recent calls to list.
    pub recent_calls: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top_objections: 3,
            recent_calls: 3,
        }
    }
}

/// Aggregate figures across every completed call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallStats {
    pub total_calls: usize,
    pub conversions: usize,
    pub follow_ups: usize,
    pub losses: usize,
    /// Whole percent of calls tagged `success`.
    pub conversion_rate: u32,
    /// Mean of per-call talk ratios. Unrounded; round for display only.
    pub avg_talk_ratio: f64,
    /// `"<Label> (<count>)"`, most frequent first.
    pub top_objections: Vec<String>,
}

impl CallStats {
    pub fn avg_talk_ratio_display(&self) -> u32 {
        self.avg_talk_ratio.round() as u32
    }
}

/// Read-only projection of a completed call for the recent-calls list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentCall {
    pub completed_at: DateTime<Utc>,
    pub exchanges: usize,
    pub outcome: CallOutcome,
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Share of words spoken by the agent in one call, as a whole percent.
/// A call with no words at all has a ratio of 0.
pub fn talk_ratio(call: &CompletedCall) -> u32 {
    let agent = words_by_role(&call.transcript, MessageRole::Agent);
    let prospect = words_by_role(&call.transcript, MessageRole::Prospect);
    percent(agent, agent + prospect)
}

/// Aggregate statistics for a call history.
pub fn compute(calls: &[CompletedCall], options: &StatsOptions) -> CallStats {
    compute_with(calls, options, &ObjectionClassifier::default_rules())
}

/// Same as [`compute`] with a caller-supplied classifier.
pub fn compute_with(
    calls: &[CompletedCall],
    options: &StatsOptions,
    classifier: &ObjectionClassifier,
) -> CallStats {
    if calls.is_empty() {
        return CallStats::default();
    }

    let count = |outcome: CallOutcome| calls.iter().filter(|c| c.outcome == outcome).count();
    let conversions = count(CallOutcome::Success);
    let follow_ups = count(CallOutcome::FollowUp);
    let losses = count(CallOutcome::Lost);

    let ratio_sum: u32 = calls.iter().map(talk_ratio).sum();
    let avg_talk_ratio = ratio_sum as f64 / calls.len() as f64;

    let replies = calls
        .iter()
        .flat_map(|c| c.transcript.iter())
        .filter(|m| m.role == MessageRole::Prospect)
        .map(|m| m.content.as_str());
    let top = top_objections(classifier.tally(replies), options.top_objections);

    CallStats {
        total_calls: calls.len(),
        conversions,
        follow_ups,
        losses,
        conversion_rate: percent(conversions, calls.len()),
        avg_talk_ratio,
        top_objections: top,
    }
}

/// The last `limit` calls, oldest first.
pub fn recent_calls(calls: &[CompletedCall], limit: usize) -> Vec<RecentCall> {
    let start = calls.len().saturating_sub(limit);
    calls[start..]
        .iter()
        .map(|c| RecentCall {
            completed_at: c.completed_at,
            exchanges: c.exchanges(),
            outcome: c.outcome,
        })
        .collect()
}
