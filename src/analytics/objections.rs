//! Objection classifier — fixed keyword rules over prospect replies.
//!
//! Rules are checked in order and the first match wins, so a reply that
//! mentions both "rate" and "compare" counts as an interest-rate objection
//! only.

use serde::Serialize;
use tracing::trace;

/// Objection buckets surfaced in the insights panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionCategory {
    InterestRate,
    NeedMoreTime,
    ComparingAlternatives,
    Documentation,
}

impl ObjectionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InterestRate => "Interest Rate",
            Self::NeedMoreTime => "Need More Time",
            Self::ComparingAlternatives => "Comparing Alternatives",
            Self::Documentation => "Documentation",
        }
    }
}

impl std::fmt::Display for ObjectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single keyword rule.
#[derive(Debug, Clone)]
pub struct ObjectionRule {
    pub category: ObjectionCategory,
    /// Lower-case substrings; any one of them triggers the rule.
    pub keywords: Vec<&'static str>,
}

/// Ordered keyword rules.
#[derive(Debug, Clone)]
pub struct ObjectionClassifier {
    rules: Vec<ObjectionRule>,
}

impl Default for ObjectionClassifier {
    fn default() -> Self {
        Self::default_rules()
    }
}

impl ObjectionClassifier {
    /// The studio's built-in rules, in priority order.
    pub fn default_rules() -> Self {
        let rules = vec![
            ObjectionRule {
                category: ObjectionCategory::InterestRate,
                keywords: vec!["rate", "interest"],
            },
            ObjectionRule {
                category: ObjectionCategory::NeedMoreTime,
                keywords: vec!["think", "later"],
            },
            ObjectionRule {
                category: ObjectionCategory::ComparingAlternatives,
                keywords: vec!["compare", "other"],
            },
            ObjectionRule {
                category: ObjectionCategory::Documentation,
                keywords: vec!["document"],
            },
        ];
        Self { rules }
    }

    /// Classify one prospect reply. Matching is plain substring search on
    /// the lower-cased text.
    pub fn classify(&self, text: &str) -> Option<ObjectionCategory> {
        let normalized = text.to_lowercase();
        let hit = self
            .rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| normalized.contains(k)))
            .map(|rule| rule.category);
        trace!(category = ?hit, "Reply classified");
        hit
    }

    /// Tally categories over many replies. Order is first appearance.
    pub fn tally<'a>(
        &self,
        replies: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(ObjectionCategory, usize)> {
        let mut counts: Vec<(ObjectionCategory, usize)> = Vec::new();
        for reply in replies {
            let Some(category) = self.classify(reply) else {
                continue;
            };
            match counts.iter_mut().find(|(c, _)| *c == category) {
                Some((_, n)) => *n += 1,
                None => counts.push((category, 1)),
            }
        }
        counts
    }
}

/// Most frequent categories, formatted as `"<Label> (<count>)"`.
///
/// Sorting is stable, so categories with equal counts keep the order in
/// which they first appeared.
pub fn top_objections(mut counts: Vec<(ObjectionCategory, usize)>, limit: usize) -> Vec<String> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(category, count)| format!("{} ({})", category.label(), count))
        .collect()
}
