//! Call flow — the script split into spoken agent lines.
//!
//! A `CallFlow` is derived from a `Script` and never mutated. Each stage
//! field is broken into sentences on `.` and newline; the four stages are
//! then read back to back as one ordered run of agent lines. Which line
//! comes next depends only on how many agent lines have already been said.

use serde::Serialize;

use super::model::{Script, ScriptStage};

/// Split free text into trimmed, non-empty segments.
pub fn segments(text: &str) -> Vec<String> {
    text.split(['.', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read-only view of a script as ordered agent lines per stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallFlow {
    pub opener: Vec<String>,
    pub discovery: Vec<String>,
    pub pitch: Vec<String>,
    pub closing: Vec<String>,
}

impl CallFlow {
    pub fn from_script(script: &Script) -> Self {
        Self {
            opener: segments(&script.opener),
            discovery: segments(&script.discovery),
            pitch: segments(&script.pitch),
            closing: segments(&script.closing),
        }
    }

    pub fn stage(&self, stage: ScriptStage) -> &[String] {
        match stage {
            ScriptStage::Opener => &self.opener,
            ScriptStage::Discovery => &self.discovery,
            ScriptStage::Pitch => &self.pitch,
            ScriptStage::Closing => &self.closing,
        }
    }

    /// Total number of agent lines across all stages.
    pub fn total_lines(&self) -> usize {
        ScriptStage::ALL.iter().map(|s| self.stage(*s).len()).sum()
    }

    /// The `index`-th agent line (0-based) and the stage it belongs to.
    ///
    /// Walks the stages with a running offset; `None` once `index` is past
    /// the closing stage.
    pub fn line_at(&self, index: usize) -> Option<(ScriptStage, &str)> {
        let mut offset = index;
        for stage in ScriptStage::ALL {
            let lines = self.stage(stage);
            if offset < lines.len() {
                return Some((stage, lines[offset].as_str()));
            }
            offset -= lines.len();
        }
        None
    }

    /// Next agent line given the number of agent turns already taken.
    pub fn next_line(&self, agent_turns: usize) -> Option<&str> {
        self.line_at(agent_turns).map(|(_, line)| line)
    }

    /// Percentage of the flow delivered so far, capped at 100.
    pub fn completion_percent(&self, agent_turns: usize) -> u8 {
        let total = self.total_lines().max(1) as f64;
        let pct = (agent_turns as f64 / total * 100.0).round();
        pct.min(100.0) as u8
    }
}
