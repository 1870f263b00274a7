//! Call script data model — the four editable stage fields.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One of the four ordered stages of a call script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStage {
    Opener,
    Discovery,
    Pitch,
    Closing,
}

impl ScriptStage {
    /// All stages in call order.
    pub const ALL: [ScriptStage; 4] = [
        ScriptStage::Opener,
        ScriptStage::Discovery,
        ScriptStage::Pitch,
        ScriptStage::Closing,
    ];

    /// Heading shown above the field in the designer.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Opener => "Opening Hook",
            Self::Discovery => "Discovery Questions",
            Self::Pitch => "Pitch Narrative",
            Self::Closing => "Closing & Next Steps",
        }
    }
}

impl std::fmt::Display for ScriptStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Opener => "opener",
            Self::Discovery => "discovery",
            Self::Pitch => "pitch",
            Self::Closing => "closing",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ScriptStage {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "opener" | "opening" => Ok(Self::Opener),
            "discovery" => Ok(Self::Discovery),
            "pitch" => Ok(Self::Pitch),
            "closing" | "close" => Ok(Self::Closing),
            other => Err(CatalogError::UnknownStage(other.to_string())),
        }
    }
}

/// A four-stage call script. Each field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub opener: String,
    pub discovery: String,
    pub pitch: String,
    pub closing: String,
}

impl Script {
    pub fn new(
        opener: impl Into<String>,
        discovery: impl Into<String>,
        pitch: impl Into<String>,
        closing: impl Into<String>,
    ) -> Self {
        Self {
            opener: opener.into(),
            discovery: discovery.into(),
            pitch: pitch.into(),
            closing: closing.into(),
        }
    }

    pub fn field(&self, stage: ScriptStage) -> &str {
        match stage {
            ScriptStage::Opener => &self.opener,
            ScriptStage::Discovery => &self.discovery,
            ScriptStage::Pitch => &self.pitch,
            ScriptStage::Closing => &self.closing,
        }
    }

    /// Replace a single field, leaving the others untouched.
    pub fn set_field(&mut self, stage: ScriptStage, text: impl Into<String>) {
        let slot = match stage {
            ScriptStage::Opener => &mut self.opener,
            ScriptStage::Discovery => &mut self.discovery,
            ScriptStage::Pitch => &mut self.pitch,
            ScriptStage::Closing => &mut self.closing,
        };
        *slot = text.into();
    }

    /// Merge a partial override over this script. Fields present in the
    /// patch win.
    pub fn merged_with(&self, patch: &ScriptPatch) -> Script {
        Script {
            opener: patch.opener.clone().unwrap_or_else(|| self.opener.clone()),
            discovery: patch
                .discovery
                .clone()
                .unwrap_or_else(|| self.discovery.clone()),
            pitch: patch.pitch.clone().unwrap_or_else(|| self.pitch.clone()),
            closing: patch.closing.clone().unwrap_or_else(|| self.closing.clone()),
        }
    }
}

/// Partial script — used for tone overrides and field-by-field edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opener: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Script {
        Script::new("Hi.", "What do you need?", "We can help.", "Talk soon.")
    }

    #[test]
    fn merge_prefers_patch_fields() {
        let patch = ScriptPatch {
            opener: Some("Hey there.".into()),
            closing: Some("Bye.".into()),
            ..Default::default()
        };
        let merged = sample().merged_with(&patch);
        assert_eq!(merged.opener, "Hey there.");
        assert_eq!(merged.discovery, "What do you need?");
        assert_eq!(merged.pitch, "We can help.");
        assert_eq!(merged.closing, "Bye.");
    }

    #[test]
    fn empty_patch_is_identity() {
        assert_eq!(sample().merged_with(&ScriptPatch::default()), sample());
    }

    #[test]
    fn set_field_touches_one_stage() {
        let mut script = sample();
        script.set_field(ScriptStage::Pitch, "New pitch.");
        assert_eq!(script.pitch, "New pitch.");
        assert_eq!(script.opener, "Hi.");
        assert_eq!(script.field(ScriptStage::Pitch), "New pitch.");
    }

    #[test]
    fn stage_parses_from_display() {
        for stage in ScriptStage::ALL {
            let parsed: ScriptStage = stage.to_string().parse().unwrap();
            assert_eq!(parsed, stage);
        }
        assert!("outro".parse::<ScriptStage>().is_err());
    }
}
