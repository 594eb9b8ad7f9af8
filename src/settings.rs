//! Puzzle settings
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::edgework::Edgework;
use crate::error::PuzzleError;

/// Puzzle settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for stage generation (None = derive from the clock)
    pub seed: Option<u64>,

    /// Module names ignored on top of the built-in list
    pub extra_ignored_modules: Vec<String>,

    /// Force a stage count instead of counting modules (testing only)
    pub stage_count_override: Option<i64>,

    /// Log the assignment, stages and answer after setup
    pub log_diagnostics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            extra_ignored_modules: Vec::new(),
            stage_count_override: None,
            log_diagnostics: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, PuzzleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Stage count override, validated
    pub fn stage_count(&self) -> Result<Option<usize>, PuzzleError> {
        self.stage_count_override
            .map(|count| usize::try_from(count).map_err(|_| PuzzleError::InvalidStageCount(count)))
            .transpose()
    }
}

/// Edgework plus settings, as read by the console host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub edgework: Edgework,
    #[serde(default)]
    pub settings: Settings,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let scenario: Scenario = serde_json::from_str(&json)?;
        log::info!("Loaded scenario from {}", path.as_ref().display());
        Ok(scenario)
    }
}
