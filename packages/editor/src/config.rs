//! # Editor Configuration
//!
//! Loaded from `scriptpad.config.json` in a project directory. Every field
//! is optional; missing fields take their defaults.
//!
//! ```json
//! {
//!   "draftKey": "script_editor_draft",
//!   "autosaveMs": 400,
//!   "blocksPerPage": 15,
//!   "categorizer": "timeOfDay",
//!   "page": { "widthIn": 8.5, "heightIn": 11 }
//! }
//! ```

use crate::autosave::DEFAULT_AUTOSAVE_DELAY;
use crate::errors::ConfigError;
use crate::storage::DEFAULT_DRAFT_KEY;
use scriptpad_analysis::CategorizerKind;
use scriptpad_model::PageGeometry;
use scriptpad_screen::{ScreenOptions, DEFAULT_BLOCKS_PER_PAGE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "scriptpad.config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Storage key of the draft snapshot
    pub draft_key: String,

    /// Quiet period before an autosave, in milliseconds
    pub autosave_ms: u64,

    /// Blocks per on-screen page
    pub blocks_per_page: usize,

    pub page: PageGeometry,

    /// Scene index grouping scheme
    pub categorizer: CategorizerKind,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            draft_key: DEFAULT_DRAFT_KEY.to_string(),
            autosave_ms: DEFAULT_AUTOSAVE_DELAY.as_millis() as u64,
            blocks_per_page: DEFAULT_BLOCKS_PER_PAGE,
            page: PageGeometry::default(),
            categorizer: CategorizerKind::default(),
        }
    }
}

impl EditorConfig {
    /// Read `scriptpad.config.json` from `dir`, defaults if the file is absent
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.draft_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "draftKey",
                message: "must not be empty".to_string(),
            });
        }
        if self.blocks_per_page == 0 {
            return Err(ConfigError::Invalid {
                field: "blocksPerPage",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_ms)
    }

    pub fn screen_options(&self) -> ScreenOptions {
        ScreenOptions {
            blocks_per_page: self.blocks_per_page,
            page: self.page.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.draft_key, "script_editor_draft");
        assert_eq!(config.autosave_delay(), Duration::from_millis(400));
        assert_eq!(config.blocks_per_page, 15);
        assert_eq!(config.categorizer, CategorizerKind::TimeOfDay);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{"autosaveMs": 1000, "categorizer": "uniform"}"#).unwrap();
        assert_eq!(config.autosave_ms, 1000);
        assert_eq!(config.categorizer, CategorizerKind::Uniform);
        assert_eq!(config.draft_key, "script_editor_draft");
        assert_eq!(config.page, PageGeometry::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"blocksPerPage": 0}"#),
            Err(ConfigError::Invalid { field: "blocksPerPage", .. })
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"draftKey": " "}"#),
            Err(ConfigError::Invalid { field: "draftKey", .. })
        ));
        assert!(matches!(
            EditorConfig::from_json("[1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap(), EditorConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{"draftKey": "act_one"}"#).unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap().draft_key, "act_one");
    }
}
