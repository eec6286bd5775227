//! Editor configuration.

use crate::effects::EffectSettings;
use crate::geometry::{HANDLE_SIZE, MIN_RESIZE_EXTENT, PanelRect};
use crate::history::MAX_UNDO_HISTORY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Smallest drawn panel extent that survives pointer-up.
pub const MIN_DRAW_EXTENT: i32 = 10;

/// Rectangle appended by the add-panel command.
pub const DEFAULT_PANEL: PanelRect = PanelRect::new(10, 10, 100, 100);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunable editor behavior. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo steps.
    pub history_capacity: usize,
    /// Edge length of resize handle hit-boxes.
    pub handle_size: i32,
    /// Minimum width/height enforced while resizing.
    pub min_resize_extent: i32,
    /// Drawn panels narrower or shorter than this are discarded.
    pub min_draw_extent: i32,
    pub default_panel: PanelRect,
    pub effects: EffectSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: MAX_UNDO_HISTORY,
            handle_size: HANDLE_SIZE,
            min_resize_extent: MIN_RESIZE_EXTENT,
            min_draw_extent: MIN_DRAW_EXTENT,
            default_panel: DEFAULT_PANEL,
            effects: EffectSettings::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be at least 1".into()));
        }
        if self.handle_size <= 0 {
            return Err(ConfigError::Invalid("handle_size must be positive".into()));
        }
        if self.min_resize_extent <= 0 || self.min_draw_extent <= 0 {
            return Err(ConfigError::Invalid("minimum extents must be positive".into()));
        }
        if !self.default_panel.is_valid() || self.default_panel.x < 0 || self.default_panel.y < 0 {
            return Err(ConfigError::Invalid(format!(
                "default_panel {:?} is not a valid panel",
                <[i32; 4]>::from(self.default_panel)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.handle_size, 16);
        assert_eq!(config.min_resize_extent, 20);
        assert_eq!(config.min_draw_extent, 10);
        assert_eq!(config.default_panel, PanelRect::new(10, 10, 100, 100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json_str(
            r#"{"history_capacity": 10, "effects": {"enabled": true, "kind": "blur"}}"#,
        )
        .unwrap();
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.handle_size, 16);
        assert!(config.effects.enabled);
        assert_eq!(config.effects.kind, EffectKind::Blur);
        assert_eq!(config.effects.size, 64);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            EditorConfig::from_json_str(r#"{"history_capacity": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json_str(r#"{"default_panel": [0, 0, 0, 10]}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json_str("[]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panelkit.json");
        std::fs::write(&path, r#"{"handle_size": 24}"#).unwrap();
        assert_eq!(EditorConfig::load(&path).unwrap().handle_size, 24);

        let missing = EditorConfig::load(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
