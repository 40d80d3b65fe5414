use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Console tuning knobs. Every field has a default so a partial JSON
/// object (or none at all) is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleConfig {
    pub char_delay_ms: u64,
    pub line_delay_ms: u64,
    pub animation_fps: u32,
    pub header_prefix: String,
    pub exit_location: String,
    pub start_directory: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: 1,
            line_delay_ms: 1,
            animation_fps: 8,
            header_prefix: "$ ".to_string(),
            exit_location: "../".to_string(),
            start_directory: "/".to_string(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ConsoleConfig =
            serde_json::from_str(json).map_err(|e| ConsoleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Same as the default but without any typing pauses.
    pub fn instant() -> Self {
        Self {
            char_delay_ms: 0,
            line_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.animation_fps == 0 {
            return Err(ConsoleError::Config("animationFps must be greater than zero".to_string()));
        }
        if !self.start_directory.starts_with('/') {
            return Err(ConsoleError::Config(format!(
                "startDirectory must be absolute, got '{}'",
                self.start_directory
            )));
        }
        Ok(())
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn line_delay(&self) -> Duration {
        Duration::from_millis(self.line_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.animation_fps.max(1)))
    }
}
