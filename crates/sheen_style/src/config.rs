//! Animation configuration
//!
//! Style preferences are read once at style initialization and handed to
//! [`Animations::setup_engines`](crate::Animations::setup_engines), which
//! pushes them down to every engine and every live animation.
//!
//! ```toml
//! enabled = true
//! duration_ms = 180
//! steps = 0
//!
//! [stacked_widget]
//! enabled = true
//! max_render_time_ms = 50
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Longest accepted animation duration
pub const MAX_DURATION_MS: u32 = 10_000;

/// Largest accepted quantization step count
pub const MAX_STEPS: u32 = 100;

/// Process-wide animation preferences
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Master switch; when off, no animation plays
    pub enabled: bool,
    /// Duration of state transitions
    pub duration_ms: u32,
    /// Quantization steps, 0 for continuous animation
    pub steps: u32,
    /// Page transitions of stacked containers
    pub stacked_widget: StackedWidgetConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 180,
            steps: 0,
            stacked_widget: StackedWidgetConfig::default(),
        }
    }
}

/// Stacked container transition preferences
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StackedWidgetConfig {
    pub enabled: bool,
    /// Overrides the global duration when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
    /// Longest acceptable snapshot capture before falling back to an
    /// instant switch
    pub max_render_time_ms: u32,
}

impl Default for StackedWidgetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: None,
            max_render_time_ms: 50,
        }
    }
}

impl AnimationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: AnimationConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading animation config from {}", path.display());
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Load a TOML file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!("{}, using default animation config", err);
            Self::default()
        })
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.steps > MAX_STEPS {
            return Err(ConfigError::Invalid(format!(
                "steps must be at most {}, got {}",
                MAX_STEPS, self.steps
            )));
        }
        if self.duration_ms > MAX_DURATION_MS {
            return Err(ConfigError::Invalid(format!(
                "duration_ms must be at most {}, got {}",
                MAX_DURATION_MS, self.duration_ms
            )));
        }
        if let Some(duration) = self.stacked_widget.duration_ms {
            if duration > MAX_DURATION_MS {
                return Err(ConfigError::Invalid(format!(
                    "stacked_widget.duration_ms must be at most {}, got {}",
                    MAX_DURATION_MS, duration
                )));
            }
        }
        Ok(())
    }

    /// Duration used for stacked container transitions
    pub fn stacked_widget_duration(&self) -> u32 {
        self.stacked_widget.duration_ms.unwrap_or(self.duration_ms)
    }
}
