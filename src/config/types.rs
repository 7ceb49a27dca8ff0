use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::navigator::{Transition, TransitionKind};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What to do with navigation input that arrives before assets are ready.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarlyCommandPolicy {
    /// Replay in arrival order once the deck is ready.
    #[default]
    Queue,
    Drop,
}

/// How deck progress is shown in the footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStyle {
    #[default]
    Bar,
    Number,
    None,
}

/// Presentation behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Default transition for slides and decks that don't set one.
    #[serde(default)]
    pub transition: TransitionKind,
    /// Default transition length in milliseconds (default: 250).
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    /// UI tick interval in milliseconds (default: 33).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default)]
    pub early_commands: EarlyCommandPolicy,
    #[serde(default)]
    pub progress: ProgressStyle,
}

/// Asset preloading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Give up on an asset after this long. Unset means wait forever.
    #[serde(default)]
    pub load_timeout_ms: Option<u64>,
}

/// Log output. The TUI owns stdout, so logs always go to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Defaults to the platform cache directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_transition_ms() -> u64 {
    250
}

fn default_tick_rate_ms() -> u64 {
    33
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            transition: TransitionKind::default(),
            transition_ms: default_transition_ms(),
            tick_rate_ms: default_tick_rate_ms(),
            early_commands: EarlyCommandPolicy::default(),
            progress: ProgressStyle::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl PresentationConfig {
    pub fn default_transition(&self) -> Transition {
        Transition::new(self.transition, Duration::from_millis(self.transition_ms))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl AssetsConfig {
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }
}
