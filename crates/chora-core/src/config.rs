//! Persisted editor settings.
//!
//! Settings live in `<config dir>/chora/settings.toml`. Every section is
//! `#[serde(default)]`, so a file written by an older build (or edited by
//! hand with keys missing) still loads; unknown values fall back to their
//! defaults and out-of-range numbers are clamped by [`Settings::normalized`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_FONT_SIZE: u16 = 8;
pub const MAX_FONT_SIZE: u16 = 24;
pub const DEFAULT_FONT_SIZE: u16 = 14;
pub const MIN_AUTO_SAVE_SECS: u64 = 5;
pub const MIN_WINDOW_WIDTH: f32 = 400.0;
pub const MIN_WINDOW_HEIGHT: f32 = 300.0;
pub const MIN_SCROLLBACK_LINES: usize = 100;

/// Everything the editor remembers between runs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub interface: InterfaceSettings,
    pub editor: EditorSettings,
    pub auto_save: AutoSaveSettings,
    pub terminal: TerminalSettings,
    pub session: SessionSettings,
}

impl Settings {
    /// Loads settings from the default location, falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }),
            Ok(_) => Self::default(),
            Err(e) => {
                tracing::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Loads settings from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = toml::from_str(&content)?;
        Ok(settings.normalized())
    }

    /// Returns the default settings file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("chora").join("settings.toml"))
    }

    /// Saves settings to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Settings written to {}", path.display());
        Ok(())
    }

    /// Clamps every value into its supported range.
    pub fn normalized(mut self) -> Self {
        self.editor.font_size = self.editor.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.auto_save.interval_secs = self.auto_save.interval_secs.max(MIN_AUTO_SAVE_SECS);
        self.terminal.scrollback_lines = self.terminal.scrollback_lines.max(MIN_SCROLLBACK_LINES);

        if !self.window.width.is_finite() {
            self.window.width = WindowSettings::default().width;
        }
        if !self.window.height.is_finite() {
            self.window.height = WindowSettings::default().height;
        }
        self.window.width = self.window.width.max(MIN_WINDOW_WIDTH);
        self.window.height = self.window.height.max(MIN_WINDOW_HEIGHT);
        self
    }
}

/// Window geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Panel visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceSettings {
    pub show_file_tree: bool,
    pub show_line_numbers: bool,
    pub show_status_bar: bool,
    pub show_terminal: bool,
}

impl Default for InterfaceSettings {
    fn default() -> Self {
        Self {
            show_file_tree: true,
            show_line_numbers: true,
            show_status_bar: true,
            show_terminal: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Font size in points
    pub font_size: u16,
    pub word_wrap: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            word_wrap: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveSettings {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for AutoSaveSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Lines kept in the output view before the oldest are dropped
    pub scrollback_lines: usize,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            scrollback_lines: 5000,
        }
    }
}

/// State carried over from the previous run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_folder: Option<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
