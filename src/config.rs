use crate::view::overlay::HighlightPalette;
use anyhow::Context;
use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the settings file looked up by [`ProofreadConfig::load_from_dir`]
pub const CONFIG_FILE_NAME: &str = "proofmark.json";

/// Proofreading settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProofreadConfig {
    /// Proofreading service endpoint (used by the networking layer)
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Language code sent with each check (e.g., "en-GB", "de-DE")
    #[serde(default = "default_language")]
    pub language: String,

    /// Categories treated as likely typos: ignoring one dismisses every
    /// identical open typo in the same category
    #[serde(default = "default_typo_categories")]
    pub typo_categories: Vec<String>,

    /// Separator placed between suggestions in the status line
    #[serde(default = "default_suggestion_separator")]
    pub suggestion_separator: String,

    /// Outline color of open problems as an RGB triple
    #[serde(default = "default_flagged_color")]
    pub flagged_color: (u8, u8, u8),
}

fn default_server_url() -> String {
    "https://languagetool.org:8081/".to_string()
}

fn default_language() -> String {
    "en-GB".to_string()
}

fn default_typo_categories() -> Vec<String> {
    vec!["Possible Typo".to_string()]
}

fn default_suggestion_separator() -> String {
    ", ".to_string()
}

fn default_flagged_color() -> (u8, u8, u8) {
    (220, 120, 40)
}

impl Default for ProofreadConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            language: default_language(),
            typo_categories: default_typo_categories(),
            suggestion_separator: default_suggestion_separator(),
            flagged_color: default_flagged_color(),
        }
    }
}

impl ProofreadConfig {
    /// Parse and validate a JSON settings document
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), contents)?;
        Ok(())
    }

    /// Load `proofmark.json` from `dir`, falling back to defaults when absent
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server_url must not be empty".to_string(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "language must not be empty".to_string(),
            ));
        }
        if self.typo_categories.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "typo_categories must not contain empty names".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_typo_category(&self, category: &str) -> bool {
        self.typo_categories.iter().any(|c| c == category)
    }

    pub fn palette(&self) -> HighlightPalette {
        let (r, g, b) = self.flagged_color;
        HighlightPalette {
            flagged: Color::Rgb(r, g, b),
        }
    }

    /// JSON Schema of the settings file, for editor tooling
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(ProofreadConfig)).unwrap_or_default()
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}
