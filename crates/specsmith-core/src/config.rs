//! Project configuration
//!
//! Settings come from `.specs/config.toml` when present. Every field is
//! optional; anything missing falls back to [`Default`].
//!
//! ```toml
//! default_priority = "high"
//! editor = "code --wait"
//!
//! [forge]
//! model = "claude-sonnet-4-20250514"
//! max_tokens = 4096
//! ```

use crate::error::{SpecError, SpecResult};
use crate::layout::ProjectLayout;
use serde::{Deserialize, Serialize};
use specsmith_doc::Priority;
use std::fs;
use std::io::ErrorKind;

/// Editor used when neither config nor `$EDITOR` names one
pub const FALLBACK_EDITOR: &str = "vi";

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecsmithConfig {
    /// Priority given to new specs when none is requested
    pub default_priority: Priority,
    /// Editor command for `edit`; `$EDITOR` when unset
    pub editor: Option<String>,
    /// Generation settings
    pub forge: ForgeConfig,
}

/// Settings for AI-assisted spec generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeConfig {
    /// Model identifier sent to the provider
    pub model: String,
    /// Response token cap
    pub max_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Messages endpoint
    pub endpoint: String,
    /// Directory levels included in the project tree
    pub context_depth: usize,
    /// Characters kept from each `--include` file
    pub include_limit: usize,
    /// Characters kept from each package manifest
    pub manifest_limit: usize,
}

impl Default for SpecsmithConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::Medium,
            editor: None,
            forge: ForgeConfig::default(),
        }
    }
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 4096,
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            context_depth: 3,
            include_limit: 3000,
            manifest_limit: 2000,
        }
    }
}

impl SpecsmithConfig {
    /// Load `.specs/config.toml`, or defaults when the file is absent
    ///
    /// # Errors
    /// `Io` if the file exists but cannot be read, `Config` if it does not
    /// parse.
    pub fn load(layout: &ProjectLayout) -> SpecResult<Self> {
        let path = layout.config_path();
        match fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(SpecError::io_error(path, e)),
        }
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns `SpecError::Config` with the parser's message.
    pub fn from_toml_str(text: &str) -> SpecResult<Self> {
        toml::from_str(text).map_err(|e| SpecError::Config(e.to_string()))
    }

    /// Set default priority
    #[inline]
    #[must_use]
    pub fn with_default_priority(mut self, priority: Priority) -> Self {
        self.default_priority = priority;
        self
    }

    /// Set editor command
    #[inline]
    #[must_use]
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    /// Set forge model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.forge.model = model.into();
        self
    }

    /// Editor command: config, then `$EDITOR`, then `vi`
    #[must_use]
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_means_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = SpecsmithConfig::load(&ProjectLayout::new(tmp.path())).unwrap();
        assert_eq!(config, SpecsmithConfig::default());
        assert_eq!(config.forge.max_tokens, 4096);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = SpecsmithConfig::from_toml_str(
            "default_priority = \"high\"\n[forge]\nmodel = \"custom\"\n",
        )
        .unwrap();
        assert_eq!(config.default_priority, Priority::High);
        assert_eq!(config.forge.model, "custom");
        assert_eq!(config.forge.context_depth, 3);
    }

    #[test]
    fn bad_file_is_config_error() {
        let err = SpecsmithConfig::from_toml_str("default_priority = \"urgent\"").unwrap_err();
        assert!(matches!(err, SpecError::Config(_)));
        let err = SpecsmithConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, SpecError::Config(_)));
    }

    #[test]
    fn configured_editor_wins() {
        let config = SpecsmithConfig::default().with_editor("nano");
        assert_eq!(config.editor_command(), "nano");
    }
}
