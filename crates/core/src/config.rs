//! Settings for the label editor and the parsing service.
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. a JSON settings file (`<config dir>/shiplabel/config.json`, or an explicit path)
//! 3. environment variables (`GEMINI_API_KEY`, falling back to `API_KEY`;
//!    `SHIPLABEL_MODEL`, `SHIPLABEL_ENDPOINT`, `SHIPLABEL_COUNTRY`)
//! 4. whatever the caller merges on top, typically command line flags
//!
//! # Example
//!
//! ```rust
//! use shiplabel_core::Settings;
//!
//! let settings: Settings = serde_json::from_str(r#"{ "default_country": "Canada" }"#).unwrap();
//! assert_eq!(settings.default_country(), "Canada");
//! assert_eq!(settings.gemini_config().model, "gemini-2.5-flash");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::address::fallback_country;
use crate::editor::LabelEditor;
use crate::gemini::GeminiConfig;
use crate::{LabelError, Result};

/// Layered settings. Every field is optional; unset fields use defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub default_country: Option<String>,
    /// Request timeout in seconds; unset means no client-side timeout.
    pub timeout_secs: Option<u64>,
    pub default_label_size: Option<String>,
    pub default_weight: Option<String>,
}

impl Settings {
    /// `<config dir>/shiplabel/config.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shiplabel").join("config.json"))
    }

    /// Reads a settings file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| LabelError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Loads the file layer and the environment layer.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// if there is a file there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(default) => {
                    tracing::debug!(path = %default.display(), "loading settings");
                    Self::from_file(&default)?
                }
                None => Self::default(),
            },
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = get("SHIPLABEL_MODEL") {
            self.model = Some(model);
        }
        if let Some(endpoint) = get("SHIPLABEL_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Some(country) = get("SHIPLABEL_COUNTRY") {
            self.default_country = Some(country);
        }
    }

    /// Overlays every field that is set in `other`.
    pub fn merge(&mut self, other: Settings) {
        let Settings { api_key, model, endpoint, default_country, timeout_secs, default_label_size, default_weight } =
            other;
        overlay(&mut self.api_key, api_key);
        overlay(&mut self.model, model);
        overlay(&mut self.endpoint, endpoint);
        overlay(&mut self.default_country, default_country);
        overlay(&mut self.timeout_secs, timeout_secs);
        overlay(&mut self.default_label_size, default_label_size);
        overlay(&mut self.default_weight, default_weight);
    }

    /// Country fallback for empty and unresolved addresses. Unset and blank
    /// both mean the built-in default.
    pub fn default_country(&self) -> &str {
        fallback_country(self.default_country.as_deref().unwrap_or_default())
    }

    /// Connection settings for [`crate::GeminiParser`].
    pub fn gemini_config(&self) -> GeminiConfig {
        let defaults = GeminiConfig::default();
        GeminiConfig {
            api_key: self.api_key.clone().unwrap_or_default(),
            model: self.model.clone().unwrap_or(defaults.model),
            endpoint: self.endpoint.clone().unwrap_or(defaults.endpoint),
            default_country: self.default_country().to_string(),
            timeout: self.timeout_secs,
            user_agent: defaults.user_agent,
        }
    }

    /// A fresh editor using the configured country, weight and label size.
    pub fn editor(&self) -> Result<LabelEditor> {
        let editor = LabelEditor::with_default_country(self.default_country());
        if let Some(size) = &self.default_label_size {
            editor.select_label_size(size)?;
        }
        if let Some(weight) = &self.default_weight {
            editor.set_weight(weight.clone());
        }
        Ok(editor)
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
