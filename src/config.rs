//! Configuration for payload-embed

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::embed::literal::validate_layout;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Maximum characters per raw string literal
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// Prepend a UTF-8 BOM to the generated header
    #[serde(default = "default_true")]
    pub output_bom: bool,

    /// Drop one leading BOM from the asset before embedding
    #[serde(default = "default_true")]
    pub strip_input_bom: bool,

    /// Raw string delimiter, must never occur in the payload
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// C++ namespace wrapping the accessor, empty for the global namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Name of the generated accessor function
    #[serde(default = "default_function_name")]
    pub function_name: String,

    /// Include guard macro, derived from the output file name when unset
    #[serde(default)]
    pub include_guard: Option<String>,

    /// Emit a `reserve` call sized to the payload
    #[serde(default = "default_true")]
    pub reserve: bool,

    /// Label shown in the generated banner, defaults to the asset file name
    #[serde(default)]
    pub source_label: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_chunk_size: default_max_chunk_size(),
            output_bom: true,
            strip_input_bom: true,
            delimiter: default_delimiter(),
            namespace: default_namespace(),
            function_name: default_function_name(),
            include_guard: None,
            reserve: true,
            source_label: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Check every option that would otherwise produce an uncompilable header
    pub fn validate(&self) -> Result<()> {
        validate_layout(
            self.max_chunk_size,
            &self.delimiter,
            &self.namespace,
            &self.function_name,
            self.include_guard.as_deref(),
        )
    }

    /// Include guard for a given output path
    pub fn include_guard_for(&self, output_path: &Path) -> String {
        match &self.include_guard {
            Some(guard) => guard.clone(),
            None => derive_include_guard(output_path),
        }
    }

    /// Banner label for a given asset path
    pub fn source_label_for(&self, asset_path: &Path) -> String {
        match &self.source_label {
            Some(label) => label.clone(),
            None => asset_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| asset_path.display().to_string()),
        }
    }
}

/// `embedded_sdk.h` becomes `EMBEDDED_SDK_H_`
pub fn derive_include_guard(output_path: &Path) -> String {
    let name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut guard: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if guard.is_empty() || guard.starts_with(|c: char| c.is_ascii_digit()) {
        guard.insert_str(0, "EMBEDDED_");
    }
    if !guard.ends_with('_') {
        guard.push('_');
    }
    guard
}

// Default value functions

fn default_max_chunk_size() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_delimiter() -> String {
    "SDK_CHUNK".to_string()
}

fn default_namespace() -> String {
    "anywp_engine".to_string()
}

fn default_function_name() -> String {
    "GetEmbeddedPayload".to_string()
}
