//! Configuration schema (tmdlkit.toml)
//!
//! Describes where the pieces of a PBIP project live and how the ERD is
//! filtered. Every field has a default matching the standard PBIP layout,
//! so an empty file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Known files inside the semantic model's definition folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionFiles {
    /// Database definition (compatibility level)
    pub database: Option<String>,

    /// Model definition (culture, table references)
    pub model: Option<String>,

    /// Relationship definitions
    pub relationships: Option<String>,

    /// Shared expressions and parameters
    pub expressions: Option<String>,
}

impl Default for DefinitionFiles {
    fn default() -> Self {
        Self {
            database: Some("database.tmdl".to_string()),
            model: Some("model.tmdl".to_string()),
            relationships: Some("relationships.tmdl".to_string()),
            expressions: Some("expressions.tmdl".to_string()),
        }
    }
}

/// Known folders inside the semantic model's definition folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionFolders {
    /// Folder with one `.tmdl` file per table
    pub tables: Option<String>,
}

impl Default for DefinitionFolders {
    fn default() -> Self {
        Self {
            tables: Some("tables".to_string()),
        }
    }
}

/// ERD rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErdConfig {
    /// Tables whose name matches one of these patterns are left out of the
    /// diagram, together with their relationships (case-insensitive)
    pub exclude_table_patterns: Vec<String>,
}

impl Default for ErdConfig {
    fn default() -> Self {
        Self {
            exclude_table_patterns: vec![
                "*DateTableTemplate*".to_string(),
                "*LocalDateTable*".to_string(),
            ],
        }
    }
}

impl ErdConfig {
    /// Check if a table is excluded from the diagram
    pub fn is_excluded(&self, table: &str) -> bool {
        let table = table.to_lowercase();
        self.exclude_table_patterns
            .iter()
            .any(|pattern| glob_match(&pattern.to_lowercase(), &table))
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pattern for the `.pbip` project file (presence is only checked)
    #[serde(default = "default_pbip_file_pattern")]
    pub pbip_file_pattern: Option<String>,

    /// Pattern for the report folder (presence is only checked)
    #[serde(default = "default_report_folder_pattern")]
    pub report_folder_pattern: Option<String>,

    /// Pattern for the semantic model folder
    #[serde(default = "default_model_folder_pattern")]
    pub model_folder_pattern: String,

    /// Name of the definition folder inside the semantic model folder
    #[serde(default = "default_definition_folder")]
    pub definition_folder: String,

    /// Known definition files
    #[serde(default)]
    pub files: DefinitionFiles,

    /// Known definition folders
    #[serde(default)]
    pub folders: DefinitionFolders,

    /// ERD options
    #[serde(default)]
    pub erd: ErdConfig,
}

fn default_pbip_file_pattern() -> Option<String> {
    Some("*.pbip".to_string())
}

fn default_report_folder_pattern() -> Option<String> {
    Some("*.Report".to_string())
}

fn default_model_folder_pattern() -> String {
    "*.SemanticModel".to_string()
}

fn default_definition_folder() -> String {
    "definition".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pbip_file_pattern: default_pbip_file_pattern(),
            report_folder_pattern: default_report_folder_pattern(),
            model_folder_pattern: default_model_folder_pattern(),
            definition_folder: default_definition_folder(),
            files: DefinitionFiles::default(),
            folders: DefinitionFolders::default(),
            erd: ErdConfig::default(),
        }
    }
}

impl Config {
    /// Default config file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "tmdlkit.toml";

    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        Ok(())
    }
}

/// Simple glob matching (supports `*` anywhere in the pattern)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == text;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];
    if text.len() < first.len() + last.len() || !text.starts_with(first) || !text.ends_with(last)
    {
        return false;
    }

    let mut rest = &text[first.len()..text.len() - last.len()];

    for middle in &parts[1..parts.len() - 1] {
        match rest.find(middle) {
            Some(pos) => rest = &rest[pos + middle.len()..],
            None => return false,
        }
    }

    true
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    IoError(String, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
