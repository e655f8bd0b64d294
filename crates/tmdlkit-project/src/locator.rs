//! PBIP folder layout discovery
//!
//! Resolves the paths of a semantic model's definition files from a project
//! folder and a [`Config`]. Nothing is parsed here.

use std::path::{Path, PathBuf};

use tmdlkit_core::{glob_match, Config};
use walkdir::WalkDir;

/// Resolved paths of one PBIP project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project folder that was searched
    pub project_folder: PathBuf,

    /// First semantic model folder (by name) matching the configured pattern
    pub semantic_model: PathBuf,

    /// Definition folder inside the semantic model
    pub definition: PathBuf,

    /// Database file, when configured and present
    pub database: Option<PathBuf>,

    /// Model file, when configured and present
    pub model: Option<PathBuf>,

    /// Relationships file, when configured and present
    pub relationships: Option<PathBuf>,

    /// Expressions file, when configured and present
    pub expressions: Option<PathBuf>,

    /// Table files sorted by name; `None` when the tables folder is absent
    pub tables: Option<Vec<PathBuf>>,
}

/// Resolve the layout of a PBIP project folder
pub fn locate(folder: &Path, config: &Config) -> Result<ProjectLayout, ProjectError> {
    if !folder.is_dir() {
        return Err(ProjectError::IoError(
            folder.display().to_string(),
            "not a directory".to_string(),
        ));
    }

    let entries = list_dir(folder)?;

    if let Some(pattern) = &config.pbip_file_pattern {
        if !entries.iter().any(|path| name_matches(path, pattern)) {
            tracing::warn!(
                pattern = %pattern,
                folder = %folder.display(),
                "no PBIP file found"
            );
        }
    }

    if let Some(pattern) = &config.report_folder_pattern {
        if !entries.iter().any(|path| name_matches(path, pattern)) {
            tracing::warn!(
                pattern = %pattern,
                folder = %folder.display(),
                "no report folder found"
            );
        }
    }

    let semantic_model = entries
        .iter()
        .find(|path| path.is_dir() && name_matches(path, &config.model_folder_pattern))
        .cloned()
        .ok_or_else(|| {
            ProjectError::SemanticModelNotFound(
                config.model_folder_pattern.clone(),
                folder.display().to_string(),
            )
        })?;

    let definition = semantic_model.join(&config.definition_folder);
    if !definition.is_dir() {
        return Err(ProjectError::DefinitionFolderNotFound(
            definition.display().to_string(),
        ));
    }

    tracing::debug!(
        semantic_model = %semantic_model.display(),
        "located semantic model"
    );

    let existing = |name: &Option<String>| {
        name.as_ref()
            .map(|name| definition.join(name))
            .filter(|path| path.is_file())
    };

    let database = existing(&config.files.database);
    let model = existing(&config.files.model);
    let relationships = existing(&config.files.relationships);
    let expressions = existing(&config.files.expressions);

    let tables = match &config.folders.tables {
        Some(name) => {
            let tables_folder = definition.join(name);
            if tables_folder.is_dir() {
                Some(table_files(&tables_folder)?)
            } else {
                tracing::debug!(folder = %tables_folder.display(), "no tables folder");
                None
            }
        }
        None => None,
    };

    Ok(ProjectLayout {
        project_folder: folder.to_path_buf(),
        semantic_model,
        definition,
        database,
        model,
        relationships,
        expressions,
        tables,
    })
}

/// Direct entries of a folder, sorted by file name
fn list_dir(folder: &Path) -> Result<Vec<PathBuf>, ProjectError> {
    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry
                .map(|entry| entry.into_path())
                .map_err(|e| ProjectError::IoError(folder.display().to_string(), e.to_string()))
        })
        .collect()
}

/// `*.tmdl` files directly inside the tables folder
fn table_files(folder: &Path) -> Result<Vec<PathBuf>, ProjectError> {
    Ok(list_dir(folder)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == "tmdl"))
        .collect())
}

fn name_matches(path: &Path, pattern: &str) -> bool {
    path.file_name()
        .map(|name| glob_match(pattern, &name.to_string_lossy()))
        .unwrap_or(false)
}

/// Project assembly error types
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("No semantic model folder matching '{0}' in {1}")]
    SemanticModelNotFound(String, String),

    #[error("Definition folder not found at {0}")]
    DefinitionFolderNotFound(String),

    #[error("Failed to read {0}: {1}")]
    IoError(String, String),

    #[error(transparent)]
    ParseError(#[from] tmdlkit_parser::ParseError),
}
