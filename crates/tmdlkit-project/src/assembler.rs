//! Semantic model assembly
//!
//! Parses every file of a located project and combines the roots into one
//! [`SemanticModel`]. Parts whose file is missing are left out of the output.

use std::path::Path;

use serde::Serialize;
use tmdlkit_core::{Collection, Config, Node};
use tmdlkit_parser::parse_file;

use crate::locator::{locate, ProjectError, ProjectLayout};

/// Content of the relationships file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Relationships {
    /// The `relationships` entries of the file's root
    List(Vec<Node>),

    /// The whole root, when the file declared no relationship
    Document(Node),
}

impl Relationships {
    /// Relationship entries (empty for a document without any)
    pub fn entries(&self) -> &[Node] {
        match self {
            Self::List(nodes) => nodes,
            Self::Document(root) => root.relationships(),
        }
    }
}

/// Parsed semantic model of a PBIP project
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SemanticModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<Node>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Node>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expressions: Option<Node>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<Node>>,
}

impl SemanticModel {
    /// Convert to a JSON value
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Locate and parse a PBIP project folder
pub fn assemble(folder: &Path, config: &Config) -> Result<SemanticModel, ProjectError> {
    let layout = locate(folder, config)?;
    assemble_layout(&layout)
}

/// Parse every file of an already located project
pub fn assemble_layout(layout: &ProjectLayout) -> Result<SemanticModel, ProjectError> {
    let parse = |path: &Option<std::path::PathBuf>| -> Result<Option<Node>, ProjectError> {
        path.as_deref().map(parse_file).transpose().map_err(Into::into)
    };

    let relationships = parse(&layout.relationships)?.map(|mut root| {
        match root.children.shift_remove(&Collection::Relationships) {
            Some(entries) => Relationships::List(entries),
            None => Relationships::Document(root),
        }
    });

    let tables = match &layout.tables {
        Some(paths) => Some(
            paths
                .iter()
                .map(|path| parse_file(path))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    let model = SemanticModel {
        database: parse(&layout.database)?,
        model: parse(&layout.model)?,
        relationships,
        expressions: parse(&layout.expressions)?,
        tables,
    };

    tracing::debug!(
        tables = model.tables.as_ref().map_or(0, Vec::len),
        relationships = model.relationships.as_ref().map_or(0, |r| r.entries().len()),
        "assembled semantic model"
    );

    Ok(model)
}
