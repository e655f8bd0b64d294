//! Side-data attached to nodes: annotations and partition source details

use serde::{Deserialize, Serialize};

/// A `name = value` annotation entry
///
/// Annotations never own children, so they are plain records rather than nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation name, with surrounding single quotes removed
    pub name: String,

    /// Raw annotation value
    pub value: String,
}

impl Annotation {
    /// Create a new annotation
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// How an embedded payload was recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Payload was compressed and has been inflated back to text.
    /// The label does not imply the text is valid JSON.
    DecompressedJson,

    /// Base64 decoding worked but neither raw deflate nor zlib did
    RawDecoded,
}

impl PayloadKind {
    /// Stable string identifier used in JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecompressedJson => "decompressed_json",
            Self::RawDecoded => "raw_decoded",
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured fact extracted from a partition's `source` expression
///
/// Every match in the source text produces its own entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceDetail {
    /// `{[Schema="...",Item="..."]}` navigation step
    Reference {
        /// Database schema name
        schema: String,

        /// Table or view name
        item: String,
    },

    /// Inline `Binary.FromText(..., BinaryEncoding.Base64)` payload
    Payload {
        /// How the payload was recovered
        #[serde(rename = "contentType")]
        content_type: PayloadKind,

        /// Recovered text, or a fixed message when it could not be inflated
        content: String,
    },

    /// The base64 literal itself could not be decoded
    Error {
        /// Human-readable failure reason
        error: String,
    },
}

impl SourceDetail {
    /// Create a schema/item reference
    pub fn reference(schema: impl Into<String>, item: impl Into<String>) -> Self {
        Self::Reference {
            schema: schema.into(),
            item: item.into(),
        }
    }

    /// Check whether this entry records a failure of any kind
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Error { .. }
                | Self::Payload {
                    content_type: PayloadKind::RawDecoded,
                    ..
                }
        )
    }
}
