//! tmdlkit Core
//!
//! Domain model shared by every tmdlkit crate: the parsed TMDL node tree,
//! the side-data extracted from partition sources, and the tool configuration.
//! JSON key names produced here are part of the output contract.

pub mod node;
pub mod source;
pub mod config;

pub use node::{Collection, Node, NodeKind};
pub use source::{Annotation, PayloadKind, SourceDetail};
pub use config::{glob_match, Config, ConfigError, DefinitionFiles, DefinitionFolders, ErdConfig};
