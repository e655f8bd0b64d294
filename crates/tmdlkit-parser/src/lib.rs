//! TMDL parsing
//!
//! This crate handles:
//! - Splitting a TMDL document into indentation-tagged lines
//! - Building the node tree from keyword-prefixed lines
//! - Reading multi-line values (indented and fenced blocks)
//! - Extracting table references and embedded payloads from partition sources

pub mod lines;
pub mod block;
pub mod extract;
pub mod arena;
pub mod parser;

pub use lines::{SourceLines, Token};
pub use block::{normalize, Block};
pub use extract::{apply_source_extraction, decode_payload, extract_payloads, extract_references};
pub use parser::{parse_file, parse_str, ParseError, TmdlParser};
