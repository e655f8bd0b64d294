//! PBIP project assembly
//!
//! This crate handles:
//! - Locating the semantic model and its definition folder in a PBIP project
//! - Parsing the known definition files and every table file
//! - Combining them into one serializable semantic model

pub mod locator;
pub mod assembler;

pub use locator::{locate, ProjectError, ProjectLayout};
pub use assembler::{assemble, assemble_layout, Relationships, SemanticModel};
