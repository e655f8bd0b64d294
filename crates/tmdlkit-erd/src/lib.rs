//! Mermaid entity-relationship diagrams
//!
//! Renders the `tables` and `relationships` of an assembled semantic model
//! (as JSON) into Mermaid `erDiagram` text.

pub mod relationship;
pub mod mermaid;

pub use relationship::{Cardinality, Endpoint, Link};
pub use mermaid::{map_data_type, render_mermaid, wrap_markdown};
