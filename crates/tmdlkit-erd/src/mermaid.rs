//! `erDiagram` rendering

use serde_json::Value;
use tmdlkit_core::ErdConfig;

use crate::relationship::Link;

/// Map a TMDL `dataType` to the attribute type shown in the diagram
///
/// Unknown types pass through unchanged.
pub fn map_data_type(data_type: &str) -> &str {
    match data_type {
        "int64" => "int",
        "double" => "float",
        "dateTime" => "datetime",
        "binary" => "blob",
        other => other,
    }
}

/// Attribute name of a column: calculated-column definitions are cut at `=`,
/// spaces become underscores and quotes are dropped
fn column_display_name(name: &str) -> String {
    let name = match name.split_once('=') {
        Some((head, _)) => head.trim(),
        None => name,
    };

    name.replace(' ', "_").replace(['"', '\''], "")
}

/// Table name without a surrounding pair of single quotes
fn table_display_name(name: &str) -> &str {
    name.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(name)
}

/// Relationship entries of the document, as a list or inside a root object
fn relationship_entries(data: &Value) -> &[Value] {
    match data.get("relationships") {
        Some(Value::Array(entries)) => entries,
        Some(root @ Value::Object(_)) => root
            .get("relationships")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    }
}

/// Render the tables and relationships of a semantic model
pub fn render_mermaid(data: &Value, config: &ErdConfig) -> String {
    let mut lines = vec!["erDiagram".to_string()];

    let tables = data
        .get("tables")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for table in tables {
        let Some(name) = table.get("name").and_then(Value::as_str) else {
            continue;
        };
        let name = table_display_name(name);
        if name.is_empty() || config.is_excluded(name) {
            tracing::debug!(table = name, "table left out of diagram");
            continue;
        }

        lines.push(format!("    \"{}\" {{", name));

        let columns = table
            .get("columns")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for column in columns {
            let Some(column_name) = column.get("name").and_then(Value::as_str) else {
                continue;
            };
            let data_type = column
                .get("dataType")
                .and_then(Value::as_str)
                .unwrap_or("string");

            lines.push(format!(
                "        {} {}",
                map_data_type(data_type),
                column_display_name(column_name)
            ));
        }

        lines.push("    }".to_string());
    }

    for relationship in relationship_entries(data) {
        let Some(link) = Link::from_value(relationship) else {
            tracing::debug!("relationship without resolvable endpoints skipped");
            continue;
        };
        if config.is_excluded(&link.from.table) || config.is_excluded(&link.to.table) {
            continue;
        }

        lines.push(link.to_mermaid());
    }

    lines.join("\n")
}

/// Wrap diagram text in a Markdown `mermaid` fence
pub fn wrap_markdown(diagram: &str) -> String {
    format!("```mermaid\n{}\n```", diagram)
}
