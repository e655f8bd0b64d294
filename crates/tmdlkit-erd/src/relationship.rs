//! Relationship endpoints and connector styles

use serde_json::Value;

/// One side of a relationship: a table and a column in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Table name
    pub table: String,

    /// Column name; empty when the entry names none
    pub column: String,
}

impl Endpoint {
    /// Create an endpoint from a table and a column name
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Split a TMDL column reference such as `Sales.Amount` or
    /// `'Dim Date'.'Order Date'`
    pub fn parse_qualified(reference: &str) -> Option<Self> {
        let reference = reference.trim();

        let (table, column) = match reference.strip_prefix('\'') {
            Some(quoted) => {
                let end = quoted.find("'.")?;
                (&quoted[..end], &quoted[end + 2..])
            }
            None => reference.split_once('.')?,
        };

        let column = column
            .strip_prefix('\'')
            .and_then(|c| c.strip_suffix('\''))
            .unwrap_or(column);

        if table.is_empty() {
            return None;
        }
        Some(Self::new(table, column))
    }
}

/// Cardinality marker on the `to` side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Exactly one (`||`)
    #[default]
    One,

    /// Zero or more (`o{`)
    Many,
}

impl Cardinality {
    /// Mermaid crow's-foot marker for this side
    pub fn marker(&self) -> &'static str {
        match self {
            Self::One => "||",
            Self::Many => "o{",
        }
    }
}

/// A renderable relationship between two tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Many side of the relationship
    pub from: Endpoint,

    /// Side the relationship points to
    pub to: Endpoint,

    /// Marker drawn next to `to`
    pub to_cardinality: Cardinality,

    /// Inactive relationships are drawn dotted
    pub active: bool,
}

/// Marker on the `from` side: zero or more
const FROM_MARKER: &str = "}o";

impl Link {
    /// Read a relationship entry
    ///
    /// Explicit `fromTable`/`toTable` keys take precedence over the TMDL
    /// `fromColumn`/`toColumn` references. `None` when either endpoint
    /// cannot be determined.
    pub fn from_value(relationship: &Value) -> Option<Self> {
        let text = |key: &str| relationship.get(key).and_then(Value::as_str);

        let (from, to) = match (text("fromTable"), text("toTable")) {
            (Some(from_table), Some(to_table)) if !from_table.is_empty() && !to_table.is_empty() => (
                Endpoint::new(from_table, text("fromColumnName").unwrap_or_default()),
                Endpoint::new(to_table, text("toColumnName").unwrap_or_default()),
            ),
            _ => (
                Endpoint::parse_qualified(text("fromColumn")?)?,
                Endpoint::parse_qualified(text("toColumn")?)?,
            ),
        };

        let to_cardinality = match text("toCardinality") {
            Some(value) if value.eq_ignore_ascii_case("many") => Cardinality::Many,
            _ => Cardinality::One,
        };

        let active = match relationship.get("isActive") {
            Some(Value::Bool(active)) => *active,
            Some(Value::String(active)) => !active.eq_ignore_ascii_case("false"),
            _ => true,
        };

        Some(Self {
            from,
            to,
            to_cardinality,
            active,
        })
    }

    /// Solid for active relationships, dotted otherwise
    pub fn connector(&self) -> &'static str {
        if self.active {
            "--"
        } else {
            ".."
        }
    }

    /// Mermaid relationship line, indented for an `erDiagram` body
    pub fn to_mermaid(&self) -> String {
        format!(
            "    \"{}\" {}{}{} \"{}\" : \"{} to {}\"",
            self.from.table,
            FROM_MARKER,
            self.connector(),
            self.to_cardinality.marker(),
            self.to.table,
            self.from.column,
            self.to.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_plain_and_quoted_references() {
        assert_eq!(
            Endpoint::parse_qualified("FactSales.DateKey"),
            Some(Endpoint::new("FactSales", "DateKey"))
        );
        assert_eq!(
            Endpoint::parse_qualified("'Dim Date'.'Order Date'"),
            Some(Endpoint::new("Dim Date", "Order Date"))
        );
        assert_eq!(
            Endpoint::parse_qualified("'Fiscal.Calendar'.Date"),
            Some(Endpoint::new("Fiscal.Calendar", "Date"))
        );
        assert_eq!(Endpoint::parse_qualified("NoColumn"), None);
        assert_eq!(Endpoint::parse_qualified(".Orphan"), None);
    }

    #[test]
    fn explicit_tables_win() {
        let link = Link::from_value(&json!({
            "fromTable": "Sales",
            "fromColumnName": "CustomerId",
            "toTable": "Customer",
            "toColumnName": "Id",
            "fromColumn": "Ignored.Column"
        }))
        .unwrap();

        assert_eq!(link.from, Endpoint::new("Sales", "CustomerId"));
        assert_eq!(link.to, Endpoint::new("Customer", "Id"));
        assert_eq!(
            link.to_mermaid(),
            r#"    "Sales" }o--|| "Customer" : "CustomerId to Id""#
        );
    }

    #[test]
    fn inactive_many_relationship() {
        let link = Link::from_value(&json!({
            "fromColumn": "A.x",
            "toColumn": "B.y",
            "isActive": "false",
            "toCardinality": "many"
        }))
        .unwrap();

        assert_eq!(link.to_mermaid(), r#"    "A" }o..o{ "B" : "x to y""#);

        let boolean = Link::from_value(&json!({
            "fromColumn": "A.x",
            "toColumn": "B.y",
            "isActive": false
        }))
        .unwrap();
        assert!(!boolean.active);
    }

    #[test]
    fn cardinality_markers() {
        assert_eq!(Cardinality::default(), Cardinality::One);
        assert_eq!(Cardinality::One.marker(), "||");
        assert_eq!(Cardinality::Many.marker(), "o{");
    }

    #[test]
    fn explicit_tables_without_column_names() {
        let link = Link::from_value(&json!({"fromTable": "Sales", "toTable": "Customer"})).unwrap();
        assert_eq!(link.from, Endpoint::new("Sales", ""));
        assert!(link.active);
    }

    #[test]
    fn missing_endpoint_is_skipped() {
        assert_eq!(Link::from_value(&json!({"fromColumn": "A.x"})), None);
        assert_eq!(Link::from_value(&json!({"fromTable": "A", "toTable": ""})), None);
    }
}
