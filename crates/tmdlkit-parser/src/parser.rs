//! TMDL document parser
//!
//! A single forward scan over the document's lines. Each non-blank line first
//! finds its enclosing node by indentation, then is dispatched on its keyword
//! prefix. Lines that open a structural node make it the current context;
//! everything else attaches to the enclosing node. Unrecognized lines are
//! dropped without a diagnostic.

use std::path::Path;

use tmdlkit_core::{Annotation, Collection, Node, NodeKind};

use crate::arena::{Arena, NodeId, ROOT};
use crate::block::{fenced_block, indented_block, FENCE};
use crate::extract::apply_source_extraction;
use crate::lines::{indent_of, SourceLines, Token};

/// Shape of a content line, decided by its keyword prefix
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    /// `table`, `database` or `model` declaration of the root
    Declaration { kind: NodeKind, name: &'a str },
    Column(&'a str),
    Partition(&'a str),
    Annotation(&'a str),
    Measure(&'a str),
    /// Top-level named expression
    Expression(&'a str),
    Relationship(&'a str),
    /// Anything else: `key: value`, `key =` block, `key = value` or nothing
    Property,
}

fn classify<'a>(token: &Token<'a>) -> Line<'a> {
    let content = token.content;

    if let Some(name) = content.strip_prefix("table ") {
        return Line::Declaration {
            kind: NodeKind::Table,
            name,
        };
    }
    if let Some(name) = content.strip_prefix("column ") {
        return Line::Column(name);
    }
    if let Some(definition) = content.strip_prefix("partition ") {
        return Line::Partition(definition);
    }
    if let Some(definition) = content.strip_prefix("annotation ") {
        return Line::Annotation(definition);
    }
    if let Some(definition) = content.strip_prefix("measure ") {
        return Line::Measure(definition);
    }
    if let Some(name) = content.strip_prefix("relationship ") {
        return Line::Relationship(name);
    }

    // Only file-level declarations; nested lines with these words are properties
    if token.indent == 0 {
        if let Some(name) = content.strip_prefix("database ") {
            return Line::Declaration {
                kind: NodeKind::Database,
                name,
            };
        }
        if let Some(name) = content.strip_prefix("model ") {
            return Line::Declaration {
                kind: NodeKind::Model,
                name,
            };
        }
        if let Some(definition) = content.strip_prefix("expression ") {
            let named = definition
                .split_once('=')
                .is_some_and(|(name, _)| !name.trim().is_empty());
            if named {
                return Line::Expression(definition);
            }
        }
    }

    Line::Property
}

/// Remove one pair of surrounding single quotes
fn unquote(name: &str) -> &str {
    name.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(name)
}

/// Stateful parser for one TMDL document
pub struct TmdlParser<'a> {
    source: SourceLines<'a>,
    arena: Arena,
    /// Most recently opened node that is still enclosing
    context: NodeId,
    /// Index of the next raw line to read
    cursor: usize,
}

impl<'a> TmdlParser<'a> {
    /// Create a parser over the full text of one file
    pub fn new(text: &'a str) -> Self {
        Self {
            source: SourceLines::new(text),
            arena: Arena::new(),
            context: ROOT,
            cursor: 0,
        }
    }

    /// Parse the whole document and return its root node
    pub fn parse(mut self) -> Node {
        while self.cursor < self.source.len() {
            self.cursor = match self.source.token(self.cursor) {
                Some(token) => self.process(token),
                None => self.cursor + 1,
            };
        }

        tracing::debug!(
            lines = self.source.len(),
            nodes = self.arena.len(),
            "parsed TMDL document"
        );

        self.arena.into_tree()
    }

    /// Handle one content line and return the index of the next line to read
    fn process(&mut self, token: Token<'a>) -> usize {
        let parent = self.arena.enclosing(self.context, token.indent);
        self.context = parent;
        let next = token.line + 1;

        match classify(&token) {
            Line::Declaration { kind, name } => {
                self.declare(kind, name);
                next
            }
            Line::Column(name) => {
                let column = Node::new(name, NodeKind::Column);
                self.open(parent, Collection::Columns, column, token.indent);
                next
            }
            Line::Partition(definition) => {
                let partition = match definition.split_once('=') {
                    Some((name, partition_type)) => Node::new(
                        name.trim(),
                        NodeKind::partition(Some(partition_type.trim().to_string())),
                    ),
                    None => Node::new(definition, NodeKind::partition(None)),
                };
                self.open(parent, Collection::Partitions, partition, token.indent);
                next
            }
            Line::Annotation(definition) => {
                self.annotate(parent, &token, definition);
                next
            }
            Line::Measure(definition) => self.open_with_expression(
                parent,
                &token,
                definition,
                Collection::Measures,
                NodeKind::measure(),
            ),
            Line::Expression(definition) => self.open_with_expression(
                parent,
                &token,
                definition,
                Collection::Expressions,
                NodeKind::expression(),
            ),
            Line::Relationship(name) => {
                let relationship = Node::new(name, NodeKind::Relationship);
                self.open(parent, Collection::Relationships, relationship, token.indent);
                next
            }
            Line::Property => self.property(parent, &token),
        }
    }

    /// Name the root and re-anchor it as the only open context
    fn declare(&mut self, kind: NodeKind, name: &str) {
        let root = self.arena.get_mut(ROOT);
        if root.kind.is_root_declaration() {
            tracing::debug!(previous = ?root.name, name, "root declared again");
        }
        root.name = Some(name.to_string());
        root.kind = kind;

        self.arena.anchor_root(0);
        self.context = ROOT;
    }

    /// Insert a structural child and make it the current context
    fn open(&mut self, parent: NodeId, collection: Collection, node: Node, indent: usize) {
        tracing::debug!(
            kind = node.type_name().unwrap_or_default(),
            name = node.name(),
            indent,
            "opened node"
        );
        self.context = self.arena.insert(parent, collection, node, indent);
    }

    fn annotate(&mut self, parent: NodeId, token: &Token<'a>, definition: &str) {
        let Some((name, value)) = definition.split_once('=') else {
            tracing::trace!(line = token.line + 1, "dropping annotation without value");
            return;
        };

        self.arena
            .get_mut(parent)
            .annotate(Annotation::new(unquote(name.trim()), value.trim()));
    }

    /// Open a measure or named expression and read its value
    ///
    /// The value is a fenced block, inline text, or an implicit block
    /// indented at least two levels below the declaration.
    fn open_with_expression(
        &mut self,
        parent: NodeId,
        token: &Token<'a>,
        definition: &str,
        collection: Collection,
        kind: NodeKind,
    ) -> usize {
        let Some((name, value)) = definition.split_once('=') else {
            tracing::trace!(line = token.line + 1, "dropping declaration without '='");
            return token.line + 1;
        };

        let value = value.trim();
        let mut next = token.line + 1;
        let property_indent = token.indent + 1;

        let expression = if value == FENCE {
            let block = fenced_block(&self.source, next);
            next = block.next;
            block.text()
        } else if !value.is_empty() {
            value.to_string()
        } else if self
            .source
            .raw(next)
            .is_some_and(|raw| indent_of(raw) > property_indent)
        {
            let block = indented_block(&self.source, next, property_indent);
            next = block.next;
            block.text()
        } else {
            // Body not deep enough to tell apart from properties; left empty
            String::new()
        };

        let mut node = Node::new(unquote(name.trim()), kind);
        node.set_property("expression", expression);
        self.open(parent, collection, node, token.indent);

        next
    }

    fn property(&mut self, parent: NodeId, token: &Token<'a>) -> usize {
        let content = token.content;
        let next = token.line + 1;

        if let Some((key, value)) = content.split_once(": ") {
            self.store(parent, key, value.to_string());
            return next;
        }

        if let Some(key) = content.strip_suffix(" =") {
            let block = indented_block(&self.source, next, token.indent);
            self.store(parent, key, block.text());
            return block.next;
        }

        if let Some((key, value)) = content.split_once('=') {
            self.store(parent, key.trim(), value.trim().to_string());
            return next;
        }

        tracing::trace!(line = token.line + 1, content, "ignoring unrecognized line");
        next
    }

    /// Set a property; partition sources also get their embedded content extracted
    fn store(&mut self, parent: NodeId, key: &str, value: String) {
        let node = self.arena.get_mut(parent);
        node.set_property(key, value.clone());

        if key == "source" {
            let mut failures = 0;
            node.update_source_details(|details| {
                failures = apply_source_extraction(&value, details);
            });
            if failures > 0 {
                tracing::warn!(
                    partition = node.name(),
                    failures,
                    "embedded payloads in partition source could not be extracted"
                );
            }
        }
    }
}

/// Parse the text of one TMDL file
pub fn parse_str(text: &str) -> Node {
    TmdlParser::new(text).parse()
}

/// Read and parse one TMDL file
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ParseError::IoError(path.display().to_string(), e.to_string()))?;

    tracing::debug!(path = %path.display(), "parsing TMDL file");
    Ok(parse_str(&contents))
}

/// Errors surfaced before parsing starts
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read TMDL file {0}: {1}")]
    IoError(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tmdlkit_core::{PayloadKind, SourceDetail};

    #[test]
    fn table_only() {
        let root = parse_str("table Sales");

        assert_eq!(root.name(), "Sales");
        assert_eq!(root.type_name(), Some("table"));
        assert!(root.properties.is_empty());
        assert!(root.children.is_empty());
        assert!(root.annotations.is_empty());
    }

    #[test]
    fn simple_table_properties_stay_strings() {
        let root = parse_str("table MyTable\n\tlineageTag: 12345\n");
        assert_eq!(root.property("lineageTag"), Some("12345"));
    }

    #[test]
    fn columns_keep_order_and_properties() {
        let root = parse_str(
            "table MyTable\n\
             \tcolumn Column1\n\
             \t\tdataType: string\n\
             \t\tsummarizeBy: none\n\
             \n\
             \tcolumn Column2\n\
             \t\tdataType: int64\n",
        );

        let columns = root.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name(), "Column1");
        assert_eq!(columns[0].property("dataType"), Some("string"));
        assert_eq!(columns[0].property("summarizeBy"), Some("none"));
        assert_eq!(columns[1].name(), "Column2");
        assert_eq!(columns[1].property("dataType"), Some("int64"));
    }

    #[test]
    fn table_properties_after_children_attach_to_table() {
        let root = parse_str(
            "table Sales\n\
             \tcolumn Id\n\
             \t\tdataType: int64\n\
             \tlineageTag: abc\n",
        );

        assert_eq!(root.property("lineageTag"), Some("abc"));
        assert_eq!(root.columns()[0].property("lineageTag"), None);
    }

    #[test]
    fn late_table_properties_serialize_after_children() {
        let root = parse_str(
            "table Sales\n\
             \tlineageTag: abc\n\
             \tcolumn Id\n\
             \t\tdataType: int64\n\
             \tannotation PBI_ResultType = Table\n\
             \tdataCategory: Time\n",
        );

        let value = root.to_value().unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["name", "type", "lineageTag", "columns", "annotations", "dataCategory"]
        );
    }

    #[test]
    fn partition_keys_follow_source() {
        let root = parse_str(
            "table T\n\
             \tpartition P = m\n\
             \t\tmode: import\n\
             \t\tsource = Source{[Schema=\"dbo\",Item=\"X\"]}\n",
        );

        let value = root.partitions()[0].to_value().unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["name", "type", "partitionType", "mode", "source", "sourceDetails"]
        );
    }

    #[test]
    fn colon_value_is_taken_literally() {
        let root = parse_str("table T\n\tformatString: #,0.00 ;-#: x\n");
        assert_eq!(root.property("formatString"), Some("#,0.00 ;-#: x"));
    }

    #[test]
    fn equals_property_is_trimmed() {
        let root = parse_str("table T\n\tcolumn C\n\t\tisNameInferred =  true \n");
        assert_eq!(root.columns()[0].property("isNameInferred"), Some("true"));
    }

    #[test]
    fn flag_lines_are_ignored() {
        let root = parse_str("table T\n\tcolumn C\n\t\tisHidden\n\t\tdataType: string\n");
        let column = &root.columns()[0];
        assert_eq!(column.properties.len(), 1);
        assert_eq!(column.property("dataType"), Some("string"));
    }

    #[test]
    fn partition_type_is_split() {
        let root = parse_str("table T\n\tpartition Sales = m\n\t\tmode: import\n\tpartition Plain\n");

        let partitions = root.partitions();
        assert_eq!(partitions[0].name(), "Sales");
        assert_eq!(partitions[0].partition_type(), Some("m"));
        assert_eq!(partitions[0].property("mode"), Some("import"));
        assert_eq!(partitions[1].name(), "Plain");
        assert_eq!(partitions[1].partition_type(), None);
    }

    #[test]
    fn multiline_source_is_normalized() {
        let root = parse_str(
            "table MyTable\n\
             \tpartition MyPartition = m\n\
             \t\tsource = \n\
             \t\t\tlet\n\
             \t\t\t    Source = Sql.Database(\"Server\", \"DB\")\n\
             \t\t\tin\n\
             \t\t\t    Source",
        );

        let source = root.partitions()[0].property("source").unwrap();
        assert!(source.contains("Sql.Database"));
        let lines: Vec<&str> = source.split('\n').collect();
        assert!(lines[0].starts_with("let"));
        assert!(lines[1].trim().starts_with("Source"));
    }

    #[test]
    fn block_backtracks_to_sibling_line() {
        let root = parse_str(
            "table T\n\
             \tpartition P = m\n\
             \t\tsource =\n\
             \t\t\tlet\n\
             \n\
             \t\t\tin\n\
             \t\tmode: import\n\
             \tcolumn C\n",
        );

        let partition = &root.partitions()[0];
        assert_eq!(partition.property("source"), Some("let\n\nin"));
        assert_eq!(partition.property("mode"), Some("import"));
        assert_eq!(root.columns()[0].name(), "C");
    }

    #[test]
    fn annotations_strip_quotes() {
        let root = parse_str(
            "table MyTable\n\
             \tannotation PBI_ResultType = Table\n\
             \tannotation 'Complex Name' = Value\n",
        );

        assert_eq!(
            root.annotations,
            vec![
                Annotation::new("PBI_ResultType", "Table"),
                Annotation::new("Complex Name", "Value"),
            ]
        );
    }

    #[test]
    fn annotation_without_value_is_dropped() {
        let root = parse_str("table T\n\tannotation Orphan\n");
        assert!(root.annotations.is_empty());
        assert!(root.properties.is_empty());
    }

    #[test]
    fn annotations_are_not_contexts() {
        let root = parse_str(
            "table T\n\
             \tcolumn C\n\
             \t\tannotation SummarizationSetBy = Automatic\n\
             \t\tdataType: string\n",
        );

        let column = &root.columns()[0];
        assert_eq!(column.annotations.len(), 1);
        assert_eq!(column.property("dataType"), Some("string"));
    }

    #[test]
    fn measures_in_three_forms() {
        let root = parse_str(
            "table KeyMeasures\n\
             \tmeasure 'Dynamic Forecast NY' = ```\n\
             \t\t\t\n\
             \t\t\t\n\
             \t\t\tCALCULATE(\n\
             \t\t\t    SUM ( Dynamic_and_Snapshot[VolsPipelineA] )\n\
             \t\t\t)\n\
             \t\t\t\n\
             \t\t\t```\n\
             \t\tformatString: 0\n\
             \t\tdisplayFolder: Dynamic\n\
             \n\
             \tmeasure 'Simple Measure' = SUM(Table[Col])\n\
             \t\tformatString: 0\n\
             \n\
             \tmeasure 'Indented Block' = \n\
             \t\t\t\n\
             \t\t\tVAR x = 1\n\
             \t\t\tRETURN x\n\
             \t\tformatString: #\n",
        );

        let measures = root.measures();
        assert_eq!(measures.len(), 3);

        let fenced = &measures[0];
        assert_eq!(fenced.name(), "Dynamic Forecast NY");
        assert_eq!(fenced.property("formatString"), Some("0"));
        assert_eq!(fenced.property("displayFolder"), Some("Dynamic"));
        let expression = fenced.expression().unwrap();
        assert!(expression.contains("CALCULATE"));
        assert!(!expression.contains(FENCE));
        let first_content = expression.lines().find(|l| !l.is_empty()).unwrap();
        assert_eq!(first_content, "CALCULATE(");

        let inline = &measures[1];
        assert_eq!(inline.name(), "Simple Measure");
        assert_eq!(inline.expression(), Some("SUM(Table[Col])"));
        assert_eq!(inline.property("formatString"), Some("0"));

        let implicit = &measures[2];
        assert_eq!(implicit.name(), "Indented Block");
        assert_eq!(implicit.expression(), Some("\nVAR x = 1\nRETURN x"));
        assert_eq!(implicit.property("formatString"), Some("#"));
    }

    #[test]
    fn shallow_measure_body_stays_empty() {
        let root = parse_str("table T\n\tmeasure M =\n\t\tformatString: 0\n");

        let measure = &root.measures()[0];
        assert_eq!(measure.expression(), Some(""));
        assert_eq!(measure.property("formatString"), Some("0"));
    }

    #[test]
    fn measure_without_equals_is_dropped() {
        let root = parse_str("table T\n\tmeasure Broken\n\t\tformatString: 0\n");
        assert!(root.measures().is_empty());
        assert_eq!(root.property("formatString"), Some("0"));
    }

    #[test]
    fn source_references_are_extracted() {
        let root = parse_str(
            "table MyTable\n\
             \tpartition MyPartition = m\n\
             \t\tsource = \n\
             \t\t\tlet\n\
             \t\t\t    Source = Sql.Database(\"Server\", \"DB\"),\n\
             \t\t\t    Data1 = Source{[Schema=\"dbo\",Item=\"Table1\"]}[Data],\n\
             \t\t\t    Data2 = Source{[Schema=\"sales\",Item=\"FactSales\"]}[Data]\n\
             \t\t\tin\n\
             \t\t\t    Data2\n",
        );

        assert_eq!(
            root.partitions()[0].source_details(),
            &[
                SourceDetail::reference("dbo", "Table1"),
                SourceDetail::reference("sales", "FactSales"),
            ]
        );
    }

    #[test]
    fn source_payload_is_decoded() {
        let root = parse_str(
            "table ReportPages\n\
             \tpartition ReportPages = m\n\
             \t\tsource = \n\
             \t\t\tlet\n\
             \t\t\t    Source = Table.FromRows(Json.Document(Binary.Decompress(Binary.FromText(\"i45WcqnMS8zNTFZwyy9KTU4sLlGK1YlWcivKr0rNQxULKUrNS1FIqlQIqSxIVYBqwyID0asUGwsA\", BinaryEncoding.Base64), Compression.Deflate)), let _t = ((type nullable text) meta [Serialized.Text = true]) in type table [PageName = _t]),\n\
             \t\t\t    #\"Changed Type\" = Table.TransformColumnTypes(Source,{{\"PageName\", type text}})\n\
             \t\t\tin\n\
             \t\t\t    #\"Changed Type\"\n",
        );

        let details = root.partitions()[0].source_details();
        assert_eq!(details.len(), 1);
        match &details[0] {
            SourceDetail::Payload {
                content_type,
                content,
            } => {
                assert_eq!(*content_type, PayloadKind::DecompressedJson);
                assert!(content.contains("Dynamic Forecast"));
            }
            other => panic!("expected payload, got {:?}", other),
        }
    }

    #[test]
    fn bad_payload_does_not_abort_parse() {
        let root = parse_str(
            "table T\n\
             \tpartition P = m\n\
             \t\tsource =\n\
             \t\t\tBinary.FromText(\"@@@@\", BinaryEncoding.Base64)\n\
             \tcolumn After\n",
        );

        let details = root.partitions()[0].source_details();
        assert_eq!(details.len(), 1);
        assert!(matches!(&details[0], SourceDetail::Error { .. }));
        assert_eq!(root.columns()[0].name(), "After");
    }

    #[test]
    fn source_on_non_partition_is_plain() {
        let root = parse_str("table T\n\tcolumn C\n\t\tsource = Source{[Schema=\"dbo\",Item=\"X\"]}\n");
        let column = &root.columns()[0];
        assert!(column.source_details().is_empty());
        assert_eq!(column.property("source"), Some("Source{[Schema=\"dbo\",Item=\"X\"]}"));
    }

    #[test]
    fn relationships_do_not_mix_properties() {
        let root = parse_str(
            "relationship 3e854db7-a13c-4e2c-849d-ccc951acba01\n\
             \tjoinOnDateBehavior: datePartOnly\n\
             \tfromColumn: DimCountry.loaddate\n\
             \ttoColumn: LocalDateTable_5a13719e-1f5e-4327-aa48-e42d38b532fb.Date\n\
             \n\
             relationship 6a714e8c-01ad-40bf-b082-bc734e0434db\n\
             \tfromColumn: DimRegion.loaddate\n\
             \ttoColumn: LocalDateTable_9acbb5a2-1056-4af2-897a-95f9dcbd723b.Date\n",
        );

        assert_eq!(root.type_name(), None);
        let relationships = root.relationships();
        assert_eq!(relationships.len(), 2);

        let first = &relationships[0];
        assert_eq!(first.name(), "3e854db7-a13c-4e2c-849d-ccc951acba01");
        assert_eq!(first.type_name(), Some("relationship"));
        assert_eq!(first.property("joinOnDateBehavior"), Some("datePartOnly"));
        assert_eq!(first.property("fromColumn"), Some("DimCountry.loaddate"));

        let second = &relationships[1];
        assert_eq!(second.name(), "6a714e8c-01ad-40bf-b082-bc734e0434db");
        assert_eq!(second.property("fromColumn"), Some("DimRegion.loaddate"));
        assert_eq!(second.property("joinOnDateBehavior"), None);
    }

    #[test]
    fn database_and_model_declarations() {
        let database = parse_str("database TestDB\n\tcompatibilityLevel: 1567\n");
        assert_eq!(database.name(), "TestDB");
        assert_eq!(database.type_name(), Some("database"));
        assert_eq!(database.property("compatibilityLevel"), Some("1567"));

        let model = parse_str("model Model\n\tculture: en-US\n\tref table Sales\n");
        assert_eq!(model.name(), "Model");
        assert_eq!(model.type_name(), Some("model"));
        assert_eq!(model.property("culture"), Some("en-US"));
        assert_eq!(model.properties.len(), 1);
    }

    #[test]
    fn named_expressions() {
        let root = parse_str(
            "expression Server = \"localhost\" meta [IsParameterQuery=true, Type=\"Text\"]\n\
             \tlineageTag: abc\n\
             \n\
             expression 'Sales Query' =\n\
             \t\tlet\n\
             \t\t\tSource = 1\n\
             \t\tin\n\
             \t\t\tSource\n\
             \tlineageTag: def\n",
        );

        let expressions = root.expressions();
        assert_eq!(expressions.len(), 2);
        assert_eq!(expressions[0].name(), "Server");
        assert_eq!(
            expressions[0].expression(),
            Some("\"localhost\" meta [IsParameterQuery=true, Type=\"Text\"]")
        );
        assert_eq!(expressions[0].property("lineageTag"), Some("abc"));
        assert_eq!(expressions[1].name(), "Sales Query");
        assert_eq!(expressions[1].expression(), Some("let\n\tSource = 1\nin\n\tSource"));
        assert_eq!(expressions[1].property("lineageTag"), Some("def"));
    }

    #[test]
    fn nested_expression_line_is_a_property() {
        let root = parse_str("table T\n\tcolumn C\n\t\texpression = [A] + [B]\n");
        let column = &root.columns()[0];
        assert_eq!(column.property("expression"), Some("[A] + [B]"));
        assert!(root.expressions().is_empty());
    }

    #[test]
    fn classify_dispatch_order() {
        let token = |indent, content| Token {
            line: 0,
            indent,
            content,
        };

        assert_eq!(classify(&token(1, "column Id")), Line::Column("Id"));
        assert_eq!(classify(&token(1, "model Model")), Line::Property);
        assert_eq!(classify(&token(0, "expression = 1")), Line::Property);
        assert_eq!(classify(&token(2, "lineageTag: x")), Line::Property);
        assert_eq!(
            classify(&token(0, "relationship r")),
            Line::Relationship("r")
        );
    }

    #[test]
    fn unquote_only_strips_pairs() {
        assert_eq!(unquote("'Name'"), "Name");
        assert_eq!(unquote("'Name"), "'Name");
        assert_eq!(unquote("Name"), "Name");
    }
}
