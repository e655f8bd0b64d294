//! Parsed TMDL node tree
//!
//! A [`Node`] has a name, a [`NodeKind`] carrying the kind-specific fields,
//! an ordered bag of literal properties and lazily created child collections.
//! Serialization produces the JSON shape consumed by the project assembler
//! and the ERD renderer.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::source::{Annotation, SourceDetail};

/// Named child list of a node
///
/// Each collection is created on first insert, so its position in the output
/// follows the first child of that collection in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `column` children of a table
    Columns,

    /// `partition` children of a table
    Partitions,

    /// `measure` children of a table
    Measures,

    /// `relationship` entries of a relationships file
    Relationships,

    /// Named `expression` entries of an expressions file
    Expressions,
}

impl Collection {
    /// JSON key of the collection
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Columns => "columns",
            Self::Partitions => "partitions",
            Self::Measures => "measures",
            Self::Relationships => "relationships",
            Self::Expressions => "expressions",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a node together with its kind-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Root of a file before any declaration line was seen
    #[default]
    Document,

    /// `table <name>` root declaration
    Table,

    /// `database <name>` root declaration
    Database,

    /// `model <name>` root declaration
    Model,

    /// `column <name>`
    Column,

    /// `partition <name> = <partitionType>`
    Partition {
        /// Text after `=` in the declaration, e.g. `m` or `calculated`
        partition_type: Option<String>,

        /// Facts extracted from the `source` property
        source_details: Vec<SourceDetail>,
    },

    /// `measure <name> = <expression>`
    Measure {
        /// Normalized DAX expression, empty when none could be read
        expression: String,
    },

    /// Top-level `expression <name> = <expression>` (shared queries and parameters)
    Expression {
        /// Normalized M expression, empty when none could be read
        expression: String,
    },

    /// `relationship <name>`
    Relationship,
}

impl NodeKind {
    /// Create a partition kind with no extracted details yet
    pub fn partition(partition_type: Option<String>) -> Self {
        Self::Partition {
            partition_type,
            source_details: Vec::new(),
        }
    }

    /// Create a measure kind with an empty expression
    pub fn measure() -> Self {
        Self::Measure {
            expression: String::new(),
        }
    }

    /// Create a named expression kind with an empty expression
    pub fn expression() -> Self {
        Self::Expression {
            expression: String::new(),
        }
    }

    /// Value of the JSON `type` key, `None` for an undeclared root
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::Document => None,
            Self::Table => Some("table"),
            Self::Database => Some("database"),
            Self::Model => Some("model"),
            Self::Column => Some("column"),
            Self::Partition { .. } => Some("partition"),
            Self::Measure { .. } => Some("measure"),
            Self::Expression { .. } => Some("expression"),
            Self::Relationship => Some("relationship"),
        }
    }

    /// Whether this kind is declared by a file's top-level line
    pub fn is_root_declaration(&self) -> bool {
        matches!(self, Self::Table | Self::Database | Self::Model)
    }
}

/// A JSON entry of a node after its header keys
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Property(String),
    Collection(Collection),
    Annotations,
    SourceDetails,
}

/// A structural unit of a parsed TMDL file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    /// Declared name (absent on an undeclared root)
    pub name: Option<String>,

    /// Kind and kind-specific fields
    pub kind: NodeKind,

    /// Literal properties in source order
    pub properties: IndexMap<String, String>,

    /// Child collections in order of creation
    pub children: IndexMap<Collection, Vec<Node>>,

    /// Annotation entries in source order
    pub annotations: Vec<Annotation>,

    /// First-insertion order of properties, collections, annotations and
    /// source details, so serialization can interleave them as in the source
    order: Vec<Entry>,
}

impl Node {
    /// Create an undeclared root node
    pub fn document() -> Self {
        Self::default()
    }

    /// Create a named node of the given kind
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: Some(name.into()),
            kind,
            ..Self::default()
        }
    }

    /// Name of the node, or an empty string when undeclared
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// JSON `type` value of the node
    pub fn type_name(&self) -> Option<&'static str> {
        self.kind.type_name()
    }

    /// Look up a literal property
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Store a property value, overwriting any earlier value for the key
    ///
    /// `name`, `expression` (measures and named expressions) and
    /// `partitionType` (partitions) update the structured fields instead.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match key.as_str() {
            "name" => {
                self.name = Some(value);
                return;
            }
            "expression" => {
                if let NodeKind::Measure { expression } | NodeKind::Expression { expression } =
                    &mut self.kind
                {
                    *expression = value;
                    return;
                }
            }
            "partitionType" => {
                if let NodeKind::Partition { partition_type, .. } = &mut self.kind {
                    *partition_type = Some(value);
                    return;
                }
            }
            _ => {}
        }

        if !self.properties.contains_key(&key) {
            self.order.push(Entry::Property(key.clone()));
        }
        self.properties.insert(key, value);
    }

    /// Children in a collection (empty if the collection was never created)
    pub fn children(&self, collection: Collection) -> &[Node] {
        self.children
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Append a child, creating the collection on first use
    pub fn push_child(&mut self, collection: Collection, child: Node) {
        self.open_collection(collection);
        self.children.entry(collection).or_default().push(child);
    }

    /// Create a collection if missing, fixing its position among the entries
    ///
    /// Lets a builder reserve the slot when a child is first seen and attach
    /// the finished children later.
    pub fn open_collection(&mut self, collection: Collection) {
        if !self.children.contains_key(&collection) {
            self.order.push(Entry::Collection(collection));
            self.children.insert(collection, Vec::new());
        }
    }

    /// Append an annotation
    pub fn annotate(&mut self, annotation: Annotation) {
        if self.annotations.is_empty() {
            self.order.push(Entry::Annotations);
        }
        self.annotations.push(annotation);
    }

    /// Update the extracted source details of a partition; no-op on other kinds
    pub fn update_source_details(&mut self, update: impl FnOnce(&mut Vec<SourceDetail>)) {
        let NodeKind::Partition { source_details, .. } = &mut self.kind else {
            return;
        };

        update(source_details);
        if !source_details.is_empty() && !self.order.contains(&Entry::SourceDetails) {
            self.order.push(Entry::SourceDetails);
        }
    }

    /// `column` children
    pub fn columns(&self) -> &[Node] {
        self.children(Collection::Columns)
    }

    /// `partition` children
    pub fn partitions(&self) -> &[Node] {
        self.children(Collection::Partitions)
    }

    /// `measure` children
    pub fn measures(&self) -> &[Node] {
        self.children(Collection::Measures)
    }

    /// `relationship` children
    pub fn relationships(&self) -> &[Node] {
        self.children(Collection::Relationships)
    }

    /// Named `expression` children
    pub fn expressions(&self) -> &[Node] {
        self.children(Collection::Expressions)
    }

    /// Expression text of a measure or named expression
    pub fn expression(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Measure { expression } | NodeKind::Expression { expression } => {
                Some(expression)
            }
            _ => None,
        }
    }

    /// Partition type of a partition
    pub fn partition_type(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Partition { partition_type, .. } => partition_type.as_deref(),
            _ => None,
        }
    }

    /// Extracted source details (empty for anything but a partition)
    pub fn source_details(&self) -> &[SourceDetail] {
        match &self.kind {
            NodeKind::Partition { source_details, .. } => source_details,
            _ => &[],
        }
    }

    /// Whether a property key collides with a key emitted from structured fields
    ///
    /// Such properties stay in the bag but the structured value wins in JSON.
    fn is_shadowed(&self, key: &str) -> bool {
        match key {
            "name" => self.name.is_some(),
            "type" => self.kind.type_name().is_some(),
            "partitionType" => self.partition_type().is_some(),
            "expression" => self.expression().is_some(),
            "annotations" => !self.annotations.is_empty(),
            "sourceDetails" => !self.source_details().is_empty(),
            _ => self.children.keys().any(|collection| collection.as_str() == key),
        }
    }

    /// Entries to serialize after the header keys
    ///
    /// Recorded insertion order first, then anything added through the
    /// public fields directly.
    fn entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .order
            .iter()
            .filter(|entry| match entry {
                Entry::Property(key) => self.properties.contains_key(key),
                Entry::Collection(collection) => self.children.contains_key(collection),
                Entry::Annotations => !self.annotations.is_empty(),
                Entry::SourceDetails => !self.source_details().is_empty(),
            })
            .cloned()
            .collect();

        let missing: Vec<Entry> = self
            .properties
            .keys()
            .map(|key| Entry::Property(key.clone()))
            .chain(self.children.keys().map(|c| Entry::Collection(*c)))
            .chain((!self.annotations.is_empty()).then_some(Entry::Annotations))
            .chain((!self.source_details().is_empty()).then_some(Entry::SourceDetails))
            .filter(|entry| !entries.contains(entry))
            .collect();

        entries.extend(missing);
        entries
    }

    /// Convert to a JSON value
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        if let Some(type_name) = self.kind.type_name() {
            map.serialize_entry("type", type_name)?;
        }

        match &self.kind {
            NodeKind::Partition {
                partition_type: Some(partition_type),
                ..
            } => map.serialize_entry("partitionType", partition_type)?,
            NodeKind::Measure { expression } | NodeKind::Expression { expression } => {
                map.serialize_entry("expression", expression)?
            }
            _ => {}
        }

        for entry in self.entries() {
            match entry {
                Entry::Property(key) => {
                    if let Some(value) = self.properties.get(&key) {
                        if !self.is_shadowed(&key) {
                            map.serialize_entry(&key, value)?;
                        }
                    }
                }
                Entry::Collection(collection) => {
                    map.serialize_entry(collection.as_str(), self.children(collection))?;
                }
                Entry::Annotations => map.serialize_entry("annotations", &self.annotations)?,
                Entry::SourceDetails => {
                    map.serialize_entry("sourceDetails", self.source_details())?
                }
            }
        }

        map.end()
    }
}
