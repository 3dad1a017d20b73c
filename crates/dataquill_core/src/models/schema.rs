//! Schema catalog models.
//!
//! A schema is an ordered forest of [`SchemaNode`]s (databases at the root,
//! then tables, folders, columns and indexes). Snapshots are immutable and
//! shared; a refresh swaps in a whole new snapshot rather than merging.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::QuillError;

/// The closed set of catalog object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// A database (catalog root).
    Database,
    /// A table inside a database.
    Table,
    /// A column (leaf).
    Column,
    /// A grouping folder such as "Columns" or "Indexes".
    Folder,
    /// An index (leaf).
    Index,
}

impl SchemaKind {
    /// Leaf kinds never carry children.
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Column | Self::Index)
    }

    /// Kinds that are pre-expanded when a snapshot is loaded.
    pub fn is_seed_expandable(self) -> bool {
        matches!(self, Self::Database | Self::Table | Self::Folder)
    }
}

/// Index classification.
///
/// Serialized as the bare strings `PRIMARY`, `UNIQUE`, `INDEX`, or any other
/// vendor-specific string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndexType {
    /// Primary key index.
    Primary,
    /// Unique index.
    Unique,
    /// Plain secondary index.
    Index,
    /// Anything else the source reports.
    Other(String),
}

impl From<String> for IndexType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PRIMARY" => Self::Primary,
            "UNIQUE" => Self::Unique,
            "INDEX" => Self::Index,
            _ => Self::Other(value),
        }
    }
}

impl From<IndexType> for String {
    fn from(value: IndexType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("PRIMARY"),
            Self::Unique => f.write_str("UNIQUE"),
            Self::Index => f.write_str("INDEX"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Catalog files may spell an absent marker as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry in a database's object hierarchy.
///
/// The JSON shape matches the catalog files the workbench accepts:
/// `{"id", "name", "type", "children", "dataType", "isPK", "isFK", "indexType"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Globally unique, stable identifier (render key and expansion key).
    pub id: String,
    /// Display label.
    pub name: String,
    /// Object kind.
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    /// Ordered children; order is display order.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNode>,
    /// Column data type, e.g. `VARCHAR(255)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Column is part of the primary key.
    #[serde(
        default,
        rename = "isPK",
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub is_primary_key: bool,
    /// Column references another table.
    #[serde(
        default,
        rename = "isFK",
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub is_foreign_key: bool,
    /// Index classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_type: Option<IndexType>,
}

impl SchemaNode {
    fn bare(id: impl Into<String>, name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            children: Vec::new(),
            data_type: None,
            is_primary_key: false,
            is_foreign_key: false,
            index_type: None,
        }
    }

    /// Create a database node.
    pub fn database(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<SchemaNode>,
    ) -> Self {
        Self { children, ..Self::bare(id, name, SchemaKind::Database) }
    }

    /// Create a table node.
    pub fn table(id: impl Into<String>, name: impl Into<String>, children: Vec<SchemaNode>) -> Self {
        Self { children, ..Self::bare(id, name, SchemaKind::Table) }
    }

    /// Create a folder node.
    pub fn folder(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<SchemaNode>,
    ) -> Self {
        Self { children, ..Self::bare(id, name, SchemaKind::Folder) }
    }

    /// Create a column node with its data type.
    pub fn column(id: impl Into<String>, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self { data_type: Some(data_type.into()), ..Self::bare(id, name, SchemaKind::Column) }
    }

    /// Create an index node.
    pub fn index(id: impl Into<String>, name: impl Into<String>, index_type: IndexType) -> Self {
        Self { index_type: Some(index_type), ..Self::bare(id, name, SchemaKind::Index) }
    }

    /// Mark a column as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark a column as a foreign key.
    pub fn foreign_key(mut self) -> Self {
        self.is_foreign_key = true;
        self
    }

    /// Whether a disclosure control should be shown for this node.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Secondary label shown after the name: `(dataType)` for columns,
    /// `(indexType)` for indexes.
    pub fn detail(&self) -> Option<String> {
        match self.kind {
            SchemaKind::Column => self.data_type.as_ref().map(|t| format!("({t})")),
            SchemaKind::Index => self.index_type.as_ref().map(|t| format!("({t})")),
            _ => None,
        }
    }

    /// Depth-first search for a node by id within this subtree.
    pub fn find(&self, id: &str) -> Option<&SchemaNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// An immutable, shared schema catalog.
///
/// Cloning a snapshot is cheap and keeps the same identity; loading a new
/// catalog always produces a new identity even if the contents are equal.
#[derive(Debug, Clone)]
pub struct SchemaSnapshot {
    roots: Arc<Vec<SchemaNode>>,
}

impl SchemaSnapshot {
    /// Validate and wrap a list of root nodes.
    ///
    /// Rejects leaf nodes that carry children and duplicate ids.
    pub fn new(roots: Vec<SchemaNode>) -> Result<Self, QuillError> {
        let mut seen = HashSet::new();
        for root in &roots {
            validate_node(root, &mut seen)?;
        }
        Ok(Self { roots: Arc::new(roots) })
    }

    /// An empty catalog.
    pub fn empty() -> Self {
        Self { roots: Arc::new(Vec::new()) }
    }

    /// Root nodes in display order.
    pub fn roots(&self) -> &[SchemaNode] {
        &self.roots
    }

    /// Whether the catalog has no roots.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a node anywhere in the catalog.
    pub fn find(&self, id: &str) -> Option<&SchemaNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// Whether two handles refer to the same loaded snapshot.
    pub fn same_snapshot(&self, other: &SchemaSnapshot) -> bool {
        Arc::ptr_eq(&self.roots, &other.roots)
    }

    /// Total node count.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[SchemaNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }
}

impl Default for SchemaSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

fn validate_node<'a>(node: &'a SchemaNode, seen: &mut HashSet<&'a str>) -> Result<(), QuillError> {
    if !seen.insert(node.id.as_str()) {
        return Err(QuillError::schema_with_hint(
            format!("duplicate node id '{}'", node.id),
            "Node ids must be unique across the whole catalog",
        ));
    }
    if node.kind.is_leaf() && !node.children.is_empty() {
        return Err(QuillError::schema(format!(
            "{:?} node '{}' cannot have children",
            node.kind, node.id
        )));
    }
    for child in &node.children {
        validate_node(child, seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders_table() -> SchemaNode {
        SchemaNode::table(
            "tbl_orders",
            "Orders",
            vec![
                SchemaNode::folder(
                    "fld_cols_orders",
                    "Columns",
                    vec![
                        SchemaNode::column("col_order_id", "OrderID", "INT").primary_key(),
                        SchemaNode::column("col_order_cust_id", "CustomerID", "INT").foreign_key(),
                    ],
                ),
                SchemaNode::folder(
                    "fld_idx_orders",
                    "Indexes",
                    vec![SchemaNode::index("idx_pk_orders", "PK_Orders", IndexType::Primary)],
                ),
            ],
        )
    }

    #[test]
    fn test_index_type_round_trips_through_strings() {
        assert_eq!(IndexType::from("PRIMARY".to_string()), IndexType::Primary);
        assert_eq!(IndexType::from("UNIQUE".to_string()), IndexType::Unique);
        assert_eq!(IndexType::from("INDEX".to_string()), IndexType::Index);
        assert_eq!(
            IndexType::from("FULLTEXT".to_string()),
            IndexType::Other("FULLTEXT".to_string())
        );
        assert_eq!(IndexType::Other("GIN".into()).to_string(), "GIN");
    }

    #[test]
    fn test_node_deserializes_from_catalog_json() {
        let json = r#"{
            "id": "col_cust_id",
            "name": "CustomerID",
            "type": "column",
            "dataType": "INT",
            "isPK": true
        }"#;
        let node: SchemaNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, SchemaKind::Column);
        assert!(node.is_primary_key);
        assert!(!node.is_foreign_key);
        assert_eq!(node.data_type.as_deref(), Some("INT"));
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_null_markers_read_as_absent() {
        let json = r#"{
            "id": "col_notes",
            "name": "Notes",
            "type": "column",
            "children": null,
            "dataType": null,
            "isPK": null,
            "isFK": null,
            "indexType": null
        }"#;
        let node: SchemaNode = serde_json::from_str(json).unwrap();
        assert!(node.children.is_empty());
        assert!(node.data_type.is_none());
        assert!(!node.is_primary_key);
        assert!(!node.is_foreign_key);
        assert!(node.index_type.is_none());
        assert!(node.detail().is_none());
    }

    #[test]
    fn test_null_children_on_table_loads_snapshot() {
        let json = r#"[{"id":"db","name":"SalesDB","type":"database","children":[
            {"id":"tbl","name":"Empty","type":"table","children":null}
        ]}]"#;
        let roots: Vec<SchemaNode> = serde_json::from_str(json).unwrap();
        let snapshot = SchemaSnapshot::new(roots).unwrap();
        assert!(!snapshot.find("tbl").unwrap().has_children());
    }

    #[test]
    fn test_index_node_deserializes_index_type() {
        let json = r#"{"id":"idx","name":"IX_Country","type":"index","indexType":"INDEX"}"#;
        let node: SchemaNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.index_type, Some(IndexType::Index));
    }

    #[test]
    fn test_detail_labels() {
        let column = SchemaNode::column("c", "Country", "VARCHAR(100)");
        assert_eq!(column.detail().as_deref(), Some("(VARCHAR(100))"));

        let index = SchemaNode::index("i", "PK_Customers", IndexType::Primary);
        assert_eq!(index.detail().as_deref(), Some("(PRIMARY)"));

        let folder = SchemaNode::folder("f", "Columns", Vec::new());
        assert!(folder.detail().is_none());
    }

    #[test]
    fn test_snapshot_rejects_leaf_with_children() {
        let mut column = SchemaNode::column("c", "Country", "TEXT");
        column.children.push(SchemaNode::column("c2", "Nested", "TEXT"));
        let err = SchemaSnapshot::new(vec![column]).unwrap_err();
        assert_eq!(err.category(), "Schema");
    }

    #[test]
    fn test_snapshot_rejects_duplicate_ids() {
        let roots = vec![
            SchemaNode::database("db", "SalesDB", vec![orders_table()]),
            SchemaNode::database("db", "Again", Vec::new()),
        ];
        assert!(SchemaSnapshot::new(roots).is_err());
    }

    #[test]
    fn test_snapshot_find_and_count() {
        let snapshot =
            SchemaSnapshot::new(vec![SchemaNode::database("db", "SalesDB", vec![orders_table()])])
                .unwrap();
        assert_eq!(snapshot.node_count(), 7);
        assert_eq!(snapshot.find("col_order_cust_id").map(|n| n.name.as_str()), Some("CustomerID"));
        assert!(snapshot.find("missing").is_none());
    }

    #[test]
    fn test_snapshot_identity() {
        let roots = vec![SchemaNode::database("db", "SalesDB", Vec::new())];
        let a = SchemaSnapshot::new(roots.clone()).unwrap();
        let b = SchemaSnapshot::new(roots).unwrap();
        assert!(a.same_snapshot(&a.clone()));
        assert!(!a.same_snapshot(&b));
        assert_eq!(a.roots(), b.roots());
    }
}
