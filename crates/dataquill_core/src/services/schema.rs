//! Schema sources for the schema browser.
//!
//! A [`SchemaSource`] produces the root list of a new snapshot. The built-in
//! [`StaticSchemaSource`] serves a small sample catalog; [`JsonFileSchemaSource`]
//! reads the same shape from disk so a catalog can be swapped in without a
//! rebuild.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::QuillError;
use crate::models::{IndexType, SchemaNode};

/// Produces the roots of a schema snapshot.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn load(&self) -> Result<Vec<SchemaNode>, QuillError>;
}

/// Serves a fixed catalog.
#[derive(Debug, Clone)]
pub struct StaticSchemaSource {
    roots: Vec<SchemaNode>,
}

impl StaticSchemaSource {
    pub fn new(roots: Vec<SchemaNode>) -> Self {
        Self { roots }
    }

    /// The built-in sample catalog.
    pub fn sample() -> Self {
        Self::new(sample_catalog())
    }
}

impl Default for StaticSchemaSource {
    fn default() -> Self {
        Self::sample()
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    async fn load(&self) -> Result<Vec<SchemaNode>, QuillError> {
        Ok(self.roots.clone())
    }
}

/// Reads a JSON array of schema nodes from a file on every load.
#[derive(Debug, Clone)]
pub struct JsonFileSchemaSource {
    path: PathBuf,
}

impl JsonFileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SchemaSource for JsonFileSchemaSource {
    async fn load(&self) -> Result<Vec<SchemaNode>, QuillError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            QuillError::io_with_source(format!("Failed to read {}", self.path.display()), e)
        })?;
        parse_schema_json(&self.path, &content)
    }
}

/// Read a schema file synchronously, for the initial snapshot at startup.
pub fn read_schema_file(path: &Path) -> Result<Vec<SchemaNode>, QuillError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| QuillError::io_with_source(format!("Failed to read {}", path.display()), e))?;
    parse_schema_json(path, &content)
}

fn parse_schema_json(path: &Path, content: &str) -> Result<Vec<SchemaNode>, QuillError> {
    let roots: Vec<SchemaNode> = serde_json::from_str(content).map_err(|e| {
        QuillError::schema_with_hint(
            format!("Invalid schema file {}: {e}", path.display()),
            "Expected a JSON array of nodes with id, name and type",
        )
    })?;
    tracing::debug!(path = %path.display(), roots = roots.len(), "Schema file loaded");
    Ok(roots)
}

/// Sample catalog: SalesDB (Customers, Orders) and InventoryDB (Products).
pub fn sample_catalog() -> Vec<SchemaNode> {
    vec![
        SchemaNode::database(
            "db_sales",
            "SalesDB",
            vec![
                SchemaNode::table(
                    "tbl_customers",
                    "Customers",
                    vec![
                        SchemaNode::folder(
                            "fld_cols_customers",
                            "Columns",
                            vec![
                                SchemaNode::column("col_cust_id", "CustomerID", "INT").primary_key(),
                                SchemaNode::column("col_cust_name", "CustomerName", "VARCHAR(255)"),
                                SchemaNode::column("col_contact_name", "ContactName", "VARCHAR(255)"),
                                SchemaNode::column("col_country", "Country", "VARCHAR(100)"),
                            ],
                        ),
                        SchemaNode::folder(
                            "fld_idx_customers",
                            "Indexes",
                            vec![
                                SchemaNode::index("idx_pk_customers", "PK_Customers", IndexType::Primary),
                                SchemaNode::index(
                                    "idx_country_customers",
                                    "IX_Country_Customers",
                                    IndexType::Index,
                                ),
                            ],
                        ),
                    ],
                ),
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
                                SchemaNode::column("col_order_date", "OrderDate", "DATE"),
                            ],
                        ),
                        SchemaNode::folder(
                            "fld_idx_orders",
                            "Indexes",
                            vec![
                                SchemaNode::index("idx_pk_orders", "PK_Orders", IndexType::Primary),
                                SchemaNode::index(
                                    "idx_fk_customer_orders",
                                    "IX_CustomerID_Orders",
                                    IndexType::Index,
                                ),
                            ],
                        ),
                    ],
                ),
            ],
        ),
        SchemaNode::database(
            "db_inventory",
            "InventoryDB",
            vec![SchemaNode::table(
                "tbl_products",
                "Products",
                vec![
                    SchemaNode::folder(
                        "fld_cols_products",
                        "Columns",
                        vec![
                            SchemaNode::column("col_prod_id", "ProductID", "INT").primary_key(),
                            SchemaNode::column("col_prod_name", "ProductName", "VARCHAR(255)"),
                        ],
                    ),
                    SchemaNode::folder(
                        "fld_idx_products",
                        "Indexes",
                        vec![SchemaNode::index("idx_pk_products", "PK_Products", IndexType::Primary)],
                    ),
                ],
            )],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SchemaKind, SchemaSnapshot};
    use tempfile::TempDir;

    #[test]
    fn test_sample_catalog_is_valid() {
        let snapshot = SchemaSnapshot::new(sample_catalog()).unwrap();
        assert_eq!(snapshot.roots().len(), 2);
        assert_eq!(snapshot.node_count(), 25);
        let fk = snapshot.find("col_order_cust_id").unwrap();
        assert!(fk.is_foreign_key && !fk.is_primary_key);
    }

    #[tokio::test]
    async fn test_static_source_returns_fresh_copy() {
        let source = StaticSchemaSource::sample();
        let first = source.load().await.unwrap();
        let second = source.load().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[1].name, "InventoryDB");
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        let json = r#"[
            {"id": "db_hr", "name": "HR", "type": "database", "children": [
                {"id": "tbl_staff", "name": "Staff", "type": "table", "children": [
                    {"id": "col_staff_id", "name": "StaffID", "type": "column", "dataType": "INT", "isPK": true}
                ]}
            ]}
        ]"#;
        std::fs::write(&path, json).unwrap();

        let roots = JsonFileSchemaSource::new(&path).load().await.unwrap();
        assert_eq!(roots, read_schema_file(&path).unwrap());
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].kind, SchemaKind::Database);
        let column = &roots[0].children[0].children[0];
        assert!(column.is_primary_key);
        assert_eq!(column.data_type.as_deref(), Some("INT"));
    }

    #[tokio::test]
    async fn test_json_file_source_accepts_null_markers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        let json = r#"[
            {"id": "db_hr", "name": "HR", "type": "database", "children": [
                {"id": "col_note", "name": "Note", "type": "column", "isPK": null, "isFK": null, "children": null}
            ]}
        ]"#;
        std::fs::write(&path, json).unwrap();

        let roots = JsonFileSchemaSource::new(&path).load().await.unwrap();
        let column = &roots[0].children[0];
        assert!(!column.is_primary_key);
        assert!(!column.is_foreign_key);
        assert!(column.children.is_empty());
    }

    #[tokio::test]
    async fn test_json_file_source_errors() {
        let dir = TempDir::new().unwrap();
        let missing = JsonFileSchemaSource::new(dir.path().join("nope.json"));
        assert_eq!(missing.load().await.unwrap_err().category(), "I/O");

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"id": "not an array"}"#).unwrap();
        let err = JsonFileSchemaSource::new(&path).load().await.unwrap_err();
        assert_eq!(err.category(), "Schema");
        assert!(err.hint().is_some());
    }
}
