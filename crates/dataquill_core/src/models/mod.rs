//! Data models for the DataQuill workbench.
//!
//! - `schema` - SchemaNode, SchemaKind, IndexType, SchemaSnapshot
//! - `query` - CellValue, Row, QueryOutput, Diagnostic, QueryExecutionState
//! - `notification` - Notification, Severity
//! - `results` - ResultsView presentation model

pub mod notification;
pub mod query;
pub mod results;
pub mod schema;

pub use notification::{Notification, Severity};
pub use query::{
    CellValue, ColumnDescriptor, Diagnostic, DiagnosticKind, QueryExecutionState, QueryOutput, Row,
    StatementKind,
};
pub use results::{ResultsTab, ResultsView, TableView};
pub use schema::{IndexType, SchemaKind, SchemaNode, SchemaSnapshot};
