//! Core of the DataQuill workbench.
//!
//! Headless state and logic behind the three-panel workspace:
//!
//! - **models**: schema nodes and snapshots, query results, notifications
//! - **schema_tree**: expansion state and the visible-row walk
//! - **layout**: resizable panes and the divider drag gesture
//! - **execution**: query execution controller
//! - **refresh**: schema refresh controller
//! - **services**: engine, schema source and notification seams
//! - **state**: the `Workbench` coordinator
//! - **config**, **error**, **logging**: ambient plumbing

pub mod config;
pub mod error;
pub mod execution;
pub mod layout;
pub mod logging;
pub mod models;
pub mod refresh;
pub mod revision;
pub mod schema_tree;
pub mod services;
pub mod state;

pub use config::WorkspaceConfig;
pub use error::QuillError;
pub use execution::{QueryExecutionController, RunOutcome};
pub use layout::{
    Bounds, CursorStyle, Divider, DragChrome, DragSession, LayoutGeometry, Point, ResizableLayout,
};
pub use models::{
    CellValue, ColumnDescriptor, Diagnostic, DiagnosticKind, Notification, QueryExecutionState,
    QueryOutput, ResultsTab, ResultsView, Row, SchemaKind, SchemaNode, SchemaSnapshot, Severity,
    TableView,
};
pub use refresh::{SchemaRefreshController, SchemaRefreshState};
pub use revision::Revision;
pub use schema_tree::{SchemaIcon, SchemaTree, VisibleRow};
pub use services::{
    ChannelSink, DelayWindow, Engine, JsonFileSchemaSource, NotificationSink, SchemaSource,
    SimulatedEngine, StaticSchemaSource, TracingSink,
};
pub use state::{Collaborators, Workbench};
