//! The three panels of the workspace:
//! - Schema browser (left)
//! - SQL editor (top right)
//! - Results (bottom right)

pub mod query_editor;
pub mod results;
pub mod schema_browser;

pub use query_editor::QueryEditor;
pub use results::ResultsPanel;
pub use schema_browser::{SchemaBrowserPanel, TreeRow};
