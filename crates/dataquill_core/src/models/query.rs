//! Query execution models.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Describes one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Key used to look the value up in each [`Row`].
    pub key: String,
    /// Header label.
    pub display_name: String,
}

impl ColumnDescriptor {
    /// Create a column whose header equals its key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self { display_name: key.clone(), key }
    }

    /// Create a column with a distinct header label.
    pub fn with_display_name(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { key: key.into(), display_name: display_name.into() }
    }
}

/// A typed scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Boolean value.
    Boolean(bool),
    /// Calendar date.
    Date(NaiveDate),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One result row: column key to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Look up a cell by column key.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    /// Stringify the cell for a column; missing cells render as empty.
    pub fn display(&self, key: &str) -> String {
        self.get(key).map(ToString::to_string).unwrap_or_default()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// What kind of statement produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    /// Row-returning read.
    #[default]
    Read,
    /// Schema mutation (CREATE/ALTER/DROP).
    SchemaChange,
}

/// Tabular output from an [`crate::services::Engine`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    /// Ordered column descriptors.
    pub columns: Vec<ColumnDescriptor>,
    /// Ordered rows.
    pub rows: Vec<Row>,
    /// Statement classification.
    pub statement: StatementKind,
    /// Optional textual execution plan.
    pub query_plan: Option<String>,
}

impl QueryOutput {
    /// A row-returning result.
    pub fn rows(columns: Vec<ColumnDescriptor>, rows: Vec<Row>) -> Self {
        Self { columns, rows, statement: StatementKind::Read, query_plan: None }
    }

    /// An empty acknowledgement for a schema mutation.
    pub fn schema_change() -> Self {
        Self { statement: StatementKind::SchemaChange, ..Self::default() }
    }
}

/// Why a query produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The engine rejected the query text.
    Syntax,
    /// The engine did not recognize the query or had nothing to return.
    Unrecognized,
}

/// A user-facing diagnostic from the engine, shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Classification (both kinds render identically).
    pub kind: DiagnosticKind,
    /// Message shown in the results panel.
    pub message: String,
}

impl Diagnostic {
    /// Create a syntax diagnostic.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::Syntax, message: message.into() }
    }

    /// Create an unrecognized-query diagnostic.
    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self { kind: DiagnosticKind::Unrecognized, message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Current state of the query execution controller.
///
/// Exactly one variant is current at any time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryExecutionState {
    /// No query has been run.
    #[default]
    Idle,
    /// A run was accepted and has not resolved yet.
    Running {
        /// When the run was accepted.
        started_at: Instant,
    },
    /// The latest run produced a result.
    Succeeded {
        /// Ordered column descriptors.
        columns: Vec<ColumnDescriptor>,
        /// Ordered rows.
        rows: Vec<Row>,
        /// Time from acceptance to resolution.
        elapsed: Duration,
        /// Always `rows.len()`.
        row_count: usize,
        /// Statement classification.
        statement: StatementKind,
        /// Optional textual execution plan.
        query_plan: Option<String>,
    },
    /// The latest run produced a diagnostic.
    Failed {
        /// Diagnostic message, shown verbatim.
        message: String,
        /// Time from acceptance to resolution.
        elapsed: Duration,
    },
}

impl QueryExecutionState {
    /// Build the terminal state for an engine resolution.
    pub fn resolved(result: Result<QueryOutput, Diagnostic>, elapsed: Duration) -> Self {
        match result {
            Ok(output) => Self::Succeeded {
                row_count: output.rows.len(),
                columns: output.columns,
                rows: output.rows,
                elapsed,
                statement: output.statement,
                query_plan: output.query_plan,
            },
            Err(diagnostic) => Self::Failed { message: diagnostic.message, elapsed },
        }
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Whether this is `Succeeded` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    /// Elapsed time of a terminal state.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Succeeded { elapsed, .. } | Self::Failed { elapsed, .. } => Some(*elapsed),
            _ => None,
        }
    }

    /// Row count of a successful run.
    pub fn row_count(&self) -> Option<usize> {
        match self {
            Self::Succeeded { row_count, .. } => Some(*row_count),
            _ => None,
        }
    }
}
