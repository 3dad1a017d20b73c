//! Results panel presentation model.
//!
//! [`ResultsView`] is derived from a [`QueryExecutionState`] and carries every
//! string the results panel draws, so views stay free of formatting logic.

use std::time::Duration;

use super::query::{ColumnDescriptor, QueryExecutionState, Row};

/// Placeholder shown before any query ran or when a query returned no rows.
pub const EMPTY_RESULTS_TEXT: &str = "No results to display. Run a query to see data.";
/// Label shown while a query runs.
pub const LOADING_TEXT: &str = "Executing query...";
/// Heading of the error card.
pub const ERROR_TITLE: &str = "Query Error";
/// Heading of the schema-change acknowledgement card.
pub const ACKNOWLEDGED_TITLE: &str = "Query executed successfully.";
/// Plan tab text when the engine reported no plan.
pub const NO_QUERY_PLAN_TEXT: &str = "Query plan information not available.";

/// Tabs of the results panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsTab {
    /// Tabular rows.
    #[default]
    Result,
    /// Textual execution plan.
    QueryPlan,
}

impl ResultsTab {
    /// All tabs in display order.
    pub const ALL: [ResultsTab; 2] = [ResultsTab::Result, ResultsTab::QueryPlan];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Result => "Result",
            Self::QueryPlan => "Query Plan",
        }
    }
}

/// A stringified result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Header labels in column order.
    pub headers: Vec<String>,
    /// Cell text, row-major, aligned with `headers`.
    pub rows: Vec<Vec<String>>,
    /// Left footer, e.g. "3 records found".
    pub record_count: String,
    /// Right footer, e.g. "Execution time: 1234.57 ms".
    pub execution_time: String,
    /// Plan tab body.
    pub query_plan: String,
}

/// What the results panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// Nothing to show yet, or a read returned no rows.
    Empty,
    /// A query is running.
    Loading,
    /// The latest query failed.
    Error {
        /// Diagnostic shown verbatim.
        message: String,
    },
    /// A statement succeeded without returning columns.
    Acknowledged {
        /// e.g. "Execution time: 3.10 ms. 0 row(s) affected."
        summary: String,
    },
    /// Rows to render.
    Table(TableView),
}

impl ResultsView {
    /// Derive the view for the given execution state.
    pub fn from_state(state: &QueryExecutionState) -> Self {
        match state {
            QueryExecutionState::Idle => Self::Empty,
            QueryExecutionState::Running { .. } => Self::Loading,
            QueryExecutionState::Failed { message, .. } => Self::Error { message: message.clone() },
            QueryExecutionState::Succeeded { columns, rows, elapsed, row_count, query_plan, .. } => {
                if columns.is_empty() && rows.is_empty() {
                    Self::Acknowledged {
                        summary: format!(
                            "Execution time: {} ms. {} row(s) affected.",
                            format_millis(*elapsed),
                            row_count
                        ),
                    }
                } else if rows.is_empty() {
                    Self::Empty
                } else {
                    Self::Table(build_table(columns, rows, *elapsed, query_plan.as_deref()))
                }
            }
        }
    }

    /// Primary text line for non-table states.
    pub fn headline(&self) -> Option<&str> {
        match self {
            Self::Empty => Some(EMPTY_RESULTS_TEXT),
            Self::Loading => Some(LOADING_TEXT),
            Self::Error { .. } => Some(ERROR_TITLE),
            Self::Acknowledged { .. } => Some(ACKNOWLEDGED_TITLE),
            Self::Table(_) => None,
        }
    }
}

fn build_table(
    columns: &[ColumnDescriptor],
    rows: &[Row],
    elapsed: Duration,
    query_plan: Option<&str>,
) -> TableView {
    let headers = columns.iter().map(|c| c.display_name.clone()).collect();
    let cells = rows
        .iter()
        .map(|row| columns.iter().map(|c| row.display(&c.key)).collect())
        .collect();
    let noun = if rows.len() == 1 { "record" } else { "records" };

    TableView {
        headers,
        rows: cells,
        record_count: format!("{} {noun} found", rows.len()),
        execution_time: format!("Execution time: {} ms", format_millis(elapsed)),
        query_plan: query_plan.unwrap_or(NO_QUERY_PLAN_TEXT).to_string(),
    }
}

/// Milliseconds with two decimals.
pub fn format_millis(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::{Diagnostic, QueryOutput, StatementKind};

    fn succeeded(output: QueryOutput, millis: u64) -> QueryExecutionState {
        QueryExecutionState::resolved(Ok(output), Duration::from_millis(millis))
    }

    #[test]
    fn test_idle_and_running() {
        assert_eq!(ResultsView::from_state(&QueryExecutionState::Idle), ResultsView::Empty);
        let running = QueryExecutionState::Running { started_at: tokio::time::Instant::now() };
        let view = ResultsView::from_state(&running);
        assert_eq!(view, ResultsView::Loading);
        assert_eq!(view.headline(), Some("Executing query..."));
    }

    #[test]
    fn test_failed_shows_message_verbatim() {
        let state = QueryExecutionState::resolved(
            Err(Diagnostic::unrecognized("nothing here")),
            Duration::from_millis(1),
        );
        let view = ResultsView::from_state(&state);
        assert_eq!(view, ResultsView::Error { message: "nothing here".into() });
        assert_eq!(view.headline(), Some("Query Error"));
    }

    #[test]
    fn test_schema_change_is_acknowledged() {
        let view = ResultsView::from_state(&succeeded(QueryOutput::schema_change(), 1500));
        assert_eq!(
            view,
            ResultsView::Acknowledged {
                summary: "Execution time: 1500.00 ms. 0 row(s) affected.".into()
            }
        );
    }

    #[test]
    fn test_columns_without_rows_is_empty() {
        let output = QueryOutput {
            columns: vec![ColumnDescriptor::new("id")],
            rows: vec![],
            statement: StatementKind::Read,
            query_plan: None,
        };
        assert_eq!(ResultsView::from_state(&succeeded(output, 3)), ResultsView::Empty);
    }

    #[test]
    fn test_table_footer_and_cells() {
        let output = QueryOutput::rows(
            vec![
                ColumnDescriptor::new("ProductID"),
                ColumnDescriptor::with_display_name("ProductName", "Name"),
            ],
            vec![
                Row::new().with("ProductID", 1_i64).with("ProductName", "Chai"),
                Row::new().with("ProductID", 2_i64),
            ],
        );
        let ResultsView::Table(table) = ResultsView::from_state(&succeeded(output, 1234)) else {
            panic!("expected a table");
        };
        assert_eq!(table.headers, vec!["ProductID", "Name"]);
        assert_eq!(table.rows[0], vec!["1", "Chai"]);
        assert_eq!(table.rows[1], vec!["2", ""]);
        assert_eq!(table.record_count, "2 records found");
        assert_eq!(table.execution_time, "Execution time: 1234.00 ms");
        assert_eq!(table.query_plan, NO_QUERY_PLAN_TEXT);
    }

    #[test]
    fn test_single_record_footer() {
        let mut output = QueryOutput::rows(
            vec![ColumnDescriptor::new("id")],
            vec![Row::new().with("id", 7_i64)],
        );
        output.query_plan = Some("Seq Scan on t".into());
        let ResultsView::Table(table) = ResultsView::from_state(&succeeded(output, 2)) else {
            panic!("expected a table");
        };
        assert_eq!(table.record_count, "1 record found");
        assert_eq!(table.query_plan, "Seq Scan on t");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(Duration::from_micros(1_234_567)), "1234.57");
        assert_eq!(format_millis(Duration::ZERO), "0.00");
    }
}
