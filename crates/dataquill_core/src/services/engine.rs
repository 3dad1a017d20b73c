//! Query engine seam and the built-in simulated engine.
//!
//! The simulator waits a random delay, then pattern-matches the normalized
//! query text against a handful of canned responses. Matching order:
//!
//! 1. `select * from customers` / `select * from products` prefixes
//! 2. `create table`, `alter table`, `drop table` prefixes
//! 3. any text containing `error_test`
//! 4. everything else

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

use crate::config::SimulatorConfig;
use crate::models::{ColumnDescriptor, Diagnostic, QueryOutput, Row, SchemaSnapshot};

/// Diagnostic for queries containing the `error_test` sentinel.
pub const SYNTAX_ERROR_MESSAGE: &str =
    "Simulated SQL Error: Syntax error near \"error_test\". Please check your query.";

/// Diagnostic for anything the simulator does not recognize.
pub const UNRECOGNIZED_MESSAGE: &str = "No results for this query or query not recognized by dummy handler. Try \"SELECT * FROM Customers\" or \"SELECT * FROM Products\".";

const SCHEMA_CHANGE_PREFIXES: [&str; 3] = ["create table", "alter table", "drop table"];

/// Executes query text against a schema.
///
/// A diagnostic is an ordinary outcome, not an error: both arms of the result
/// are shown to the user.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn execute(&self, query: &str, schema: &SchemaSnapshot) -> Result<QueryOutput, Diagnostic>;
}

/// Uniform random latency window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    min: Duration,
    max: Duration,
}

impl DelayWindow {
    /// Create a window; bounds are swapped if given inverted.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A window that never sleeps.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// A fixed delay.
    pub fn fixed(delay: Duration) -> Self {
        Self::new(delay, delay)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Pick a delay in `[min, max]`.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

impl Default for DelayWindow {
    fn default() -> Self {
        Self::from(&SimulatorConfig::default())
    }
}

impl From<&SimulatorConfig> for DelayWindow {
    fn from(config: &SimulatorConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }
}

/// Canned-response engine.
#[derive(Debug, Clone, Default)]
pub struct SimulatedEngine {
    delay: DelayWindow,
}

impl SimulatedEngine {
    pub fn new(delay: DelayWindow) -> Self {
        Self { delay }
    }

    /// Resolve a query without waiting.
    pub fn respond(query: &str) -> Result<QueryOutput, Diagnostic> {
        let normalized = query.trim().to_lowercase();

        if normalized.starts_with("select * from customers") {
            Ok(customers())
        } else if normalized.starts_with("select * from products") {
            Ok(products())
        } else if SCHEMA_CHANGE_PREFIXES.iter().any(|p| normalized.starts_with(p)) {
            Ok(QueryOutput::schema_change())
        } else if normalized.contains("error_test") {
            Err(Diagnostic::syntax(SYNTAX_ERROR_MESSAGE))
        } else {
            Err(Diagnostic::unrecognized(UNRECOGNIZED_MESSAGE))
        }
    }
}

#[async_trait]
impl Engine for SimulatedEngine {
    async fn execute(&self, query: &str, _schema: &SchemaSnapshot) -> Result<QueryOutput, Diagnostic> {
        let delay = self.delay.sample();
        tracing::trace!(delay_ms = delay.as_millis() as u64, "Simulating query latency");
        tokio::time::sleep(delay).await;
        Self::respond(query)
    }
}

fn customers() -> QueryOutput {
    let columns = ["CustomerID", "CustomerName", "ContactName", "Country"]
        .into_iter()
        .map(ColumnDescriptor::new)
        .collect();
    let rows = [
        (1, "Alfreds Futterkiste", "Maria Anders", "Germany"),
        (2, "Ana Trujillo Emparedados y helados", "Ana Trujillo", "Mexico"),
        (3, "Antonio Moreno Taquería", "Antonio Moreno", "Mexico"),
    ]
    .into_iter()
    .map(|(id, name, contact, country)| {
        Row::new()
            .with("CustomerID", id as i64)
            .with("CustomerName", name)
            .with("ContactName", contact)
            .with("Country", country)
    })
    .collect();
    QueryOutput::rows(columns, rows)
}

fn products() -> QueryOutput {
    let columns = vec![ColumnDescriptor::new("ProductID"), ColumnDescriptor::new("ProductName")];
    let rows = vec![
        Row::new().with("ProductID", 1_i64).with("ProductName", "Chai"),
        Row::new().with("ProductID", 2_i64).with("ProductName", "Chang"),
    ];
    QueryOutput::rows(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, DiagnosticKind, StatementKind};

    #[test]
    fn test_customers_query() {
        let output = SimulatedEngine::respond("SELECT * FROM Customers").unwrap();
        assert_eq!(output.columns.len(), 4);
        assert_eq!(output.rows.len(), 3);
        assert_eq!(output.statement, StatementKind::Read);
        assert_eq!(output.rows[0].get("CustomerID"), Some(&CellValue::Integer(1)));
        assert_eq!(output.rows[2].display("CustomerName"), "Antonio Moreno Taquería");
    }

    #[test]
    fn test_matching_is_prefix_and_case_insensitive() {
        let initial = "  select * FROM customers WHERE Country = 'Germany';\n";
        assert_eq!(SimulatedEngine::respond(initial).unwrap().rows.len(), 3);

        let products = SimulatedEngine::respond("SELECT * FROM Products").unwrap();
        assert_eq!(products.rows.len(), 2);
        assert_eq!(products.rows[1].display("ProductName"), "Chang");

        let err = SimulatedEngine::respond("SELECT CustomerID FROM Customers").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Unrecognized);
    }

    #[test]
    fn test_schema_change_statements() {
        for query in ["CREATE TABLE foo (id INT)", "alter table foo add x int", "DROP TABLE foo"] {
            let output = SimulatedEngine::respond(query).unwrap();
            assert!(output.rows.is_empty() && output.columns.is_empty(), "{query}");
            assert_eq!(output.statement, StatementKind::SchemaChange);
        }
    }

    #[test]
    fn test_error_sentinel() {
        let err = SimulatedEngine::respond("select error_test from dual").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Syntax);
        assert_eq!(err.message, SYNTAX_ERROR_MESSAGE);

        // Reads are matched before the sentinel.
        assert!(SimulatedEngine::respond("select * from products -- error_test").is_ok());
    }

    #[test]
    fn test_unrecognized_and_empty_queries() {
        for query in ["", "   ", "UPDATE Customers SET Country = 'France'"] {
            let err = SimulatedEngine::respond(query).unwrap_err();
            assert_eq!(err.message, UNRECOGNIZED_MESSAGE);
        }
    }

    #[test]
    fn test_delay_window_sampling() {
        let window = DelayWindow::new(Duration::from_millis(10), Duration::from_millis(20));
        for _ in 0..100 {
            let delay = window.sample();
            assert!(delay >= window.min() && delay <= window.max());
        }
        assert_eq!(DelayWindow::fixed(Duration::from_millis(5)).sample(), Duration::from_millis(5));
        let inverted = DelayWindow::new(Duration::from_millis(9), Duration::from_millis(1));
        assert_eq!(inverted.min(), Duration::from_millis(1));
        assert_eq!(DelayWindow::default().max(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_waits_within_window() {
        let engine = SimulatedEngine::new(DelayWindow::new(
            Duration::from_millis(1000),
            Duration::from_millis(2000),
        ));
        let start = tokio::time::Instant::now();
        let output = engine.execute("select * from products", &SchemaSnapshot::empty()).await.unwrap();
        let waited = start.elapsed();
        assert_eq!(output.rows.len(), 2);
        assert!(waited >= Duration::from_millis(1000) && waited <= Duration::from_millis(2001));
    }
}
