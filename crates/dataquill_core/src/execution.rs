//! Query execution controller.
//!
//! `run` moves the controller to `Running` synchronously and returns a
//! `'static` future that performs the engine call. Every run takes a new
//! generation; a resolution is applied only if its generation is still the
//! latest, so overlapping runs resolve last-run-wins. The future holds only a
//! weak reference to the controller and does nothing if the controller is gone
//! by the time the engine answers.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::models::{
    Notification, QueryExecutionState, QueryOutput, SchemaSnapshot, StatementKind,
};
use crate::revision::Revision;
use crate::services::{Engine, NotificationSink};

/// How an asynchronous operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The result became the current state.
    Applied,
    /// A newer operation started first; the result was discarded.
    Superseded,
    /// The controller was dropped; the result was discarded.
    Detached,
}

struct Inner {
    state: watch::Sender<QueryExecutionState>,
    generation: Mutex<u64>,
    engine: Arc<dyn Engine>,
    notifications: Arc<dyn NotificationSink>,
    revision: Revision,
}

/// Drives the results panel through `Idle`, `Running`, `Succeeded` and `Failed`.
pub struct QueryExecutionController {
    inner: Arc<Inner>,
}

impl QueryExecutionController {
    pub fn new(
        engine: Arc<dyn Engine>,
        notifications: Arc<dyn NotificationSink>,
        revision: Revision,
    ) -> Self {
        let (state, _rx) = watch::channel(QueryExecutionState::Idle);
        Self {
            inner: Arc::new(Inner {
                state,
                generation: Mutex::new(0),
                engine,
                notifications,
                revision,
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryExecutionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<QueryExecutionState> {
        self.inner.state.subscribe()
    }

    /// Generation of the most recent run.
    pub fn generation(&self) -> u64 {
        *self.inner.generation.lock()
    }

    /// Start a run.
    ///
    /// The transition to `Running` (clearing any previous result) happens
    /// before this returns. The returned future must be awaited or spawned
    /// for the run to resolve.
    pub fn run(
        &self,
        query: impl Into<String>,
        schema: SchemaSnapshot,
    ) -> impl Future<Output = RunOutcome> + Send + 'static {
        let query = query.into();
        let started_at = Instant::now();
        let generation = {
            let mut current = self.inner.generation.lock();
            *current += 1;
            self.inner.state.send_replace(QueryExecutionState::Running { started_at });
            *current
        };
        self.inner.revision.bump();
        tracing::debug!(generation, query_len = query.len(), "Query run started");

        let engine = self.inner.engine.clone();
        let weak = Arc::downgrade(&self.inner);
        async move {
            let result = engine.execute(&query, &schema).await;
            Self::resolve(weak, generation, started_at, result)
        }
    }

    fn resolve(
        weak: Weak<Inner>,
        generation: u64,
        started_at: Instant,
        result: Result<QueryOutput, crate::models::Diagnostic>,
    ) -> RunOutcome {
        let Some(inner) = weak.upgrade() else {
            tracing::debug!(generation, "Query resolved after controller was dropped");
            return RunOutcome::Detached;
        };

        let elapsed = started_at.elapsed();
        let schema_change = matches!(&result, Ok(output) if output.statement == StatementKind::SchemaChange);
        {
            let latest = inner.generation.lock();
            if *latest != generation {
                tracing::debug!(generation, latest = *latest, "Discarding stale query result");
                return RunOutcome::Superseded;
            }
            let state = QueryExecutionState::resolved(result, elapsed);
            match &state {
                QueryExecutionState::Succeeded { row_count, .. } => tracing::debug!(
                    generation,
                    row_count,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Query succeeded"
                ),
                QueryExecutionState::Failed { message, .. } => tracing::debug!(
                    generation,
                    %message,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Query failed"
                ),
                _ => {}
            }
            inner.state.send_replace(state);
        }
        inner.revision.bump();

        if schema_change {
            inner.notifications.notify(Notification::success(
                "DDL Executed",
                "Schema modification query executed successfully.",
            ));
        }
        RunOutcome::Applied
    }
}

impl std::fmt::Debug for QueryExecutionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutionController")
            .field("generation", &self.generation())
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Diagnostic;
    use crate::services::engine::{DelayWindow, SimulatedEngine};
    use crate::services::notifications::testing::RecordingSink;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Answers like the simulator; queries starting with "slow" take longer.
    struct ScriptedEngine;

    #[async_trait]
    impl Engine for ScriptedEngine {
        async fn execute(&self, query: &str, _schema: &SchemaSnapshot) -> Result<QueryOutput, Diagnostic> {
            let (delay, rest) = match query.strip_prefix("slow ") {
                Some(rest) => (Duration::from_millis(500), rest),
                None => (Duration::from_millis(50), query),
            };
            tokio::time::sleep(delay).await;
            SimulatedEngine::respond(rest)
        }
    }

    fn controller(engine: Arc<dyn Engine>) -> (QueryExecutionController, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (QueryExecutionController::new(engine, sink.clone(), Revision::new()), sink)
    }

    fn simulated(delay_ms: u64) -> Arc<dyn Engine> {
        Arc::new(SimulatedEngine::new(DelayWindow::fixed(Duration::from_millis(delay_ms))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_is_running_before_await() {
        let (controller, _) = controller(simulated(1000));
        assert_eq!(controller.state(), QueryExecutionState::Idle);

        let pending = controller.run("SELECT * FROM Customers", SchemaSnapshot::empty());
        assert!(controller.state().is_running());

        assert_eq!(pending.await, RunOutcome::Applied);
        assert!(controller.state().is_terminal());
    }

    #[tokio::test(start_paused = true)]
    async fn test_customers_query_succeeds() {
        let (controller, sink) = controller(simulated(1500));
        controller.run("SELECT * FROM Customers", SchemaSnapshot::empty()).await;

        match controller.state() {
            QueryExecutionState::Succeeded { columns, rows, row_count, elapsed, .. } => {
                assert_eq!(columns.len(), 4);
                assert_eq!(rows.len(), 3);
                assert_eq!(row_count, rows.len());
                assert!(elapsed >= Duration::from_millis(1500));
            }
            other => panic!("expected Succeeded, got {other:?}"),
        }
        assert!(sink.all().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_schema_change_notifies() {
        let (controller, sink) = controller(simulated(10));
        controller.run("CREATE TABLE foo (id INT)", SchemaSnapshot::empty()).await;

        assert_eq!(controller.state().row_count(), Some(0));
        let seen = sink.all();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].title, "DDL Executed");
        assert_eq!(seen[0].description, "Schema modification query executed successfully.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_sentinel_fails() {
        let (controller, sink) = controller(simulated(10));
        controller.run("select error_test", SchemaSnapshot::empty()).await;

        match controller.state() {
            QueryExecutionState::Failed { message, .. } => assert!(!message.is_empty()),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(sink.all().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_clears_previous_result() {
        let (controller, _) = controller(simulated(10));
        controller.run("SELECT * FROM Products", SchemaSnapshot::empty()).await;
        assert_eq!(controller.state().row_count(), Some(2));

        let pending = controller.run("select error_test", SchemaSnapshot::empty());
        assert_eq!(controller.state().row_count(), None);
        assert!(controller.state().elapsed().is_none());
        pending.await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_one_terminal_transition() {
        let (controller, _) = controller(simulated(100));
        let mut rx = controller.subscribe();
        let pending = controller.run("SELECT * FROM Products", SchemaSnapshot::empty());

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_running());

        let handle = tokio::spawn(pending);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_terminal());
        assert_eq!(handle.await.unwrap(), RunOutcome::Applied);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_discarded() {
        let (controller, sink) = controller(Arc::new(ScriptedEngine));

        let first = tokio::spawn(controller.run("slow CREATE TABLE t (id INT)", SchemaSnapshot::empty()));
        let second = tokio::spawn(controller.run("SELECT * FROM Products", SchemaSnapshot::empty()));

        assert_eq!(second.await.unwrap(), RunOutcome::Applied);
        assert_eq!(controller.state().row_count(), Some(2));

        assert_eq!(first.await.unwrap(), RunOutcome::Superseded);
        assert_eq!(controller.state().row_count(), Some(2));
        // The superseded DDL never announced itself.
        assert!(sink.all().is_empty());
        assert_eq!(controller.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_controller_detaches() {
        let (controller, sink) = controller(simulated(100));
        let pending = controller.run("CREATE TABLE t (id INT)", SchemaSnapshot::empty());
        drop(controller);

        assert_eq!(pending.await, RunOutcome::Detached);
        assert!(sink.all().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transitions_bump_revision() {
        let revision = Revision::new();
        let controller = QueryExecutionController::new(
            simulated(10),
            Arc::new(RecordingSink::default()),
            revision.clone(),
        );
        controller.run("SELECT * FROM Products", SchemaSnapshot::empty()).await;
        assert_eq!(revision.current(), 2);
    }
}
