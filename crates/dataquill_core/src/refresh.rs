//! Schema refresh controller.
//!
//! A refresh announces itself, waits the configured delay, asks the
//! [`SchemaSource`] for new roots and swaps the result into the shared
//! [`SchemaTree`] in one step. A failed load leaves the current tree alone.
//! Overlapping refreshes resolve last-wins, like query runs.

use parking_lot::{Mutex, RwLock};
use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::QuillError;
use crate::execution::RunOutcome;
use crate::models::{Notification, SchemaSnapshot};
use crate::revision::Revision;
use crate::schema_tree::SchemaTree;
use crate::services::{NotificationSink, SchemaSource};

/// Refresh lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SchemaRefreshState {
    #[default]
    Idle,
    Refreshing {
        started_at: Instant,
    },
    /// The last refresh failed; the previous tree is still shown.
    Failed {
        message: String,
    },
}

impl SchemaRefreshState {
    pub fn is_refreshing(&self) -> bool {
        matches!(self, Self::Refreshing { .. })
    }
}

struct Inner {
    state: watch::Sender<SchemaRefreshState>,
    generation: Mutex<u64>,
    tree: Arc<RwLock<SchemaTree>>,
    source: Arc<dyn SchemaSource>,
    notifications: Arc<dyn NotificationSink>,
    delay: Duration,
    revision: Revision,
}

/// Replaces the schema tree's snapshot on demand.
pub struct SchemaRefreshController {
    inner: Arc<Inner>,
}

impl SchemaRefreshController {
    pub fn new(
        tree: Arc<RwLock<SchemaTree>>,
        source: Arc<dyn SchemaSource>,
        notifications: Arc<dyn NotificationSink>,
        delay: Duration,
        revision: Revision,
    ) -> Self {
        let (state, _rx) = watch::channel(SchemaRefreshState::Idle);
        Self {
            inner: Arc::new(Inner {
                state,
                generation: Mutex::new(0),
                tree,
                source,
                notifications,
                delay,
                revision,
            }),
        }
    }

    pub fn state(&self) -> SchemaRefreshState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SchemaRefreshState> {
        self.inner.state.subscribe()
    }

    /// Start a refresh.
    ///
    /// Moves to `Refreshing` and emits the "Schema Refresh" notification
    /// before returning; the returned future does the load.
    pub fn refresh(&self) -> impl Future<Output = RunOutcome> + Send + 'static {
        let started_at = Instant::now();
        let generation = {
            let mut current = self.inner.generation.lock();
            *current += 1;
            self.inner.state.send_replace(SchemaRefreshState::Refreshing { started_at });
            *current
        };
        self.inner.revision.bump();
        self.inner
            .notifications
            .notify(Notification::info("Schema Refresh", "Simulating schema refresh..."));
        tracing::debug!(generation, "Schema refresh started");

        let source = self.inner.source.clone();
        let delay = self.inner.delay;
        let weak = Arc::downgrade(&self.inner);
        async move {
            tokio::time::sleep(delay).await;
            let loaded = source.load().await.and_then(SchemaSnapshot::new);
            Self::resolve(weak, generation, started_at, loaded)
        }
    }

    fn resolve(
        weak: Weak<Inner>,
        generation: u64,
        started_at: Instant,
        loaded: Result<SchemaSnapshot, QuillError>,
    ) -> RunOutcome {
        let Some(inner) = weak.upgrade() else {
            tracing::debug!(generation, "Schema loaded after controller was dropped");
            return RunOutcome::Detached;
        };

        let notification = {
            let latest = inner.generation.lock();
            if *latest != generation {
                tracing::debug!(generation, latest = *latest, "Discarding stale schema load");
                return RunOutcome::Superseded;
            }
            match loaded {
                Ok(snapshot) => {
                    inner.tree.write().replace(snapshot);
                    inner.state.send_replace(SchemaRefreshState::Idle);
                    tracing::info!(
                        generation,
                        elapsed_ms = started_at.elapsed().as_millis() as u64,
                        "Schema refreshed"
                    );
                    Notification::success("Schema Refreshed", "Schema has been updated.")
                }
                Err(err) => {
                    tracing::warn!(generation, error = %err, "Schema refresh failed");
                    let message = err.to_string();
                    inner.state.send_replace(SchemaRefreshState::Failed { message: message.clone() });
                    Notification::error("Schema Refresh Failed", message)
                }
            }
        };
        inner.revision.bump();
        inner.notifications.notify(notification);
        RunOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchemaNode;
    use crate::schema_tree::DEFAULT_SEED_DEPTH;
    use crate::services::notifications::testing::RecordingSink;
    use crate::services::StaticSchemaSource;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl SchemaSource for FailingSource {
        async fn load(&self) -> Result<Vec<SchemaNode>, QuillError> {
            Err(QuillError::schema("catalog unavailable"))
        }
    }

    fn sample_tree() -> Arc<RwLock<SchemaTree>> {
        let snapshot = SchemaSnapshot::new(crate::services::sample_catalog()).unwrap();
        Arc::new(RwLock::new(SchemaTree::new(snapshot, DEFAULT_SEED_DEPTH)))
    }

    fn controller(
        tree: Arc<RwLock<SchemaTree>>,
        source: Arc<dyn SchemaSource>,
    ) -> (SchemaRefreshController, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let controller = SchemaRefreshController::new(
            tree,
            source,
            sink.clone(),
            Duration::from_millis(1500),
            Revision::new(),
        );
        (controller, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_replaces_snapshot_and_reseeds() {
        let tree = sample_tree();
        tree.write().collapse_all();
        let before = tree.read().snapshot().clone();
        let (controller, sink) = controller(tree.clone(), Arc::new(StaticSchemaSource::sample()));

        let start = Instant::now();
        let pending = controller.refresh();
        assert!(controller.state().is_refreshing());
        assert_eq!(sink.titles(), vec!["Schema Refresh"]);

        assert_eq!(pending.await, RunOutcome::Applied);
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(controller.state(), SchemaRefreshState::Idle);

        let tree = tree.read();
        assert!(!tree.snapshot().same_snapshot(&before));
        assert!(tree.is_expanded("tbl_orders"));
        assert_eq!(sink.titles(), vec!["Schema Refresh", "Schema Refreshed"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_keeps_tree() {
        let tree = sample_tree();
        let before = tree.read().snapshot().clone();
        let (controller, sink) = controller(tree.clone(), Arc::new(FailingSource));

        assert_eq!(controller.refresh().await, RunOutcome::Applied);

        match controller.state() {
            SchemaRefreshState::Failed { message } => assert!(message.contains("catalog unavailable")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(tree.read().snapshot().same_snapshot(&before));
        let seen = sink.all();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].severity, crate::models::Severity::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_snapshot_fails() {
        let duplicate = vec![
            SchemaNode::database("db", "A", vec![]),
            SchemaNode::database("db", "B", vec![]),
        ];
        let (controller, _) = controller(sample_tree(), Arc::new(StaticSchemaSource::new(duplicate)));
        controller.refresh().await;
        assert!(matches!(controller.state(), SchemaRefreshState::Failed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_refresh_supersedes_first() {
        let tree = sample_tree();
        let (controller, sink) = controller(tree, Arc::new(StaticSchemaSource::sample()));

        let first = controller.refresh();
        let second = controller.refresh();
        assert_eq!(first.await, RunOutcome::Superseded);
        assert_eq!(second.await, RunOutcome::Applied);
        assert_eq!(
            sink.titles(),
            vec!["Schema Refresh", "Schema Refresh", "Schema Refreshed"]
        );
    }

    /// Fails on the first load, then serves the sample catalog.
    #[derive(Default)]
    struct FlakySource {
        failed_once: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl SchemaSource for FlakySource {
        async fn load(&self) -> Result<Vec<SchemaNode>, QuillError> {
            if self.failed_once.swap(true, std::sync::atomic::Ordering::SeqCst) {
                Ok(crate::services::sample_catalog())
            } else {
                Err(QuillError::io("connection reset"))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_then_retry_recovers() {
        let tree = sample_tree();
        let before = tree.read().snapshot().clone();
        let (controller, sink) = controller(tree.clone(), Arc::new(FlakySource::default()));

        controller.refresh().await;
        assert!(matches!(controller.state(), SchemaRefreshState::Failed { .. }));
        assert!(tree.read().snapshot().same_snapshot(&before));

        controller.refresh().await;
        assert_eq!(controller.state(), SchemaRefreshState::Idle);
        assert!(!tree.read().snapshot().same_snapshot(&before));
        assert_eq!(
            sink.titles(),
            vec!["Schema Refresh", "Schema Refresh Failed", "Schema Refresh", "Schema Refreshed"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_controller_detaches() {
        let (controller, sink) = controller(sample_tree(), Arc::new(StaticSchemaSource::sample()));
        let pending = controller.refresh();
        drop(controller);
        assert_eq!(pending.await, RunOutcome::Detached);
        assert_eq!(sink.titles(), vec!["Schema Refresh"]);
    }
}
