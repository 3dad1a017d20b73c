//! Workbench state: the coordinator the three panels share.
//!
//! Holds the query text, the schema tree, the pane layout and both async
//! controllers, plus the tokio runtime their work runs on. All methods take
//! `&self` so the workbench can live in a GPUI global; every observable change
//! bumps a [`Revision`] that views subscribe to.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::WorkspaceConfig;
use crate::error::QuillError;
use crate::execution::{QueryExecutionController, RunOutcome};
use crate::layout::{Bounds, Divider, DragChrome, LayoutGeometry, NoopChrome, Point, ResizableLayout};
use crate::models::{QueryExecutionState, ResultsView, SchemaNode, SchemaSnapshot};
use crate::refresh::{SchemaRefreshController, SchemaRefreshState};
use crate::revision::Revision;
use crate::schema_tree::SchemaTree;
use crate::services::{
    read_schema_file, sample_catalog, DelayWindow, Engine, JsonFileSchemaSource,
    NotificationSink, SchemaSource, SimulatedEngine, StaticSchemaSource, TracingSink,
};

/// External collaborators the workbench is wired to.
pub struct Collaborators {
    pub engine: Arc<dyn Engine>,
    pub schema_source: Arc<dyn SchemaSource>,
    pub notifications: Arc<dyn NotificationSink>,
    pub drag_chrome: Arc<dyn DragChrome>,
    /// Snapshot shown before the first refresh.
    pub initial_schema: SchemaSnapshot,
}

impl Collaborators {
    /// Simulated engine and the schema source named by `config`.
    ///
    /// With `refresh.schema_file` set, the initial snapshot is read from that
    /// file; otherwise the built-in sample catalog is used.
    pub fn from_config(config: &WorkspaceConfig) -> Result<Self, QuillError> {
        let engine = Arc::new(SimulatedEngine::new(DelayWindow::from(&config.simulator)));
        let (schema_source, roots): (Arc<dyn SchemaSource>, Vec<SchemaNode>) = match &config.refresh.schema_file {
            Some(path) => (Arc::new(JsonFileSchemaSource::new(path)), read_schema_file(path)?),
            None => (Arc::new(StaticSchemaSource::sample()), sample_catalog()),
        };

        Ok(Self {
            engine,
            schema_source,
            notifications: Arc::new(TracingSink),
            drag_chrome: Arc::new(NoopChrome),
            initial_schema: SchemaSnapshot::new(roots)?,
        })
    }

    pub fn with_notifications(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifications = sink;
        self
    }

    pub fn with_drag_chrome(mut self, chrome: Arc<dyn DragChrome>) -> Self {
        self.drag_chrome = chrome;
        self
    }
}

enum RuntimeHost {
    Owned(Runtime),
    Shared(Handle),
}

impl RuntimeHost {
    fn handle(&self) -> &Handle {
        match self {
            Self::Owned(runtime) => runtime.handle(),
            Self::Shared(handle) => handle,
        }
    }
}

/// The interactive workspace coordinator.
pub struct Workbench {
    config: WorkspaceConfig,
    query_text: RwLock<String>,
    tree: Arc<RwLock<SchemaTree>>,
    layout: Mutex<ResizableLayout>,
    query: QueryExecutionController,
    refresh: SchemaRefreshController,
    revision: Revision,
    runtime: RuntimeHost,
}

impl Workbench {
    /// Create a workbench with its own multi-threaded runtime.
    pub fn new(config: WorkspaceConfig, collaborators: Collaborators) -> Result<Self, QuillError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("dataquill-worker")
            .enable_all()
            .build()
            .map_err(|e| QuillError::internal_with_source("Failed to create tokio runtime", e))?;
        Ok(Self::build(config, collaborators, RuntimeHost::Owned(runtime)))
    }

    /// Create a workbench that spawns onto an existing runtime.
    pub fn with_handle(config: WorkspaceConfig, collaborators: Collaborators, handle: Handle) -> Self {
        Self::build(config, collaborators, RuntimeHost::Shared(handle))
    }

    fn build(config: WorkspaceConfig, collaborators: Collaborators, runtime: RuntimeHost) -> Self {
        let Collaborators { engine, schema_source, notifications, drag_chrome, initial_schema } =
            collaborators;
        let revision = Revision::new();
        let tree = Arc::new(RwLock::new(SchemaTree::new(initial_schema, config.tree.seed_depth)));
        let query = QueryExecutionController::new(engine, notifications.clone(), revision.clone());
        let refresh = SchemaRefreshController::new(
            tree.clone(),
            schema_source,
            notifications,
            config.refresh.delay(),
            revision.clone(),
        );
        let layout = ResizableLayout::new(config.layout.clone(), drag_chrome);

        tracing::info!(
            nodes = tree.read().snapshot().node_count(),
            seed_depth = config.tree.seed_depth,
            "Workbench initialized"
        );

        Self {
            query_text: RwLock::new(config.editor.initial_query.clone()),
            config,
            tree,
            layout: Mutex::new(layout),
            query,
            refresh,
            revision,
            runtime,
        }
    }

    // ========== Query Text ==========

    /// Current editor text.
    pub fn query_text(&self) -> String {
        self.query_text.read().clone()
    }

    /// Record an editor change.
    pub fn set_query_text(&self, text: impl Into<String>) {
        let text = text.into();
        let mut current = self.query_text.write();
        if *current != text {
            *current = text;
            drop(current);
            self.revision.bump();
        }
    }

    // ========== Query Execution ==========

    /// Run the current editor text against the current snapshot.
    ///
    /// The results panel switches to loading before this returns.
    pub fn run_query(&self) -> JoinHandle<RunOutcome> {
        let query = self.query_text();
        let schema = self.tree.read().snapshot().clone();
        let pending = self.query.run(query, schema);
        self.spawn(pending)
    }

    pub fn query_state(&self) -> QueryExecutionState {
        self.query.state()
    }

    /// Presentation model for the results panel.
    pub fn results_view(&self) -> ResultsView {
        ResultsView::from_state(&self.query.state())
    }

    // ========== Schema ==========

    /// Reload the schema from the configured source.
    pub fn refresh_schema(&self) -> JoinHandle<RunOutcome> {
        let pending = self.refresh.refresh();
        self.spawn(pending)
    }

    pub fn refresh_state(&self) -> SchemaRefreshState {
        self.refresh.state()
    }

    /// Read access to the schema tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&SchemaTree) -> R) -> R {
        f(&*self.tree.read())
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> SchemaSnapshot {
        self.tree.read().snapshot().clone()
    }

    /// Toggle a tree node. Returns `false` for unknown ids and leaves.
    pub fn toggle_node(&self, id: &str) -> bool {
        let toggled = self.tree.write().toggle(id);
        if toggled {
            self.revision.bump();
        }
        toggled
    }

    pub fn expand_all(&self) {
        self.tree.write().expand_all();
        self.revision.bump();
    }

    pub fn collapse_all(&self) {
        self.tree.write().collapse_all();
        self.revision.bump();
    }

    // ========== Layout ==========

    pub fn geometry(&self) -> LayoutGeometry {
        self.layout.lock().geometry()
    }

    pub fn active_divider(&self) -> Option<Divider> {
        self.layout.lock().active_divider()
    }

    /// Begin dragging a divider. Ignored while another drag is active.
    pub fn press_divider(&self, divider: Divider) -> bool {
        let pressed = self.layout.lock().press(divider);
        if pressed {
            self.revision.bump();
        }
        pressed
    }

    /// Feed a pointer position to the active drag.
    pub fn drag_to(&self, position: Point, container: Bounds) -> bool {
        let changed = self.layout.lock().pointer_move(position, container);
        if changed {
            self.revision.bump();
        }
        changed
    }

    /// End the active drag, if any.
    pub fn release_divider(&self) {
        let mut layout = self.layout.lock();
        if layout.is_dragging() {
            layout.release();
            drop(layout);
            self.revision.bump();
        }
    }

    /// Re-clamp the editor height after the window resized.
    pub fn fit_container(&self, height: f32) {
        if self.layout.lock().fit_container(height) {
            self.revision.bump();
        }
    }

    // ========== Observation ==========

    /// Receiver that changes whenever anything a view renders changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision.current()
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    // ========== Runtime ==========

    /// Handle to the runtime async work runs on.
    pub fn runtime(&self) -> &Handle {
        self.runtime.handle()
    }

    /// Spawn a future on the workbench runtime.
    pub fn spawn<F, T>(&self, future: F) -> JoinHandle<T>
    where
        F: std::future::Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.runtime.handle().spawn(future)
    }
}

#[cfg(feature = "gpui")]
impl gpui::Global for Workbench {}
