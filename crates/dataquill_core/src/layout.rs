//! Resizable three-pane layout.
//!
//! Two dividers: the vertical one sets the schema pane width, the horizontal
//! one sets the editor height. A drag is a [`DragSession`] that owns the
//! cursor override for its lifetime; dropping the session (release, or the
//! layout itself going away) always restores the cursor and text selection.

use std::fmt;
use std::sync::Arc;

use crate::config::LayoutConfig;

/// A point in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A container rectangle in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }
}

/// The two draggable dividers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Divider {
    /// Between the schema pane and the editor column.
    Vertical,
    /// Between the editor and the results pane.
    Horizontal,
}

impl Divider {
    /// Cursor shown while this divider is dragged.
    pub fn cursor(self) -> CursorStyle {
        match self {
            Self::Vertical => CursorStyle::ColResize,
            Self::Horizontal => CursorStyle::RowResize,
        }
    }
}

/// Cursor requested for the duration of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    ColResize,
    RowResize,
}

/// Window chrome that a drag temporarily overrides.
///
/// `begin` sets the cursor and suppresses text selection; `end` restores both.
pub trait DragChrome: Send + Sync {
    fn begin(&self, cursor: CursorStyle);
    fn end(&self);
}

/// Chrome that does nothing, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChrome;

impl DragChrome for NoopChrome {
    fn begin(&self, _cursor: CursorStyle) {}
    fn end(&self) {}
}

/// An active drag gesture. Dropping it restores the chrome.
pub struct DragSession {
    divider: Divider,
    chrome: Arc<dyn DragChrome>,
}

impl DragSession {
    fn start(divider: Divider, chrome: Arc<dyn DragChrome>) -> Self {
        chrome.begin(divider.cursor());
        Self { divider, chrome }
    }

    /// The divider being dragged.
    pub fn divider(&self) -> Divider {
        self.divider
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        self.chrome.end();
    }
}

impl fmt::Debug for DragSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession").field("divider", &self.divider).finish()
    }
}

/// Current pane sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    /// Schema pane width.
    pub left_pane_width: f32,
    /// Editor pane height.
    pub top_pane_height: f32,
}

/// Layout state plus the drag gesture state machine.
pub struct ResizableLayout {
    geometry: LayoutGeometry,
    limits: LayoutConfig,
    chrome: Arc<dyn DragChrome>,
    session: Option<DragSession>,
}

impl ResizableLayout {
    /// Create a layout at the configured default sizes.
    pub fn new(limits: LayoutConfig, chrome: Arc<dyn DragChrome>) -> Self {
        let geometry = LayoutGeometry {
            left_pane_width: clamp_extent(
                limits.default_left_width,
                limits.min_left_width,
                limits.max_left_width,
            ),
            top_pane_height: limits.default_top_height.max(0.0),
        };
        Self { geometry, limits, chrome, session: None }
    }

    /// Headless layout with default limits.
    pub fn headless() -> Self {
        Self::new(LayoutConfig::default(), Arc::new(NoopChrome))
    }

    /// Current pane sizes.
    pub fn geometry(&self) -> LayoutGeometry {
        self.geometry
    }

    /// Divider being dragged, if any.
    pub fn active_divider(&self) -> Option<Divider> {
        self.session.as_ref().map(DragSession::divider)
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start dragging `divider`.
    ///
    /// Ignored (returns `false`) while another gesture is active.
    pub fn press(&mut self, divider: Divider) -> bool {
        if let Some(active) = self.active_divider() {
            tracing::trace!(?active, ?divider, "Divider press ignored, drag already active");
            return false;
        }
        self.session = Some(DragSession::start(divider, self.chrome.clone()));
        tracing::trace!(?divider, "Divider drag started");
        true
    }

    /// Apply a pointer position while dragging.
    ///
    /// `container` is the element the dragged divider is measured against.
    /// Returns `true` if the geometry changed.
    pub fn pointer_move(&mut self, position: Point, container: Bounds) -> bool {
        let Some(divider) = self.active_divider() else {
            return false;
        };

        let before = self.geometry;
        match divider {
            Divider::Vertical => {
                self.geometry.left_pane_width = clamp_extent(
                    position.x - container.left,
                    self.limits.min_left_width,
                    self.limits.max_left_width,
                );
            }
            Divider::Horizontal => {
                let (lower, upper) = self.top_limits(container.height);
                self.geometry.top_pane_height =
                    clamp_extent(position.y - container.top, lower, upper);
            }
        }
        self.geometry != before
    }

    /// End the current drag, if any.
    pub fn release(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::trace!(divider = ?session.divider(), geometry = ?self.geometry, "Divider drag ended");
        }
    }

    /// Re-clamp the editor height after the container resized.
    pub fn fit_container(&mut self, container_height: f32) -> bool {
        let (lower, upper) = self.top_limits(container_height);
        let fitted = clamp_extent(self.geometry.top_pane_height, lower, upper);
        let changed = fitted != self.geometry.top_pane_height;
        self.geometry.top_pane_height = fitted;
        changed
    }

    /// `(lower, upper)` for the editor height; never inverted, never negative.
    fn top_limits(&self, container_height: f32) -> (f32, f32) {
        let upper = (container_height - self.limits.bottom_reserve).max(0.0);
        let lower = self.limits.min_top_height.min(upper);
        (lower, upper)
    }
}

impl fmt::Debug for ResizableLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizableLayout")
            .field("geometry", &self.geometry)
            .field("session", &self.session)
            .finish()
    }
}

fn clamp_extent(value: f32, lower: f32, upper: f32) -> f32 {
    value.max(lower).min(upper)
}
