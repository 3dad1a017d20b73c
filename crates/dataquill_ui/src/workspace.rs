//! Workspace - the root view of the window.
//!
//! Lays out the schema browser on the left and the editor above the results
//! on the right, separated by two draggable dividers. Pane sizes, the schema
//! tree, the query state and the results all live in the [`Workbench`]
//! global; this view only forwards input and redraws when the workbench
//! revision changes.

use std::sync::Arc;

use dataquill_core::{Divider, Notification, Workbench};
use gpui::{
    canvas, div, prelude::*, px, App, Bounds, Context, DragMoveEvent, Entity, FocusHandle,
    Focusable, KeyContext, MouseButton, MouseUpEvent, Pixels, Point, Render, Task, Window,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::icon::{Icon, IconName, IconSize};
use crate::key_bindings::{CollapseAllNodes, ExpandAllNodes, RefreshSchema, RunQuery};
use crate::layout::{sizes, spacing, to_bounds, to_point};
use crate::panels::{QueryEditor, ResultsPanel, SchemaBrowserPanel};
use crate::resizer::{DividerHandle, DraggedDivider, WindowChrome};
use crate::toast::ToastLayer;
use crate::DataQuillTheme;

/// Root view hosting the three panels.
pub struct Workspace {
    focus_handle: FocusHandle,
    schema_browser: Entity<SchemaBrowserPanel>,
    editor: Entity<QueryEditor>,
    results: Entity<ResultsPanel>,
    toasts: Entity<ToastLayer>,
    chrome: Arc<WindowChrome>,
    /// Area holding both columns; the vertical divider measures from here.
    main_bounds: Bounds<Pixels>,
    /// Right-hand column; the horizontal divider measures from here.
    column_bounds: Bounds<Pixels>,
    previous_drag_coordinates: Option<Point<Pixels>>,
    _revision_task: Task<()>,
    _notification_task: Task<()>,
}

impl Workspace {
    /// Create the workspace. The [`Workbench`] global must already be set.
    pub fn new(
        notifications: UnboundedReceiver<Notification>,
        chrome: Arc<WindowChrome>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let initial_text = cx.global::<Workbench>().query_text();
        let schema_browser = cx.new(SchemaBrowserPanel::new);
        let editor = cx.new(|cx| QueryEditor::new(initial_text, chrome.clone(), cx));
        let results = cx.new(ResultsPanel::new);
        let toasts = cx.new(|_| ToastLayer::new());

        let editor_focus = editor.read(cx).focus_handle(cx);
        window.focus(&editor_focus, cx);

        let _revision_task = Self::observe_workbench(cx);
        let _notification_task = Self::forward_notifications(notifications, cx);

        tracing::debug!("Workspace created");

        Self {
            focus_handle: cx.focus_handle(),
            schema_browser,
            editor,
            results,
            toasts,
            chrome,
            main_bounds: Bounds::default(),
            column_bounds: Bounds::default(),
            previous_drag_coordinates: None,
            _revision_task,
            _notification_task,
        }
    }

    /// Redraw every panel whenever the workbench revision moves.
    fn observe_workbench(cx: &mut Context<Self>) -> Task<()> {
        let mut revisions = cx.global::<Workbench>().subscribe();
        cx.spawn(async move |this, cx| {
            while revisions.changed().await.is_ok() {
                if this.update(cx, |workspace, cx| workspace.redraw(cx)).is_err() {
                    break;
                }
            }
        })
    }

    /// Show each notification from the core as a toast.
    fn forward_notifications(
        mut notifications: UnboundedReceiver<Notification>,
        cx: &mut Context<Self>,
    ) -> Task<()> {
        cx.spawn(async move |this, cx| {
            while let Some(notification) = notifications.recv().await {
                let shown = this.update(cx, |workspace, cx| {
                    workspace.toasts.update(cx, |toasts, cx| toasts.show(notification, cx));
                });
                if shown.is_err() {
                    break;
                }
            }
        })
    }

    fn redraw(&mut self, cx: &mut Context<Self>) {
        self.schema_browser.update(cx, |_, cx| cx.notify());
        self.editor.update(cx, |_, cx| cx.notify());
        self.results.update(cx, |_, cx| cx.notify());
        cx.notify();
    }

    fn drag_divider(&mut self, event: &DragMoveEvent<DraggedDivider>, cx: &mut Context<Self>) {
        // Avoid processing duplicate coordinates
        if self.previous_drag_coordinates == Some(event.event.position) {
            return;
        }
        self.previous_drag_coordinates = Some(event.event.position);

        let container = match event.drag(cx).0 {
            Divider::Vertical => self.main_bounds,
            Divider::Horizontal => self.column_bounds,
        };
        cx.global::<Workbench>().drag_to(to_point(event.event.position), to_bounds(container));
    }

    fn end_drag(&mut self, cx: &mut Context<Self>) {
        self.previous_drag_coordinates = None;
        cx.global::<Workbench>().release_divider();
    }

    fn dispatch_context() -> KeyContext {
        let mut context = KeyContext::new_with_defaults();
        context.add("Workspace");
        context
    }

    fn render_title_bar(&self, theme: &DataQuillTheme) -> impl IntoElement {
        div()
            .h(sizes::TITLE_BAR_HEIGHT)
            .flex_shrink_0()
            .flex()
            .items_center()
            .gap(spacing::SM)
            .px(spacing::LG)
            .bg(theme.colors.elevated_surface)
            .border_b_1()
            .border_color(theme.colors.border)
            .child(Icon::new(IconName::Database).size(IconSize::Medium).color(theme.colors.accent))
            .child(
                div()
                    .text_size(px(14.0))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .child("DataQuill"),
            )
    }
}

impl Focusable for Workspace {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for Workspace {
    #[tracing::instrument(level = "trace", skip_all, name = "workspace_render")]
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<DataQuillTheme>();
        let workbench = cx.global::<Workbench>();
        let geometry = workbench.geometry();
        let active = workbench.active_divider();
        let this = cx.entity().clone();

        let left_pane = div()
            .w(px(geometry.left_pane_width))
            .h_full()
            .flex_shrink_0()
            .p(spacing::XS)
            .child(self.schema_browser.clone());

        let right_column = div()
            .flex_1()
            .h_full()
            .min_w(px(0.0))
            .relative()
            .flex()
            .flex_col()
            // Track the column bounds and re-fit the editor when the window resizes
            .child({
                let this = this.clone();
                canvas(
                    move |bounds, _window, cx| {
                        this.update(cx, |workspace, _cx| workspace.column_bounds = bounds);
                        cx.global::<Workbench>().fit_container(bounds.size.height.into());
                    },
                    |_, _, _, _| {},
                )
                .absolute()
                .size_full()
            })
            .child(
                div()
                    .h(px(geometry.top_pane_height))
                    .flex_shrink_0()
                    .p(spacing::XS)
                    .child(self.editor.clone()),
            )
            .child(
                DividerHandle::new(Divider::Horizontal)
                    .active(active == Some(Divider::Horizontal)),
            )
            .child(
                div()
                    .flex_1()
                    .min_h(px(0.0))
                    .p(spacing::XS)
                    .child(self.results.clone()),
            );

        let main_area = div()
            .flex_1()
            .min_h(px(0.0))
            .relative()
            .flex()
            .overflow_hidden()
            .child(
                canvas(
                    move |bounds, _window, cx| {
                        this.update(cx, |workspace, _cx| workspace.main_bounds = bounds);
                    },
                    |_, _, _, _| {},
                )
                .absolute()
                .size_full(),
            )
            .child(left_pane)
            .child(DividerHandle::new(Divider::Vertical).active(active == Some(Divider::Vertical)))
            .child(right_column);

        div()
            .key_context(Self::dispatch_context())
            .track_focus(&self.focus_handle)
            .size_full()
            .relative()
            .flex()
            .flex_col()
            .bg(theme.colors.background)
            .text_color(theme.colors.text)
            .on_drag_move(cx.listener(|this, e: &DragMoveEvent<DraggedDivider>, _window, cx| {
                this.drag_divider(e, cx);
            }))
            .on_drop(cx.listener(|this, _: &DraggedDivider, _window, cx| this.end_drag(cx)))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _: &MouseUpEvent, _window, cx| this.end_drag(cx)),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, _: &MouseUpEvent, _window, cx| this.end_drag(cx)),
            )
            // Runs are detached; their outcome arrives through the revision watch
            .on_action(|_: &RunQuery, _window, cx| {
                let _ = cx.global::<Workbench>().run_query();
            })
            .on_action(|_: &RefreshSchema, _window, cx| {
                let _ = cx.global::<Workbench>().refresh_schema();
            })
            .on_action(|_: &ExpandAllNodes, _window, cx| cx.global::<Workbench>().expand_all())
            .on_action(|_: &CollapseAllNodes, _window, cx| cx.global::<Workbench>().collapse_all())
            .child(self.render_title_bar(theme))
            .child(main_area)
            .child(self.toasts.clone())
            // While a divider is dragged, a full-window shield forces the resize
            // cursor and keeps the pointer off the panels
            .when_some(self.chrome.cursor(), |el, cursor| {
                el.child(div().id("drag-shield").absolute().size_full().cursor(cursor))
            })
    }
}
