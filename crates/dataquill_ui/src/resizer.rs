//! Divider handles and the window chrome a drag overrides.
//!
//! A handle only starts the gesture: pressing it calls
//! [`Workbench::press_divider`] and `on_drag` attaches a [`DraggedDivider`]
//! marker. The workspace root tracks the pointer with `on_drag_move` and ends
//! the gesture on mouse up.

use dataquill_core::{CursorStyle, Divider, DragChrome, Workbench};
use gpui::{
    div, prelude::*, relative, App, Context, IntoElement, Length, MouseButton, Render, RenderOnce,
    Window,
};
use parking_lot::Mutex;

use crate::layout::sizes::RESIZER_SIZE;
use crate::DataQuillTheme;

/// Drag payload identifying which divider is moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DraggedDivider(pub Divider);

impl Render for DraggedDivider {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        // Feedback comes from the cursor, not a drag preview
        gpui::Empty
    }
}

/// GPUI cursor for a drag cursor request.
pub fn cursor_style(cursor: CursorStyle) -> gpui::CursorStyle {
    match cursor {
        CursorStyle::ColResize => gpui::CursorStyle::ResizeLeftRight,
        CursorStyle::RowResize => gpui::CursorStyle::ResizeUpDown,
    }
}

/// Drag chrome backed by the workspace root.
///
/// While a drag is active the root element renders with the requested cursor
/// and the query editor ignores pointer input.
#[derive(Debug, Default)]
pub struct WindowChrome {
    cursor: Mutex<Option<CursorStyle>>,
}

impl WindowChrome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor to force on the whole window, if a drag is active.
    pub fn cursor(&self) -> Option<gpui::CursorStyle> {
        self.cursor.lock().map(cursor_style)
    }

    /// Whether pointer input to text surfaces is suppressed.
    pub fn suppresses_selection(&self) -> bool {
        self.cursor.lock().is_some()
    }
}

impl DragChrome for WindowChrome {
    fn begin(&self, cursor: CursorStyle) {
        *self.cursor.lock() = Some(cursor);
    }

    fn end(&self) {
        self.cursor.lock().take();
    }
}

/// Visual handle for one of the two dividers.
#[derive(IntoElement)]
pub struct DividerHandle {
    divider: Divider,
    active: bool,
}

impl DividerHandle {
    pub fn new(divider: Divider) -> Self {
        Self { divider, active: false }
    }

    /// Highlight the handle while its drag is in progress.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn element_id(&self) -> &'static str {
        match self.divider {
            Divider::Vertical => "divider-vertical",
            Divider::Horizontal => "divider-horizontal",
        }
    }
}

impl RenderOnce for DividerHandle {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<DataQuillTheme>();
        let divider = self.divider;

        let (width, height): (Length, Length) = match divider {
            Divider::Vertical => (RESIZER_SIZE.into(), relative(1.0).into()),
            Divider::Horizontal => (relative(1.0).into(), RESIZER_SIZE.into()),
        };
        let idle = if self.active { theme.colors.accent } else { theme.colors.border_variant };
        let hover = theme.colors.border;

        div()
            .id(self.element_id())
            .w(width)
            .h(height)
            .flex_shrink_0()
            .rounded_full()
            .cursor(cursor_style(divider.cursor()))
            .bg(idle)
            .hover(move |style| style.bg(hover))
            .on_mouse_down(MouseButton::Left, move |_, _window, cx| {
                cx.global::<Workbench>().press_divider(divider);
            })
            .on_drag(DraggedDivider(divider), |drag, _, _, cx| {
                cx.stop_propagation();
                cx.new(|_| *drag)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataquill_core::config::LayoutConfig;
    use dataquill_core::{Bounds, Point, ResizableLayout};
    use std::sync::Arc;

    #[test]
    fn test_cursor_mapping() {
        assert_eq!(cursor_style(CursorStyle::ColResize), gpui::CursorStyle::ResizeLeftRight);
        assert_eq!(cursor_style(CursorStyle::RowResize), gpui::CursorStyle::ResizeUpDown);
    }

    #[test]
    fn test_window_chrome_follows_drag() {
        let chrome = Arc::new(WindowChrome::new());
        let mut layout = ResizableLayout::new(LayoutConfig::default(), chrome.clone());
        assert_eq!(chrome.cursor(), None);

        layout.press(Divider::Horizontal);
        assert_eq!(chrome.cursor(), Some(gpui::CursorStyle::ResizeUpDown));
        assert!(chrome.suppresses_selection());

        layout.pointer_move(Point::new(500.0, 260.0), Bounds::new(0.0, 60.0, 800.0, 600.0));
        layout.release();
        assert_eq!(chrome.cursor(), None);
        assert!(!chrome.suppresses_selection());
    }

    #[test]
    fn test_window_chrome_restored_when_layout_dropped() {
        let chrome = Arc::new(WindowChrome::new());
        let mut layout = ResizableLayout::new(LayoutConfig::default(), chrome.clone());
        layout.press(Divider::Vertical);
        drop(layout);
        assert_eq!(chrome.cursor(), None);
    }

    #[test]
    fn test_divider_handle_ids() {
        assert_eq!(DividerHandle::new(Divider::Vertical).element_id(), "divider-vertical");
        assert!(DividerHandle::new(Divider::Horizontal).active(true).active);
    }
}
