//! SQL editor panel.
//!
//! A multi-line editor over [`QueryBuffer`]. Control keys arrive as actions
//! bound in the `QueryEditor` context; printable input arrives through
//! `on_key_down`. Every edit is pushed to the workbench so a run always sees
//! the latest text.

use std::sync::Arc;

use dataquill_core::Workbench;
use gpui::{
    div, prelude::*, px, App, ClipboardItem, Context, FocusHandle, Focusable, KeyDownEvent,
    Modifiers, MouseButton, MouseDownEvent, Render, Window,
};

use crate::icon::{Icon, IconName, IconSize};
use crate::key_bindings::editor::{
    Backspace, Copy, Cut, Delete, Down, End, Home, Indent, Left, Newline, Paste, Right, SelectAll,
    SelectLeft, SelectRight, Up,
};
use crate::layout::{radius, sizes, spacing};
use crate::query_buffer::{QueryBuffer, Segment};
use crate::resizer::WindowChrome;
use crate::spinner::Spinner;
use crate::DataQuillTheme;

/// Text typed by a key press, if it should be inserted.
///
/// Chords with command, control or function held are shortcuts, and control
/// characters are handled by the bound actions.
pub fn typed_text<'a>(modifiers: &Modifiers, key_char: Option<&'a str>) -> Option<&'a str> {
    if modifiers.platform || modifiers.control || modifiers.function {
        return None;
    }
    key_char.filter(|text| !text.is_empty() && !text.chars().any(char::is_control))
}

/// Top-right panel holding the query text.
pub struct QueryEditor {
    focus_handle: FocusHandle,
    buffer: QueryBuffer,
    chrome: Arc<WindowChrome>,
}

impl QueryEditor {
    pub fn new(initial_text: String, chrome: Arc<WindowChrome>, cx: &mut Context<Self>) -> Self {
        Self { focus_handle: cx.focus_handle(), buffer: QueryBuffer::new(initial_text), chrome }
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Apply an edit and publish the new text.
    fn edit(&mut self, cx: &mut Context<Self>, f: impl FnOnce(&mut QueryBuffer)) {
        let before = self.buffer.text().len();
        f(&mut self.buffer);
        tracing::trace!(before, after = self.buffer.text().len(), "Query text edited");
        cx.global::<Workbench>().set_query_text(self.buffer.text());
        cx.notify();
    }

    /// Move the caret or selection without changing the text.
    fn navigate(&mut self, cx: &mut Context<Self>, f: impl FnOnce(&mut QueryBuffer)) {
        f(&mut self.buffer);
        cx.notify();
    }

    fn backspace(&mut self, _: &Backspace, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, QueryBuffer::backspace);
    }

    fn delete(&mut self, _: &Delete, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, QueryBuffer::delete);
    }

    fn newline(&mut self, _: &Newline, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, QueryBuffer::newline);
    }

    fn indent(&mut self, _: &Indent, _: &mut Window, cx: &mut Context<Self>) {
        self.edit(cx, QueryBuffer::indent);
    }

    fn left(&mut self, _: &Left, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::move_left);
    }

    fn right(&mut self, _: &Right, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::move_right);
    }

    fn up(&mut self, _: &Up, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::move_up);
    }

    fn down(&mut self, _: &Down, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::move_down);
    }

    fn select_left(&mut self, _: &SelectLeft, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::select_left);
    }

    fn select_right(&mut self, _: &SelectRight, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::select_right);
    }

    fn home(&mut self, _: &Home, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::move_to_line_start);
    }

    fn end(&mut self, _: &End, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::move_to_line_end);
    }

    fn select_all(&mut self, _: &SelectAll, _: &mut Window, cx: &mut Context<Self>) {
        self.navigate(cx, QueryBuffer::select_all);
    }

    fn copy(&mut self, _: &Copy, _: &mut Window, cx: &mut Context<Self>) {
        if self.buffer.has_selection() {
            cx.write_to_clipboard(ClipboardItem::new_string(self.buffer.selected_text().to_string()));
        }
    }

    fn cut(&mut self, _: &Cut, _: &mut Window, cx: &mut Context<Self>) {
        if !self.buffer.has_selection() {
            return;
        }
        let mut taken = None;
        self.edit(cx, |buffer| taken = buffer.cut());
        if let Some(text) = taken {
            cx.write_to_clipboard(ClipboardItem::new_string(text));
        }
    }

    fn paste(&mut self, _: &Paste, _: &mut Window, cx: &mut Context<Self>) {
        if let Some(text) = cx.read_from_clipboard().and_then(|item| item.text()) {
            self.edit(cx, |buffer| buffer.insert(&text));
        }
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, _: &mut Window, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;
        if let Some(text) = typed_text(&keystroke.modifiers, keystroke.key_char.as_deref()) {
            let text = text.to_string();
            self.edit(cx, |buffer| buffer.insert(&text));
            cx.stop_propagation();
        }
    }

    fn on_mouse_down(&mut self, _: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        if self.chrome.suppresses_selection() {
            return;
        }
        window.focus(&self.focus_handle, cx);
    }

    fn render_header(&self, running: bool, theme: &DataQuillTheme) -> impl IntoElement {
        let hover = theme.colors.element_hover;

        div()
            .h(sizes::PANEL_HEADER_HEIGHT)
            .flex_shrink_0()
            .flex()
            .items_center()
            .justify_between()
            .px(spacing::SM)
            .border_b_1()
            .border_color(theme.colors.border)
            .child(
                div()
                    .text_size(px(14.0))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(theme.colors.text)
                    .child("SQL Editor"),
            )
            .child(
                div()
                    .id("run-query")
                    .flex()
                    .items_center()
                    .gap(spacing::XS)
                    .h(px(26.0))
                    .px(spacing::SM)
                    .rounded(radius::MD)
                    .border_1()
                    .border_color(theme.colors.border)
                    .text_size(px(12.0))
                    .text_color(theme.colors.text)
                    .cursor_pointer()
                    .hover(move |s| s.bg(hover))
                    .on_click(|_, _window, cx| {
                        // Detached; the revision watch redraws on completion
                        let _ = cx.global::<Workbench>().run_query();
                    })
                    .child(if running {
                        Spinner::small().into_any_element()
                    } else {
                        Icon::new(IconName::Play)
                            .size(IconSize::Small)
                            .color(theme.colors.status_success)
                            .into_any_element()
                    })
                    .child("Run Query"),
            )
    }

    fn render_lines(&self, focused: bool, theme: &DataQuillTheme) -> impl IntoElement {
        let selection = theme.colors.selection;
        let caret = theme.colors.accent;

        div().flex().flex_col().children(self.buffer.lines().into_iter().map(move |segments| {
            div().h(sizes::EDITOR_LINE_HEIGHT).flex().items_center().children(
                segments.into_iter().map(move |segment| match segment {
                    Segment::Text { text, selected } => div()
                        .whitespace_nowrap()
                        .when(selected, |el| el.bg(selection))
                        .child(text)
                        .into_any_element(),
                    Segment::Caret => div()
                        .w(px(1.0))
                        .h(sizes::EDITOR_LINE_HEIGHT)
                        .when(focused, |el| el.bg(caret))
                        .into_any_element(),
                }),
            )
        }))
    }
}

impl Focusable for QueryEditor {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for QueryEditor {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<DataQuillTheme>();
        let running = cx.global::<Workbench>().query_state().is_running();
        let focused = self.focus_handle.is_focused(window);

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(theme.colors.surface)
            .rounded(radius::LG)
            .border_1()
            .border_color(if focused { theme.colors.accent } else { theme.colors.border })
            .overflow_hidden()
            .child(self.render_header(running, theme))
            .child(
                div()
                    .id("query-editor")
                    .track_focus(&self.focus_handle)
                    .key_context("QueryEditor")
                    .on_action(cx.listener(Self::backspace))
                    .on_action(cx.listener(Self::delete))
                    .on_action(cx.listener(Self::newline))
                    .on_action(cx.listener(Self::indent))
                    .on_action(cx.listener(Self::left))
                    .on_action(cx.listener(Self::right))
                    .on_action(cx.listener(Self::up))
                    .on_action(cx.listener(Self::down))
                    .on_action(cx.listener(Self::select_left))
                    .on_action(cx.listener(Self::select_right))
                    .on_action(cx.listener(Self::home))
                    .on_action(cx.listener(Self::end))
                    .on_action(cx.listener(Self::select_all))
                    .on_action(cx.listener(Self::copy))
                    .on_action(cx.listener(Self::cut))
                    .on_action(cx.listener(Self::paste))
                    .on_key_down(cx.listener(Self::on_key_down))
                    .on_mouse_down(MouseButton::Left, cx.listener(Self::on_mouse_down))
                    .flex_1()
                    .p(spacing::MD)
                    .overflow_y_scroll()
                    .cursor_text()
                    .font_family("monospace")
                    .text_size(px(13.0))
                    .text_color(theme.colors.text)
                    .child(self.render_lines(focused, theme)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_keys_are_typed() {
        assert_eq!(typed_text(&Modifiers::default(), Some("a")), Some("a"));
        assert_eq!(typed_text(&Modifiers::shift(), Some("A")), Some("A"));
        assert_eq!(typed_text(&Modifiers::default(), Some("é")), Some("é"));
        assert_eq!(typed_text(&Modifiers::default(), Some(" ")), Some(" "));
    }

    #[test]
    fn test_shortcuts_and_control_keys_are_not_typed() {
        assert_eq!(typed_text(&Modifiers::command(), Some("c")), None);
        assert_eq!(typed_text(&Modifiers::control(), Some("c")), None);
        assert_eq!(typed_text(&Modifiers::default(), Some("\n")), None);
        assert_eq!(typed_text(&Modifiers::default(), Some("\t")), None);
        assert_eq!(typed_text(&Modifiers::default(), None), None);
    }
}
