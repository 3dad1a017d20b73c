//! Schema browser panel.
//!
//! Renders the workbench's schema tree as an indented list. Clicking a row
//! with children toggles it; the header button reloads the schema.

use dataquill_core::schema_tree::EMPTY_SCHEMA_TEXT;
use dataquill_core::{SchemaIcon, SchemaRefreshState, SchemaTree, Workbench};
use gpui::{
    div, prelude::*, px, App, Context, FocusHandle, Focusable, Hsla, Render, SharedString, Window,
};

use crate::icon::{Icon, IconName, IconSize};
use crate::layout::{radius, sizes, spacing};
use crate::spinner::Spinner;
use crate::theme::ThemeColors;
use crate::DataQuillTheme;

/// A visible tree row, detached from the tree lock for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: SharedString,
    pub name: SharedString,
    pub detail: Option<SharedString>,
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub icon: SchemaIcon,
}

impl TreeRow {
    fn chevron(&self) -> Option<IconName> {
        match (self.has_children, self.is_expanded) {
            (false, _) => None,
            (true, true) => Some(IconName::ChevronDown),
            (true, false) => Some(IconName::ChevronRight),
        }
    }
}

/// Collect the rows currently visible in `tree`.
pub fn tree_rows(tree: &SchemaTree) -> Vec<TreeRow> {
    tree.visible_rows()
        .map(|row| TreeRow {
            id: row.node.id.clone().into(),
            name: row.node.name.clone().into(),
            detail: row.node.detail().map(SharedString::from),
            depth: row.depth,
            has_children: row.has_children,
            is_expanded: row.is_expanded,
            icon: row.icon,
        })
        .collect()
}

/// Tint for a schema icon.
pub fn icon_color(icon: SchemaIcon, colors: &ThemeColors) -> Hsla {
    match icon {
        SchemaIcon::Database => colors.accent,
        SchemaIcon::Table => colors.status_success,
        SchemaIcon::Folder => colors.status_info,
        SchemaIcon::Column => colors.icon_column,
        SchemaIcon::Key => colors.status_warning,
        SchemaIcon::Link => colors.text_accent,
        SchemaIcon::Index => colors.icon_index,
    }
}

/// Left-hand panel listing databases, tables, columns and indexes.
pub struct SchemaBrowserPanel {
    focus_handle: FocusHandle,
}

impl SchemaBrowserPanel {
    pub fn new(cx: &mut Context<Self>) -> Self {
        Self { focus_handle: cx.focus_handle() }
    }

    fn render_header(&self, refreshing: bool, theme: &DataQuillTheme) -> impl IntoElement {
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
                    .child("Schema Explorer"),
            )
            .child(
                div()
                    .id("refresh-schema")
                    .flex()
                    .items_center()
                    .justify_center()
                    .size(px(26.0))
                    .rounded(radius::MD)
                    .border_1()
                    .border_color(theme.colors.border)
                    .cursor_pointer()
                    .hover(move |s| s.bg(hover))
                    .on_click(|_, _window, cx| {
                        // Detached; the revision watch redraws on completion
                        let _ = cx.global::<Workbench>().refresh_schema();
                    })
                    .child(if refreshing {
                        Spinner::small().into_any_element()
                    } else {
                        Icon::new(IconName::Refresh).size(IconSize::Small).into_any_element()
                    }),
            )
    }

    fn render_row(&self, row: TreeRow, theme: &DataQuillTheme) -> impl IntoElement {
        let indent = sizes::TREE_INDENT * row.depth as f32 + spacing::XS;
        let hover = theme.colors.element_hover;
        let id = row.id.clone();

        div()
            .id(format!("schema-row-{}", row.id))
            .h(sizes::TREE_ITEM_HEIGHT)
            .w_full()
            .flex()
            .items_center()
            .gap(spacing::XS)
            .pl(indent)
            .pr(spacing::SM)
            .rounded(radius::SM)
            .hover(move |s| s.bg(hover))
            .when(row.has_children, |el| {
                el.cursor_pointer().on_click(move |_, _window, cx| {
                    cx.global::<Workbench>().toggle_node(&id);
                })
            })
            .child(div().w(px(16.0)).flex_shrink_0().when_some(row.chevron(), |el, chevron| {
                el.child(Icon::new(chevron).size(IconSize::Small).color(theme.colors.text_muted))
            }))
            .child(
                Icon::new(IconName::from(row.icon))
                    .size(IconSize::Small)
                    .color(icon_color(row.icon, &theme.colors)),
            )
            .child(
                div()
                    .text_size(px(13.0))
                    .text_color(theme.colors.text)
                    .whitespace_nowrap()
                    .overflow_hidden()
                    .child(row.name),
            )
            .when_some(row.detail, |el, detail| {
                el.child(
                    div()
                        .text_size(px(11.0))
                        .text_color(theme.colors.text_muted)
                        .whitespace_nowrap()
                        .child(detail),
                )
            })
    }

    fn render_empty_state(&self, theme: &DataQuillTheme) -> impl IntoElement {
        div()
            .p(spacing::LG)
            .text_size(px(13.0))
            .text_color(theme.colors.text_muted)
            .child(EMPTY_SCHEMA_TEXT)
    }
}

impl Focusable for SchemaBrowserPanel {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for SchemaBrowserPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<DataQuillTheme>();
        let workbench = cx.global::<Workbench>();
        let rows = workbench.with_tree(tree_rows);
        let refresh_state = workbench.refresh_state();

        let content = if rows.is_empty() {
            self.render_empty_state(theme).into_any_element()
        } else {
            div()
                .flex()
                .flex_col()
                .children(rows.into_iter().map(|row| self.render_row(row, theme)))
                .into_any_element()
        };

        div()
            .track_focus(&self.focus_handle)
            .key_context("SchemaBrowser")
            .size_full()
            .flex()
            .flex_col()
            .bg(theme.colors.surface)
            .rounded(radius::LG)
            .border_1()
            .border_color(theme.colors.border)
            .overflow_hidden()
            .child(self.render_header(refresh_state.is_refreshing(), theme))
            .when_some(
                match refresh_state {
                    SchemaRefreshState::Failed { message } => Some(message),
                    _ => None,
                },
                |el, message| {
                    el.child(
                        div()
                            .px(spacing::SM)
                            .py(spacing::XS)
                            .text_size(px(12.0))
                            .text_color(theme.colors.status_error)
                            .child(message),
                    )
                },
            )
            .child(
                div()
                    .id("schema-tree")
                    .flex_1()
                    .p(spacing::XS)
                    .overflow_y_scroll()
                    .child(content),
            )
    }
}
