//! Results panel.
//!
//! Draws the workbench's [`ResultsView`]: an empty hint, a loading state, the
//! query error, a success acknowledgement for statements without rows, or a
//! grid with "Result" and "Query Plan" tabs and a footer.

use dataquill_core::{ResultsTab, ResultsView, TableView, Workbench};
use gpui::{
    div, prelude::*, px, AnyElement, App, Context, FocusHandle, Focusable, Render, SharedString,
    Window,
};

use crate::icon::{Icon, IconName, IconSize};
use crate::layout::{radius, sizes, spacing};
use crate::spinner::Spinner;
use crate::DataQuillTheme;

/// Bottom-right panel showing the latest query outcome.
pub struct ResultsPanel {
    focus_handle: FocusHandle,
    active_tab: ResultsTab,
}

impl ResultsPanel {
    pub fn new(cx: &mut Context<Self>) -> Self {
        Self { focus_handle: cx.focus_handle(), active_tab: ResultsTab::default() }
    }

    pub fn active_tab(&self) -> ResultsTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: ResultsTab, cx: &mut Context<Self>) {
        if self.active_tab != tab {
            self.active_tab = tab;
            cx.notify();
        }
    }

    /// Centered icon plus one or two lines of text.
    fn render_message(
        &self,
        icon: AnyElement,
        title: SharedString,
        title_color: gpui::Hsla,
        detail: Option<AnyElement>,
    ) -> AnyElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap(spacing::MD)
            .p(spacing::LG)
            .child(icon)
            .child(
                div()
                    .text_size(px(14.0))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(title_color)
                    .child(title),
            )
            .children(detail)
            .into_any_element()
    }

    fn render_tabs(&self, theme: &DataQuillTheme, cx: &Context<Self>) -> impl IntoElement {
        div()
            .h(sizes::TAB_BAR_HEIGHT)
            .flex_shrink_0()
            .flex()
            .items_end()
            .gap(spacing::XS)
            .px(spacing::SM)
            .border_b_1()
            .border_color(theme.colors.border)
            .children(ResultsTab::ALL.into_iter().map(|tab| {
                let active = tab == self.active_tab;
                div()
                    .id(tab.label())
                    .px(spacing::MD)
                    .py(spacing::XS)
                    .text_size(px(12.0))
                    .cursor_pointer()
                    .text_color(if active { theme.colors.text } else { theme.colors.text_muted })
                    .when(active, |el| el.border_b_2().border_color(theme.colors.accent))
                    .on_click(cx.listener(move |this, _, _window, cx| this.select_tab(tab, cx)))
                    .child(tab.label())
            }))
    }

    fn render_grid(&self, table: &TableView, theme: &DataQuillTheme) -> impl IntoElement {
        let cell = |text: SharedString| {
            div()
                .w(sizes::GRID_COLUMN_WIDTH)
                .flex_shrink_0()
                .px(spacing::SM)
                .overflow_hidden()
                .whitespace_nowrap()
                .child(text)
        };

        let header = div()
            .h(sizes::GRID_ROW_HEIGHT)
            .flex()
            .items_center()
            .bg(theme.colors.elevated_surface)
            .border_b_1()
            .border_color(theme.colors.border)
            .font_weight(gpui::FontWeight::SEMIBOLD)
            .text_color(theme.colors.text)
            .children(table.headers.iter().map(|h| cell(h.clone().into())));

        let rows = table.rows.iter().enumerate().map(|(ix, row)| {
            div()
                .h(sizes::GRID_ROW_HEIGHT)
                .flex()
                .items_center()
                .text_color(theme.colors.text_muted)
                .when(ix % 2 == 1, |el| el.bg(theme.colors.border_variant.opacity(0.4)))
                .children(row.iter().map(|value| cell(value.clone().into())))
        });

        div()
            .id("results-grid")
            .size_full()
            .overflow_scroll()
            .font_family("monospace")
            .text_size(px(12.0))
            .child(div().flex().flex_col().child(header).children(rows))
    }

    fn render_plan(&self, table: &TableView, theme: &DataQuillTheme) -> impl IntoElement {
        div()
            .id("query-plan")
            .size_full()
            .overflow_y_scroll()
            .p(spacing::LG)
            .font_family("monospace")
            .text_size(px(12.0))
            .text_color(theme.colors.text)
            .child(table.query_plan.clone())
    }

    fn render_footer(&self, table: &TableView, theme: &DataQuillTheme) -> impl IntoElement {
        div()
            .h(sizes::FOOTER_HEIGHT)
            .flex_shrink_0()
            .flex()
            .items_center()
            .justify_between()
            .px(spacing::LG)
            .border_t_1()
            .border_color(theme.colors.border)
            .text_size(px(11.0))
            .text_color(theme.colors.text_muted)
            .child(table.record_count.clone())
            .child(table.execution_time.clone())
    }

    fn render_table(
        &self,
        table: &TableView,
        theme: &DataQuillTheme,
        cx: &Context<Self>,
    ) -> AnyElement {
        let body = match self.active_tab {
            ResultsTab::Result => self.render_grid(table, theme).into_any_element(),
            ResultsTab::QueryPlan => self.render_plan(table, theme).into_any_element(),
        };

        div()
            .size_full()
            .flex()
            .flex_col()
            .child(self.render_tabs(theme, cx))
            .child(div().flex_1().overflow_hidden().child(body))
            .child(self.render_footer(table, theme))
            .into_any_element()
    }

    fn render_view(
        &self,
        view: &ResultsView,
        theme: &DataQuillTheme,
        cx: &Context<Self>,
    ) -> AnyElement {
        let headline = SharedString::from(view.headline().unwrap_or_default().to_string());
        match view {
            ResultsView::Empty => div()
                .size_full()
                .flex()
                .items_center()
                .justify_center()
                .text_size(px(13.0))
                .text_color(theme.colors.text_muted)
                .child(headline)
                .into_any_element(),
            ResultsView::Loading => div()
                .size_full()
                .flex()
                .items_center()
                .justify_center()
                .gap(spacing::MD)
                .text_size(px(13.0))
                .text_color(theme.colors.text_muted)
                .child(Spinner::new())
                .child(headline)
                .into_any_element(),
            ResultsView::Error { message } => self.render_message(
                Icon::new(IconName::Error)
                    .size(IconSize::Hero)
                    .color(theme.colors.status_error)
                    .into_any_element(),
                headline,
                theme.colors.status_error,
                Some(
                    div()
                        .max_w(px(640.0))
                        .p(spacing::SM)
                        .rounded(radius::MD)
                        .bg(theme.colors.status_error.opacity(0.1))
                        .font_family("monospace")
                        .text_size(px(12.0))
                        .text_color(theme.colors.status_error)
                        .child(message.clone())
                        .into_any_element(),
                ),
            ),
            ResultsView::Acknowledged { summary } => self.render_message(
                Icon::new(IconName::Check)
                    .size(IconSize::Hero)
                    .color(theme.colors.status_success)
                    .into_any_element(),
                headline,
                theme.colors.status_success,
                Some(
                    div()
                        .text_size(px(12.0))
                        .text_color(theme.colors.text_muted)
                        .child(summary.clone())
                        .into_any_element(),
                ),
            ),
            ResultsView::Table(table) => self.render_table(table, theme, cx),
        }
    }
}

impl Focusable for ResultsPanel {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for ResultsPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<DataQuillTheme>();
        let view = cx.global::<Workbench>().results_view();

        div()
            .track_focus(&self.focus_handle)
            .key_context("ResultsPanel")
            .size_full()
            .flex()
            .flex_col()
            .bg(theme.colors.surface)
            .rounded(radius::LG)
            .border_1()
            .border_color(theme.colors.border)
            .overflow_hidden()
            .child(self.render_view(&view, theme, cx))
    }
}
