//! Toast notifications.
//!
//! The core reports refresh progress and DDL acknowledgements through a
//! notification channel; the workspace forwards each [`Notification`] to the
//! [`ToastLayer`]. One toast is visible at a time and a newer one replaces it.
//! Toasts dismiss themselves after [`DEFAULT_TOAST_DURATION`].

use dataquill_core::{Notification, Severity};
use gpui::{
    div, prelude::*, px, Context, DismissEvent, Entity, EventEmitter, Render, SharedString,
    Subscription, Task, Window,
};
use std::time::Duration;

use crate::icon::{Icon, IconName, IconSize};
use crate::layout::{radius, spacing};
use crate::DataQuillTheme;

/// How long a toast stays up without interaction.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(5);

/// Icon shown for a severity.
pub fn severity_icon(severity: Severity) -> IconName {
    match severity {
        Severity::Info => IconName::Info,
        Severity::Success => IconName::Check,
        Severity::Warning => IconName::Warning,
        Severity::Error => IconName::Error,
    }
}

/// A single toast.
pub struct Toast {
    title: SharedString,
    description: SharedString,
    severity: Severity,
}

impl Toast {
    pub fn new(notification: Notification) -> Self {
        let Notification { title, description, severity } = notification;
        Self { title: title.into(), description: description.into(), severity }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn dismiss(&mut self, cx: &mut Context<Self>) {
        cx.emit(DismissEvent);
    }
}

impl EventEmitter<DismissEvent> for Toast {}

impl Render for Toast {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<DataQuillTheme>();
        let status = theme.colors.severity(self.severity);
        let hover = theme.colors.element_hover;

        div()
            .id("toast")
            .flex()
            .items_start()
            .gap(spacing::MD)
            .px(spacing::LG)
            .py(spacing::MD)
            .min_w(px(300.0))
            .max_w(px(420.0))
            .rounded(radius::LG)
            .border_1()
            .border_color(status.opacity(0.4))
            .bg(theme.colors.elevated_surface)
            .shadow_md()
            .child(Icon::new(severity_icon(self.severity)).size(IconSize::Medium).color(status))
            .child(
                div()
                    .flex_1()
                    .flex()
                    .flex_col()
                    .gap(spacing::XS)
                    .child(
                        div()
                            .text_size(px(13.0))
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .text_color(theme.colors.text)
                            .child(self.title.clone()),
                    )
                    .when(!self.description.is_empty(), |el| {
                        el.child(
                            div()
                                .text_size(px(12.0))
                                .text_color(theme.colors.text_muted)
                                .child(self.description.clone()),
                        )
                    }),
            )
            .child(
                div()
                    .id("toast-close")
                    .flex()
                    .items_center()
                    .justify_center()
                    .size(px(20.0))
                    .rounded(radius::MD)
                    .cursor_pointer()
                    .hover(move |s| s.bg(hover))
                    .on_click(cx.listener(|this, _, _, cx| this.dismiss(cx)))
                    .child(
                        Icon::new(IconName::Close)
                            .size(IconSize::Small)
                            .color(theme.colors.text_muted),
                    ),
            )
    }
}

struct ActiveToast {
    toast: Entity<Toast>,
    _subscription: Subscription,
    _dismiss_task: Task<()>,
}

/// Hosts the visible toast in the bottom-right corner of the workspace.
pub struct ToastLayer {
    active_toast: Option<ActiveToast>,
    duration: Duration,
}

impl Default for ToastLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastLayer {
    pub fn new() -> Self {
        Self { active_toast: None, duration: DEFAULT_TOAST_DURATION }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Show a notification, replacing any visible toast.
    pub fn show(&mut self, notification: Notification, cx: &mut Context<Self>) {
        tracing::trace!(title = %notification.title, severity = %notification.severity, "Showing toast");
        let toast = cx.new(|_| Toast::new(notification));

        let subscription = cx.subscribe(&toast, |this, _, _: &DismissEvent, cx| {
            this.hide(cx);
        });

        let duration = self.duration;
        let dismiss_task = cx.spawn(async move |this, cx| {
            cx.background_executor().timer(duration).await;
            if let Some(this) = this.upgrade() {
                let _ = this.update(cx, |this, cx| this.hide(cx));
            }
        });

        self.active_toast =
            Some(ActiveToast { toast, _subscription: subscription, _dismiss_task: dismiss_task });
        cx.notify();
    }

    pub fn hide(&mut self, cx: &mut Context<Self>) {
        if self.active_toast.take().is_some() {
            cx.notify();
        }
    }

    pub fn has_active_toast(&self) -> bool {
        self.active_toast.is_some()
    }
}

impl Render for ToastLayer {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let Some(active_toast) = &self.active_toast else {
            return div();
        };

        div()
            .absolute()
            .bottom(spacing::LG)
            .right(spacing::LG)
            .child(active_toast.toast.clone())
    }
}
