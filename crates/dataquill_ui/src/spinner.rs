//! Spinner component for loading indicators.

use gpui::{
    div, prelude::*, px, Animation, AnimationExt, App, IntoElement, Pixels, RenderOnce, Window,
};
use std::time::Duration;

use crate::DataQuillTheme;

/// Size variants for the Spinner component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinnerSize {
    /// Small spinner: 14px, for buttons
    Small,
    /// Medium spinner: 20px (default)
    #[default]
    Medium,
    /// Large spinner: 32px, for empty panels
    Large,
}

impl SpinnerSize {
    pub fn pixels(&self) -> Pixels {
        match self {
            Self::Small => px(14.0),
            Self::Medium => px(20.0),
            Self::Large => px(32.0),
        }
    }

    pub fn border_width(&self) -> Pixels {
        match self {
            Self::Small | Self::Medium => px(2.0),
            Self::Large => px(3.0),
        }
    }
}

/// A pulsing ring shown while a query or refresh is in flight.
#[derive(IntoElement)]
pub struct Spinner {
    size: SpinnerSize,
}

impl Spinner {
    pub fn new() -> Self {
        Self { size: SpinnerSize::default() }
    }

    pub fn size(mut self, size: SpinnerSize) -> Self {
        self.size = size;
        self
    }

    pub fn small() -> Self {
        Self::new().size(SpinnerSize::Small)
    }

    pub fn large() -> Self {
        Self::new().size(SpinnerSize::Large)
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOnce for Spinner {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<DataQuillTheme>();
        let size = self.size.pixels();
        let border_width = self.size.border_width();

        div()
            .relative()
            .flex_shrink_0()
            .size(size)
            .rounded_full()
            .border(border_width)
            .border_color(theme.colors.border)
            .child(
                div()
                    .absolute()
                    .inset_0()
                    .rounded_full()
                    .border_t(border_width)
                    .border_color(theme.colors.accent)
                    .with_animation(
                        "spinner-pulse",
                        Animation::new(Duration::from_millis(900)).repeat().with_easing(gpui::linear),
                        |element, delta| element.opacity(0.35 + 0.65 * (1.0 - delta)),
                    ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_sizes() {
        assert_eq!(SpinnerSize::Small.pixels(), px(14.0));
        assert_eq!(SpinnerSize::Medium.pixels(), px(20.0));
        assert_eq!(SpinnerSize::Large.border_width(), px(3.0));
    }

    #[test]
    fn test_spinner_construction() {
        assert_eq!(Spinner::new().size, SpinnerSize::Medium);
        assert_eq!(Spinner::small().size, SpinnerSize::Small);
        assert_eq!(Spinner::large().size, SpinnerSize::Large);
    }
}
