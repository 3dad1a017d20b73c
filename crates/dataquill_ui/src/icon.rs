//! Icon system for the workbench.
//!
//! Icons render as unicode glyphs; [`IconName`] covers the schema node kinds
//! plus the handful of actions and status markers the panels show.

use dataquill_core::SchemaIcon;
use gpui::{
    div, prelude::*, px, App, Hsla, IntoElement, Pixels, RenderOnce, SharedString, Window,
};

use crate::DataQuillTheme;

/// All available icons in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconName {
    // Navigation
    ChevronRight,
    ChevronDown,

    // Actions
    Close,
    Refresh,
    Play,

    // Schema objects
    Database,
    Table,
    Folder,
    Column,
    /// Primary keys and primary indexes
    Key,
    /// Foreign key columns
    Link,
    Index,

    // Status indicators
    Check,
    Warning,
    Error,
    Info,

    // Application
    App,
}

impl IconName {
    /// Icon name, as used for asset lookup.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChevronRight => "chevron_right",
            Self::ChevronDown => "chevron_down",
            Self::Close => "close",
            Self::Refresh => "refresh",
            Self::Play => "play",
            Self::Database => "database",
            Self::Table => "table",
            Self::Folder => "folder",
            Self::Column => "column",
            Self::Key => "key",
            Self::Link => "link",
            Self::Index => "index",
            Self::Check => "check",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::App => "dataquill",
        }
    }

    /// Unicode glyph the icon renders as.
    pub fn as_char(&self) -> &'static str {
        match self {
            Self::ChevronRight => "›",
            Self::ChevronDown => "⌄",
            Self::Close => "×",
            Self::Refresh => "↻",
            Self::Play => "▶",
            Self::Database => "⛁",
            Self::Table => "⊞",
            Self::Folder => "📁",
            Self::Column => "▭",
            Self::Key => "🔑",
            Self::Link => "🔗",
            Self::Index => "⊟",
            Self::Check => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
            Self::Info => "ℹ",
            Self::App => "✒",
        }
    }
}

impl From<SchemaIcon> for IconName {
    fn from(icon: SchemaIcon) -> Self {
        match icon {
            SchemaIcon::Database => Self::Database,
            SchemaIcon::Table => Self::Table,
            SchemaIcon::Folder => Self::Folder,
            SchemaIcon::Column => Self::Column,
            SchemaIcon::Key => Self::Key,
            SchemaIcon::Link => Self::Link,
            SchemaIcon::Index => Self::Index,
        }
    }
}

/// Size variants for icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSize {
    /// Extra small: 12px
    XSmall,
    /// Small: 14px
    Small,
    /// Medium: 16px (default)
    #[default]
    Medium,
    /// Extra large: 48px, for empty and error states
    Hero,
}

impl IconSize {
    pub fn pixels(&self) -> Pixels {
        match self {
            Self::XSmall => px(12.0),
            Self::Small => px(14.0),
            Self::Medium => px(16.0),
            Self::Hero => px(48.0),
        }
    }
}

/// Icon component.
#[derive(IntoElement)]
pub struct Icon {
    name: IconName,
    size: IconSize,
    color: Option<Hsla>,
}

impl Icon {
    pub fn new(name: IconName) -> Self {
        Self { name, size: IconSize::default(), color: None }
    }

    pub fn size(mut self, size: IconSize) -> Self {
        self.size = size;
        self
    }

    /// Override the theme's text color.
    pub fn color(mut self, color: Hsla) -> Self {
        self.color = Some(color);
        self
    }
}

impl RenderOnce for Icon {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<DataQuillTheme>();
        let size = self.size.pixels();
        let color = self.color.unwrap_or(theme.colors.text);

        div()
            .size(size)
            .flex()
            .flex_shrink_0()
            .items_center()
            .justify_center()
            .text_color(color)
            .text_size(size)
            .line_height(size)
            .child(SharedString::from(self.name.as_char()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_sizes() {
        assert_eq!(IconSize::XSmall.pixels(), px(12.0));
        assert_eq!(IconSize::default().pixels(), px(16.0));
        assert_eq!(IconSize::Hero.pixels(), px(48.0));
    }

    #[test]
    fn test_schema_icon_mapping() {
        assert_eq!(IconName::from(SchemaIcon::Key), IconName::Key);
        assert_eq!(IconName::from(SchemaIcon::Link), IconName::Link);
        assert_eq!(IconName::from(SchemaIcon::Folder).name(), "folder");
    }

    #[test]
    fn test_icon_chars() {
        assert_eq!(IconName::ChevronRight.as_char(), "›");
        assert_eq!(IconName::Database.as_char(), "⛁");
        assert_eq!(IconName::Check.as_char(), "✓");
    }
}
