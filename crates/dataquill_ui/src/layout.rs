//! Spacing and sizing constants, plus conversions from GPUI geometry to the
//! core layout types.

use dataquill_core::{Bounds, Point};
use gpui::Pixels;

/// Standard spacing constants for UI layout.
pub mod spacing {
    use gpui::{px, Pixels};

    /// Extra small spacing: 4px
    pub const XS: Pixels = px(4.0);
    /// Small spacing: 8px
    pub const SM: Pixels = px(8.0);
    /// Medium spacing: 12px
    pub const MD: Pixels = px(12.0);
    /// Large spacing: 16px
    pub const LG: Pixels = px(16.0);
}

/// Standard border radius constants.
pub mod radius {
    use gpui::{px, Pixels};

    pub const SM: Pixels = px(2.0);
    pub const MD: Pixels = px(4.0);
    pub const LG: Pixels = px(8.0);
}

/// Standard sizing constants.
pub mod sizes {
    use gpui::{px, Pixels};

    /// Application title bar height
    pub const TITLE_BAR_HEIGHT: Pixels = px(44.0);
    /// Panel header height
    pub const PANEL_HEADER_HEIGHT: Pixels = px(36.0);
    /// Results tab strip height
    pub const TAB_BAR_HEIGHT: Pixels = px(30.0);
    /// Results footer height
    pub const FOOTER_HEIGHT: Pixels = px(28.0);

    /// Divider handle thickness
    pub const RESIZER_SIZE: Pixels = px(6.0);

    /// Tree row height
    pub const TREE_ITEM_HEIGHT: Pixels = px(24.0);
    /// Tree indent per depth level
    pub const TREE_INDENT: Pixels = px(16.0);

    /// Results grid cell width
    pub const GRID_COLUMN_WIDTH: Pixels = px(180.0);
    /// Results grid row height
    pub const GRID_ROW_HEIGHT: Pixels = px(26.0);

    /// Editor line height
    pub const EDITOR_LINE_HEIGHT: Pixels = px(20.0);
}

/// Convert pixels to f32 for calculations.
pub fn to_f32(pixels: Pixels) -> f32 {
    pixels.into()
}

/// A GPUI point in the core layout's coordinate type.
pub fn to_point(point: gpui::Point<Pixels>) -> Point {
    Point::new(to_f32(point.x), to_f32(point.y))
}

/// GPUI bounds in the core layout's coordinate type.
pub fn to_bounds(bounds: gpui::Bounds<Pixels>) -> Bounds {
    Bounds::new(
        to_f32(bounds.origin.x),
        to_f32(bounds.origin.y),
        to_f32(bounds.size.width),
        to_f32(bounds.size.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpui::{point, px, size};

    #[test]
    fn test_to_point() {
        assert_eq!(to_point(point(px(12.5), px(40.0))), Point::new(12.5, 40.0));
    }

    #[test]
    fn test_to_bounds() {
        let bounds = gpui::Bounds::new(point(px(8.0), px(52.0)), size(px(900.0), px(640.0)));
        assert_eq!(to_bounds(bounds), Bounds::new(8.0, 52.0, 900.0, 640.0));
    }
}
