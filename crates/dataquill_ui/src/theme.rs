//! Workbench colors.
//!
//! Two fixed palettes, Catppuccin Mocha for dark windows and Latte for light
//! ones. The active [`DataQuillTheme`] is a GPUI global chosen from the
//! window appearance at startup.

use dataquill_core::Severity;
use gpui::{hsla, Global, Hsla, WindowAppearance};

/// Opaque color from a hue in degrees.
fn hue(degrees: f32, s: f32, l: f32) -> Hsla {
    hsla(degrees / 360.0, s, l, 1.0)
}

/// Colors the panels draw with, grouped by where they show up.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Surfaces
    /// Behind the three panels.
    pub background: Hsla,
    /// Panel bodies and the results grid.
    pub surface: Hsla,
    /// Title bar, panel headers and toasts.
    pub elevated_surface: Hsla,
    /// Tree rows, tabs and buttons under the pointer.
    pub element_hover: Hsla,

    // Text
    pub text: Hsla,
    /// Data types, footers, hints.
    pub text_muted: Hsla,
    pub text_accent: Hsla,

    // Lines
    /// Panel outlines and dividers at rest.
    pub border: Hsla,
    /// Grid cell separators.
    pub border_variant: Hsla,

    // Accent
    /// Run button, active tab, dragged divider.
    pub accent: Hsla,
    pub accent_hover: Hsla,
    /// Selected range in the query editor.
    pub selection: Hsla,

    // Status, also used for primary and foreign key markers
    pub status_success: Hsla,
    pub status_warning: Hsla,
    pub status_error: Hsla,
    pub status_info: Hsla,

    // Schema tree icons
    pub icon_column: Hsla,
    /// Secondary and unique indexes.
    pub icon_index: Hsla,
}

impl ThemeColors {
    /// Catppuccin Mocha.
    pub fn dark() -> Self {
        let blue = hue(217.0, 0.92, 0.76);
        let surface0 = hue(237.0, 0.16, 0.23);
        let surface1 = hue(233.0, 0.13, 0.31);
        Self {
            background: hue(240.0, 0.21, 0.15),
            surface: surface0,
            elevated_surface: surface1,
            element_hover: hue(232.0, 0.12, 0.39),
            text: hue(226.0, 0.64, 0.88),
            text_muted: hue(228.0, 0.24, 0.72),
            text_accent: blue,
            border: surface1,
            border_variant: surface0,
            accent: blue,
            accent_hover: hue(232.0, 0.97, 0.85),
            selection: blue.opacity(0.3),
            status_success: hue(115.0, 0.54, 0.76),
            status_warning: hue(41.0, 0.86, 0.83),
            status_error: hue(343.0, 0.81, 0.75),
            status_info: hue(189.0, 0.71, 0.73),
            icon_column: hue(267.0, 0.84, 0.81),
            icon_index: hue(23.0, 0.92, 0.75),
        }
    }

    /// Catppuccin Latte.
    pub fn light() -> Self {
        let blue = hue(220.0, 0.91, 0.54);
        let mantle = hue(220.0, 0.21, 0.92);
        let crust = hue(220.0, 0.22, 0.90);
        Self {
            background: hue(220.0, 0.23, 0.95),
            surface: mantle,
            elevated_surface: crust,
            element_hover: hue(223.0, 0.16, 0.83),
            text: hue(234.0, 0.16, 0.35),
            text_muted: hue(233.0, 0.10, 0.47),
            text_accent: blue,
            border: crust,
            border_variant: mantle,
            accent: blue,
            accent_hover: hue(231.0, 0.97, 0.72),
            selection: blue.opacity(0.2),
            status_success: hue(109.0, 0.58, 0.40),
            status_warning: hue(35.0, 0.77, 0.49),
            status_error: hue(347.0, 0.87, 0.44),
            status_info: hue(197.0, 0.97, 0.46),
            icon_column: hue(266.0, 0.85, 0.58),
            icon_index: hue(22.0, 0.99, 0.52),
        }
    }

    /// Status color for a notification severity.
    pub fn severity(&self, severity: Severity) -> Hsla {
        match severity {
            Severity::Info => self.status_info,
            Severity::Success => self.status_success,
            Severity::Warning => self.status_warning,
            Severity::Error => self.status_error,
        }
    }
}

/// The active palette, stored as a GPUI global.
#[derive(Debug, Clone)]
pub struct DataQuillTheme {
    /// `"dark"` or `"light"`.
    pub name: String,
    pub appearance: WindowAppearance,
    pub colors: ThemeColors,
}

impl DataQuillTheme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            appearance: WindowAppearance::Dark,
            colors: ThemeColors::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            appearance: WindowAppearance::Light,
            colors: ThemeColors::light(),
        }
    }

    /// Theme matching the window's appearance.
    pub fn for_appearance(appearance: WindowAppearance) -> Self {
        match appearance {
            WindowAppearance::Light | WindowAppearance::VibrantLight => Self::light(),
            WindowAppearance::Dark | WindowAppearance::VibrantDark => Self::dark(),
        }
    }
}

impl Default for DataQuillTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Global for DataQuillTheme {}
