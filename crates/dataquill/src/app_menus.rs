//! Application menu bar.

use gpui::{App, Menu, MenuItem, OsAction};
use dataquill_ui::key_bindings::editor::{Copy, Cut, Paste, SelectAll};
use dataquill_ui::key_bindings::{
    About, CloseWindow, CollapseAllNodes, ExpandAllNodes, Minimize, Quit, RefreshSchema, RunQuery,
    Zoom,
};

/// Build the application menu structure.
pub fn app_menus(_cx: &mut App) -> Vec<Menu> {
    vec![
        Menu {
            name: "DataQuill".into(),
            items: vec![
                MenuItem::action("About DataQuill", About),
                MenuItem::separator(),
                #[cfg(target_os = "macos")]
                MenuItem::os_submenu("Services", gpui::SystemMenuType::Services),
                #[cfg(target_os = "macos")]
                MenuItem::separator(),
                MenuItem::action("Quit DataQuill", Quit),
            ],
        },
        Menu {
            name: "Edit".into(),
            items: vec![
                MenuItem::os_action("Cut", Cut, OsAction::Cut),
                MenuItem::os_action("Copy", Copy, OsAction::Copy),
                MenuItem::os_action("Paste", Paste, OsAction::Paste),
                MenuItem::separator(),
                MenuItem::os_action("Select All", SelectAll, OsAction::SelectAll),
            ],
        },
        Menu {
            name: "Query".into(),
            items: vec![
                MenuItem::action("Run Query", RunQuery),
                MenuItem::separator(),
                MenuItem::action("Refresh Schema", RefreshSchema),
            ],
        },
        Menu {
            name: "View".into(),
            items: vec![
                MenuItem::action("Expand All", ExpandAllNodes),
                MenuItem::action("Collapse All", CollapseAllNodes),
            ],
        },
        Menu {
            name: "Window".into(),
            items: vec![
                MenuItem::action("Minimize", Minimize),
                MenuItem::action("Zoom", Zoom),
                MenuItem::separator(),
                MenuItem::action("Close Window", CloseWindow),
            ],
        },
        Menu { name: "Help".into(), items: vec![MenuItem::action("About DataQuill", About)] },
    ]
}
