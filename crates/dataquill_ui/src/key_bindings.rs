//! Actions and key bindings for the workbench.

use gpui::{actions, App, KeyBinding};

// ============================================================================
// Workspace Actions
// ============================================================================

actions!(
    workspace,
    [
        // Schema
        RefreshSchema,
        ExpandAllNodes,
        CollapseAllNodes,
        // Application
        Quit,
        About,
        CloseWindow,
        Minimize,
        Zoom,
    ]
);

// ============================================================================
// Query Actions
// ============================================================================

actions!(query, [RunQuery]);

// ============================================================================
// Editor Actions
// ============================================================================

pub mod editor {
    use gpui::actions;
    actions!(
        editor,
        [
            Backspace,
            Delete,
            Left,
            Right,
            Up,
            Down,
            SelectLeft,
            SelectRight,
            Home,
            End,
            Newline,
            Indent,
            SelectAll,
            Copy,
            Cut,
            Paste,
        ]
    );
}

// ============================================================================
// Key Binding Registration
// ============================================================================

/// Register all key bindings. Call once during application startup.
pub fn register_key_bindings(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("cmd-enter", RunQuery, Some("Workspace")),
        KeyBinding::new("ctrl-enter", RunQuery, Some("Workspace")),
        KeyBinding::new("cmd-r", RefreshSchema, Some("Workspace")),
        KeyBinding::new("ctrl-r", RefreshSchema, Some("Workspace")),
        KeyBinding::new("cmd-shift-right", ExpandAllNodes, Some("Workspace")),
        KeyBinding::new("cmd-shift-left", CollapseAllNodes, Some("Workspace")),
        KeyBinding::new("cmd-w", CloseWindow, Some("Workspace")),
        KeyBinding::new("cmd-q", Quit, None),
    ]);

    cx.bind_keys([
        KeyBinding::new("backspace", editor::Backspace, Some("QueryEditor")),
        KeyBinding::new("delete", editor::Delete, Some("QueryEditor")),
        KeyBinding::new("left", editor::Left, Some("QueryEditor")),
        KeyBinding::new("right", editor::Right, Some("QueryEditor")),
        KeyBinding::new("up", editor::Up, Some("QueryEditor")),
        KeyBinding::new("down", editor::Down, Some("QueryEditor")),
        KeyBinding::new("shift-left", editor::SelectLeft, Some("QueryEditor")),
        KeyBinding::new("shift-right", editor::SelectRight, Some("QueryEditor")),
        KeyBinding::new("home", editor::Home, Some("QueryEditor")),
        KeyBinding::new("end", editor::End, Some("QueryEditor")),
        KeyBinding::new("enter", editor::Newline, Some("QueryEditor")),
        KeyBinding::new("tab", editor::Indent, Some("QueryEditor")),
        KeyBinding::new("cmd-a", editor::SelectAll, Some("QueryEditor")),
        KeyBinding::new("ctrl-a", editor::SelectAll, Some("QueryEditor")),
        KeyBinding::new("cmd-c", editor::Copy, Some("QueryEditor")),
        KeyBinding::new("ctrl-c", editor::Copy, Some("QueryEditor")),
        KeyBinding::new("cmd-x", editor::Cut, Some("QueryEditor")),
        KeyBinding::new("ctrl-x", editor::Cut, Some("QueryEditor")),
        KeyBinding::new("cmd-v", editor::Paste, Some("QueryEditor")),
        KeyBinding::new("ctrl-v", editor::Paste, Some("QueryEditor")),
    ]);
}
