//! DataQuill - a three-panel database workbench built with GPUI.

mod app_menus;

use std::sync::Arc;

use dataquill_core::logging::{init_logging, LogConfig};
use dataquill_core::{ChannelSink, Collaborators, Notification, QuillError, Workbench, WorkspaceConfig};
use dataquill_ui::key_bindings::{About, CloseWindow, Minimize, Quit, Zoom};
use dataquill_ui::{register_key_bindings, DataQuillTheme, WindowChrome, Workspace};
use gpui::{
    px, size, App, AppContext, Application, Bounds, PromptLevel, Size, WindowBounds, WindowOptions,
};
use tokio::sync::mpsc::UnboundedReceiver;

fn main() {
    // Config is read before logging exists, so a load failure is reported after init
    let (config, config_error) = match WorkspaceConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (WorkspaceConfig::default(), Some(e)),
    };

    let logging_guard = init_logging(LogConfig::from_config(&config.logging));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting DataQuill");
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
    }

    let chrome = Arc::new(WindowChrome::new());
    let (workbench, notifications) = match build_workbench(config, chrome.clone()) {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize workbench");
            drop(logging_guard);
            std::process::exit(1);
        }
    };

    let _logging_guard = logging_guard;

    Application::new().run(move |cx: &mut App| {
        cx.set_global(workbench);
        cx.set_global(DataQuillTheme::for_appearance(cx.window_appearance()));

        register_key_bindings(cx);
        let menus = app_menus::app_menus(cx);
        cx.set_menus(menus);
        register_global_actions(cx);

        // 1400x900 centered on the primary display
        let window_size = size(px(1400.0), px(900.0));
        let bounds = Bounds::centered(None, window_size, cx);

        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            window_min_size: Some(Size { width: px(640.0), height: px(420.0) }),
            focus: true,
            show: true,
            ..Default::default()
        };

        let opened = cx.open_window(window_options, |window, cx| {
            // Remove the window ourselves; the standard Windows close sequence
            // races WM_ACTIVATE against window destruction.
            window.on_window_should_close(cx, |window, cx| {
                window.remove_window();
                cx.quit();
                false
            });

            cx.new(|cx| Workspace::new(notifications, chrome, window, cx))
        });

        if let Err(e) = opened {
            tracing::error!(error = %e, "Failed to open window");
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}

/// Wire the collaborators and build the workbench.
///
/// Notifications go to a channel the workspace drains into toasts; drag
/// chrome is the window's cursor shield.
fn build_workbench(
    config: WorkspaceConfig,
    chrome: Arc<WindowChrome>,
) -> Result<(Workbench, UnboundedReceiver<Notification>), QuillError> {
    let (sink, notifications) = ChannelSink::channel();
    let collaborators = Collaborators::from_config(&config)?
        .with_notifications(Arc::new(sink))
        .with_drag_chrome(chrome);
    let workbench = Workbench::new(config, collaborators)?;
    Ok((workbench, notifications))
}

/// Register handlers for application-level actions.
///
/// Menu items are only enabled when their action has a registered handler.
fn register_global_actions(cx: &mut App) {
    cx.on_action(|_: &Quit, cx| {
        cx.quit();
    });

    cx.on_action(|_: &About, cx| {
        // Defer: the window may still be borrowed by the menu dispatch
        cx.defer(|cx| {
            if let Some(window_handle) = cx.windows().first().copied() {
                let result = window_handle.update(cx, |_, window, cx| {
                    let message = format!("DataQuill {}", env!("CARGO_PKG_VERSION"));
                    let detail = "Schema browser, SQL editor and results in one window.";
                    let prompt =
                        window.prompt(PromptLevel::Info, &message, Some(detail), &["OK"], cx);
                    cx.background_executor()
                        .spawn(async move {
                            let _ = prompt.await;
                        })
                        .detach();
                });
                if let Err(e) = result {
                    tracing::error!("About dialog failed: {e}");
                }
            }
        });
    });

    cx.on_action(|_: &Minimize, cx| {
        cx.defer(|cx| {
            if let Some(window_handle) = cx.windows().first().copied() {
                window_handle.update(cx, |_, window, _cx| window.minimize_window()).ok();
            }
        });
    });

    cx.on_action(|_: &Zoom, cx| {
        cx.defer(|cx| {
            if let Some(window_handle) = cx.windows().first().copied() {
                window_handle.update(cx, |_, window, _cx| window.zoom_window()).ok();
            }
        });
    });

    cx.on_action(|_: &CloseWindow, cx| {
        cx.defer(|cx| {
            if let Some(window_handle) = cx.windows().first().copied() {
                window_handle.update(cx, |_, window, _cx| window.remove_window()).ok();
            }
        });
    });
}
