//! UI components and theming for the DataQuill workbench.

pub mod icon;
pub mod key_bindings;
pub mod layout;
pub mod panels;
pub mod query_buffer;
pub mod resizer;
pub mod spinner;
pub mod theme;
pub mod toast;
pub mod workspace;

pub use icon::{Icon, IconName, IconSize};
pub use key_bindings::register_key_bindings;
pub use panels::{QueryEditor, ResultsPanel, SchemaBrowserPanel};
pub use resizer::{DividerHandle, DraggedDivider, WindowChrome};
pub use spinner::{Spinner, SpinnerSize};
pub use theme::{DataQuillTheme, ThemeColors};
pub use toast::{Toast, ToastLayer};
pub use workspace::Workspace;
