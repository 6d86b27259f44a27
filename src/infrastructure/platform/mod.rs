//! Operating-system integrations.

mod browser;
mod save_dialog;

pub use browser::SystemBrowser;
pub use save_dialog::NativeSaveDialog;
