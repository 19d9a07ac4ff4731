mod tray;

pub use tray::*;

#[cfg(any(windows, target_os = "macos"))]
mod system;

#[cfg(any(windows, target_os = "macos"))]
pub use system::{SystemTray, TrayCommand, TrayHandle};
