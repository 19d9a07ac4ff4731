pub const SHOW_ITEM_ID: &str = "show";
pub const QUIT_ITEM_ID: &str = "quit";

/// User actions the tray forwards to the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    Show,
    Quit,
}

impl TrayAction {
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            SHOW_ITEM_ID => Some(TrayAction::Show),
            QUIT_ITEM_ID => Some(TrayAction::Quit),
            _ => None,
        }
    }
}

/// The parts of the tray the control loop writes to.
pub trait TraySurface {
    fn set_title(&self, title: &str);
    fn set_tooltip(&self, tooltip: &str);
    /// Tears the tray down; its event loop ends afterwards.
    fn quit(&self);
}
