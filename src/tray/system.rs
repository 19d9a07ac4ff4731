//! Native tray icon on a `winit` event loop.
//!
//! The icon lives on the main thread. The control loop reaches it through
//! [`TrayHandle`], which posts [`TrayCommand`]s into the event loop; menu
//! clicks go the other way as [`TrayAction`]s.

use tokio::sync::mpsc::UnboundedSender;
use tray_icon::menu::{Menu, MenuEvent, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use winit::application::ApplicationHandler;
use winit::event::{StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::WindowId;

use super::{TrayAction, TraySurface, QUIT_ITEM_ID, SHOW_ITEM_ID};
use crate::error::{Error, Result};

const ICON_SIZE: u32 = 16;
const INITIAL_TOOLTIP: &str = "Raid IP: waiting for first poll";

#[derive(Debug)]
pub enum TrayCommand {
    SetTitle(String),
    SetTooltip(String),
    Exit,
}

#[derive(Clone)]
pub struct TrayHandle {
    proxy: EventLoopProxy<TrayCommand>,
}

impl TrayHandle {
    pub fn new(event_loop: &EventLoop<TrayCommand>) -> Self {
        Self {
            proxy: event_loop.create_proxy(),
        }
    }

    fn send(&self, command: TrayCommand) {
        // closed once the tray is gone; nothing left to update
        let _ = self.proxy.send_event(command);
    }
}

impl TraySurface for TrayHandle {
    fn set_title(&self, title: &str) {
        self.send(TrayCommand::SetTitle(title.to_string()));
    }

    fn set_tooltip(&self, tooltip: &str) {
        self.send(TrayCommand::SetTooltip(tooltip.to_string()));
    }

    fn quit(&self) {
        self.send(TrayCommand::Exit);
    }
}

pub struct SystemTray {
    icon: Option<TrayIcon>,
    actions: UnboundedSender<TrayAction>,
    init_error: Option<Error>,
}

impl SystemTray {
    pub fn event_loop() -> Result<EventLoop<TrayCommand>> {
        EventLoop::<TrayCommand>::with_user_event()
            .build()
            .map_err(|e| Error::Tray(e.to_string()))
    }

    pub fn new(actions: UnboundedSender<TrayAction>) -> Self {
        Self {
            icon: None,
            actions,
            init_error: None,
        }
    }

    /// Runs until the control loop asks for exit or the icon fails to build.
    pub fn run(mut self, event_loop: EventLoop<TrayCommand>) -> Result<()> {
        event_loop
            .run_app(&mut self)
            .map_err(|e| Error::Tray(e.to_string()))?;

        match self.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn build_icon(&self) -> Result<TrayIcon> {
        let actions = self.actions.clone();
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            if let Some(action) = TrayAction::from_menu_id(event.id.0.as_str()) {
                let _ = actions.send(action);
            }
        }));

        let show_item = MenuItem::with_id(SHOW_ITEM_ID, "Show IP & Country", true, None);
        let quit_item = MenuItem::with_id(QUIT_ITEM_ID, "Quit", true, None);
        let menu = Menu::new();
        menu.append_items(&[&show_item, &quit_item])
            .map_err(|e| Error::Tray(e.to_string()))?;

        TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(INITIAL_TOOLTIP)
            .with_icon(icon()?)
            .build()
            .map_err(|e| Error::Tray(e.to_string()))
    }
}

impl ApplicationHandler<TrayCommand> for SystemTray {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if !matches!(cause, StartCause::Init) {
            return;
        }

        match self.build_icon() {
            Ok(icon) => {
                println!("[RaidIpTray] Tray icon ready");
                self.icon = Some(icon);
            }
            Err(err) => {
                self.init_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, _event: WindowEvent) {}

    fn user_event(&mut self, event_loop: &ActiveEventLoop, command: TrayCommand) {
        match command {
            TrayCommand::SetTitle(title) => {
                if let Some(icon) = &self.icon {
                    icon.set_title(Some(title));
                }
            }
            TrayCommand::SetTooltip(tooltip) => {
                if let Some(icon) = &self.icon {
                    if let Err(e) = icon.set_tooltip(Some(tooltip)) {
                        eprintln!("[RaidIpTray] Failed to set tooltip: {}", e);
                    }
                }
            }
            TrayCommand::Exit => {
                self.icon = None;
                event_loop.exit();
            }
        }
    }
}

fn icon() -> Result<Icon> {
    let mut rgba = vec![0u8; (ICON_SIZE * ICON_SIZE * 4) as usize];
    for chunk in rgba.chunks_mut(4) {
        chunk.copy_from_slice(&[200, 140, 30, 255]);
    }
    Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).map_err(|e| Error::Tray(e.to_string()))
}
