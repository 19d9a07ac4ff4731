use std::process::ExitCode;

use raid_ip_tray::{config::CONFIG, error::Error, tray::TrayAction};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

fn main() -> ExitCode {
    let (action_tx, action_rx) = mpsc::unbounded_channel();

    // Ctrl-C takes the same path as the tray's Quit item
    let ctrlc_tx = action_tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = ctrlc_tx.send(TrayAction::Quit);
    }) {
        eprintln!("[RaidIpTray] Failed to set Ctrl-C handler: {}", e);
    }

    match run_tray(action_tx, action_rx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[RaidIpTray] {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(any(windows, target_os = "macos"))]
fn run_tray(
    action_tx: UnboundedSender<TrayAction>,
    action_rx: UnboundedReceiver<TrayAction>,
) -> Result<(), Error> {
    use raid_ip_tray::controller;
    use raid_ip_tray::tray::{SystemTray, TrayHandle};

    let event_loop = SystemTray::event_loop()?;
    let handle = TrayHandle::new(&event_loop);
    let poller = controller::spawn(&CONFIG, handle, action_rx).map_err(Error::Runtime)?;

    SystemTray::new(action_tx).run(event_loop)?;

    if poller.join().is_err() {
        eprintln!("[RaidIpTray] Poller thread panicked");
    }
    Ok(())
}

// no tray backend is built for this target
#[cfg(not(any(windows, target_os = "macos")))]
fn run_tray(
    _action_tx: UnboundedSender<TrayAction>,
    _action_rx: UnboundedReceiver<TrayAction>,
) -> Result<(), Error> {
    Err(Error::Tray(format!(
        "no tray backend for this platform (log directory {})",
        CONFIG.log_dir.display()
    )))
}
