use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{CountryLookup, GeoResolver};
use crate::locator::find_latest_log_file;
use crate::models::{LatestObservation, UNDETERMINED_TITLE};
use crate::parser::extract_ip;
use crate::tray::{TrayAction, TraySurface};

/// Owns the latest observation and is the only thing that touches it.
/// Ticks, show requests and quit are handled one at a time on a single
/// task, so no locking is involved.
pub struct PollingController<G, T> {
    log_dir: PathBuf,
    poll_interval: Duration,
    resolver: G,
    tray: T,
    latest: LatestObservation,
}

impl<G, T> PollingController<G, T>
where
    G: CountryLookup,
    T: TraySurface,
{
    pub fn new(log_dir: PathBuf, poll_interval: Duration, resolver: G, tray: T) -> Self {
        Self {
            log_dir,
            poll_interval,
            resolver,
            tray,
            latest: LatestObservation::default(),
        }
    }

    pub fn latest(&self) -> &LatestObservation {
        &self.latest
    }

    /// One locate, extract, resolve pass. The observation only changes when
    /// every stage succeeds.
    pub async fn tick(&mut self) -> Result<()> {
        let log_file = find_latest_log_file(&self.log_dir)?;
        let ip = extract_ip(&log_file)?;
        let country_name = self.resolver.resolve_country(&ip).await?;

        self.latest = LatestObservation {
            ip,
            observed_at: Local::now().format("%H:%M").to_string(),
            country_name,
        };
        self.tray.set_tooltip(&self.latest.tooltip());

        Ok(())
    }

    pub fn show(&self) {
        if self.latest.is_known() {
            let title = self.latest.title();
            self.tray.set_title(&title);
            println!("[RaidIpTray] {}", title);
        } else {
            self.tray.set_title(UNDETERMINED_TITLE);
        }
    }

    async fn poll(&mut self) {
        if let Err(e) = self.tick().await {
            eprintln!("[RaidIpTray] Poll failed: {}", e);
        }
    }

    /// Polls once right away, then every `poll_interval` until a quit action
    /// arrives or every action sender is gone.
    pub async fn run(mut self, mut actions: UnboundedReceiver<TrayAction>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        ticker.tick().await;
        self.poll().await;

        loop {
            tokio::select! {
                action = actions.recv() => match action {
                    Some(TrayAction::Show) => self.show(),
                    Some(TrayAction::Quit) | None => break,
                },
                _ = ticker.tick() => self.poll().await,
            }
        }

        println!("[RaidIpTray] Shutting down");
        self.tray.quit();
    }
}

/// Starts the control loop on its own thread with a single-threaded runtime.
pub fn spawn<T>(
    config: &Config,
    tray: T,
    actions: UnboundedReceiver<TrayAction>,
) -> std::io::Result<JoinHandle<()>>
where
    T: TraySurface + Send + 'static,
{
    let log_dir = config.log_dir.clone();
    let poll_interval = config.poll_interval();
    let endpoint = config.geo_endpoint.clone();

    thread::Builder::new()
        .name("raid-ip-poller".into())
        .spawn(move || {
            let started = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(Error::Runtime)
                .and_then(|runtime| Ok((runtime, GeoResolver::new(&endpoint)?)));

            match started {
                Ok((runtime, resolver)) => {
                    let controller = PollingController::new(log_dir, poll_interval, resolver, tray);
                    runtime.block_on(controller.run(actions));
                }
                Err(e) => {
                    eprintln!("[RaidIpTray] {}", e);
                    tray.quit();
                }
            }
        })
}
