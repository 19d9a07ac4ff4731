//! Shows the game server IP and its country in the system tray.
//!
//! The newest session log is located and scanned, the IP is resolved
//! through a geolocation API, and the tray tooltip is refreshed every poll.
//!
//! The tray backend is only built for Windows and macOS. On other targets
//! the library builds as usual, but the binary exits at startup with a
//! tray error.

pub mod config;
pub mod controller;
pub mod error;
pub mod geo;
pub mod locator;
pub mod models;
pub mod parser;
pub mod tray;
