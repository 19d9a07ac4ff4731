use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a poll cycle (or startup) can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no session directories found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("no matching line found in {}", .0.display())]
    NoMatch(PathBuf),

    #[error("could not extract IP from line: {0}")]
    PatternMismatch(String),

    #[error("geolocation request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid geolocation response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("system tray unavailable: {0}")]
    Tray(String),

    #[error("failed to start control loop: {0}")]
    Runtime(#[source] io::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
