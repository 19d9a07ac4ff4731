use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Loaded from `config.toml` in the working directory when present,
/// otherwise the built-in defaults.
pub static CONFIG: Lazy<Config> = Lazy::new(|| Config::load(None));

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_geo_endpoint")]
    pub geo_endpoint: String,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(r"C:\Battlestate Games\EFT\Logs")
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_geo_endpoint() -> String {
    "https://api.iplocation.net/".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_dir: default_log_dir(),
            poll_interval_secs: default_poll_interval_secs(),
            geo_endpoint: default_geo_endpoint(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load(config_path: Option<&str>) -> Self {
        let default_paths = vec!["config.toml"];

        let paths: Vec<&str> = if let Some(path) = config_path {
            std::iter::once(path).chain(default_paths).collect()
        } else {
            default_paths
        };

        for path in paths {
            match Self::from_file(path) {
                Ok(config) => {
                    println!("[RaidIpTray] Config loaded from {}", path);
                    return config;
                }
                Err(err) => {
                    if let Some(io_err) = err.downcast_ref::<io::Error>() {
                        if io_err.kind() == io::ErrorKind::NotFound {
                            continue;
                        }
                    }
                    eprintln!("[RaidIpTray] {} failed to load: {}", path, err);
                }
            }
        }

        Config::default()
    }

    /// Never zero; a zero period would make the ticker spin.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}
