use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Error, Result};

const SESSION_DIR_PREFIX: &str = "log_";
const LOG_FILE_SUFFIX: &str = " application.log";

struct SessionDir {
    name: String,
    modified: SystemTime,
}

/// Picks the most recently modified session directory under `root` and
/// returns the path its application log is expected at. The file itself is
/// not checked here.
pub fn find_latest_log_file(root: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(root).map_err(|e| Error::io(root, e))?;

    let mut latest: Option<SessionDir> = None;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(root, e))?;

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(_) => continue,
        };
        if !metadata.is_dir() {
            continue;
        }
        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(_) => continue,
        };

        let candidate = SessionDir {
            name: entry.file_name().to_string_lossy().into_owned(),
            modified,
        };

        // equal mtimes: lexicographically last name wins
        let newer = match &latest {
            None => true,
            Some(current) => {
                (candidate.modified, &candidate.name) > (current.modified, &current.name)
            }
        };
        if newer {
            latest = Some(candidate);
        }
    }

    let latest = latest.ok_or_else(|| Error::NotFound(root.to_path_buf()))?;
    println!("[RaidIpTray] Latest directory: {}", latest.name);

    let path = root.join(&latest.name).join(log_file_name(&latest.name));
    println!("[RaidIpTray] Trying to open log file at path: {}", path.display());

    Ok(path)
}

fn log_file_name(dir_name: &str) -> String {
    let stem = dir_name.strip_prefix(SESSION_DIR_PREFIX).unwrap_or(dir_name);
    format!("{}{}", stem, LOG_FILE_SUFFIX)
}
