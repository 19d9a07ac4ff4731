use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

const RAID_MARKER: &str = "RaidMode: Online,";

static IP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"Ip: ([0-9.]+),").unwrap());

/// Returns the server IP from the last online-raid line of `log_path`.
pub fn extract_ip(log_path: &Path) -> Result<String> {
    let file = File::open(log_path).map_err(|e| Error::io(log_path, e))?;
    let last_line = last_matching_line(BufReader::with_capacity(16384, file), RAID_MARKER)
        .map_err(|e| Error::io(log_path, e))?
        .ok_or_else(|| Error::NoMatch(log_path.to_path_buf()))?;

    parse_ip(&last_line)
}

/// Extracts the dotted address that follows `Ip: ` and precedes a comma.
/// Only ASCII digits count; octets are not range-checked.
pub fn parse_ip(line: &str) -> Result<String> {
    IP_REGEX
        .captures(line)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::PatternMismatch(line.to_string()))
}

fn last_matching_line<R: BufRead>(mut reader: R, marker: &str) -> std::io::Result<Option<String>> {
    let mut last = None;
    let mut buffer = Vec::with_capacity(1024);

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }

        if buffer.ends_with(b"\n") {
            buffer.pop();
            if buffer.ends_with(b"\r") {
                buffer.pop();
            }
        }

        let line = String::from_utf8_lossy(&buffer);
        if line.contains(marker) {
            last = Some(line.into_owned());
        }
    }

    Ok(last)
}
