//! Log file location and timestamps.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Directory under the cache root that holds econf's log files.
const LOG_DIR_NAME: &str = "econf";

/// Pick the cache root: `$XDG_CACHE_HOME`, else `<home>/.cache`, else
/// `./.cache`.
fn cache_root(xdg_cache_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    match (xdg_cache_home, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".cache"),
        _ => PathBuf::from(".cache"),
    }
}

/// Return the log file path for `command`, creating its directory.
///
/// `None` when the directory cannot be created; logging then stays
/// console-only.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    let dir = cache_root(std::env::var_os("XDG_CACHE_HOME"), home).join(LOG_DIR_NAME);
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with `format`.
fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

/// Current UTC date and time, for the log file header.
pub(super) fn format_utc_datetime() -> String {
    utc_now("%Y-%m-%d %H:%M:%S")
}

/// Current UTC time of day, for each log line.
pub(super) fn format_utc_time() -> String {
    utc_now("%H:%M:%S")
}
