use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Directories appended after the inherited `PATH`.
///
/// Processes started from a desktop launcher often inherit a bare
/// `/usr/bin:/bin`, which misses Homebrew and `/usr/local` installs.
pub const EXTRA_SEARCH_DIRS: &[&str] = &[
    "/usr/local/bin",
    "/opt/homebrew/bin",
    "/usr/bin",
    "/bin",
    "/usr/sbin",
    "/sbin",
];

#[cfg(windows)]
const SEPARATOR: &str = ";";
#[cfg(not(windows))]
const SEPARATOR: &str = ":";

/// Build the `PATH` value for a child process.
///
/// The inherited value is kept verbatim as the prefix, empty segments
/// included; the fixed directories and `$HOME/.local/bin` follow, skipping
/// anything already present. If the extra directories cannot be encoded the
/// inherited value is returned unchanged.
pub fn augmented_search_path(current: Option<&OsStr>, home: Option<&Path>) -> OsString {
    let inherited = current.map(OsStr::to_os_string).unwrap_or_default();
    let present: Vec<PathBuf> = env::split_paths(&inherited).collect();

    let extras = EXTRA_SEARCH_DIRS
        .iter()
        .map(PathBuf::from)
        .chain(home.map(|h| h.join(".local").join("bin")));

    let mut missing: Vec<PathBuf> = Vec::new();
    for dir in extras {
        if !present.contains(&dir) && !missing.contains(&dir) {
            missing.push(dir);
        }
    }

    if missing.is_empty() {
        return inherited;
    }
    let Ok(tail) = env::join_paths(&missing) else {
        return inherited;
    };
    if inherited.is_empty() {
        return tail;
    }

    let mut joined = inherited;
    joined.push(SEPARATOR);
    joined.push(tail);
    joined
}
