//! Snapshot discovery
//!
//! Lists candidate capture files under a data root: every `.json` file in
//! every immediate subdirectory, date directories in name order, files in
//! name order within each directory. Whether a file carries a valid
//! timestamp is decided later by [`crate::timestamp`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

/// Sorted list of snapshot file candidates under `root`.
pub fn discover_snapshots(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for date_dir in sorted_entries(root)? {
        if !date_dir.is_dir() {
            continue;
        }
        for file in sorted_entries(&date_dir)? {
            let is_json = file.extension().map(|e| e == "json").unwrap_or(false);
            if is_json && file.is_file() {
                paths.push(file);
            }
        }
    }
    debug!(root = %root.display(), candidates = paths.len(), "Snapshot discovery complete");
    Ok(paths)
}
