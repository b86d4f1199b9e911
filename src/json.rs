// JSON file operations for the task sequence

use crate::error::{Result, StoreError};
use crate::task::Task;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default backing file name
pub const DEFAULT_FILE_NAME: &str = "tasks.json";

/// Read the full task sequence from `path`.
///
/// Returns `Ok(None)` when the file does not exist. Unreadable or malformed
/// content and duplicate ids are errors; the caller decides how to recover.
pub fn read_tasks(path: &Path) -> Result<Option<Vec<Task>>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::persistence("read", path, e)),
    };

    let tasks: Vec<Task> = serde_json::from_str(&content).map_err(|e| StoreError::persistence("parse", path, e))?;

    check_unique_ids(path, &tasks)?;

    info!(file = ?path, count = tasks.len(), "Loaded tasks from JSON");
    Ok(Some(tasks))
}

/// Overwrite `path` with the full task sequence.
///
/// Writes to a sibling temp file, syncs it, then renames it into place, so a
/// torn write never replaces the last complete file.
pub fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    let tmp_path = temp_path(path);

    let write = || -> std::result::Result<(), crate::error::PersistenceSource> {
        let mut file = File::create(&tmp_path)?;
        serde_json::to_writer_pretty(&mut file, tasks)?;
        writeln!(file)?;
        file.sync_all()?; // Ensure data is flushed to disk
        fs::rename(&tmp_path, path)?;
        Ok(())
    };

    if let Err(e) = write() {
        if let Err(cleanup) = fs::remove_file(&tmp_path)
            && cleanup.kind() != ErrorKind::NotFound
        {
            warn!(file = ?tmp_path, error = ?cleanup, "Failed to remove temp file after failed write");
        }
        return Err(StoreError::persistence("write", path, e));
    }

    debug!(file = ?path, count = tasks.len(), "Wrote tasks to JSON");
    Ok(())
}

fn check_unique_ids(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id()) {
            return Err(StoreError::DataIntegrity {
                path: path.to_path_buf(),
                id: task.id(),
            });
        }
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
