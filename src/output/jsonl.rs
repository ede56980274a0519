//! Incremental JSONL log
//!
//! One serialized [`ScrapedProduct`] per line, appended and flushed as
//! each MPN completes. A crash loses at most the results that had not yet
//! been appended. The log doubles as the resume index: a later run with
//! `--resume` skips every MPN that already has a line here.

use crate::model::ScrapedProduct;
use crate::Result;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Mutex;

/// Append-only result log with single-writer discipline
///
/// Appends from concurrently completing workers are serialized through an
/// internal mutex so the file stays well-formed line by line.
pub struct IncrementalLog {
    file: Mutex<File>,
}

impl IncrementalLog {
    /// Opens the log for appending, creating it and its parent directory
    /// if absent
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
                tracing::info!("Created output directory: {}", dir.display());
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one result as a single line and flushes it to the OS
    pub fn append(&self, result: &ScrapedProduct) -> Result<()> {
        let mut line = serde_json::to_string(result)?;
        line.push('\n');

        let mut file = self.file.lock().unwrap();
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Loads the set of MPNs already present in a prior incremental log
///
/// Each line is parsed independently; malformed lines are skipped without
/// aborting the load. A missing log file yields an empty set.
pub fn load_resume_set(path: &Path) -> Result<HashSet<String>> {
    let mut mpns = HashSet::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(mpns),
        Err(e) => return Err(e.into()),
    };

    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ScrapedProduct>(&line) {
            Ok(result) => {
                mpns.insert(result.mpn);
            }
            Err(e) => {
                tracing::warn!("Skipping malformed log line: {}", e);
            }
        }
    }

    tracing::info!("Found {} previously scraped MPNs", mpns.len());
    Ok(mpns)
}
