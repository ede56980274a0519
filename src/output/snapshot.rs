//! Final run snapshot
//!
//! The complete [`RunSummary`] is written once, after all tasks finish.
//! The write is atomic: the JSON is staged to a temporary file next to
//! the target and renamed into place, so readers never observe a
//! half-written snapshot.

use crate::model::RunSummary;
use crate::Result;
use std::path::Path;

/// Writes the final summary JSON atomically, creating the parent
/// directory if absent
pub fn write_snapshot(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
            tracing::info!("Created output directory: {}", dir.display());
        }
    }

    let json = serde_json::to_string_pretty(summary)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!("Results written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfigSnapshot;
    use chrono::Utc;

    fn summary() -> RunSummary {
        RunSummary {
            started_at: Utc::now(),
            completed_at: Utc::now(),
            total_processed: 0,
            success_count: 0,
            failure_count: 0,
            exact_matches: 0,
            partial_matches: 0,
            no_results: 0,
            config: ConfigSnapshot {
                base_url: "https://mms.mckesson.com".to_string(),
                workers: 1,
                delay_ms: 1500,
                max_retries: 3,
            },
            results: vec![],
        }
    }

    #[test]
    fn test_write_snapshot_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output/products.json");

        write_snapshot(&path, &summary()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_snapshot_is_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        write_snapshot(&path, &summary()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: RunSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(back.total_processed, 0);
        assert_eq!(back.config.base_url, "https://mms.mckesson.com");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        write_snapshot(&path, &summary()).unwrap();
        assert!(!dir.path().join("products.json.tmp").exists());
    }

    #[test]
    fn test_overwrites_existing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        write_snapshot(&path, &summary()).unwrap();

        let mut second = summary();
        second.total_processed = 5;
        write_snapshot(&path, &second).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: RunSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(back.total_processed, 5);
    }
}
