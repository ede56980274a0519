//! MPN list input
//!
//! The input file is plain text with one MPN per line. Blank lines and
//! lines starting with `#` are ignored; order is preserved.

use crate::{ConfigError, ConfigResult};
use std::path::Path;

/// Reads the MPN list from a text file
///
/// # Errors
///
/// * `ConfigError::InputUnreadable` - the file is missing or unreadable
/// * `ConfigError::EmptyInput` - the file contains no MPNs after filtering
pub fn read_mpn_list(path: &Path) -> ConfigResult<Vec<String>> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ConfigError::InputUnreadable {
            path: path.display().to_string(),
            source,
        })?;

    let mpns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if mpns.is_empty() {
        return Err(ConfigError::EmptyInput {
            path: path.display().to_string(),
        });
    }

    tracing::info!("Loaded {} MPNs from {}", mpns.len(), path.display());
    Ok(mpns)
}
