//! Environment/runtime helpers
//!
//! Sanity checks to ensure the data directory exists at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the parent directory of the data file exists.
///
/// A missing data file itself is fine: the store treats it as an empty
/// collection and creates it on the first write.
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    let dir = match data_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    if tokio::fs::metadata(data_file).await.is_err() {
        warn!(path = %data_file.display(), "data file not found; starting with an empty collection");
    } else {
        info!(path = %data_file.display(), "using data file");
    }
    Ok(())
}
