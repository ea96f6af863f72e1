//! Materialize payloads under the current workflow directory

use super::payload::StaticPayload;
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Write `contents` to `relative` under `dir`, creating parent directories
pub async fn write_bytes(
    step: &'static str,
    dir: &Path,
    relative: &str,
    contents: &[u8],
) -> Result<PathBuf> {
    let target_path = dir.join(relative);
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::filesystem(step, parent, e))?;
    }

    fs::write(&target_path, contents)
        .await
        .map_err(|e| ScaffoldError::filesystem(step, &target_path, e))?;

    tracing::debug!(path = %target_path.display(), bytes = contents.len(), "wrote file");
    Ok(target_path)
}

pub async fn write_payload(step: &'static str, dir: &Path, payload: &StaticPayload) -> Result<PathBuf> {
    write_bytes(step, dir, payload.path, payload.contents).await
}
