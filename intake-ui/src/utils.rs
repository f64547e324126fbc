use std::path::Path;

use anyhow::Context;
use intake_core::PhotoHandle;

/// Builds an upload handle from a file on disk. Only the name and size are
/// kept; the contents are never read.
pub fn photo_handle(path: &Path) -> anyhow::Result<PhotoHandle> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("cannot read photo '{}'", path.display()))?
        .len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(PhotoHandle::new(name, size))
}
