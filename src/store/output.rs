//! Atomic output writes

use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Write `bytes` to `path` through a sibling temp file and a rename.
///
/// Readers see either the old file or the complete new one. The parent
/// directory must already exist.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let fail = |e: std::io::Error| Error::OutputWriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    copy_permissions(path, &tmp).map_err(fail)?;

    tmp.persist(path).map_err(|e| fail(e.error))?;
    tracing::debug!("Persisted {} bytes to {:?}", bytes.len(), path);

    Ok(())
}

/// Existing contents of `path`, `None` if it does not exist
pub fn read_existing(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// Temp files are created 0600; keep the mode the output already had, or a normal 0644
#[cfg(unix)]
fn copy_permissions(path: &Path, tmp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let perms = match std::fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(_) => std::fs::Permissions::from_mode(0o644),
    };
    tmp.as_file().set_permissions(perms)
}

#[cfg(not(unix))]
fn copy_permissions(_path: &Path, _tmp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
