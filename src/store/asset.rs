//! Reading text assets from disk

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Asset, BOM_CHAR};

/// Read and decode an asset as UTF-8, dropping one leading BOM if `strip_bom` is set
pub fn read_asset(path: &Path, strip_bom: bool) -> Result<Asset> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::AssetNotFound(path.to_path_buf()),
        _ => Error::AssetUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let text = String::from_utf8(bytes).map_err(|e| Error::AssetUnreadable {
        path: path.to_path_buf(),
        reason: format!("invalid UTF-8: {}", e.utf8_error()),
    })?;

    let had_bom = text.starts_with(BOM_CHAR);
    let text = if strip_bom {
        strip_leading_bom(&text).to_string()
    } else {
        if had_bom {
            tracing::warn!("Keeping leading BOM of {:?} as part of the payload", path);
        }
        text
    };

    tracing::debug!(
        "Read asset {:?}: {} bytes, bom={}",
        path,
        text.len(),
        had_bom
    );

    Ok(Asset::new(path.to_path_buf(), text, had_bom))
}

/// Remove exactly one leading U+FEFF
pub fn strip_leading_bom(text: &str) -> &str {
    text.strip_prefix(BOM_CHAR).unwrap_or(text)
}
