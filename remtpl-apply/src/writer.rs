//! Destination writer.
//!
//! ## `write_rendered` protocol
//!
//! 1. Ensure the parent directory chain exists.
//! 2. Open `dest` for writing (create if absent, truncate if present) and
//!    write the content.
//!
//! The existing file is written in place, so symlinks are followed and the
//! inode, owner, group and mode of an existing destination are kept. The write
//! is unconditional: unchanged content is rewritten byte for byte.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{io_err, ApplyError};

/// Create every missing directory above `dest`.
pub fn ensure_parent_dir(dest: &Path) -> Result<(), ApplyError> {
    match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))
        }
        _ => Ok(()),
    }
}

/// Replace the content of `dest` with `content`.
pub fn write_rendered(dest: &Path, content: &str) -> Result<(), ApplyError> {
    ensure_parent_dir(dest)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
        .map_err(|e| io_err(dest, e))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| io_err(dest, e))?;

    tracing::info!("wrote: {}", dest.display());
    Ok(())
}
