//! Page archive extraction

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{Result, TldrError};

/// Extract a zip archive into `dest`, preserving its directory structure
///
/// Returns the number of files written. Entries whose names would escape
/// `dest` are skipped.
pub fn extract_archive(bytes: &[u8], dest: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut written = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(relative) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
            warn!(name = entry.name(), "skipping archive entry outside the cache root");
            continue;
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| TldrError::io(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| TldrError::io(parent, e))?;
        }
        let mut out = File::create(&target).map_err(|e| TldrError::io(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| match e.kind() {
            // Corrupt compressed data surfaces as an I/O error from the reader
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                TldrError::Decode(format!("{}: {}", entry.name(), e))
            }
            _ => TldrError::io(&target, e),
        })?;
        written += 1;
    }

    debug!(files = written, dest = %dest.display(), "extracted archive");
    Ok(written)
}
