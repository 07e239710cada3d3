//! Normalized table writer

use super::derive::DerivedRow;
use crate::error::{GlobefinError, Result};
use csv::Writer;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize rows with their fixed header to any writer
pub fn write_rows<R: DerivedRow, W: io::Write>(writer: W, rows: &[R]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(R::HEADER)?;
    for row in rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Replace the table at `path` with `rows`.
///
/// The destination directory is created if needed. Rows go to a temporary file
/// next to the destination which is then renamed over it, so a concurrent
/// reader sees either the old table or the new one. An empty row set is
/// refused and leaves any existing file untouched.
pub fn write_table<R: DerivedRow>(path: &Path, rows: &[R]) -> Result<()> {
    if rows.is_empty() {
        return Err(GlobefinError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        log::info!("Creating directory: {}", dir.display());
        fs::create_dir_all(dir)?;
    }

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_rows(&mut tmp, rows)?;
    if let Some(perms) = table_permissions(path)? {
        tmp.as_file().set_permissions(perms)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| GlobefinError::IoError(e.error))?;

    Ok(())
}

/// Mode the replacement table should carry.
///
/// An existing table keeps its permissions. On unix a new table is made
/// world-readable (0644), since the temporary file is created owner-only.
fn table_permissions(path: &Path) -> Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
