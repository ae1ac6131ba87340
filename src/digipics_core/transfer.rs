use crate::digipics_core::error::{DigipicsError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// How a picture gets into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// Leave the source in place.
    Copy,
    /// Source is gone afterwards.
    Move,
}

impl TransferMode {
    pub fn from_keep(keep: bool) -> Self {
        if keep {
            TransferMode::Copy
        } else {
            TransferMode::Move
        }
    }
}

/// Create `dir` and any missing parents. Returns `true` if anything was created.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|source| DigipicsError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Copy or move `src` to `dest`. An existing `dest` is overwritten.
pub fn transfer(src: &Path, dest: &Path, mode: TransferMode) -> Result<()> {
    let result = match mode {
        TransferMode::Copy => fs::copy(src, dest).map(|_| ()),
        TransferMode::Move => move_file(src, dest),
    };
    result.map_err(|source| DigipicsError::Transfer {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    })
}

/// Whether `src` and `dest` name the same existing file.
pub fn is_same_file(src: &Path, dest: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "Cross-filesystem move, copying {} -> {}",
                src.display(),
                dest.display()
            );
            fs::copy(src, dest)?;
            fs::remove_file(src)
        }
        Err(e) => Err(e),
    }
}
