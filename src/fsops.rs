use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::ShelfError;
use crate::is_pdf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// A file with the same name already sits at the destination.
    Collision,
}

/// Moves `from` into `dest_dir`, keeping its file name. Never overwrites.
///
/// A plain rename is tried first. When that fails (different filesystems, for
/// instance) the file is copied, the copy is checked against the original by
/// SHA-256, and only then is the original removed.
pub fn move_into(from: &Path, dest_dir: &Path) -> Result<MoveOutcome, ShelfError> {
    let Some(file_name) = from.file_name() else {
        return Err(ShelfError::io(
            from,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };
    let to = dest_dir.join(file_name);

    if to.exists() {
        return Ok(MoveOutcome::Collision);
    }

    if let Err(e) = fs::rename(from, &to) {
        tracing::debug!("rename {} failed ({}), copying instead", from.display(), e);
        copy_verified(from, &to)?;
        fs::remove_file(from).map_err(|e| ShelfError::io(from, e))?;
    }

    Ok(MoveOutcome::Moved)
}

fn copy_verified(from: &Path, to: &Path) -> Result<(), ShelfError> {
    copy_verified_with(from, to, |from, to| fs::copy(from, to).map(|_| ()))
}

/// Copies with `copy`, then compares digests. Whatever goes wrong after the
/// copy starts, nothing is left at `to`, so a retry never sees a stale file.
fn copy_verified_with<F>(from: &Path, to: &Path, copy: F) -> Result<(), ShelfError>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let result = copy(from, to)
        .map_err(|e| ShelfError::io(to, e))
        .and_then(|()| {
            let expected = file_digest(from)?;
            let actual = file_digest(to)?;
            if expected != actual {
                return Err(ShelfError::Verify {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                });
            }
            Ok(())
        });

    if result.is_err() && to.exists() {
        if let Err(e) = fs::remove_file(to) {
            tracing::error!("failed to remove partial copy {}: {}", to.display(), e);
        }
    }
    result
}

/// Regular `.pdf` files directly inside `dir`, sorted by path. Entries that
/// cannot be read are logged and left out.
pub fn pdfs_in(dir: &Path) -> Result<Vec<PathBuf>, ShelfError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ShelfError::io(dir, e))? {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && is_pdf(&path) {
                    paths.push(path);
                }
            }
            Err(e) => tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }
    paths.sort();
    Ok(paths)
}

/// Hex-encoded SHA-256 of a file's contents.
pub fn file_digest(path: &Path) -> Result<String, ShelfError> {
    let mut file = File::open(path).map_err(|e| ShelfError::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| ShelfError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}
