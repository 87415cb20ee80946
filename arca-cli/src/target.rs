use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ScaffoldError;

/// The directory a scaffold run is building into.
///
/// Holding a `TargetDir` means this run created the directory and owns it.
/// Dropping it removes the whole tree again, unless [`TargetDir::keep`] was
/// called first. Every error path after the directory exists therefore cleans
/// up by simply returning.
#[derive(Debug)]
pub struct TargetDir {
    path: PathBuf,
    armed: bool,
}

impl TargetDir {
    /// Create `path` and take ownership of it.
    ///
    /// Only the last component is created; its parent must already exist.
    /// An existing file or directory is reported as
    /// [`ScaffoldError::TargetExists`] and left alone.
    pub fn claim(path: impl Into<PathBuf>) -> Result<Self, ScaffoldError> {
        let path = path.into();
        if path.exists() {
            return Err(ScaffoldError::TargetExists(path));
        }

        match fs::create_dir(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ScaffoldError::TargetExists(path));
            }
            Err(e) => return Err(ScaffoldError::copy(path, e)),
        }

        tracing::debug!(path = %path.display(), "claimed target directory");
        Ok(TargetDir { path, armed: true })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Disarm the guard and hand back the path. The directory stays on disk.
    pub fn keep(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for TargetDir {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::debug!(path = %self.path.display(), "rolling back target directory");
        if let Err(e) = fs::remove_dir_all(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove target directory"
            );
        }
    }
}
