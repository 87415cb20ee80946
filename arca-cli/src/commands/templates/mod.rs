pub mod patch;

use rust_embed::RustEmbed;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ScaffoldError;

pub use patch::{patch, MarkerPolicy, TemplateContract};

/// Name the ignore file ships under inside the template.
pub const SHIPPED_IGNORE_FILE: &str = "gitignore";
/// Name git expects.
pub const IGNORE_FILE: &str = ".gitignore";

/// The React project template, compiled into the binary.
#[derive(RustEmbed)]
#[folder = "template/"]
pub struct BundledTemplate;

/// Where the template tree comes from. Never written to.
#[derive(Debug, Clone, Default)]
pub enum TemplateSource {
    /// The template embedded in the binary.
    #[default]
    Embedded,
    /// A template tree on disk.
    Directory(PathBuf),
}

impl TemplateSource {
    /// Copy every file and directory of the template under `target`,
    /// preserving relative paths and file contents byte for byte.
    ///
    /// Stops at the first failure without cleaning up what was written.
    pub fn materialize(&self, target: &Path) -> Result<usize, ScaffoldError> {
        let copied = match self {
            TemplateSource::Embedded => materialize_embedded(target)?,
            TemplateSource::Directory(root) => materialize_dir(root, target)?,
        };
        tracing::debug!(files = copied, target = %target.display(), "template copied");
        Ok(copied)
    }
}

fn materialize_embedded(target: &Path) -> Result<usize, ScaffoldError> {
    let mut copied = 0;
    for rel in BundledTemplate::iter() {
        let Some(file) = BundledTemplate::get(&rel) else {
            continue;
        };
        let dest = target.join(&*rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| ScaffoldError::copy(parent, e))?;
        }
        fs::write(&dest, &file.data).map_err(|e| ScaffoldError::copy(&dest, e))?;
        copied += 1;
    }
    Ok(copied)
}

fn materialize_dir(root: &Path, target: &Path) -> Result<usize, ScaffoldError> {
    if !root.is_dir() {
        return Err(ScaffoldError::copy(
            root,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "template directory does not exist",
            ),
        ));
    }

    let mut copied = 0;
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ScaffoldError::copy(path, e.into())
        })?;
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let dest = target.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| ScaffoldError::copy(&dest, e))?;
        } else {
            fs::copy(entry.path(), &dest).map_err(|e| ScaffoldError::copy(&dest, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Rename the shipped `gitignore` at the project root to `.gitignore`.
///
/// Returns whether a rename happened. No-op when the template has no ignore
/// file.
pub fn normalize_ignore_file(target: &Path) -> Result<bool, ScaffoldError> {
    let shipped = target.join(SHIPPED_IGNORE_FILE);
    if !shipped.is_file() {
        return Ok(false);
    }
    let dotted = target.join(IGNORE_FILE);
    fs::rename(&shipped, &dotted).map_err(|e| ScaffoldError::copy(&dotted, e))?;
    Ok(true)
}
