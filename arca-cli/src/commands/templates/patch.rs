//! Post-copy substitutions on the generated project.
//!
//! The files and markers touched here form a contract with the template.
//! Bump [`TemplateContract::VERSION`] whenever the template changes a path or
//! a marker below.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PatchError;
use crate::name::ProjectName;

/// How to treat a marker that is missing from its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerPolicy {
    /// Fail the run.
    #[default]
    Strict,
    /// Leave the file untouched and log a warning.
    Lenient,
}

/// Files and markers the scaffolder patches in a freshly copied template.
pub struct TemplateContract;

impl TemplateContract {
    pub const VERSION: u32 = 1;

    pub const MANIFEST: &'static str = "package.json";
    pub const HTML_ENTRY: &'static str = "public/index.html";
    pub const LICENSE: &'static str = "LICENSE.md";

    /// Title tag of the HTML entry, replaced by the project name.
    pub const TITLE_MARKER: &'static str = "<title>react-arca</title>";

    pub const LICENSE_NOTICE: &'static str =
        "# License\n\nYou can add your own license for your new project here.\n";
}

/// Apply the three contract substitutions under `target`.
pub fn patch(target: &Path, name: &ProjectName, policy: MarkerPolicy) -> Result<(), PatchError> {
    patch_manifest(&target.join(TemplateContract::MANIFEST), name)?;
    patch_title(&target.join(TemplateContract::HTML_ENTRY), name, policy)?;
    write(&target.join(TemplateContract::LICENSE), TemplateContract::LICENSE_NOTICE)?;
    Ok(())
}

/// Set the manifest's `name`, keeping every other key in place.
pub fn patch_manifest(path: &Path, name: &ProjectName) -> Result<(), PatchError> {
    let raw = read(path)?;
    let mut manifest: Value =
        serde_json::from_str(&raw).map_err(|source| PatchError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(fields) = manifest.as_object_mut() else {
        return Err(PatchError::ManifestNotObject(path.to_path_buf()));
    };
    fields.insert("name".to_string(), Value::String(name.to_string()));

    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    manifest
        .serialize(&mut ser)
        .map_err(|source| PatchError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
    out.push(b'\n');

    fs::write(path, out).map_err(|source| io_error(path, source))
}

/// Swap the title marker for `<title>{name}</title>`.
///
/// A file that already carries the project's title counts as patched.
pub fn patch_title(path: &Path, name: &ProjectName, policy: MarkerPolicy) -> Result<(), PatchError> {
    let html = read(path)?;
    let title = format!("<title>{name}</title>");
    if !html.contains(TemplateContract::TITLE_MARKER) {
        if html.contains(&title) {
            return Ok(());
        }
        return match policy {
            MarkerPolicy::Strict => Err(PatchError::MarkerNotFound {
                marker: TemplateContract::TITLE_MARKER,
                path: path.to_path_buf(),
                contract_version: TemplateContract::VERSION,
            }),
            MarkerPolicy::Lenient => {
                tracing::warn!(
                    path = %path.display(),
                    marker = TemplateContract::TITLE_MARKER,
                    "title marker not found, leaving file unchanged"
                );
                Ok(())
            }
        };
    }

    let patched = html.replacen(TemplateContract::TITLE_MARKER, &title, 1);
    write(path, &patched)
}

fn read(path: &Path) -> Result<String, PatchError> {
    fs::read_to_string(path).map_err(|source| io_error(path, source))
}

fn write(path: &Path, contents: &str) -> Result<(), PatchError> {
    fs::write(path, contents).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> PatchError {
    PatchError::Io {
        path: PathBuf::from(path),
        source,
    }
}
