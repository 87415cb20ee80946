use std::fmt;
use std::path::PathBuf;

use crate::tools::ToolError;

/// Every way a scaffold run can fail.
///
/// The first five variants are raised before anything is written to disk.
/// The rest happen after the target directory has been claimed; by the time
/// the caller sees them the directory has already been removed.
#[derive(Debug)]
pub enum ScaffoldError {
    /// The current working directory could not be determined.
    WorkingDir(std::io::Error),
    /// No project name was given, or it was empty.
    MissingName,
    /// The name breaks one or more npm naming rules.
    InvalidName { name: String, problems: Vec<String> },
    /// The name collides with a runtime dependency of the generated project.
    ReservedName { name: String },
    /// Something already lives at the target path.
    TargetExists(PathBuf),
    /// Copying the template into the target failed.
    Copy { path: PathBuf, source: std::io::Error },
    /// A file of the template contract could not be patched.
    Patch(PatchError),
    /// `git init`, `git add` or `git commit` failed.
    Vcs(ToolError),
    /// The package manager failed to install dependencies.
    Install(ToolError),
}

impl ScaffoldError {
    /// True for errors raised before the target directory was touched.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            ScaffoldError::WorkingDir(_)
                | ScaffoldError::MissingName
                | ScaffoldError::InvalidName { .. }
                | ScaffoldError::ReservedName { .. }
                | ScaffoldError::TargetExists(_)
        )
    }

    pub(crate) fn copy(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Copy {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldError::WorkingDir(source) => {
                write!(f, "Cannot determine the current directory: {source}")
            }
            ScaffoldError::MissingName => write!(f, "Please provide a project name."),
            ScaffoldError::InvalidName { name, problems } => {
                write!(
                    f,
                    "Cannot create a project named \"{name}\" because of npm naming restrictions:"
                )?;
                for problem in problems {
                    write!(f, "\n  * {problem}")?;
                }
                Ok(())
            }
            ScaffoldError::ReservedName { name } => write!(
                f,
                "Cannot create a project named \"{name}\" because a dependency with the same name exists."
            ),
            ScaffoldError::TargetExists(path) => {
                write!(f, "Directory '{}' already exists", path.display())
            }
            ScaffoldError::Copy { path, source } => {
                write!(f, "Failed to copy template to '{}': {source}", path.display())
            }
            ScaffoldError::Patch(err) => write!(f, "{err}"),
            ScaffoldError::Vcs(err) => write!(f, "Repository initialization failed: {err}"),
            ScaffoldError::Install(err) => write!(f, "Dependency installation failed: {err}"),
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaffoldError::WorkingDir(source) | ScaffoldError::Copy { source, .. } => Some(source),
            ScaffoldError::Patch(err) => Some(err),
            ScaffoldError::Vcs(err) | ScaffoldError::Install(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatchError> for ScaffoldError {
    fn from(err: PatchError) -> Self {
        ScaffoldError::Patch(err)
    }
}

/// Error raised while applying the template contract to a generated project.
#[derive(Debug)]
pub enum PatchError {
    /// Reading or writing a contract file failed.
    Io { path: PathBuf, source: std::io::Error },
    /// The manifest is not valid JSON.
    Manifest { path: PathBuf, source: serde_json::Error },
    /// The manifest parsed, but its top level is not an object.
    ManifestNotObject(PathBuf),
    /// A marker of the contract is missing from the file it belongs to.
    MarkerNotFound {
        marker: &'static str,
        path: PathBuf,
        contract_version: u32,
    },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::Io { path, source } => {
                write!(f, "Failed to patch '{}': {source}", path.display())
            }
            PatchError::Manifest { path, source } => {
                write!(f, "Invalid manifest '{}': {source}", path.display())
            }
            PatchError::ManifestNotObject(path) => {
                write!(f, "Manifest '{}' is not a JSON object", path.display())
            }
            PatchError::MarkerNotFound {
                marker,
                path,
                contract_version,
            } => write!(
                f,
                "Marker '{marker}' not found in '{}' (template contract v{contract_version})",
                path.display()
            ),
        }
    }
}

impl std::error::Error for PatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatchError::Io { source, .. } => Some(source),
            PatchError::Manifest { source, .. } => Some(source),
            _ => None,
        }
    }
}
