//! Command implementations for the `react-arca` CLI.

/// Project scaffolding — `react-arca <name>`.
///
/// Validates the name, copies the bundled template into `./<name>`, renames
/// the ignore file, commits the initial tree with git, patches the package
/// name, page title and license, then runs `npm install`. Any failure after
/// the directory is created removes it again.
pub mod new_project;

/// The bundled template and the steps that turn a copy of it into a project.
///
/// Provides [`templates::TemplateSource`] (embedded or on-disk tree),
/// ignore-file normalization, and the versioned patch contract.
pub mod templates;
