//! # arca-cli
//!
//! Command-line tool that scaffolds a new react-arca project.
//!
//! ```text
//! react-arca <project-name>
//! ```
//!
//! ## Architecture
//!
//! - [`name`] — project name validation (npm naming rules, reserved names)
//! - [`target`] — the target directory guard that rolls back on failure
//! - [`tools`] — `git` and `npm` invocations behind the [`tools::ToolRunner`] seam
//! - [`commands::templates`] — the bundled template, copy and patch steps
//! - [`commands::new_project`] — the pipeline tying it together
//! - [`error`] — the error taxonomy shared by all steps

pub mod commands;
pub mod error;
pub mod name;
pub mod target;
pub mod tools;

pub use commands::new_project::{ScaffoldReport, Scaffolder};
pub use error::{PatchError, ScaffoldError};
