use colored::Colorize;
use std::path::{Path, PathBuf};

use super::templates::{self, MarkerPolicy, TemplateSource};
use crate::error::ScaffoldError;
use crate::name::{ProjectName, RESERVED_NAMES};
use crate::target::TargetDir;
use crate::tools::{SystemRunner, ToolRunner, Toolchain};

/// Outcome of a successful run.
#[derive(Debug)]
pub struct ScaffoldReport {
    pub name: ProjectName,
    pub path: PathBuf,
}

/// Everything a scaffold run depends on besides the project name.
///
/// `Scaffolder::default()` is what the CLI runs: bundled template, `git` and
/// `npm`, strict markers, real processes.
pub struct Scaffolder {
    template: TemplateSource,
    toolchain: Toolchain,
    markers: MarkerPolicy,
    runner: Box<dyn ToolRunner>,
}

impl Default for Scaffolder {
    fn default() -> Self {
        Scaffolder {
            template: TemplateSource::Embedded,
            toolchain: Toolchain::default(),
            markers: MarkerPolicy::Strict,
            runner: Box::new(SystemRunner),
        }
    }
}

impl Scaffolder {
    pub fn with_template(mut self, template: TemplateSource) -> Self {
        self.template = template;
        self
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn with_marker_policy(mut self, markers: MarkerPolicy) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_runner(mut self, runner: impl ToolRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Create the project `raw_name` under `cwd`.
    ///
    /// Steps, in order: validate the name, claim `cwd/<name>`, copy the
    /// template, rename the ignore file, init and commit the repository,
    /// patch the contract files, install dependencies.
    ///
    /// Any failure after the directory is claimed removes it before this
    /// returns. A pre-existing directory is never touched.
    pub fn scaffold(&self, cwd: &Path, raw_name: Option<&str>) -> Result<ScaffoldReport, ScaffoldError> {
        let name = ProjectName::parse(raw_name)?;
        let target = TargetDir::claim(cwd.join(name.as_str()))?;
        let dir = target.path();

        self.template.materialize(dir)?;
        if templates::normalize_ignore_file(dir)? {
            tracing::debug!("renamed gitignore to .gitignore");
        }

        self.initialize_repository(dir)?;
        println!(
            "{}",
            "\n git initialized, added, and committed.".bright_green()
        );

        templates::patch(dir, &name, self.markers)?;

        println!(
            "{}",
            "\n We're installing the necessary dependencies, this should only take a moment... \n"
                .bright_green()
        );
        self.install_dependencies(dir)?;

        Ok(ScaffoldReport {
            name,
            path: target.keep(),
        })
    }

    fn initialize_repository(&self, dir: &Path) -> Result<(), ScaffoldError> {
        for step in self.toolchain.repository_steps() {
            self.runner.run(&step, dir).map_err(ScaffoldError::Vcs)?;
        }
        Ok(())
    }

    fn install_dependencies(&self, dir: &Path) -> Result<(), ScaffoldError> {
        let step = self.toolchain.install_step();
        self.runner.run(&step, dir).map_err(ScaffoldError::Install)
    }
}

/// `react-arca <name>`: scaffold into the current directory and print the
/// next steps.
pub fn run(name: Option<&str>) -> Result<(), ScaffoldError> {
    let cwd = std::env::current_dir().map_err(ScaffoldError::WorkingDir)?;
    let report = Scaffolder::default().scaffold(&cwd, name)?;

    tracing::info!(path = %report.path.display(), "project created");
    println!(
        "{}{}",
        "\n\nProject is ready!\n\n".bright_green(),
        "You can start your app by running the following commands:".bright_white()
    );
    println!();
    println!("  {}", format!("cd {}", report.name).bright_cyan());
    println!("  {}", "npm start".bright_cyan());
    println!();

    Ok(())
}

/// Print `err` for the user.
pub fn report_error(err: &ScaffoldError) {
    match err {
        ScaffoldError::MissingName => eprintln!("{}", err.to_string().red()),
        ScaffoldError::InvalidName { .. } => {
            eprintln!("{}", err.to_string().red());
            eprintln!("{}", "\nPlease choose a different project name.".red());
        }
        ScaffoldError::ReservedName { .. } => {
            eprintln!("{}", err.to_string().red());
            eprintln!(
                "{}",
                "Due to the way npm works, the following names are not allowed:\n".red()
            );
            for reserved in RESERVED_NAMES {
                eprintln!("  {}", reserved.cyan());
            }
            eprintln!("{}", "\nPlease choose a different project name.".red());
        }
        ScaffoldError::TargetExists(_) | ScaffoldError::WorkingDir(_) => {
            eprintln!("{}", format!("Error: {err}").red())
        }
        _ => eprintln!(
            "{}",
            format!("An error occurred while creating the project: {err}").red()
        ),
    }
}
