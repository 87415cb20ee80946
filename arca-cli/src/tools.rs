//! External tools the scaffolder delegates to: the version-control binary
//! and the package manager.
//!
//! Invocations are plain data ([`Invocation`]) run through a [`ToolRunner`].
//! The CLI uses [`SystemRunner`]; tests plug in their own runner to record
//! calls or fail a given step.

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

/// What to do with a tool's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Collect output; stderr is kept for the error message.
    Captured,
    /// Stream straight to the user's terminal.
    Inherited,
}

/// One external command, run with the project directory as working dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub output: Output,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: &[&str], output: Output) -> Self {
        Invocation {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            output,
        }
    }

    /// `program arg1 "arg two"`, for messages. Empty arguments and arguments
    /// with whitespace or quotes are double-quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
        return arg.to_string();
    }
    format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Why a tool invocation failed.
#[derive(Debug)]
pub enum ToolFailure {
    /// The program could not be started (usually: not installed).
    Spawn(std::io::Error),
    /// The program ran and exited unsuccessfully.
    Status { code: Option<i32>, stderr: String },
}

#[derive(Debug)]
pub struct ToolError {
    pub command: String,
    pub failure: ToolFailure,
}

impl ToolError {
    pub fn new(invocation: &Invocation, failure: ToolFailure) -> Self {
        ToolError {
            command: invocation.command_line(),
            failure,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            ToolFailure::Spawn(e) => write!(f, "could not run `{}`: {e}", self.command),
            ToolFailure::Status { code, stderr } => {
                match code {
                    Some(code) => write!(f, "`{}` exited with status {code}", self.command)?,
                    None => write!(f, "`{}` was terminated by a signal", self.command)?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, "\n{stderr}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.failure {
            ToolFailure::Spawn(e) => Some(e),
            ToolFailure::Status { .. } => None,
        }
    }
}

/// Runs external commands to completion.
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation, cwd: &Path) -> Result<(), ToolError>;
}

/// Runs commands on the host with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, cwd: &Path) -> Result<(), ToolError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).current_dir(cwd);

        tracing::debug!(command = %invocation.command_line(), cwd = %cwd.display(), "running");

        match invocation.output {
            Output::Inherited => {
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(|e| ToolError::new(invocation, ToolFailure::Spawn(e)))?;
                if !status.success() {
                    return Err(ToolError::new(
                        invocation,
                        ToolFailure::Status {
                            code: status.code(),
                            stderr: String::new(),
                        },
                    ));
                }
            }
            Output::Captured => {
                let output = cmd
                    .stdin(Stdio::null())
                    .output()
                    .map_err(|e| ToolError::new(invocation, ToolFailure::Spawn(e)))?;
                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                    tracing::debug!(command = %invocation.command_line(), %stderr, "command failed");
                    return Err(ToolError::new(
                        invocation,
                        ToolFailure::Status {
                            code: output.status.code(),
                            stderr,
                        },
                    ));
                }
            }
        }
        Ok(())
    }
}

/// The programs and fixed arguments used for the repository and install
/// steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub vcs: String,
    pub package_manager: String,
    pub commit_message: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            vcs: "git".to_string(),
            package_manager: "npm".to_string(),
            commit_message: "Initial react-arca commit".to_string(),
        }
    }
}

impl Toolchain {
    /// `init`, `add .`, `commit -m <message>`, in that order. Output captured.
    pub fn repository_steps(&self) -> Vec<Invocation> {
        vec![
            Invocation::new(&self.vcs, &["init"], Output::Captured),
            Invocation::new(&self.vcs, &["add", "."], Output::Captured),
            Invocation::new(
                &self.vcs,
                &["commit", "-m", &self.commit_message],
                Output::Captured,
            ),
        ]
    }

    /// `install`, streamed to the terminal.
    pub fn install_step(&self) -> Invocation {
        Invocation::new(&self.package_manager, &["install"], Output::Inherited)
    }
}
