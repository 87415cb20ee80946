//! Project name validation.
//!
//! A project name ends up as the `name` field of `package.json`, so it has to
//! be a name npm accepts for a *new* package. On top of that, a handful of
//! names are refused because npm would confuse the project with one of its
//! own dependencies.

use std::fmt;

use crate::error::ScaffoldError;

/// Names the generated project depends on at runtime. Sorted.
pub const RESERVED_NAMES: &[&str] = &["react", "react-dom", "react-router-dom"];

/// Names npm refuses outright, compared case-insensitively.
const BLACKLISTED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

const MAX_LENGTH: usize = 214;

/// Node's core modules. A package cannot shadow them.
const CORE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// A project name that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a raw command-line argument.
    ///
    /// Fails with [`ScaffoldError::MissingName`] when `raw` is absent or
    /// empty, [`ScaffoldError::InvalidName`] listing every broken rule, or
    /// [`ScaffoldError::ReservedName`].
    pub fn parse(raw: Option<&str>) -> Result<Self, ScaffoldError> {
        let name = match raw {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ScaffoldError::MissingName),
        };

        let problems = naming_problems(name);
        if !problems.is_empty() {
            tracing::debug!(name, count = problems.len(), "project name rejected");
            return Err(ScaffoldError::InvalidName {
                name: name.to_string(),
                problems,
            });
        }

        if RESERVED_NAMES.contains(&name) {
            return Err(ScaffoldError::ReservedName {
                name: name.to_string(),
            });
        }

        Ok(ProjectName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Check `name` against npm's rules for new packages.
///
/// Returns one message per violated rule; an empty list means the name is
/// valid. Rules that npm only warns about for legacy packages (capital
/// letters, length, special characters, core module names) are errors here.
/// Scoped names (`@scope/pkg`) pass npm's URL check but are still refused
/// for containing a path separator.
pub fn naming_problems(name: &str) -> Vec<String> {
    let mut problems = Vec::new();

    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }
    for blacklisted in BLACKLISTED_NAMES {
        if name.to_lowercase() == *blacklisted {
            problems.push(format!("{blacklisted} is a blacklisted name"));
        }
    }
    if CORE_MODULES.contains(&name.to_lowercase().as_str()) {
        problems.push(format!("{name} is a core module name"));
    }
    if name.chars().count() > MAX_LENGTH {
        problems.push(format!(
            "name can no longer contain more than {MAX_LENGTH} characters"
        ));
    }
    if name.to_lowercase() != name {
        problems.push("name can no longer contain capital letters".to_string());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.contains(['~', '\'', '!', '(', ')', '*']) {
        problems.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    if !is_url_safe(name) && !is_valid_scoped(name) {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    // The name doubles as a single directory under the working directory.
    if name.contains(['/', '\\']) {
        problems.push("name cannot contain path separators".to_string());
    }

    problems
}

/// `@scope/package`, each half URL-safe on its own.
fn is_valid_scoped(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('@') else {
        return false;
    };
    match rest.split_once('/') {
        Some((scope, package)) => {
            !scope.is_empty()
                && !package.is_empty()
                && !package.contains('/')
                && is_url_safe(scope)
                && is_url_safe(package)
        }
        None => false,
    }
}

/// True when percent-encoding `s` as a URI component would leave it as is.
fn is_url_safe(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
    })
}
