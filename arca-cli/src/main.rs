use arca_cli::commands::new_project;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "react-arca",
    version,
    about = "react-arca — scaffold a new React project"
)]
struct Cli {
    /// Project name, also used as the directory name
    name: Option<String>,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = new_project::run(cli.name.as_deref()) {
        new_project::report_error(&e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
