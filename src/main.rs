use clap::Parser;
use langgraph_check::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let manifest_path = cli.manifest_path();

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let result = langgraph_check::runner::run_check(
        cli.root.as_deref(),
        &manifest_path,
        cli.report.as_deref(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    );

    match result {
        Ok(report) => std::process::exit(report.exit_code()),
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}
