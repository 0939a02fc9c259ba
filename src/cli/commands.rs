use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "langgraph-check",
    about = "Check that every graph in langgraph.json points at an exported symbol",
    long_about = "langgraph-check reads the \"graphs\" table of langgraph.json.\n\
        Each entry maps a graph name to \"path:symbol\". The file must exist\n\
        under the project root and must export the symbol.\n\
        Every violation is reported before the process exits non-zero.",
    version
)]
pub struct Cli {
    /// Project root that graph paths are resolved against [default: the manifest's directory]
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Path to langgraph.json or a directory containing it [default: <ROOT>/langgraph.json]
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Path to write the validation report as JSON
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl Cli {
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .or_else(|| self.root.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
