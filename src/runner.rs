use crate::manifest::{manifest_dir, resolve_manifest_path};
use crate::report::ValidationReport;
use crate::validator::Validator;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Run the full check and print the report. Manifest-level failures are
/// returned as errors; otherwise the report is returned for the caller to
/// map to an exit status.
///
/// Graph paths resolve against `root`, or against the manifest's own
/// directory when no root is given.
pub fn run_check(
    root: Option<&Path>,
    manifest_path: &Path,
    report_output: Option<&Path>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<ValidationReport> {
    let manifest_path = resolve_manifest_path(manifest_path);
    let validator = Validator::new(match root {
        Some(root) => root.to_path_buf(),
        None => manifest_dir(&manifest_path),
    });

    let report = validator.validate_file(&manifest_path)?;

    info!(
        manifest = %manifest_path.display(),
        root = %validator.root().display(),
        graphs = report.results.len(),
        "Loaded manifest"
    );

    report.render(out, err).context("Failed to write report")?;

    if let Some(path) = report_output {
        report
            .write_to_file(path)
            .with_context(|| format!("Failed to write report to {:?}", path))?;
        info!(path = ?path, "Validation report written");
    }

    Ok(report)
}
