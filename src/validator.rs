use crate::detector::ExportDetector;
use crate::manifest::{GraphManifest, GraphReference, ManifestError};
use crate::report::{ValidationReport, ValidationResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Checks manifest entries against files under a project root.
#[derive(Debug, Clone)]
pub struct Validator {
    root: PathBuf,
}

impl Validator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the manifest at `manifest_path` and check every entry.
    /// Only manifest-level problems are returned as errors.
    pub fn validate_file(&self, manifest_path: &Path) -> Result<ValidationReport, ManifestError> {
        let manifest = GraphManifest::from_file(manifest_path)?;
        Ok(self.validate(&manifest, manifest_path))
    }

    /// Check entries one by one in declared order. Per-entry failures are
    /// collected, never raised.
    pub fn validate(&self, manifest: &GraphManifest, manifest_path: &Path) -> ValidationReport {
        let mut report = ValidationReport::new(manifest_path, &self.root);
        for (name, reference) in &manifest.graphs {
            report.record(self.check_entry(name, reference));
        }
        report.complete();
        report
    }

    pub fn check_entry(&self, name: &str, reference: &str) -> ValidationResult {
        let Some(graph) = GraphReference::parse(name, reference) else {
            debug!(graph = name, reference, "Malformed graph reference");
            return ValidationResult {
                name: name.to_string(),
                reference: reference.to_string(),
                file_path: String::new(),
                symbol_name: String::new(),
                resolved_path: self.root.clone(),
                file_found: false,
                symbol_exported: false,
                read_error: None,
            };
        };

        let resolved_path = self.root.join(&graph.file_path);
        let file_found = resolved_path.exists();
        let mut symbol_exported = false;
        let mut read_error = None;

        if file_found {
            match ExportDetector::new(&graph.symbol_name)
                .map_err(|e| e.to_string())
                .and_then(|d| d.scan_file(&resolved_path).map_err(|e| e.to_string()))
            {
                Ok(exported) => symbol_exported = exported,
                Err(message) => {
                    warn!(
                        path = %resolved_path.display(),
                        error = %message,
                        "Could not scan file for exports"
                    );
                    read_error = Some(message);
                }
            }
        }

        debug!(
            graph = name,
            path = %resolved_path.display(),
            symbol = %graph.symbol_name,
            file_found,
            symbol_exported,
            "Checked graph reference"
        );

        ValidationResult {
            name: graph.name,
            reference: reference.to_string(),
            file_path: graph.file_path,
            symbol_name: graph.symbol_name,
            resolved_path,
            file_found,
            symbol_exported,
            read_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Violation;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        for (path, content) in files {
            let full = dir.path().join(path);
            std::fs::create_dir_all(full.parent().expect("parent")).expect("mkdir");
            std::fs::write(full, content).expect("write");
        }
        dir
    }

    #[test]
    fn exported_symbol_passes() {
        let dir = project(&[("src/a.js", "export function foo() {}")]);
        let result = Validator::new(dir.path()).check_entry("g1", "src/a.js:foo");
        assert!(result.file_found);
        assert!(result.symbol_exported);
        assert!(result.is_success());
        assert_eq!(result.resolved_path, dir.path().join("src/a.js"));
    }

    #[test]
    fn missing_file_skips_export_check() {
        let dir = project(&[]);
        let result = Validator::new(dir.path()).check_entry("g1", "src/missing.js:foo");
        assert!(!result.file_found);
        assert!(!result.symbol_exported);
        assert!(result.read_error.is_none());
        assert_eq!(result.violation(), Some(Violation::FileNotFound));
    }

    #[test]
    fn unexported_symbol_fails() {
        let dir = project(&[("src/a.js", "export function foo() {}")]);
        let result = Validator::new(dir.path()).check_entry("g1", "src/a.js:bar");
        assert!(result.file_found);
        assert!(!result.symbol_exported);
        assert_eq!(result.violation(), Some(Violation::SymbolNotExported));
    }

    #[test]
    fn unreadable_file_counts_as_not_exported() {
        // A directory exists but cannot be read as a file.
        let dir = project(&[("src/graph/index.js", "export const g = 1;")]);
        let result = Validator::new(dir.path()).check_entry("g1", "src/graph:g");
        assert!(result.file_found);
        assert!(!result.symbol_exported);
        assert!(result.read_error.is_some());
    }

    #[test]
    fn malformed_reference_is_a_per_entry_failure() {
        let dir = project(&[]);
        let result = Validator::new(dir.path()).check_entry("g1", "src/a.js");
        assert!(!result.is_success());
        assert_eq!(result.violation(), Some(Violation::MalformedReference));
    }

    #[test]
    fn run_continues_past_failures_in_order() {
        let dir = project(&[
            ("src/a.js", "export const a = 1;"),
            ("src/c.ts", "const c = 1;\nexport { c };"),
        ]);
        let manifest = GraphManifest::parse_json(
            r#"{"graphs": {"a": "src/a.js:a", "b": "src/b.js:b", "c": "src/c.ts:c"}}"#,
        )
        .expect("manifest");
        let report =
            Validator::new(dir.path()).validate(&manifest, &dir.path().join("langgraph.json"));

        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(!report.success);
        assert_eq!(report.failures().count(), 1);
        assert!(report.completed_at.is_some());
    }
}
