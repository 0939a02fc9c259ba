use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Per-entry results
// ---------------------------------------------------------------------------

/// Why an entry failed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    MalformedReference,
    FileNotFound,
    SymbolNotExported,
}

/// Outcome of checking one `graphs` entry.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub name: String,
    /// Raw `path:symbol` string from the manifest.
    pub reference: String,
    pub file_path: String,
    pub symbol_name: String,
    pub resolved_path: PathBuf,
    pub file_found: bool,
    pub symbol_exported: bool,
    /// Set when the file existed but could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_error: Option<String>,
}

impl ValidationResult {
    pub fn is_success(&self) -> bool {
        self.file_found && self.symbol_exported
    }

    pub fn violation(&self) -> Option<Violation> {
        if self.is_success() {
            None
        } else if self.file_path.is_empty() || self.symbol_name.is_empty() {
            Some(Violation::MalformedReference)
        } else if !self.file_found {
            Some(Violation::FileNotFound)
        } else {
            Some(Violation::SymbolNotExported)
        }
    }

    /// Write the "Checking" line to `out` and any violation lines to `err`.
    pub fn render(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Checking \"{}\" → {}", self.name, self.reference)?;

        match self.violation() {
            None => {}
            Some(Violation::MalformedReference) => writeln!(
                err,
                "Invalid reference \"{}\" for \"{}\": expected \"path:symbol\"",
                self.reference, self.name
            )?,
            Some(Violation::FileNotFound) => {
                writeln!(err, "File not found: {}", self.resolved_path.display())?
            }
            Some(Violation::SymbolNotExported) => {
                if let Some(ref message) = self.read_error {
                    writeln!(
                        err,
                        "Error reading file {}: {}",
                        self.resolved_path.display(),
                        message
                    )?;
                }
                writeln!(
                    err,
                    "Object \"{}\" is not exported from {}",
                    self.symbol_name,
                    self.resolved_path.display()
                )?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Whole-run report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub manifest_path: PathBuf,
    pub root: PathBuf,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub results: Vec<ValidationResult>,
    pub checked: usize,
    pub passed: usize,
    pub failed: usize,
    pub success: bool,
}

impl ValidationReport {
    pub fn new(manifest_path: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            root: root.into(),
            started_at: Utc::now(),
            completed_at: None,
            results: Vec::new(),
            checked: 0,
            passed: 0,
            failed: 0,
            // An empty manifest passes.
            success: true,
        }
    }

    pub fn record(&mut self, result: ValidationResult) {
        self.checked += 1;
        if result.is_success() {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.success = false;
        }
        self.results.push(result);
    }

    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Process exit status for this report.
    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }

    /// Final line printed after every entry.
    pub fn summary(&self) -> String {
        let headline = if self.success {
            format!(
                "✓ All {} graph reference(s) in {} are valid and exported correctly",
                self.checked,
                self.manifest_name()
            )
        } else {
            format!(
                "✗ {} of {} graph reference(s) in {} failed validation",
                self.failed,
                self.checked,
                self.manifest_name()
            )
        };
        format!(
            "{} (checked {}, passed {}, failed {})",
            headline, self.checked, self.passed, self.failed
        )
    }

    /// Write every entry followed by the summary. The summary goes to `out`
    /// on success and to `err` on failure.
    pub fn render(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        for result in &self.results {
            result.render(out, err)?;
        }
        if self.success {
            writeln!(out, "{}", self.summary())
        } else {
            writeln!(err, "{}", self.summary())
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
    }

    fn manifest_name(&self) -> String {
        self.manifest_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.manifest_path.display().to_string())
    }
}
