use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up when the manifest path names a directory.
pub const MANIFEST_FILE_NAME: &str = "langgraph.json";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Manifest-level failures. Any of these aborts the run before an entry is checked.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid or missing \"graphs\" object in manifest")]
    MissingGraphs,
    #[error("\"graphs\" must be an object, found {0}")]
    InvalidGraphs(&'static str),
    #[error("graph \"{name}\" must map to a \"path:symbol\" string, found {found}")]
    InvalidEntry { name: String, found: &'static str },
}

// ---------------------------------------------------------------------------
// Graph references
// ---------------------------------------------------------------------------

/// One `graphs` entry split into the file it points at and the symbol it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphReference {
    pub name: String,
    pub file_path: String,
    pub symbol_name: String,
}

impl GraphReference {
    /// Split `reference` on its first `:`. Returns `None` when there is no
    /// separator or either side is empty.
    pub fn parse(name: &str, reference: &str) -> Option<Self> {
        let (file_path, symbol_name) = reference.split_once(':')?;
        if file_path.is_empty() || symbol_name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            file_path: file_path.to_string(),
            symbol_name: symbol_name.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Top-level manifest
// ---------------------------------------------------------------------------

/// The `graphs` table of a `langgraph.json`, in declared order.
#[derive(Debug, Clone, Default)]
pub struct GraphManifest {
    /// `(graph name, raw reference)` pairs.
    pub graphs: Vec<(String, String)>,
}

impl GraphManifest {
    /// Load a manifest from `path`. A directory is resolved to the
    /// `langgraph.json` inside it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = resolve_manifest_path(path.as_ref());
        if !path.is_file() {
            return Err(ManifestError::NotFound(path));
        }
        let content = std::fs::read_to_string(&path)?;
        Self::parse_json(&content)
    }

    /// Parse and validate from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ManifestError> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_value(document)
    }

    fn from_value(document: Value) -> Result<Self, ManifestError> {
        let graphs = match document.get("graphs") {
            None | Some(Value::Null) => return Err(ManifestError::MissingGraphs),
            Some(Value::Object(graphs)) => graphs,
            Some(other) => return Err(ManifestError::InvalidGraphs(type_name(other))),
        };

        // serde_json is built with `preserve_order`, so iteration follows the file.
        let graphs = graphs
            .iter()
            .map(|(name, reference)| match reference {
                Value::String(reference) => Ok((name.clone(), reference.clone())),
                other => Err(ManifestError::InvalidEntry {
                    name: name.clone(),
                    found: type_name(other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { graphs })
    }
}

/// Map a directory to the manifest file inside it; leave file paths alone.
pub fn resolve_manifest_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(MANIFEST_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Directory holding the manifest file. A bare file name maps to `.`.
pub fn manifest_dir(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
