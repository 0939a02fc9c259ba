//! Textual export detection for JavaScript/TypeScript modules.
//!
//! A symbol counts as exported when the source contains any of:
//!
//! ```text
//! export const|let|var|function|class <symbol>
//! export { ..., <symbol>, ... }
//! export default <symbol>
//! ```
//!
//! The symbol must match as a whole JavaScript identifier, so `$` counts as
//! part of a name the same way letters, digits and `_` do. Comments, string literals and
//! `as` aliases are not understood, so the result is a best-effort answer.

use regex::Regex;
use std::path::Path;
use tracing::warn;

/// Declaration keywords accepted after `export`.
const DECLARATION_KEYWORDS: &[&str] = &["const", "let", "var", "function", "class"];

/// Start of input, or a character that cannot be part of an identifier.
const IDENT_START: &str = r"(?:^|[^\w$])";
/// A character that cannot be part of an identifier, or end of input.
const IDENT_END: &str = r"(?:[^\w$]|$)";

/// A compiled matcher for a single symbol name.
#[derive(Debug, Clone)]
pub struct ExportDetector {
    pattern: Regex,
}

impl ExportDetector {
    pub fn new(symbol: &str) -> Result<Self, regex::Error> {
        let (start, end) = (IDENT_START, IDENT_END);
        let name = regex::escape(symbol);
        let keywords = DECLARATION_KEYWORDS.join("|");

        let declaration = format!(r"{start}export\s+(?:{keywords})\s+{name}{end}");
        // Boundary characters inside the braces exclude `}` so a match stays within one list.
        let named_list =
            format!(r"{start}export\s*\{{(?:[^}}]*[^\w$}}])?{name}(?:[^\w$}}][^}}]*)?\}}");
        let default = format!(r"{start}export\s+default\s+{name}{end}");

        let pattern = Regex::new(&format!("{declaration}|{named_list}|{default}"))?;
        Ok(Self { pattern })
    }

    pub fn is_exported(&self, source: &str) -> bool {
        self.pattern.is_match(source)
    }

    /// Read `path` and scan it. Read errors are returned to the caller,
    /// which decides whether they fail the check.
    pub fn scan_file(&self, path: &Path) -> std::io::Result<bool> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.is_exported(&source))
    }
}

/// Whether `source` exports `symbol`.
pub fn is_exported(source: &str, symbol: &str) -> bool {
    match ExportDetector::new(symbol) {
        Ok(detector) => detector.is_exported(source),
        Err(e) => {
            warn!(symbol, error = %e, "Could not build export pattern");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_declaration_exports() {
        for keyword in DECLARATION_KEYWORDS {
            let source = format!("export {keyword} graph = build();");
            assert!(is_exported(&source, "graph"), "export {keyword} graph");
        }
        assert!(is_exported("export function graph() {}", "graph"));
        assert!(is_exported("export class   Graph extends Base {}", "Graph"));
        assert!(is_exported("const a = 1;\nexport\tconst\ngraph = a;", "graph"));
    }

    #[test]
    fn detects_named_export_list() {
        assert!(is_exported("export { graph };", "graph"));
        assert!(is_exported("export { a, graph, b };", "graph"));
        assert!(is_exported("export {\n  a,\n  graph,\n};", "graph"));
        assert!(is_exported("export {graph}", "graph"));
    }

    #[test]
    fn detects_default_export() {
        assert!(is_exported("const graph = 1;\nexport default graph;", "graph"));
        assert!(!is_exported("export default other;", "graph"));
    }

    #[test]
    fn whole_word_boundary_holds() {
        assert!(!is_exported("export const graphFoo = 1;", "graph"));
        assert!(!is_exported("export function myGraph() {}", "Graph"));
        assert!(!is_exported("export { graphFoo, fooGraph };", "graph"));
        assert!(!is_exported("export default graph_v2;", "graph"));
    }

    #[test]
    fn dollar_sign_is_part_of_the_identifier() {
        assert!(!is_exported("export const graph$x = 1;", "graph"));
        assert!(!is_exported("export const $graph = 1;", "graph"));
        assert!(!is_exported("export { graph$, $graph };", "graph"));
        assert!(!is_exported("export default graph$;", "graph"));

        assert!(is_exported("export { $graph };", "$graph"));
        assert!(is_exported("export {$graph}", "$graph"));
        assert!(is_exported("export const graph$ = 1;", "graph$"));
        assert!(is_exported("export default $graph", "$graph"));
    }

    #[test]
    fn list_match_stays_inside_one_list() {
        assert!(!is_exported("export { other }; const graph = 1; }", "graph"));
        assert!(is_exported("export { a, b } from './x';\nexport { graph };", "graph"));
    }

    #[test]
    fn export_keyword_needs_its_own_boundary() {
        assert!(!is_exported("reexport const graph = 1;", "graph"));
        assert!(!is_exported("$export default graph;", "graph"));
        assert!(is_exported("export default graph", "graph"));
    }

    #[test]
    fn unexported_declaration_is_not_exported() {
        assert!(!is_exported("const graph = 1;", "graph"));
        assert!(!is_exported("function graph() {}\nexport { other };", "graph"));
        assert!(!is_exported("export async function graph() {}", "graph"));
    }

    #[test]
    fn alias_list_matches_both_names() {
        let source = "export { internal as graph };";
        assert!(is_exported(source, "internal"));
        // `graph` is also inside the braces, so the list pattern accepts it.
        assert!(is_exported(source, "graph"));
    }

    #[test]
    fn symbol_is_matched_literally() {
        assert!(!is_exported("export const ab = 1;", "a.b"));
        assert!(!is_exported("export const aaa = 1;", "a+"));
        assert!(is_exported("export const a = 1;", "a"));
    }

    #[test]
    fn comment_text_is_a_known_false_positive() {
        assert!(is_exported("// export function graph() {}", "graph"));
    }

    #[test]
    fn scan_file_reports_read_errors() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let detector = ExportDetector::new("graph").expect("pattern");

        let missing = dir.path().join("missing.js");
        assert!(detector.scan_file(&missing).is_err());

        let present = dir.path().join("graph.js");
        std::fs::write(&present, "export const graph = 1;").expect("write");
        assert!(detector.scan_file(&present).expect("readable"));
    }
}
