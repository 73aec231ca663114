//! Grounding context for the model: a plain-text digest of the eligible catalog.

use crate::catalog::Module;
use std::fmt::Write;

/// Serialize eligible modules into the context block handed to the model.
///
/// Deterministic and order-preserving; one labeled block per module, blank-line
/// separated. The whole catalog is always included - there is no truncation,
/// so a very large catalog will produce a very large prompt.
pub fn build_context(modules: &[Module]) -> String {
    let mut out = String::new();
    for m in modules {
        // write! to a String cannot fail
        let _ = writeln!(out, "Module: {}", m.module);
        let _ = writeln!(out, "Description: {}", m.description);
        let _ = writeln!(out, "Use case: {}", m.use_case);
        let _ = writeln!(out, "Chart type: {}", m.chart_type);
        out.push('\n');
    }
    out
}
