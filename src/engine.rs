use std::collections::HashSet;

use tracing::debug;

use crate::directives;
use crate::document::Node;
use crate::errors::{Diagnostic, DiagnosticCode, Result};
use crate::plan::Plan;

struct Evaluation {
    lines: Vec<String>,
}

/// Check that the plan fully explains the document without building output.
pub fn validate(root: &Node, plan: &Plan) -> Result<()> {
    evaluate(root, plan).map(|_| ())
}

/// Render the document to Markdown. Fails exactly when [`validate`] fails;
/// partial output is never produced.
pub fn render(root: &Node, plan: &Plan) -> Result<String> {
    let evaluation = evaluate(root, plan)?;
    Ok(evaluation.lines.join("\n"))
}

fn evaluate(root: &Node, plan: &Plan) -> Result<Evaluation> {
    if plan.version != Plan::SUPPORTED_VERSION {
        return Err(Diagnostic::new(
            DiagnosticCode::UnsupportedVersion,
            None,
            "",
            format!("plan version {} is not supported", plan.version),
        )
        .into());
    }

    let registry = directives::registry();
    let mut lines = Vec::new();
    let mut consumed: HashSet<String> = HashSet::new();

    for (index, directive) in plan.directives.iter().enumerate() {
        let execution = registry.execute(root, index, directive)?;
        debug!(
            index,
            op = %directive.op,
            lines = execution.lines.len(),
            consumed = execution.consumed.len(),
            "directive executed"
        );
        lines.extend(execution.lines);
        consumed.extend(execution.consumed);
    }

    // Coverage walks leaf paths in document order, so the first uncovered
    // pointer reported is deterministic.
    for path in root.leaf_paths() {
        if !consumed.contains(&path) {
            let message = format!("plan does not cover JSON path {path:?}");
            return Err(Diagnostic::new(DiagnosticCode::MissingCoverage, None, path, message).into());
        }
    }

    Ok(Evaluation { lines })
}
