pub mod errors;
pub mod document;
pub mod pointer;
pub mod plan;
pub mod directives; // plugin model: op name -> handler
pub mod engine;
mod generate;

pub use document::{Kind, Node};
pub use errors::{Diagnostic, DiagnosticCode, Error, Result};
pub use plan::{Directive, Field, Plan};

/// Infer a minimal plan for a document with a simple, flat shape. Nested
/// structure is refused rather than guessed at.
pub fn generate_plan(root: &Node) -> Result<Plan> {
    generate::generate(root)
}

/// Check a plan against a document without building output: version check,
/// directive execution, and closed-world leaf coverage.
pub fn validate_plan(root: &Node, plan: &Plan) -> Result<()> {
    engine::validate(root, plan)
}

/// Render a document to Markdown under a plan. Succeeds exactly when
/// [`validate_plan`] succeeds; the output is the directives' lines joined
/// with newlines.
pub fn render_markdown(root: &Node, plan: &Plan) -> Result<String> {
    engine::render(root, plan)
}
