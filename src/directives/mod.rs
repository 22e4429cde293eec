use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::document::Node;
use crate::errors::{Diagnostic, DiagnosticCode, Error, Result};
use crate::plan::Directive;
use crate::pointer::{self, Resolved};

mod bullet_list;
mod named_bullets;
mod table;

/// Output of one directive execution: emitted Markdown-fragment lines plus
/// the absolute pointers of every JSON value the directive consumed.
#[derive(Debug, Default)]
pub struct Execution {
    pub lines: Vec<String>,
    pub consumed: Vec<String>,
}

/// Trait for pluggable directive handlers dispatched by op name.
pub trait Handler: Send + Sync {
    fn execute(&self, root: &Node, index: usize, directive: &Directive) -> Result<Execution>;
}

/// Read-only registry mapping op names to handlers.
#[derive(Clone, Default)]
pub struct Registry {
    handlers: HashMap<&'static str, Arc<dyn Handler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut handlers: HashMap<&'static str, Arc<dyn Handler>> = HashMap::new();
        handlers.insert("bullet_list", Arc::new(bullet_list::BulletList));
        handlers.insert("named_bullets", Arc::new(named_bullets::NamedBullets));
        handlers.insert("table", Arc::new(table::Table));
        Self { handlers }
    }

    pub fn get(&self, op: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(op).cloned()
    }

    /// Dispatch one directive to its handler.
    pub fn execute(&self, root: &Node, index: usize, directive: &Directive) -> Result<Execution> {
        let handler = self.get(&directive.op).ok_or_else(|| {
            Diagnostic::new(
                DiagnosticCode::UnknownDirective,
                Some(index),
                directive.path.clone(),
                format!("directive {:?} is not supported", directive.op),
            )
        })?;
        handler.execute(root, index, directive)
    }
}

/// The process-wide builtin registry, constructed once.
pub fn registry() -> &'static Registry {
    static REGISTRY: Lazy<Registry> = Lazy::new(Registry::with_builtins);
    &REGISTRY
}

/// Resolve a directive's target path from the document root, mapping
/// resolution failures to an `invalid_path` diagnostic. Kind expectations are
/// checked by each handler against the returned node.
fn resolve_target<'a>(root: &'a Node, index: usize, expr: &str) -> Result<Resolved<'a>> {
    pointer::resolve(root, root, &[], expr).map_err(|err| {
        Diagnostic::new(
            DiagnosticCode::InvalidPath,
            Some(index),
            expr,
            format!("path {expr:?} could not be resolved: {err}"),
        )
        .into()
    })
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "."
    } else {
        path
    }
}

fn type_mismatch(index: usize, directive: &Directive, expected: &str) -> Error {
    Diagnostic::new(
        DiagnosticCode::TypeMismatch,
        Some(index),
        directive.path.clone(),
        format!(
            "directive {:?} requires path {:?} to resolve to {expected}",
            directive.op,
            display_path(&directive.path),
        ),
    )
    .into()
}

fn invalid_plan(index: usize, directive: &Directive, problem: &str) -> Error {
    Diagnostic::new(
        DiagnosticCode::InvalidPlan,
        Some(index),
        directive.path.clone(),
        format!("directive {:?} is invalid: {problem}", directive.op),
    )
    .into()
}

fn missing_field(index: usize, path: &str) -> Error {
    Diagnostic::new(
        DiagnosticCode::MissingField,
        Some(index),
        path,
        format!("field path {path:?} does not exist relative to the directive target"),
    )
    .into()
}

fn non_scalar_field(index: usize, path: &str) -> Error {
    Diagnostic::new(
        DiagnosticCode::NonScalarField,
        Some(index),
        path,
        format!("field path {path:?} must resolve to a scalar value"),
    )
    .into()
}

fn bullet(value: &str) -> String {
    format!("- {value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Plan;

    #[test]
    fn builtin_registry_knows_the_three_directives() {
        let registry = Registry::with_builtins();
        for op in ["bullet_list", "named_bullets", "table"] {
            assert!(registry.get(op).is_some(), "missing builtin {op}");
        }
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn unknown_op_is_a_diagnostic() {
        let root = Node::parse(br#"{"a": 1}"#).unwrap();
        let plan = Plan::parse(br#"{"version": 1, "directives": [{"op": "outline", "path": "."}]}"#)
            .unwrap();

        let err = registry()
            .execute(&root, 0, &plan.directives[0])
            .unwrap_err();
        let diagnostic = err.diagnostic().expect("expected diagnostic");
        assert_eq!(diagnostic.code, DiagnosticCode::UnknownDirective);
        assert_eq!(diagnostic.directive, Some(0));
    }
}
