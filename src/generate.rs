use std::collections::HashSet;

use crate::document::Node;
use crate::errors::{Error, Result};
use crate::plan::{Directive, Field, Plan};
use crate::pointer;

/// Infer a minimal plan for a document with a simple shape: a flat object, an
/// array of scalars, or an array of flat objects. Anything nested is refused
/// rather than guessed at.
pub fn generate(root: &Node) -> Result<Plan> {
    match root {
        Node::Object(object_fields) => {
            let mut fields = Vec::with_capacity(object_fields.len());
            for (name, value) in object_fields {
                if !value.is_scalar() {
                    return Err(Error::Generate(
                        "automatic plan generation only supports flat objects with scalar fields"
                            .to_string(),
                    ));
                }
                fields.push(projected_field(name));
            }

            Ok(single_directive_plan(Directive {
                op: "named_bullets".to_string(),
                path: ".".to_string(),
                fields,
            }))
        }
        Node::Array(items) => {
            if items.iter().all(Node::is_scalar) {
                return Ok(single_directive_plan(Directive {
                    op: "bullet_list".to_string(),
                    path: ".".to_string(),
                    fields: Vec::new(),
                }));
            }

            let flat_objects = items.iter().all(|item| match item {
                Node::Object(object_fields) => {
                    object_fields.iter().all(|(_, value)| value.is_scalar())
                }
                _ => false,
            });
            if !flat_objects {
                return Err(Error::Generate(
                    "automatic plan generation only supports arrays of scalar values or arrays of flat objects"
                        .to_string(),
                ));
            }

            // Union of keys across all rows, first-appearance order. A key
            // absent from some row fails at render time, not here.
            let mut seen = HashSet::new();
            let mut fields = Vec::new();
            for item in items {
                if let Node::Object(object_fields) = item {
                    for (name, _) in object_fields {
                        if seen.insert(name.clone()) {
                            fields.push(projected_field(name));
                        }
                    }
                }
            }

            Ok(single_directive_plan(Directive {
                op: "table".to_string(),
                path: ".".to_string(),
                fields,
            }))
        }
        _ => Err(Error::Generate(
            "automatic plan generation only supports object and array roots".to_string(),
        )),
    }
}

/// Field paths are pointer-escaped so keys containing `/` or `~` survive the
/// resolver's decode pass; labels keep the raw key text.
fn projected_field(name: &str) -> Field {
    Field {
        path: pointer::escape_token(name),
        label: name.to_string(),
    }
}

fn single_directive_plan(directive: Directive) -> Plan {
    Plan {
        version: Plan::SUPPORTED_VERSION,
        directives: vec![directive],
    }
}
