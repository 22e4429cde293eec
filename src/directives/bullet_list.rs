use crate::document::Node;
use crate::errors::{Diagnostic, DiagnosticCode, Result};
use crate::plan::Directive;

use super::{bullet, display_path, invalid_plan, resolve_target, type_mismatch, Execution, Handler};

/// `bullet_list`: one `- value` line per element of a scalar array.
pub(super) struct BulletList;

impl Handler for BulletList {
    fn execute(&self, root: &Node, index: usize, directive: &Directive) -> Result<Execution> {
        if !directive.fields.is_empty() {
            return Err(invalid_plan(index, directive, "fields are not supported"));
        }

        let target = resolve_target(root, index, &directive.path)?;
        let Node::Array(items) = target.node else {
            return Err(type_mismatch(index, directive, "array"));
        };
        let array_pointer = target.pointer();

        let mut lines = Vec::with_capacity(items.len());
        let mut consumed = Vec::with_capacity(items.len());

        for (item_index, item) in items.iter().enumerate() {
            if !item.is_scalar() {
                return Err(Diagnostic::new(
                    DiagnosticCode::NonScalarItem,
                    Some(index),
                    directive.path.clone(),
                    format!(
                        "directive {:?} requires all array items at path {:?} to be scalar values",
                        directive.op,
                        display_path(&directive.path),
                    ),
                )
                .into());
            }

            lines.push(bullet(&item.format_scalar()?));
            consumed.push(format!("{array_pointer}/{item_index}"));
        }

        Ok(Execution { lines, consumed })
    }
}
