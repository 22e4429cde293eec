use crate::document::Node;
use crate::errors::Result;
use crate::plan::Directive;
use crate::pointer;

use super::{
    bullet, invalid_plan, missing_field, non_scalar_field, resolve_target, type_mismatch,
    Execution, Handler,
};

/// `named_bullets`: one `- **label:** value` line per projected field of an
/// object.
pub(super) struct NamedBullets;

impl Handler for NamedBullets {
    fn execute(&self, root: &Node, index: usize, directive: &Directive) -> Result<Execution> {
        if directive.fields.is_empty() {
            return Err(invalid_plan(index, directive, "fields must not be empty"));
        }

        let target = resolve_target(root, index, &directive.path)?;
        if !matches!(target.node, Node::Object(_)) {
            return Err(type_mismatch(index, directive, "object"));
        }

        let mut lines = Vec::with_capacity(directive.fields.len());
        let mut consumed = Vec::with_capacity(directive.fields.len());

        for field in &directive.fields {
            if field.path.is_empty() || field.path == "." {
                return Err(invalid_plan(index, directive, "field paths must not be empty"));
            }

            let resolved = pointer::resolve(root, target.node, &target.tokens, &field.path)
                .map_err(|_| missing_field(index, &field.path))?;
            if !resolved.node.is_scalar() {
                return Err(non_scalar_field(index, &field.path));
            }

            lines.push(bullet(&format!(
                "**{}:** {}",
                field.label,
                resolved.node.format_scalar()?
            )));
            consumed.push(resolved.pointer());
        }

        Ok(Execution { lines, consumed })
    }
}
