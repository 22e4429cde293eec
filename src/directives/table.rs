use itertools::Itertools;

use crate::document::Node;
use crate::errors::Result;
use crate::plan::Directive;
use crate::pointer;

use super::{
    invalid_plan, missing_field, non_scalar_field, resolve_target, type_mismatch, Execution,
    Handler,
};

/// `table`: a Markdown table with one column per field and one row per array
/// element. Column count and order are fixed by the plan; a row missing a
/// declared field is a resolution failure, never a blank cell.
pub(super) struct Table;

impl Handler for Table {
    fn execute(&self, root: &Node, index: usize, directive: &Directive) -> Result<Execution> {
        if directive.fields.is_empty() {
            return Err(invalid_plan(index, directive, "fields must not be empty"));
        }

        let target = resolve_target(root, index, &directive.path)?;
        let Node::Array(rows) = target.node else {
            return Err(type_mismatch(index, directive, "array"));
        };

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(format!(
            "| {} |",
            directive.fields.iter().map(|field| &field.label).join(" | ")
        ));
        lines.push(format!(
            "| {} |",
            directive.fields.iter().map(|_| "---").join(" | ")
        ));

        let mut consumed = Vec::with_capacity(rows.len() * directive.fields.len());

        for (row_index, row) in rows.iter().enumerate() {
            if !matches!(row, Node::Object(_)) {
                return Err(invalid_plan(index, directive, "all array items must be objects"));
            }

            let mut row_tokens = target.tokens.clone();
            row_tokens.push(row_index.to_string());

            let mut cells = Vec::with_capacity(directive.fields.len());
            for field in &directive.fields {
                if field.path.is_empty() || field.path == "." {
                    return Err(invalid_plan(index, directive, "field paths must not be empty"));
                }

                let resolved = pointer::resolve(root, row, &row_tokens, &field.path)
                    .map_err(|_| missing_field(index, &field.path))?;
                if !resolved.node.is_scalar() {
                    return Err(non_scalar_field(index, &field.path));
                }

                cells.push(resolved.node.format_scalar()?);
                consumed.push(resolved.pointer());
            }

            lines.push(format!("| {} |", cells.iter().join(" | ")));
        }

        Ok(Execution { lines, consumed })
    }
}
