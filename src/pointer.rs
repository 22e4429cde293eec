use thiserror::Error;

use crate::document::{Kind, Node};

/// Why a path expression failed to resolve against a particular document.
/// The directive layer maps these into structured diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("field {0:?} does not exist")]
    MissingField(String),

    #[error("array index {0:?} is invalid")]
    InvalidIndex(String),

    #[error("array index {0:?} is out of bounds")]
    OutOfBounds(String),

    #[error("cannot descend into {0}")]
    NotTraversable(Kind),

    #[error("absolute JSON pointer must start with '/'")]
    NotAbsolute,
}

/// A resolved path expression: the target node together with the absolute
/// token path that reaches it from the document root.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub node: &'a Node,
    pub tokens: Vec<String>,
}

impl Resolved<'_> {
    /// Canonical absolute pointer string, the identifier used for coverage
    /// tracking.
    pub fn pointer(&self) -> String {
        encode(&self.tokens)
    }
}

/// Escape a single reference token (`~` before `/`, per RFC 6901).
pub fn escape_token(token: &str) -> String {
    if !token.contains('~') && !token.contains('/') {
        return token.to_string();
    }
    token.replace('~', "~0").replace('/', "~1")
}

/// Unescape a single reference token (`~1` before `~0`).
pub fn unescape_token(token: &str) -> String {
    if !token.contains('~') {
        return token.to_string();
    }
    token.replace("~1", "/").replace("~0", "~")
}

/// Encode tokens as an absolute pointer. No tokens encodes as the empty
/// string, the pointer of the document root.
pub fn encode(tokens: &[String]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        out.push_str(&escape_token(token));
    }
    out
}

/// Parse an absolute pointer expression into unescaped tokens.
pub fn parse_absolute(expr: &str) -> Result<Vec<String>, ResolveError> {
    if expr.is_empty() {
        return Ok(Vec::new());
    }
    let rest = expr.strip_prefix('/').ok_or(ResolveError::NotAbsolute)?;
    Ok(rest.split('/').map(unescape_token).collect())
}

/// Parse a plan-relative path expression. Empty and `.` segments are
/// discarded, so `a/b`, `./a/b`, and `a//b` name the same path.
pub fn parse_relative(expr: &str) -> Vec<String> {
    if expr.is_empty() || expr == "." {
        return Vec::new();
    }
    expr.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .map(unescape_token)
        .collect()
}

/// Resolve a path expression. An empty expression or `.` names the current
/// node; a leading `/` makes the expression absolute, navigated from the
/// root; anything else is navigated relative to `current`, whose location is
/// `current_tokens`.
pub fn resolve<'a>(
    root: &'a Node,
    current: &'a Node,
    current_tokens: &[String],
    expr: &str,
) -> Result<Resolved<'a>, ResolveError> {
    if expr.is_empty() || expr == "." {
        return Ok(Resolved {
            node: current,
            tokens: current_tokens.to_vec(),
        });
    }
    if expr.starts_with('/') {
        navigate(root, parse_absolute(expr)?, Vec::new())
    } else {
        navigate(current, parse_relative(expr), current_tokens.to_vec())
    }
}

fn navigate<'a>(
    start: &'a Node,
    tokens: Vec<String>,
    mut base: Vec<String>,
) -> Result<Resolved<'a>, ResolveError> {
    let mut current = start;
    for token in tokens {
        match current {
            Node::Object(_) => {
                current = current
                    .find_field(&token)
                    .ok_or_else(|| ResolveError::MissingField(token.clone()))?;
            }
            Node::Array(items) => {
                let index: usize = token
                    .parse()
                    .map_err(|_| ResolveError::InvalidIndex(token.clone()))?;
                current = items
                    .get(index)
                    .ok_or_else(|| ResolveError::OutOfBounds(token.clone()))?;
            }
            _ => return Err(ResolveError::NotTraversable(current.kind())),
        }
        base.push(token);
    }
    Ok(Resolved {
        node: current,
        tokens: base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc() -> Node {
        Node::parse(br#"{"meta": {"name": "report", "a/b": true}, "items": [{"id": 1}, {"id": 2}]}"#)
            .unwrap()
    }

    #[test]
    fn empty_and_dot_name_the_current_node() {
        let root = doc();
        let here = vec!["meta".to_string()];
        let current = root.find_field("meta").unwrap();

        for expr in ["", "."] {
            let resolved = resolve(&root, current, &here, expr).unwrap();
            assert_eq!(resolved.pointer(), "/meta");
            assert!(std::ptr::eq(resolved.node, current));
        }
    }

    #[test]
    fn absolute_expressions_ignore_the_current_scope() {
        let root = doc();
        let here = vec!["items".to_string(), "0".to_string()];
        let current = resolve(&root, &root, &[], "/items/0").unwrap().node;

        let resolved = resolve(&root, current, &here, "/meta/name").unwrap();
        assert_eq!(resolved.pointer(), "/meta/name");
        assert_eq!(resolved.node, &Node::String("report".into()));
    }

    #[test]
    fn relative_expressions_extend_the_current_path() {
        let root = doc();
        let resolved = resolve(&root, &root, &[], "items/1/id").unwrap();
        assert_eq!(resolved.pointer(), "/items/1/id");
        assert_eq!(resolved.node, &Node::Number("2".into()));
    }

    #[test]
    fn relative_expressions_skip_empty_and_dot_segments() {
        let root = doc();
        let resolved = resolve(&root, &root, &[], "./meta//name").unwrap();
        assert_eq!(resolved.pointer(), "/meta/name");
    }

    #[test]
    fn escaped_tokens_resolve_and_reencode() {
        let root = doc();
        let resolved = resolve(&root, &root, &[], "/meta/a~1b").unwrap();
        assert_eq!(resolved.node, &Node::Bool(true));
        assert_eq!(resolved.pointer(), "/meta/a~1b");
    }

    #[test]
    fn missing_fields_and_bad_indexes_fail() {
        let root = doc();
        assert_eq!(
            resolve(&root, &root, &[], "/meta/nope").unwrap_err(),
            ResolveError::MissingField("nope".into())
        );
        assert_eq!(
            resolve(&root, &root, &[], "/items/x").unwrap_err(),
            ResolveError::InvalidIndex("x".into())
        );
        assert_eq!(
            resolve(&root, &root, &[], "/items/2").unwrap_err(),
            ResolveError::OutOfBounds("2".into())
        );
    }

    #[test]
    fn descending_into_a_scalar_fails() {
        let root = doc();
        assert_eq!(
            resolve(&root, &root, &[], "/meta/name/x").unwrap_err(),
            ResolveError::NotTraversable(Kind::String)
        );
    }

    #[test]
    fn escape_orders_the_two_rewrites() {
        assert_eq!(escape_token("~1"), "~01");
        assert_eq!(unescape_token("~01"), "~1");
        assert_eq!(escape_token("a/b~c"), "a~1b~0c");
    }
}
