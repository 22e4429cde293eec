use std::fmt;

use serde_json::Value;

use crate::errors::{Error, Result};
use crate::pointer;

/// The kind of a [`Node`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
        })
    }
}

/// An immutable, order-preserving JSON tree. Numbers keep their exact source
/// text so scalar formatting round-trips byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(Vec<(String, Node)>),
    Array(Vec<Node>),
    String(String),
    Number(String),
    Bool(bool),
    Null,
}

impl Node {
    /// Parse a JSON document. Trailing non-whitespace content after the
    /// top-level value is rejected. Duplicate object keys collapse to one
    /// entry at the first key's position carrying the last value.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(data).map_err(|err| Error::Document(err.to_string()))?;
        Ok(Node::from_value(value))
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n.to_string()),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from_value).collect()),
            Value::Object(map) => Node::Object(
                map.into_iter()
                    .map(|(name, value)| (name, Node::from_value(value)))
                    .collect(),
            ),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Node::Object(_) => Kind::Object,
            Node::Array(_) => Kind::Array,
            Node::String(_) => Kind::String,
            Node::Number(_) => Kind::Number,
            Node::Bool(_) => Kind::Boolean,
            Node::Null => Kind::Null,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Node::Object(_) | Node::Array(_))
    }

    /// Object field lookup by exact name, first match.
    pub fn find_field(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Object(fields) => fields
                .iter()
                .find(|(field_name, _)| field_name == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Render a scalar node as Markdown cell/bullet text. Containers are a
    /// type error.
    pub fn format_scalar(&self) -> Result<String> {
        match self {
            Node::String(s) => Ok(s.clone()),
            Node::Number(text) => Ok(text.clone()),
            Node::Bool(true) => Ok("true".to_string()),
            Node::Bool(false) => Ok("false".to_string()),
            Node::Null => Ok("null".to_string()),
            other => Err(Error::NotScalar(other.kind())),
        }
    }

    /// Absolute pointers of every scalar reachable from this node, in
    /// document order. This is the authoritative coverage set.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        let mut tokens = Vec::new();
        self.collect_leaf_paths(&mut tokens, &mut paths);
        paths
    }

    fn collect_leaf_paths(&self, tokens: &mut Vec<String>, paths: &mut Vec<String>) {
        match self {
            Node::Object(fields) => {
                for (name, value) in fields {
                    tokens.push(name.clone());
                    value.collect_leaf_paths(tokens, paths);
                    tokens.pop();
                }
            }
            Node::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    tokens.push(index.to_string());
                    item.collect_leaf_paths(tokens, paths);
                    tokens.pop();
                }
            }
            _ => paths.push(pointer::encode(tokens)),
        }
    }
}
